use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound("x".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("x".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::BusinessRule("x".into()), 422, "BUSINESS_RULE_VIOLATION")]
#[case(AppError::Conflict("x".into()), 409, "CONFLICT")]
#[case(AppError::Database("x".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Configuration("x".into()), 500, "CONFIGURATION_ERROR")]
#[case(AppError::Internal("x".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_codes(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
    assert_eq!(err.is_client_error(), status < 500);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::NotFound("account 1100000000".into())),
        "Not found: account 1100000000"
    );
    assert_eq!(
        format!("{}", AppError::BusinessRule("msg".into())),
        "Business rule violation: msg"
    );
    assert_eq!(
        format!("{}", AppError::Configuration("msg".into())),
        "Configuration error: msg"
    );
}

#[test]
fn test_config_error_maps_to_configuration() {
    let err: AppError = config::ConfigError::Message("missing database.url".into()).into();
    assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    assert!(err.to_string().contains("missing database.url"));
}
