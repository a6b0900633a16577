//! Form 200 (monthly VAT) version 6.

use chrono::NaiveDate;

use super::error::TaxError;
use super::field::FieldDefinition;

/// Identity of a form version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    /// Form code, e.g. `"200"`.
    pub form_code: &'static str,
    /// Version within the form.
    pub version_number: &'static str,
    /// First day the version applies.
    pub effective_from: NaiveDate,
}

impl FormSpec {
    /// Form 200 version 6, effective 2025-01-01.
    pub const FORM_200_V6: Self = Self {
        form_code: "200",
        version_number: "6",
        effective_from: match NaiveDate::from_ymd_opt(2025, 1, 1) {
            Some(date) => date,
            None => NaiveDate::MIN,
        },
    };
}

/// `(rubric, code, label, formula)` rows of Form 200 v6, in form order.
pub const FORM_200_V6: &[(&str, &str, &str, Option<&str>)] = &[
    // Rubro 1: output tax
    ("Rubro 1", "13", "Ventas de bienes y/o servicios gravados en el mercado interno", None),
    ("Rubro 1", "14", "Exportación de bienes y operaciones exentas", None),
    ("Rubro 1", "15", "Ventas gravadas a Tasa Cero", None),
    ("Rubro 1", "505", "Ventas no gravadas y operaciones que no son objeto del IVA", None),
    ("Rubro 1", "16", "Valor atribuido a bienes y/o servicios retirados y consumos particulares", None),
    ("Rubro 1", "17", "Devoluciones y rescisiones efectuadas en el período", None),
    ("Rubro 1", "18", "Descuentos, bonificaciones y rebajas obtenidas en el período", None),
    ("Rubro 1", "39", "Débito Fiscal (C13+C16+C17+C18)*13%", Some("(C13 + C16 + C17 + C18) * 0.13")),
    ("Rubro 1", "55", "Débito Fiscal actualizado correspondiente a reintegros", None),
    ("Rubro 1", "19", "Débito Fiscal actualizado correspondiente a Conciliaciones", None),
    ("Rubro 1", "1002", "Total Débito Fiscal del período", Some("C39 + C55 + C19")),
    // Rubro 2: input tax
    ("Rubro 2", "11", "Total Compras correspondientes a actividades gravadas y/o no gravadas", None),
    ("Rubro 2", "26", "Compra directamente vinculadas a actividad gravada", None),
    ("Rubro 2", "31", "Compras en las que no es posible discriminar su vinculación", None),
    ("Rubro 2", "27", "Devoluciones y rescisiones recibidas en el período", None),
    ("Rubro 2", "28", "Descuentos, bonificaciones y rebajas otorgadas en el período", None),
    ("Rubro 2", "114", "Crédito Fiscal correspondiente a: ((C26 + C27 + C28) * 13%)", Some("(C26 + C27 + C28) * 0.13")),
    ("Rubro 2", "30", "Crédito fiscal actualizado correspondiente a Conciliaciones", None),
    ("Rubro 2", "1003", "Crédito fiscal proporcional correspondiente a la actividad gravada", None),
    ("Rubro 2", "1004", "Total Crédito Fiscal del periodo (C114+C30+C1003)", Some("C114 + C30 + C1003")),
    // Rubro 3: balance
    ("Rubro 3", "693", "Diferencia a favor del Contribuyente (C1004 - C1002; Si >0)", Some("GREATEST(0, C1004 - C1002)")),
    ("Rubro 3", "909", "Diferencia a favor del Fisco o Impuesto Determinado (C1002 - C1004; Si > 0)", Some("GREATEST(0, C1002 - C1004)")),
    ("Rubro 3", "635", "Importe Utilizado Del Saldo De Crédito Fiscal Actualizado", None),
    ("Rubro 3", "1001", "Saldo de Impuesto Determinado a favor del Fisco (C909-C635;Si > 0)", Some("GREATEST(0, C909 - C635)")),
    ("Rubro 3", "621", "Pago a cuenta del 50% de contribuciones patronales pagadas del periodo", None),
    ("Rubro 3", "629", "Saldo a favor del Fisco despues de compensar pagos a cuenta por contribuciones patronales", None),
    ("Rubro 3", "622", "Importe Utilizado De Pagos a Cuenta Realizados en el Periodo", None),
    ("Rubro 3", "640", "Importe Utilizado del Saldo de Pagos a Cuenta", None),
    ("Rubro 3", "468", "Saldo a favor del fisco despues de compensar pagos a cuenta (C629-C622-C640; Si > 0)", Some("GREATEST(0, C629 - C622 - C640)")),
    ("Rubro 3", "465", "Pago a cuenta del 5% por compras a contribuyentes del SIETE- RG", None),
    ("Rubro 3", "466", "Importe Utilizado De Pagos A Cuenta Por Compras a Contribuyentes Del Siete - RG", None),
    ("Rubro 3", "996", "Saldo a favor del Fisco (C468-C465-C466; Si > 0)", Some("GREATEST(0, C468 - C465 - C466)")),
];

/// Parsed Form 200 v6 field table.
///
/// # Errors
///
/// Only if the built-in table were malformed.
pub fn form_200_v6() -> Result<Vec<FieldDefinition>, TaxError> {
    FORM_200_V6
        .iter()
        .map(|(rubric, code, label, formula)| FieldDefinition::parse(rubric, code, label, *formula))
        .collect()
}
