//! `SeaORM` Entity for declarations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "declarations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub taxpayer_id: Uuid,
    pub version_id: Uuid,
    pub month: i16,
    pub year: i32,
    pub status: String,
    pub transaction_number: Option<String>,
    pub presentation_date: Option<DateTime>,
    pub print_date: Option<DateTime>,
    pub pdf_user: Option<String>,
    pub submitted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::taxpayers::Entity",
        from = "Column::TaxpayerId",
        to = "super::taxpayers::Column::Id"
    )]
    Taxpayers,
    #[sea_orm(
        belongs_to = "super::form_versions::Entity",
        from = "Column::VersionId",
        to = "super::form_versions::Column::Id"
    )]
    FormVersions,
    #[sea_orm(has_many = "super::declaration_values::Entity")]
    DeclarationValues,
}

impl Related<super::taxpayers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Taxpayers.def()
    }
}

impl Related<super::form_versions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormVersions.def()
    }
}

impl Related<super::declaration_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeclarationValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
