//! `SeaORM` Entity for form_field_definitions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "form_field_definitions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub version_id: Uuid,
    pub position: i32,
    pub rubric: String,
    pub field_code: String,
    #[sea_orm(column_type = "Text")]
    pub label: String,
    pub is_calculated: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub formula: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_versions::Entity",
        from = "Column::VersionId",
        to = "super::form_versions::Column::Id",
        on_delete = "Cascade"
    )]
    FormVersions,
    #[sea_orm(has_many = "super::declaration_values::Entity")]
    DeclarationValues,
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
