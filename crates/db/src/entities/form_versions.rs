//! `SeaORM` Entity for form_versions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "form_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub form_code: String,
    pub version_number: String,
    pub effective_from: Option<Date>,
    pub effective_to: Option<Date>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::form_field_definitions::Entity")]
    FormFieldDefinitions,
    #[sea_orm(has_many = "super::declarations::Entity")]
    Declarations,
}

impl Related<super::form_field_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormFieldDefinitions.def()
    }
}

impl Related<super::declarations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Declarations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
