//! `SeaORM` Entity for declaration_values table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "declaration_values")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub declaration_id: Uuid,
    pub field_definition_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub value: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::declarations::Entity",
        from = "Column::DeclarationId",
        to = "super::declarations::Column::Id",
        on_delete = "Cascade"
    )]
    Declarations,
    #[sea_orm(
        belongs_to = "super::form_field_definitions::Entity",
        from = "Column::FieldDefinitionId",
        to = "super::form_field_definitions::Column::Id"
    )]
    FormFieldDefinitions,
}

impl Related<super::declarations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Declarations.def()
    }
}

impl Related<super::form_field_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormFieldDefinitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
