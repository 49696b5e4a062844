//! Sale line entity - One row of the append-only sales ledger.
//!
//! A line attributes `quantity` units of a dish to a team. Lines are never
//! updated; they are only deleted in bulk by an admin correction of the
//! dish or by a full reset.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_lines")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Key of the configured team the sale is attributed to
    pub team: String,
    /// Dish that was sold
    pub dish_id: i64,
    /// Units sold, always positive
    pub quantity: i32,
    /// When the sale was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `SaleLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one dish
    #[sea_orm(
        belongs_to = "super::dish::Entity",
        from = "Column::DishId",
        to = "super::dish::Column::Id"
    )]
    Dish,
}

impl Related<super::dish::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dish.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
