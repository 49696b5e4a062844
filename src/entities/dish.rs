//! Dish entity - A sellable item of the event catalog.
//!
//! Each dish has a fixed stock and a running count of units sold.
//! `units_sold` must stay within `0..=stock`; only the sale, correction
//! and reset operations in `core` write it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dish database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dishes")]
pub struct Model {
    /// Stable identifier, used as the key of sale requests
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Pollo al Horno")
    pub name: String,
    /// Maximum number of units that can be sold
    pub stock: i32,
    /// Units sold so far
    pub units_sold: i32,
    /// Cost per unit
    pub cost_price: f64,
    /// Sale price per unit, used for revenue totals
    pub sale_price: f64,
}

impl Model {
    /// Units that can still be sold.
    #[must_use]
    pub const fn available(&self) -> i32 {
        self.stock - self.units_sold
    }
}

/// Defines relationships between Dish and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One dish has many ledger lines
    #[sea_orm(has_many = "super::sale_line::Entity")]
    SaleLines,
}

impl Related<super::sale_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
