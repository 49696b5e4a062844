//! Entity module - `SeaORM` entity definitions for the catalog and the ledger.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod dish;
pub mod sale_line;

pub use dish::{Column as DishColumn, Entity as Dish, Model as DishModel};
pub use sale_line::{Column as SaleLineColumn, Entity as SaleLine, Model as SaleLineModel};
