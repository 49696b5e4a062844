//! Per-team sales report.
//!
//! Sums the ledger per team and dish and folds the rows into one record per
//! configured team. Read-only and unlocked, so under concurrent writes the
//! totals may lag slightly behind the catalog.

use crate::{
    config::CatalogConfig,
    entities::{SaleLine, dish, sale_line},
    errors::Result,
};
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait, sea_query::Expr,
};
use tracing::warn;

/// Units of one dish sold by a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishTotal {
    /// Dish display name
    pub name: String,
    /// Units sold by the team
    pub quantity: i64,
}

/// Running totals of one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamReport {
    /// Team key from configuration
    pub key: String,
    /// Team display name
    pub name: String,
    /// Units sold across all dishes
    pub units_sold: i64,
    /// Revenue: sum of quantity times sale price
    pub revenue: f64,
    /// Breakdown per dish, only dishes with sales
    pub dishes: Vec<DishTotal>,
    /// Fundraising quota in units
    pub quota: u32,
}

/// One row of the grouped ledger query.
#[derive(Debug, Clone, FromQueryResult)]
struct TeamDishTotal {
    team: String,
    dish_name: String,
    sale_price: f64,
    total_sold: i64,
}

/// Builds the report for every configured team, in configuration order.
///
/// Teams without sales are included with zero totals. Ledger rows for teams
/// that are no longer configured are skipped.
pub async fn team_totals(
    db: &DatabaseConnection,
    catalog: &CatalogConfig,
) -> Result<Vec<TeamReport>> {
    let rows = SaleLine::find()
        .select_only()
        .column(sale_line::Column::Team)
        .column_as(dish::Column::Name, "dish_name")
        .column(dish::Column::SalePrice)
        .column_as(
            Expr::col((SaleLine, sale_line::Column::Quantity)).sum(),
            "total_sold",
        )
        .join(JoinType::InnerJoin, sale_line::Relation::Dish.def())
        .group_by(sale_line::Column::Team)
        .group_by(dish::Column::Name)
        .group_by(dish::Column::SalePrice)
        .order_by_asc(sale_line::Column::Team)
        .order_by_asc(dish::Column::Name)
        .into_model::<TeamDishTotal>()
        .all(db)
        .await?;

    Ok(fold_team_totals(catalog, rows))
}

fn fold_team_totals(catalog: &CatalogConfig, rows: Vec<TeamDishTotal>) -> Vec<TeamReport> {
    let mut reports: Vec<TeamReport> = catalog
        .teams
        .iter()
        .map(|team| TeamReport {
            key: team.key.clone(),
            name: team.name.clone(),
            units_sold: 0,
            revenue: 0.0,
            dishes: Vec::new(),
            quota: team.quota,
        })
        .collect();

    for row in rows {
        let Some(report) = reports.iter_mut().find(|report| report.key == row.team) else {
            warn!(team = %row.team, "Ledger has sales for an unconfigured team, skipping");
            continue;
        };

        #[allow(clippy::cast_precision_loss)]
        let revenue = row.total_sold as f64 * row.sale_price;

        report.units_sold += row.total_sold;
        report.revenue += revenue;
        report.dishes.push(DishTotal {
            name: row.dish_name,
            quantity: row.total_sold,
        });
    }

    reports
}
