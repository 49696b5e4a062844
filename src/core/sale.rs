//! Sale business logic - Registers multi-dish sales and resets the ledger.
//!
//! A sale is applied in a single database transaction: every requested dish
//! is re-read under an exclusive row lock, checked against its stock, and
//! updated together with a new ledger line. If any dish fails, nothing is
//! written. The stock guard is also repeated in the `UPDATE` itself, so two
//! concurrent sales can never push `units_sold` above `stock` even on
//! backends without row locks.

use crate::{
    config::CatalogConfig,
    entities::{Dish, SaleLine, dish, sale_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Outcome of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    /// Ledger lines removed
    pub lines_deleted: u64,
    /// Dishes whose sold count was set back to zero
    pub dishes_reset: u64,
}

/// Registers a sale of several dishes attributed to one team.
///
/// `quantities` maps dish ids, as sent by the client, to requested units.
/// Entries with zero units are ignored. Dishes are processed in ascending id
/// order so concurrent sales always lock rows in the same order.
///
/// Returns the ledger lines written, one per dish sold.
///
/// # Errors
/// Returns an error if:
/// - The team is empty or not configured
/// - A quantity is negative, or no quantity is positive
/// - A dish id is not a number or does not exist
/// - A dish does not have enough stock left
/// - Any database operation fails
///
/// On any error the transaction is rolled back and no dish is modified.
#[instrument(skip(db, catalog, quantities))]
pub async fn register_sale(
    db: &DatabaseConnection,
    catalog: &CatalogConfig,
    team: &str,
    quantities: &BTreeMap<String, i64>,
) -> Result<Vec<sale_line::Model>> {
    let team = team.trim();
    if team.is_empty() {
        return Err(Error::MissingTeam);
    }
    if catalog.team(team).is_none() {
        return Err(Error::UnknownTeam {
            team: team.to_string(),
        });
    }

    let requested = normalize_quantities(quantities)?;
    debug!(?requested, "Validated sale request");

    let txn = db.begin().await?;

    let mut lines = Vec::with_capacity(requested.len());
    for (&dish_id, &quantity) in &requested {
        lines.push(sell_dish(&txn, team, dish_id, quantity).await?);
    }

    txn.commit().await?;

    info!(
        team,
        lines = lines.len(),
        units = lines.iter().map(|line| i64::from(line.quantity)).sum::<i64>(),
        "Sale registered"
    );
    Ok(lines)
}

/// Parses dish ids and drops zero quantities.
///
/// Keys that parse to the same id are merged.
fn normalize_quantities(quantities: &BTreeMap<String, i64>) -> Result<BTreeMap<i64, i32>> {
    let mut requested: BTreeMap<i64, i32> = BTreeMap::new();

    for (key, &quantity) in quantities {
        let invalid = || Error::InvalidQuantity {
            dish_id: key.clone(),
            quantity,
        };

        if quantity < 0 {
            return Err(invalid());
        }
        if quantity == 0 {
            continue;
        }

        let dish_id: i64 = key
            .trim()
            .parse()
            .map_err(|_| Error::DishNotFound { id: key.clone() })?;
        let quantity = i32::try_from(quantity).map_err(|_| invalid())?;

        let entry = requested.entry(dish_id).or_insert(0);
        *entry = entry.checked_add(quantity).ok_or_else(invalid)?;
    }

    if requested.is_empty() {
        return Err(Error::EmptySale);
    }

    Ok(requested)
}

/// Sells `quantity` units of one dish inside the caller's transaction.
async fn sell_dish<C>(
    conn: &C,
    team: &str,
    dish_id: i64,
    quantity: i32,
) -> Result<sale_line::Model>
where
    C: ConnectionTrait,
{
    let dish = Dish::find_by_id(dish_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| Error::DishNotFound {
            id: dish_id.to_string(),
        })?;

    let insufficient = |available: i32| Error::InsufficientStock {
        dish: dish.name.clone(),
        available,
        requested: quantity,
    };

    match dish.units_sold.checked_add(quantity) {
        Some(new_units_sold) if new_units_sold <= dish.stock => {}
        _ => return Err(insufficient(dish.available())),
    }

    // Guarded increment: affects no row if another writer got there first.
    let result = Dish::update_many()
        .col_expr(
            dish::Column::UnitsSold,
            Expr::col(dish::Column::UnitsSold).add(quantity),
        )
        .filter(dish::Column::Id.eq(dish_id))
        .filter(dish::Column::UnitsSold.lte(dish.stock - quantity))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(insufficient(0));
    }

    let line = sale_line::ActiveModel {
        team: Set(team.to_string()),
        dish_id: Set(dish_id),
        quantity: Set(quantity),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    line.insert(conn).await.map_err(Into::into)
}

/// Retrieves the ledger lines of one dish, oldest first.
pub async fn sale_lines_for_dish(
    db: &DatabaseConnection,
    dish_id: i64,
) -> Result<Vec<sale_line::Model>> {
    SaleLine::find()
        .filter(sale_line::Column::DishId.eq(dish_id))
        .order_by_asc(sale_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes every ledger line and sets every dish's sold count to zero.
///
/// Both steps run in one transaction. This cannot be undone.
#[instrument(skip(db))]
pub async fn reset_sales(db: &DatabaseConnection) -> Result<ResetSummary> {
    let txn = db.begin().await?;

    let deleted = SaleLine::delete_many().exec(&txn).await?;
    let reset = Dish::update_many()
        .col_expr(dish::Column::UnitsSold, Expr::value(0))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    let summary = ResetSummary {
        lines_deleted: deleted.rows_affected,
        dishes_reset: reset.rows_affected,
    };
    info!(?summary, "Sales reset");
    Ok(summary)
}
