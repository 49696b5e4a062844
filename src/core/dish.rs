//! Dish business logic - Catalog queries, seeding and the admin correction.
//!
//! The correction sets an absolute sold count and drops every ledger line of
//! the dish, because the ledger can no longer be reconciled with a value set
//! from outside. Attribution history for that dish is lost.

use crate::{
    config::DishConfig,
    entities::{Dish, SaleLine, dish, sale_line},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves every dish of the catalog, ordered by id.
pub async fn list_dishes(db: &DatabaseConnection) -> Result<Vec<dish::Model>> {
    Dish::find()
        .order_by_asc(dish::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a dish by its id, returning None if it does not exist.
pub async fn get_dish(db: &DatabaseConnection, dish_id: i64) -> Result<Option<dish::Model>> {
    Dish::find_by_id(dish_id).one(db).await.map_err(Into::into)
}

/// Inserts the configured dishes when the catalog is empty.
///
/// Returns the number of dishes inserted, which is zero whenever the
/// catalog already holds at least one dish.
#[instrument(skip_all)]
pub async fn seed_catalog(db: &DatabaseConnection, dishes: &[DishConfig]) -> Result<usize> {
    let existing = Dish::find().count(db).await?;
    if existing > 0 {
        debug!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    if dishes.is_empty() {
        return Ok(0);
    }

    let models = dishes.iter().map(|config| dish::ActiveModel {
        name: Set(config.name.trim().to_string()),
        stock: Set(config.stock),
        units_sold: Set(0),
        cost_price: Set(config.cost_price),
        sale_price: Set(config.sale_price),
        ..Default::default()
    });
    Dish::insert_many(models).exec(db).await?;

    info!(count = dishes.len(), "Seeded initial dishes");
    Ok(dishes.len())
}

/// Sets the sold count of a dish to an absolute value and clears its ledger lines.
///
/// The dish row is locked for the duration of the transaction. Nothing is
/// written unless `0 <= units_sold <= stock`.
///
/// # Errors
/// Returns an error if:
/// - The dish does not exist
/// - `units_sold` is negative or greater than the dish stock
/// - Any database operation fails (the transaction is rolled back)
#[instrument(skip(db))]
pub async fn correct_units_sold(
    db: &DatabaseConnection,
    dish_id: i64,
    units_sold: i64,
) -> Result<dish::Model> {
    let txn = db.begin().await?;

    let dish = Dish::find_by_id(dish_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| Error::DishNotFound {
            id: dish_id.to_string(),
        })?;

    if units_sold < 0 {
        return Err(Error::NegativeUnitsSold { value: units_sold });
    }

    let stock = dish.stock;
    let out_of_range = || Error::UnitsSoldExceedStock {
        value: units_sold,
        stock,
    };
    if units_sold > i64::from(stock) {
        return Err(out_of_range());
    }
    let new_units_sold = i32::try_from(units_sold).map_err(|_| out_of_range())?;

    let mut active: dish::ActiveModel = dish.into();
    active.units_sold = Set(new_units_sold);
    let updated = active.update(&txn).await?;

    let deleted = SaleLine::delete_many()
        .filter(sale_line::Column::DishId.eq(dish_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        dish = %updated.name,
        units_sold = updated.units_sold,
        lines_deleted = deleted.rows_affected,
        "Dish sold count corrected"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::sale;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_seed_catalog_inserts_configured_dishes() -> Result<()> {
        let db = setup_test_db().await?;

        let inserted = seed_catalog(&db, &test_catalog().dishes).await?;
        assert_eq!(inserted, 3);

        let dishes = list_dishes(&db).await?;
        assert_eq!(dishes.len(), 3);
        assert_eq!(dishes[0].name, "Pollo al Horno");
        assert_eq!(dishes[0].stock, 65);
        assert_eq!(dishes[0].units_sold, 0);
        assert_eq!(dishes[1].cost_price, 18.0);
        assert_eq!(dishes[2].sale_price, 35.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_skips_populated_catalog() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_dish(&db, "Empanada", 10).await?;

        let inserted = seed_catalog(&db, &test_catalog().dishes).await?;
        assert_eq!(inserted, 0);
        assert_eq!(list_dishes(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_dishes_ordered_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_dish(&db, "Zapallo", 5).await?;
        let second = create_test_dish(&db, "Anticucho", 5).await?;

        let dishes = list_dishes(&db).await?;
        assert_eq!(dishes, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_dish() -> Result<()> {
        let db = setup_test_db().await?;
        let dish = create_test_dish(&db, "Fricassé", 65).await?;

        assert_eq!(get_dish(&db, dish.id).await?, Some(dish));
        assert!(get_dish(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_correct_units_sold_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<dish::Model>::new()])
            .into_connection();

        let result = correct_units_sold(&db, 42, 3).await;
        assert!(matches!(result, Err(Error::DishNotFound { id }) if id == "42"));

        Ok(())
    }

    #[tokio::test]
    async fn test_correct_units_sold_validation() -> Result<()> {
        let dish = dish::Model {
            id: 1,
            name: "Pollo al Horno".to_string(),
            stock: 65,
            units_sold: 10,
            cost_price: 20.0,
            sale_price: 35.0,
        };

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![dish.clone()]])
            .into_connection();
        let result = correct_units_sold(&db, 1, -1).await;
        assert!(matches!(
            result,
            Err(Error::NegativeUnitsSold { value: -1 })
        ));

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![dish]])
            .into_connection();
        let result = correct_units_sold(&db, 1, 66).await;
        assert!(matches!(
            result,
            Err(Error::UnitsSoldExceedStock {
                value: 66,
                stock: 65
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_correct_units_sold_clears_ledger_of_that_dish_only() -> Result<()> {
        let (db, catalog) = setup_with_catalog().await?;
        let dishes = list_dishes(&db).await?;
        let (pollo, fricasse) = (&dishes[0], &dishes[1]);

        sale::register_sale(
            &db,
            &catalog,
            "exploradores",
            &quantities(&[(pollo.id, 4), (fricasse.id, 2)]),
        )
        .await?;

        let corrected = correct_units_sold(&db, pollo.id, 5).await?;
        assert_eq!(corrected.units_sold, 5);

        assert!(sale::sale_lines_for_dish(&db, pollo.id).await?.is_empty());
        assert_eq!(sale::sale_lines_for_dish(&db, fricasse.id).await?.len(), 1);

        let fricasse_after = get_dish(&db, fricasse.id).await?.unwrap();
        assert_eq!(fricasse_after.units_sold, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_correct_units_sold_accepts_bounds() -> Result<()> {
        let db = setup_test_db().await?;
        let dish = create_test_dish(&db, "Chicharrón", 65).await?;

        assert_eq!(correct_units_sold(&db, dish.id, 65).await?.units_sold, 65);
        assert_eq!(correct_units_sold(&db, dish.id, 0).await?.units_sold, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_correction_leaves_dish_untouched() -> Result<()> {
        let db = setup_test_db().await?;
        let dish = create_test_dish(&db, "Chicharrón", 65).await?;
        correct_units_sold(&db, dish.id, 12).await?;

        let result = correct_units_sold(&db, dish.id, 100).await;
        assert!(result.is_err());

        let after = get_dish(&db, dish.id).await?.unwrap();
        assert_eq!(after.units_sold, 12);

        Ok(())
    }
}
