//! JSON request and response bodies.
//!
//! Field names follow the wire format the browser client already speaks,
//! which is why they are Spanish while the domain types are not.

use crate::{
    core::report::{DishTotal, TeamReport},
    entities::dish,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// Body of `POST /api/ventas`
#[derive(Debug, Deserialize)]
pub struct SaleRequest {
    /// Team key
    #[serde(default)]
    pub equipo: Option<String>,
    /// Dish id to requested units
    #[serde(default)]
    pub cantidades: BTreeMap<String, i64>,
}

/// Body of `PUT /api/platos/{id}`
#[derive(Debug, Deserialize)]
pub struct CorrectionRequest {
    /// New absolute sold count
    pub vendidos: i64,
}

/// One dish as listed by `GET /api/platos`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DishResponse {
    /// Dish id
    pub id: i64,
    /// Display name
    pub nombre: String,
    /// Units available for the event
    pub stock: i32,
    /// Units sold so far
    pub vendidos: i32,
    /// Cost per unit
    pub precio_costo: f64,
    /// Sale price per unit
    pub precio_venta: f64,
}

impl From<dish::Model> for DishResponse {
    fn from(dish: dish::Model) -> Self {
        Self {
            id: dish.id,
            nombre: dish.name,
            stock: dish.stock,
            vendidos: dish.units_sold,
            precio_costo: dish.cost_price,
            precio_venta: dish.sale_price,
        }
    }
}

/// One team entry of `GET /api/ventas/equipos`
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    /// Team display name
    pub nombre: String,
    /// Units sold across all dishes
    pub vendidos: i64,
    /// Revenue
    pub total: f64,
    /// Per-dish breakdown
    pub platos: Vec<DishTotalResponse>,
    /// Quota in units
    pub meta: u32,
}

/// Per-dish line inside a [`TeamResponse`]
#[derive(Debug, Serialize)]
pub struct DishTotalResponse {
    /// Dish display name
    pub nombre: String,
    /// Units sold by the team
    pub cantidad: i64,
}

impl From<DishTotal> for DishTotalResponse {
    fn from(total: DishTotal) -> Self {
        Self {
            nombre: total.name,
            cantidad: total.quantity,
        }
    }
}

/// Body of `GET /api/ventas/equipos`
///
/// Serialized as an object keyed by team key. Entries keep the order of the
/// report, which is the configuration order the dashboard renders.
#[derive(Debug)]
pub struct TeamsResponse(pub Vec<(String, TeamResponse)>);

impl Serialize for TeamsResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, team) in &self.0 {
            map.serialize_entry(key, team)?;
        }
        map.end()
    }
}

impl From<Vec<TeamReport>> for TeamsResponse {
    fn from(reports: Vec<TeamReport>) -> Self {
        Self(
            reports
                .into_iter()
                .map(|report| {
                    let team = TeamResponse {
                        nombre: report.name,
                        vendidos: report.units_sold,
                        total: report.revenue,
                        platos: report.dishes.into_iter().map(Into::into).collect(),
                        meta: report.quota,
                    };
                    (report.key, team)
                })
                .collect(),
        )
    }
}

/// Acknowledgement of a write
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true`
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
}

impl SuccessResponse {
    /// Creates a successful acknowledgement with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Message shown to the operator
    pub error: String,
}

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status line
    pub message: String,
    /// Server time of the check
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn report(key: &str) -> TeamReport {
        TeamReport {
            key: key.to_string(),
            name: key.to_uppercase(),
            units_sold: 0,
            revenue: 0.0,
            dishes: Vec::new(),
            quota: 10,
        }
    }

    #[test]
    fn test_teams_response_keeps_report_order() {
        let reports = vec![report("zorros"), report("aguilas"), report("mapaches")];
        let body = serde_json::to_string(&TeamsResponse::from(reports)).unwrap();

        assert!(body.starts_with(r#"{"zorros":{"nombre":"ZORROS""#));
        let positions: Vec<usize> = ["\"zorros\"", "\"aguilas\"", "\"mapaches\""]
            .iter()
            .map(|key| body.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
