//! Route handlers.
//!
//! Each handler extracts its input, calls into `core`, and maps the outcome
//! to the JSON shape of the route. Errors are rendered by the
//! `IntoResponse` impl in [`super::error`].

use super::{
    AppState,
    payloads::{
        CorrectionRequest, DishResponse, HealthResponse, SaleRequest, SuccessResponse,
        TeamsResponse,
    },
};
use crate::{
    core::{dish, report, sale},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "🚀 Backend Kermesse funcionando!".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// `GET /api/platos`
pub async fn list_dishes(State(state): State<AppState>) -> Result<Json<Vec<DishResponse>>> {
    let dishes = dish::list_dishes(&state.db).await?;
    Ok(Json(dishes.into_iter().map(Into::into).collect()))
}

/// `PUT /api/platos/{id}`
pub async fn correct_dish(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let Path(raw_id) = path?;
    let Json(request) = payload?;

    let dish_id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| Error::DishNotFound { id: raw_id.clone() })?;

    let updated = dish::correct_units_sold(&state.db, dish_id, request.vendidos).await?;

    Ok(Json(SuccessResponse::new(format!(
        "✅ {} actualizado a {} vendidos",
        updated.name, updated.units_sold
    ))))
}

/// `POST /api/ventas`
pub async fn register_sale(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaleRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let Json(request) = payload?;
    let team = request.equipo.as_deref().unwrap_or_default();

    sale::register_sale(&state.db, &state.catalog, team, &request.cantidades).await?;

    Ok(Json(SuccessResponse::new("Venta registrada correctamente")))
}

/// `GET /api/ventas/equipos`
pub async fn team_totals(State(state): State<AppState>) -> Result<Json<TeamsResponse>> {
    let reports = report::team_totals(&state.db, &state.catalog).await?;
    Ok(Json(reports.into()))
}

/// `POST /api/reset`
pub async fn reset(State(state): State<AppState>) -> Result<Json<SuccessResponse>> {
    sale::reset_sales(&state.db).await?;
    Ok(Json(SuccessResponse::new(
        "✅ Todos los datos han sido reseteados a cero",
    )))
}
