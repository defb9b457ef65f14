use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::odds::{CanonicalOddsRow, OddsPricesRequest};

/// `POST /odds/prices`
pub async fn odds_prices(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<OddsPricesRequest>, JsonRejection>,
) -> Result<Json<Vec<CanonicalOddsRow>>, ApiError> {
    state.odds.ensure_configured()?;

    let Json(request) = payload?;

    let rows = state.odds.fetch_prices(&request, request_id.as_str()).await?;
    tracing::debug!(
        request_id = %request_id.as_str(),
        date = %request.date,
        rows = rows.len(),
        "Odds prices served"
    );
    Ok(Json(rows))
}
