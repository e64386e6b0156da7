use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::booking::sweeper;
use crate::error::Error;
use crate::schemas::ops::SweepResponse;
use crate::store::OrderStore;

/// Scheduled trigger for the expiry sweeper
#[instrument(skip(orders))]
pub async fn sweep_expired_orders(
	State(orders): State<Arc<dyn OrderStore>>,
) -> Result<impl IntoResponse, Error> {
	let expired = sweeper::sweep_expired(orders.as_ref(), Utc::now()).await?;

	Ok((StatusCode::OK, Json(SweepResponse { expired, ok: true })))
}
