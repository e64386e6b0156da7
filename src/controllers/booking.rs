use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::booking::availability;
use crate::error::Error;
use crate::models::BookingLine;
use crate::schemas::booking::CheckAvailabilityRequest;
use crate::store::OrderStore;

/// Test a proposed set of reservation requests against the current paid
/// reservations
///
/// Read-only and advisory: a passing check holds nothing.
#[instrument(skip(orders, request))]
pub async fn check_availability(
	State(orders): State<Arc<dyn OrderStore>>,
	Json(request): Json<CheckAvailabilityRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let lines: Vec<BookingLine> =
		request.requests.into_iter().map(Into::into).collect();

	let availability =
		availability::check_availability(orders.as_ref(), &lines).await?;

	Ok((StatusCode::OK, Json(availability)))
}
