use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::booking::settlement::{self, NotificationOutcome};
use crate::error::Error;
use crate::schemas::payment::{NotificationResponse, PaymentNotification};
use crate::store::{CatalogStore, OrderStore};

/// Inbound settlement webhook from the payment gateway
///
/// Unrecognized transaction statuses are acknowledged without a transition
/// so the gateway does not retry them forever.
#[instrument(skip_all)]
pub async fn payment_notification(
	State(orders): State<Arc<dyn OrderStore>>,
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(notification): Json<PaymentNotification>,
) -> Result<impl IntoResponse, Error> {
	let outcome = settlement::apply_notification(
		orders.as_ref(),
		catalog.as_ref(),
		&notification.order_id,
		&notification.transaction_status,
	)
	.await?;

	let applied = matches!(outcome, NotificationOutcome::Applied(_));

	Ok((StatusCode::OK, Json(NotificationResponse { ok: true, applied })))
}
