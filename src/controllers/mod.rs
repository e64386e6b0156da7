use std::sync::Arc;

use axum::extract::State;
use axum::response::NoContent;

use crate::error::Error;
use crate::store::OrderStore;

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod ops;
pub mod order;
pub mod payment;

/// Check if the document store and webserver are functional
pub async fn healthcheck(
	State(orders): State<Arc<dyn OrderStore>>,
) -> Result<NoContent, Error> {
	orders.get("healthcheck", "ping").await?;

	Ok(NoContent)
}
