use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::AppState;
use crate::booking::checkout;
use crate::error::Error;
use crate::models::BookingLine;
use crate::owner::OwnerId;
use crate::schemas::order::{
	CreateOrderRequest,
	CreateOrderResponse,
	OrderResponse,
};
use crate::store::OrderStore;

/// Create a reservation attempt from the given lines, or from the stored
/// cart when the request carries none
#[instrument(skip(state, request))]
pub async fn create_order(
	State(state): State<AppState>,
	owner: OwnerId,
	Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let lines: Vec<BookingLine> = match request.lines {
		Some(lines) if !lines.is_empty() => {
			lines.into_iter().map(Into::into).collect()
		},
		_ => {
			let cart = state.cart_store.get(&owner.0).await?;

			if cart.lines.is_empty() {
				return Err(Error::MissingRequestData(
					"no booking lines given and the stored cart is empty"
						.to_string(),
				));
			}

			cart.lines
		},
	};

	let created = checkout::create_order(
		&state.config,
		&state.slots,
		state.order_store.as_ref(),
		state.catalog_store.as_ref(),
		state.payment_gateway.as_ref(),
		&owner.0,
		lines,
	)
	.await?;

	// The cart is spent once promoted to an order
	if let Err(e) = state.cart_store.clear(&owner.0).await {
		warn!("could not clear cart for owner {} -- {e:?}", owner.0);
	}

	Ok((StatusCode::CREATED, Json(CreateOrderResponse::from(created))))
}

/// All orders of the calling customer, newest first
#[instrument(skip(orders))]
pub async fn get_orders(
	State(orders): State<Arc<dyn OrderStore>>,
	owner: OwnerId,
) -> Result<impl IntoResponse, Error> {
	let orders = orders.for_owner(&owner.0).await?;
	let response: Vec<OrderResponse> =
		orders.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(orders))]
pub async fn get_order(
	State(orders): State<Arc<dyn OrderStore>>,
	owner: OwnerId,
	Path(order_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
	let Some(order) = orders.get(&owner.0, &order_id).await? else {
		return Err(Error::NotFound(format!("order '{order_id}'")));
	};

	Ok((StatusCode::OK, Json(OrderResponse::from(order))))
}
