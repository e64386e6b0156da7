use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use validator::Validate;

use crate::error::Error;
use crate::owner::OwnerId;
use crate::schemas::cart::UpdateCartRequest;
use crate::store::CartRepository;

#[instrument(skip(carts))]
pub async fn get_cart(
	State(carts): State<Arc<dyn CartRepository>>,
	owner: OwnerId,
) -> Result<impl IntoResponse, Error> {
	let cart = carts.get(&owner.0).await?;

	Ok((StatusCode::OK, Json(cart)))
}

#[instrument(skip(carts, request))]
pub async fn update_cart(
	State(carts): State<Arc<dyn CartRepository>>,
	owner: OwnerId,
	Json(request): Json<UpdateCartRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let cart = request.into();
	carts.set(&owner.0, cart).await?;

	let cart = carts.get(&owner.0).await?;

	Ok((StatusCode::OK, Json(cart)))
}

#[instrument(skip(carts))]
pub async fn clear_cart(
	State(carts): State<Arc<dyn CartRepository>>,
	owner: OwnerId,
) -> Result<NoContent, Error> {
	carts.clear(&owner.0).await?;

	Ok(NoContent)
}
