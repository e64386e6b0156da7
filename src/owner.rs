//! Identification of the calling customer

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::AppState;
use crate::error::Error;
use crate::payment::order_ref::GATEWAY_ORDER_ID_SEPARATOR;

/// The id of the customer owning the request, read from the `x-client-id`
/// header
///
/// Session issuance happens upstream of this service; the id only has to
/// round-trip through the gateway order id composition, so it may not
/// contain the separator.
#[derive(Clone, Debug)]
pub struct OwnerId(pub String);

impl FromRequestParts<AppState> for OwnerId {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(raw) = parts
			.headers
			.get("x-client-id")
			.and_then(|value| value.to_str().ok())
		else {
			return Err(Error::MissingRequestData(
				"the x-client-id header is required".to_string(),
			));
		};

		if raw.is_empty() || raw.contains(GATEWAY_ORDER_ID_SEPARATOR) {
			return Err(Error::ValidationError(format!(
				"client id may not be empty or contain \
				 '{GATEWAY_ORDER_ID_SEPARATOR}'"
			)));
		}

		Ok(Self(raw.to_string()))
	}
}
