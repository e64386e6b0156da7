use serde::{Deserialize, Serialize};
use validator::Validate as _;
use validator_derive::Validate;

use crate::models::Cart;
use crate::schemas::booking::BookingLineRequest;

/// Replace the stored cart with the given lines
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
	#[validate(nested)]
	pub lines: Vec<BookingLineRequest>,
}

impl From<UpdateCartRequest> for Cart {
	fn from(value: UpdateCartRequest) -> Self {
		Self { lines: value.lines.into_iter().map(Into::into).collect() }
	}
}
