use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate as _;
use validator_derive::Validate;

use crate::booking::availability::Availability;
use crate::booking::checkout::CreatedOrder;
use crate::models::{BookingLine, Order, PaymentStatus};
use crate::schemas::booking::BookingLineRequest;

/// Create an order from the given lines, or from the stored cart when no
/// lines are given
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	#[validate(nested)]
	pub lines: Option<Vec<BookingLineRequest>>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
	pub order_id:             String,
	pub payment_status:       PaymentStatus,
	pub gross_amount:         i64,
	pub lines:                Vec<BookingLine>,
	pub payment_token:        Option<String>,
	pub payment_redirect_url: Option<String>,
	pub failure_note:         Option<String>,
	pub created_at:           DateTime<Utc>,
	pub updated_at:           DateTime<Utc>,
	pub expires_at:           DateTime<Utc>,
}

impl From<Order> for OrderResponse {
	fn from(value: Order) -> Self {
		Self {
			order_id:             value.order_id,
			payment_status:       value.payment_status,
			gross_amount:         value.gross_amount,
			lines:                value.lines,
			payment_token:        value.payment_token,
			payment_redirect_url: value.payment_redirect_url,
			failure_note:         value.failure_note,
			created_at:           value.created_at,
			updated_at:           value.updated_at,
			expires_at:           value.expires_at,
		}
	}
}

/// A created order plus the best-effort post-create conflict check
///
/// A non-empty `postCheck.conflicts` tells the client to hide the payment
/// action even though the order exists.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
	pub order:      OrderResponse,
	pub post_check: Availability,
}

impl From<CreatedOrder> for CreateOrderResponse {
	fn from(value: CreatedOrder) -> Self {
		Self {
			order:      value.order.into(),
			post_check: value.post_check,
		}
	}
}
