//! The payment gateway boundary

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::PaymentStatus;

mod http;
pub mod order_ref;
mod stub;

pub use http::HttpGateway;
pub use stub::StubGateway;

/// One priced line item reported to the gateway
#[derive(Clone, Debug)]
pub struct ItemLine {
	pub id:       String,
	pub name:     String,
	pub price:    i64,
	pub quantity: u32,
}

/// A request for a hosted payment session
#[derive(Clone, Debug)]
pub struct TokenRequest {
	pub gateway_order_id: String,
	pub gross_amount:     i64,
	pub items:            Vec<ItemLine>,
	pub customer_name:    String,
	pub customer_contact: String,
}

#[derive(Clone, Debug)]
pub struct TokenResponse {
	pub token:        String,
	pub redirect_url: String,
}

/// A hosted payment session provider
#[async_trait]
pub trait PaymentGateway: Send + Sync {
	/// Create a payment token for an amount
	async fn create_token(
		&self,
		request: TokenRequest,
	) -> Result<TokenResponse, GatewayError>;
}

/// Transaction statuses a gateway notification can carry
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionStatus {
	Settlement,
	Pending,
	Cancel,
	Expire,
	Deny,
}

impl TransactionStatus {
	/// Parse a raw notification status; unrecognized statuses yield `None`
	/// and must be ignored by the caller
	#[must_use]
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"settlement" => Some(Self::Settlement),
			"pending" => Some(Self::Pending),
			"cancel" => Some(Self::Cancel),
			"expire" => Some(Self::Expire),
			"deny" => Some(Self::Deny),
			_ => None,
		}
	}

	/// The order state this status maps to; `None` for `pending`, which is
	/// a no-op on our side
	#[must_use]
	pub fn target_status(self) -> Option<PaymentStatus> {
		match self {
			Self::Settlement => Some(PaymentStatus::Success),
			Self::Pending => None,
			Self::Cancel | Self::Expire | Self::Deny => {
				Some(PaymentStatus::Failure)
			},
		}
	}
}
