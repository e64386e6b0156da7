use serde::{Deserialize, Serialize};

/// An inbound gateway notification
///
/// Field names follow the gateway's wire format, not the API's camelCase
/// convention.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentNotification {
	pub order_id:           String,
	pub transaction_status: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
	pub ok:      bool,
	/// Whether the notification changed the order's state
	pub applied: bool,
}
