//! The durable reservation/payment record

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the random order id suffix
const ORDER_ID_SUFFIX_LEN: usize = 8;

/// Payment state of a reservation attempt
///
/// `Pending` is the only non-terminal state; `Success`, `Failure` and
/// `Expired` absorb.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	Pending,
	Success,
	Failure,
	Expired,
}

impl PaymentStatus {
	#[must_use]
	pub fn is_terminal(self) -> bool {
		self != Self::Pending
	}
}

/// An add-on picked for a booking line
///
/// Flat add-ons are a binary toggle and leave `allocations` empty;
/// per-session add-ons spread `quantity` over the selected times.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnSelection {
	pub add_on_id:   String,
	pub quantity:    u32,
	#[serde(default)]
	pub allocations: HashMap<NaiveTime, u32>,
}

/// One cart line of a reservation attempt: a product on a date with a set of
/// session times
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLine {
	pub product_id:       String,
	pub product_label:    String,
	pub date:             NaiveDate,
	pub times:            BTreeSet<NaiveTime>,
	pub people_count:     u32,
	#[serde(default)]
	pub add_ons:          Vec<AddOnSelection>,
	pub voucher_code:     Option<String>,
	pub customer_name:    String,
	pub customer_contact: String,
}

/// A serializable client cart: the booking lines a customer has assembled
/// but not yet promoted to an [`Order`]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
	pub lines: Vec<BookingLine>,
}

/// A reservation attempt, from creation through payment resolution
///
/// Orders are never deleted, only transitioned.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	pub order_id:             String,
	pub owner_id:             String,
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

impl Order {
	/// Create a new pending [`Order`] with a freshly generated id
	#[must_use]
	pub fn new(
		owner_id: &str,
		lines: Vec<BookingLine>,
		gross_amount: i64,
		lifetime: TimeDelta,
		now: DateTime<Utc>,
	) -> Self {
		Self {
			order_id: Self::generate_order_id(now),
			owner_id: owner_id.to_string(),
			payment_status: PaymentStatus::Pending,
			gross_amount,
			lines,
			payment_token: None,
			payment_redirect_url: None,
			failure_note: None,
			created_at: now,
			updated_at: now,
			expires_at: now + lifetime,
		}
	}

	/// Generate an order id from the creation timestamp and a random suffix
	///
	/// The id is kept short so that the composed gateway order id stays
	/// within the gateway's length limit for any reasonable owner id.
	fn generate_order_id(now: DateTime<Utc>) -> String {
		let suffix = Uuid::new_v4().simple().to_string();

		format!("ORD-{}-{}", now.timestamp(), &suffix[..ORDER_ID_SUFFIX_LEN])
	}

	/// Apply a state transition, returning whether the state changed
	///
	/// Transitions out of a terminal state are refused; transitioning to the
	/// current state is a no-op.
	pub fn transition(&mut self, to: PaymentStatus, now: DateTime<Utc>) -> bool {
		if self.payment_status == to {
			return false;
		}

		if self.payment_status.is_terminal() {
			warn!(
				"refused transition of order {} from {:?} to {to:?}",
				self.order_id, self.payment_status
			);

			return false;
		}

		self.payment_status = to;
		self.updated_at = now;

		true
	}

	/// Transition to `failure` and record why
	pub fn mark_failure(&mut self, note: &str, now: DateTime<Utc>) {
		if self.transition(PaymentStatus::Failure, now) {
			self.failure_note = Some(note.to_string());
		}
	}

	/// Whether the sweeper should expire this order
	#[must_use]
	pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
		self.payment_status == PaymentStatus::Pending && self.expires_at < now
	}
}
