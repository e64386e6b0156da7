//! Periodic expiry of stale pending orders
//!
//! The only mechanism that retires an abandoned `pending` order. Pending
//! orders never occupy slots, so sweeping frees nothing directly; it keeps
//! the order books honest.

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::PaymentStatus;
use crate::store::OrderStore;

/// Transition every pending order past its expiry to `expired`, returning
/// the number of orders transitioned
///
/// Stateless and idempotent: orders are updated independently, a failing
/// update is logged and skipped, and a second run over the same data is a
/// no-op.
///
/// # Errors
/// Fails only if the aggregate scan itself cannot be performed
#[instrument(skip(store))]
pub async fn sweep_expired(
	store: &dyn OrderStore,
	now: DateTime<Utc>,
) -> Result<usize, Error> {
	let scan = store.scan(Some(PaymentStatus::Pending)).await?;

	if scan.skipped_owners > 0 {
		warn!(
			"sweep skipped {} unreadable owner partitions",
			scan.skipped_owners
		);
	}

	let mut expired = 0;

	for mut order in scan.orders {
		if !order.is_overdue(now) {
			continue;
		}

		if !order.transition(PaymentStatus::Expired, now) {
			continue;
		}

		let order_id = order.order_id.clone();

		match store.update(order).await {
			Ok(()) => expired += 1,
			Err(e) => warn!("could not expire order {order_id} -- {e:?}"),
		}
	}

	info!("expired {expired} overdue orders");

	Ok(expired)
}
