//! Application of asynchronous gateway notifications

use chrono::Utc;

use crate::error::Error;
use crate::models::{Order, PaymentStatus};
use crate::payment::{TransactionStatus, order_ref};
use crate::store::{CatalogStore, OrderStore};

/// What a gateway notification did to the order
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationOutcome {
	/// The order transitioned to the given state
	Applied(PaymentStatus),
	/// Nothing changed: the status was unrecognized, still pending, or the
	/// order is already terminal
	Ignored,
}

/// Apply a gateway notification to the order it references
///
/// The gateway order id decodes to `(owner_id, order_id)`; unrecognized
/// transaction statuses are logged and ignored so the order stays pending
/// until a recognized signal arrives or the sweeper expires it.
///
/// # Errors
/// Fails if the gateway order id is malformed, the order does not exist,
/// or the store cannot be updated
#[instrument(skip(orders, catalog))]
pub async fn apply_notification(
	orders: &dyn OrderStore,
	catalog: &dyn CatalogStore,
	gateway_order_id: &str,
	transaction_status: &str,
) -> Result<NotificationOutcome, Error> {
	let (owner_id, order_id) = order_ref::decode(gateway_order_id)?;

	let Some(mut order) = orders.get(&owner_id, &order_id).await? else {
		return Err(Error::NotFound(format!("order '{order_id}'")));
	};

	let Some(status) = TransactionStatus::parse(transaction_status) else {
		warn!(
			"ignoring unrecognized transaction status '{transaction_status}' \
			 for order {order_id}"
		);

		return Ok(NotificationOutcome::Ignored);
	};

	let Some(target) = status.target_status() else {
		debug!("gateway still pending for order {order_id}");

		return Ok(NotificationOutcome::Ignored);
	};

	if !order.transition(target, Utc::now()) {
		return Ok(NotificationOutcome::Ignored);
	}

	orders.update(order.clone()).await?;

	info!("order {order_id} settled as {target:?}");

	if target == PaymentStatus::Success {
		redeem_vouchers(catalog, &order).await;
	}

	Ok(NotificationOutcome::Applied(target))
}

/// Count voucher redemptions for a settled order
///
/// Read-then-write per voucher; a failing update is logged and skipped so
/// the settlement itself stands. Concurrent settlements can therefore
/// exceed a voucher's usage limit.
async fn redeem_vouchers(catalog: &dyn CatalogStore, order: &Order) {
	for line in &order.lines {
		let Some(code) = &line.voucher_code else {
			continue;
		};

		match catalog.voucher(code).await {
			Ok(Some(mut voucher)) => {
				voucher.record_redemption();

				if let Err(e) = catalog.upsert_voucher(voucher).await {
					warn!(
						"could not record redemption of voucher '{code}' -- \
						 {e:?}"
					);
				}
			},
			Ok(None) => {
				warn!(
					"settled order {} references unknown voucher '{code}'",
					order.order_id
				);
			},
			Err(e) => warn!("could not load voucher '{code}' -- {e:?}"),
		}
	}
}
