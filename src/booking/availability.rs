//! The availability index and conflict checker
//!
//! Only orders with a successful payment occupy slots; pending orders are
//! invisible here and never block anyone.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::Error;
use crate::models::{BookingLine, Order, PaymentStatus};
use crate::store::{OrderEvent, OrderStore};

/// A set of requested times overlapping an already paid reservation
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConflict {
	pub date:  NaiveDate,
	pub times: Vec<NaiveTime>,
	pub label: String,
}

/// Outcome of a conflict check
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
	pub available: bool,
	pub conflicts: Vec<SlotConflict>,
}

impl Availability {
	/// An availability with no conflicts
	#[must_use]
	pub fn clear() -> Self {
		Self { available: true, conflicts: vec![] }
	}
}

/// Pairwise comparison of candidate lines against the lines of paid orders
///
/// A line pair with a different date or an empty time set on either side is
/// non-conflicting. Conflicts are de-duplicated by (date, sorted times,
/// label).
#[must_use]
pub fn conflicts_against<'a>(
	requests: &[BookingLine],
	orders: impl IntoIterator<Item = &'a Order> + Clone,
) -> Vec<SlotConflict> {
	let mut seen = HashSet::new();
	let mut conflicts = vec![];

	for request in requests {
		if request.times.is_empty() {
			continue;
		}

		for order in orders.clone() {
			if order.payment_status != PaymentStatus::Success {
				continue;
			}

			for line in &order.lines {
				if line.date != request.date || line.times.is_empty() {
					continue;
				}

				let overlap: Vec<NaiveTime> = request
					.times
					.intersection(&line.times)
					.copied()
					.collect();

				if overlap.is_empty() {
					continue;
				}

				let conflict = SlotConflict {
					date:  line.date,
					times: overlap,
					label: line.product_label.clone(),
				};

				if seen.insert(conflict.clone()) {
					conflicts.push(conflict);
				}
			}
		}
	}

	conflicts
}

/// Check a proposed set of reservation requests against the current paid
/// reservations
///
/// Advisory and read-only: passing this check does not hold the slots.
/// Unreadable owner partitions are skipped so one bad record cannot block
/// everyone; if the aggregate scan itself fails the check fails closed.
#[instrument(skip_all)]
pub async fn check_availability(
	store: &dyn OrderStore,
	requests: &[BookingLine],
) -> Result<Availability, Error> {
	let scan = store.scan(Some(PaymentStatus::Success)).await?;

	if scan.skipped_owners > 0 {
		warn!(
			"availability check skipped {} unreadable owner partitions",
			scan.skipped_owners
		);
	}

	let conflicts = conflicts_against(requests, &scan.orders);

	Ok(Availability { available: conflicts.is_empty(), conflicts })
}

/// The derived set of currently taken slots
///
/// Transient: rebuilt from an aggregate scan or maintained incrementally
/// from change events, never persisted. Each taken slot remembers the order
/// that holds it so a removal only releases that order's claims.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
	taken: HashMap<NaiveDate, HashMap<NaiveTime, String>>,
}

impl AvailabilityIndex {
	/// Build the index from a set of orders, counting only successful ones
	#[must_use]
	pub fn from_orders<'a>(
		orders: impl IntoIterator<Item = &'a Order>,
	) -> Self {
		let mut index = Self::default();

		for order in orders {
			if order.payment_status == PaymentStatus::Success {
				index.claim(order);
			}
		}

		index
	}

	/// Fold one change event into the index
	pub fn apply(&mut self, event: &OrderEvent) {
		let order = event.order();

		match event {
			OrderEvent::Added(order) | OrderEvent::Modified(order)
				if order.payment_status == PaymentStatus::Success =>
			{
				self.claim(order);
			},
			_ => self.release(order),
		}
	}

	#[must_use]
	pub fn is_taken(&self, date: NaiveDate, time: NaiveTime) -> bool {
		self.taken
			.get(&date)
			.is_some_and(|times| times.contains_key(&time))
	}

	/// All taken times on a date, in order
	#[must_use]
	pub fn taken_on(&self, date: NaiveDate) -> BTreeSet<NaiveTime> {
		self.taken
			.get(&date)
			.map(|times| times.keys().copied().collect())
			.unwrap_or_default()
	}

	fn claim(&mut self, order: &Order) {
		for line in &order.lines {
			let times = self.taken.entry(line.date).or_default();

			for &time in &line.times {
				// The earliest claim wins; a second successful order on the
				// same slot is the double-booking the checker exists to
				// prevent
				times.entry(time).or_insert_with(|| order.order_id.clone());
			}
		}
	}

	fn release(&mut self, order: &Order) {
		for times in self.taken.values_mut() {
			times.retain(|_, holder| holder != &order.order_id);
		}

		self.taken.retain(|_, times| !times.is_empty());
	}
}

/// Follow order change events until one of the given requests is taken by
/// a competing paid order
///
/// Returns the conflicts of the first such event, or `None` once the
/// channel closes. The caller uses this to hide the payment action when a
/// same-slot order settles first; it is cooperative, not an exclusion
/// mechanism.
pub async fn first_conflict(
	events: &mut broadcast::Receiver<OrderEvent>,
	requests: &[BookingLine],
	ignore_order_id: &str,
) -> Option<Vec<SlotConflict>> {
	loop {
		let event = match events.recv().await {
			Ok(event) => event,
			Err(broadcast::error::RecvError::Lagged(missed)) => {
				warn!("conflict watcher lagged behind by {missed} events");
				continue;
			},
			Err(broadcast::error::RecvError::Closed) => return None,
		};

		let order = event.order();

		if order.order_id == ignore_order_id {
			continue;
		}

		let conflicts =
			conflicts_against(requests, std::iter::once(order));

		if !conflicts.is_empty() {
			return Some(conflicts);
		}
	}
}
