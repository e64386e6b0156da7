//! Pure price composition
//!
//! Deterministic over its inputs, no I/O; the server quotes every order
//! from the authoritative catalog with these functions and never trusts a
//! client-computed total.

use std::collections::BTreeSet;

use chrono::NaiveTime;

use crate::error::BookingError;
use crate::models::{AddOn, AddOnKind, AddOnSelection};

/// One resolved add-on charge for a booking line
#[derive(Clone, Copy, Debug)]
pub struct AddOnCharge {
	pub price:     i64,
	pub kind:      AddOnKind,
	/// Total units allocated over the selected sessions; unused for flat
	/// add-ons
	pub allocated: u32,
}

/// Compute the monetary total for a set of slots
///
/// Base contribution is `base_price × people × max(sessions, 1)`. A flat
/// add-on contributes its price on the same base; a per-session add-on
/// contributes its price per allocated unit. The voucher discount is
/// subtracted last and may push the total below zero; flooring is the
/// caller's call.
#[must_use]
pub fn quote_total(
	base_price: i64,
	people_count: u32,
	session_count: u32,
	add_ons: &[AddOnCharge],
	voucher_discount: i64,
) -> i64 {
	let people = i64::from(people_count);
	let sessions = i64::from(session_count.max(1));

	let base = base_price * people * sessions;

	let add_on_total: i64 = add_ons
		.iter()
		.map(|charge| {
			match charge.kind {
				AddOnKind::Flat => charge.price * people * sessions,
				AddOnKind::PerSession => {
					charge.price * i64::from(charge.allocated)
				},
			}
		})
		.sum();

	base + add_on_total - voucher_discount
}

/// Validate an add-on selection against its catalog entry and the selected
/// session times, returning the total allocated unit count
///
/// # Errors
/// Fails if a per-session allocation references an unselected session or
/// allocates more units than were selected
pub fn check_allocation(
	selection: &AddOnSelection,
	add_on: &AddOn,
	times: &BTreeSet<NaiveTime>,
) -> Result<u32, BookingError> {
	if add_on.kind == AddOnKind::Flat {
		return Ok(0);
	}

	let mut allocated: u32 = 0;

	for (&time, &quantity) in &selection.allocations {
		if !times.contains(&time) {
			return Err(BookingError::UnknownSession {
				add_on: add_on.id.clone(),
				time,
			});
		}

		allocated += quantity;
	}

	if allocated > selection.quantity {
		return Err(BookingError::OverAllocation {
			add_on:    add_on.id.clone(),
			selected:  selection.quantity,
			allocated,
		});
	}

	Ok(allocated)
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn time(h: u32, m: u32) -> NaiveTime {
		NaiveTime::from_hms_opt(h, m, 0).unwrap()
	}

	fn per_session_add_on() -> AddOn {
		AddOn {
			id:    "printed-photo".to_string(),
			name:  "Printed Photo".to_string(),
			price: 25_000,
			kind:  AddOnKind::PerSession,
		}
	}

	#[test]
	fn base_total_multiplies_people_and_sessions() {
		assert_eq!(quote_total(100_000, 2, 2, &[], 0), 400_000);
	}

	#[test]
	fn quoting_is_deterministic() {
		let charges = [AddOnCharge {
			price:     25_000,
			kind:      AddOnKind::PerSession,
			allocated: 2,
		}];

		let first = quote_total(150_000, 3, 2, &charges, 20_000);
		let second = quote_total(150_000, 3, 2, &charges, 20_000);

		assert_eq!(first, second);
	}

	#[test]
	fn zero_sessions_count_as_one() {
		assert_eq!(quote_total(100_000, 1, 0, &[], 0), 100_000);
	}

	#[test]
	fn flat_add_ons_scale_with_people_and_sessions() {
		let charges = [AddOnCharge {
			price:     50_000,
			kind:      AddOnKind::Flat,
			allocated: 0,
		}];

		assert_eq!(quote_total(100_000, 2, 2, &charges, 0), 600_000);
	}

	#[test]
	fn per_session_add_ons_scale_with_allocated_units() {
		let charges = [AddOnCharge {
			price:     25_000,
			kind:      AddOnKind::PerSession,
			allocated: 3,
		}];

		assert_eq!(quote_total(100_000, 1, 2, &charges, 0), 275_000);
	}

	#[test]
	fn discount_beyond_subtotal_goes_negative() {
		assert_eq!(quote_total(100_000, 1, 1, &[], 150_000), -50_000);
	}

	#[test]
	fn allocation_within_the_selected_quantity_passes() {
		let times: BTreeSet<NaiveTime> =
			[time(10, 0), time(10, 30)].into_iter().collect();
		let selection = AddOnSelection {
			add_on_id:   "printed-photo".to_string(),
			quantity:    2,
			allocations: HashMap::from([
				(time(10, 0), 1),
				(time(10, 30), 1),
			]),
		};

		let allocated =
			check_allocation(&selection, &per_session_add_on(), &times)
				.unwrap();

		assert_eq!(allocated, 2);
	}

	#[test]
	fn over_allocation_is_rejected() {
		let times: BTreeSet<NaiveTime> =
			[time(10, 0), time(10, 30)].into_iter().collect();
		let selection = AddOnSelection {
			add_on_id:   "printed-photo".to_string(),
			quantity:    2,
			allocations: HashMap::from([
				(time(10, 0), 2),
				(time(10, 30), 1),
			]),
		};

		assert!(matches!(
			check_allocation(&selection, &per_session_add_on(), &times),
			Err(BookingError::OverAllocation { selected: 2, allocated: 3, .. })
		));
	}

	#[test]
	fn allocating_to_an_unselected_session_is_rejected() {
		let times: BTreeSet<NaiveTime> = [time(10, 0)].into_iter().collect();
		let selection = AddOnSelection {
			add_on_id:   "printed-photo".to_string(),
			quantity:    2,
			allocations: HashMap::from([(time(15, 0), 1)]),
		};

		assert!(matches!(
			check_allocation(&selection, &per_session_add_on(), &times),
			Err(BookingError::UnknownSession { .. })
		));
	}

	#[test]
	fn flat_add_ons_ignore_allocations() {
		let flat = AddOn {
			id:    "props".to_string(),
			name:  "Props".to_string(),
			price: 30_000,
			kind:  AddOnKind::Flat,
		};
		let times: BTreeSet<NaiveTime> = [time(10, 0)].into_iter().collect();
		let selection = AddOnSelection {
			add_on_id:   "props".to_string(),
			quantity:    1,
			allocations: HashMap::from([(time(15, 0), 99)]),
		};

		assert_eq!(check_allocation(&selection, &flat, &times).unwrap(), 0);
	}
}
