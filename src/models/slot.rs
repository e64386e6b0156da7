//! The fixed universe of bookable time slots

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::Config;
use crate::error::BookingError;

/// Length of a single bookable session
pub const SLOT_LENGTH_MINUTES: i64 = 30;

/// The ordered enumeration of time labels a studio day consists of, plus the
/// labels that are permanently blocked as break times
///
/// Pure static data derived from [`Config`]; reservation state never changes
/// the catalog.
#[derive(Clone, Debug)]
pub struct SlotCatalog {
	times:  Vec<NaiveTime>,
	breaks: BTreeSet<NaiveTime>,
}

impl SlotCatalog {
	/// Build the half-hour grid between the configured opening and closing
	/// time
	///
	/// Break times are part of the enumeration but are never bookable.
	#[must_use]
	pub fn from_config(config: &Config) -> Self {
		let mut times = vec![];
		let mut cursor = config.studio_open_time;

		while cursor < config.studio_close_time {
			times.push(cursor);
			cursor += TimeDelta::minutes(SLOT_LENGTH_MINUTES);
		}

		let breaks = config.studio_break_times.iter().copied().collect();

		Self { times, breaks }
	}

	/// All time labels of a studio day, in order, breaks included
	#[must_use]
	pub fn times(&self) -> &[NaiveTime] {
		&self.times
	}

	/// All time labels a customer can actually book
	pub fn bookable_times(&self) -> impl Iterator<Item = NaiveTime> {
		self.times.iter().copied().filter(|t| !self.breaks.contains(t))
	}

	#[must_use]
	pub fn contains(&self, time: NaiveTime) -> bool {
		self.times.contains(&time)
	}

	#[must_use]
	pub fn is_break(&self, time: NaiveTime) -> bool {
		self.breaks.contains(&time)
	}

	/// Check that a requested (date, time) pair is part of the bookable grid
	///
	/// # Errors
	/// Fails if the time is off-grid or falls in a break
	pub fn check_bookable(
		&self,
		date: NaiveDate,
		time: NaiveTime,
	) -> Result<(), BookingError> {
		if !self.contains(time) {
			return Err(BookingError::UnknownTimeSlot { date, time });
		}

		if self.is_break(time) {
			return Err(BookingError::BreakTime { date, time });
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeDelta;
	use url::Url;

	use super::*;

	fn test_config() -> Config {
		Config {
			studio_open_time:   NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
			studio_close_time:  NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
			studio_break_times: vec![
				NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
				NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
			],
			order_lifetime:     TimeDelta::hours(24),
			gateway_base_url:   Url::parse("http://localhost:1").unwrap(),
			gateway_server_key: "key".to_string(),
			admin_api_key:      "admin".to_string(),
		}
	}

	#[test]
	fn grid_covers_open_hours_in_half_hour_steps() {
		let catalog = SlotCatalog::from_config(&test_config());

		assert_eq!(catalog.times().len(), 16);
		assert_eq!(
			catalog.times()[0],
			NaiveTime::from_hms_opt(9, 0, 0).unwrap()
		);
		assert_eq!(
			*catalog.times().last().unwrap(),
			NaiveTime::from_hms_opt(16, 30, 0).unwrap()
		);
	}

	#[test]
	fn breaks_stay_in_the_enumeration_but_are_not_bookable() {
		let catalog = SlotCatalog::from_config(&test_config());
		let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
		let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

		assert!(catalog.contains(noon));
		assert!(catalog.is_break(noon));
		assert!(catalog.bookable_times().all(|t| t != noon));
		assert!(matches!(
			catalog.check_bookable(date, noon),
			Err(BookingError::BreakTime { .. })
		));
	}

	#[test]
	fn off_grid_times_are_rejected() {
		let catalog = SlotCatalog::from_config(&test_config());
		let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
		let odd = NaiveTime::from_hms_opt(9, 15, 0).unwrap();

		assert!(matches!(
			catalog.check_bookable(date, odd),
			Err(BookingError::UnknownTimeSlot { .. })
		));
	}
}
