//! Catalog entities managed through the admin back-office

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A bookable photo session product
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	pub id:          String,
	pub name:        String,
	pub base_price:  i64,
	pub description: Option<String>,
}

/// How an add-on price is applied to a booking line
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOnKind {
	/// Applied once per person per session when toggled on
	Flat,
	/// Applied per allocated unit, spread over the selected sessions
	PerSession,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
	pub id:    String,
	pub name:  String,
	pub price: i64,
	pub kind:  AddOnKind,
}

/// A discount voucher
///
/// Redemption checks are point-in-time reads; there is no atomic increment
/// on `usage_count`, so concurrent redemptions can exceed `usage_limit`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
	pub code:            String,
	pub discount_amount: i64,
	pub active:          bool,
	pub usage_count:     u32,
	pub usage_limit:     u32,
}

impl Voucher {
	/// Check that this voucher can currently be redeemed
	///
	/// # Errors
	/// Fails if the voucher is inactive or its usage limit is reached
	pub fn check_redeemable(&self) -> Result<(), BookingError> {
		if !self.active {
			return Err(BookingError::VoucherRejected(format!(
				"voucher '{}' is not active",
				self.code
			)));
		}

		if self.usage_count >= self.usage_limit {
			return Err(BookingError::VoucherRejected(format!(
				"voucher '{}' has reached its usage limit",
				self.code
			)));
		}

		Ok(())
	}

	/// Count one redemption against the usage limit
	pub fn record_redemption(&mut self) {
		self.usage_count += 1;
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
	pub id:     String,
	pub author: String,
	pub quote:  String,
	pub rating: Option<u8>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
	pub id:        String,
	pub title:     String,
	pub image_url: String,
	pub category:  Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_voucher() -> Voucher {
		Voucher {
			code:            "WELCOME10".to_string(),
			discount_amount: 10_000,
			active:          true,
			usage_count:     0,
			usage_limit:     2,
		}
	}

	#[test]
	fn active_voucher_below_limit_is_redeemable() {
		assert!(test_voucher().check_redeemable().is_ok());
	}

	#[test]
	fn inactive_voucher_is_rejected() {
		let mut voucher = test_voucher();
		voucher.active = false;

		assert!(voucher.check_redeemable().is_err());
	}

	#[test]
	fn voucher_at_usage_limit_is_rejected() {
		let mut voucher = test_voucher();
		voucher.record_redemption();
		voucher.record_redemption();

		assert!(voucher.check_redeemable().is_err());
	}
}
