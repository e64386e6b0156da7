use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate as _;
use validator_derive::Validate;

use crate::models::{AddOnSelection, BookingLine};

/// An add-on picked for a proposed reservation
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnSelectionRequest {
	pub add_on_id:   String,
	pub quantity:    u32,
	#[serde(default)]
	pub allocations: HashMap<NaiveTime, u32>,
}

impl From<AddOnSelectionRequest> for AddOnSelection {
	fn from(value: AddOnSelectionRequest) -> Self {
		Self {
			add_on_id:   value.add_on_id,
			quantity:    value.quantity,
			allocations: value.allocations,
		}
	}
}

/// One proposed reservation line
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingLineRequest {
	#[validate(length(min = 1, message = "a product id is required"))]
	pub product_id:       String,
	pub product_label:    String,
	pub date:             NaiveDate,
	#[validate(length(
		min = 1,
		message = "at least one session time is required"
	))]
	pub times:            Vec<NaiveTime>,
	#[validate(range(min = 1, message = "people count must be at least 1"))]
	pub people_count:     u32,
	#[serde(default)]
	pub add_ons:          Vec<AddOnSelectionRequest>,
	pub voucher_code:     Option<String>,
	#[validate(length(min = 1, message = "a customer name is required"))]
	pub customer_name:    String,
	#[validate(length(min = 1, message = "a customer contact is required"))]
	pub customer_contact: String,
}

impl From<BookingLineRequest> for BookingLine {
	fn from(value: BookingLineRequest) -> Self {
		Self {
			product_id:       value.product_id,
			product_label:    value.product_label,
			date:             value.date,
			times:            value.times.into_iter().collect(),
			people_count:     value.people_count,
			add_ons:          value
				.add_ons
				.into_iter()
				.map(Into::into)
				.collect(),
			voucher_code:     value.voucher_code,
			customer_name:    value.customer_name,
			customer_contact: value.customer_contact,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
	#[validate(nested)]
	pub requests: Vec<BookingLineRequest>,
}
