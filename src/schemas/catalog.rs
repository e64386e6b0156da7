use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{AddOnKind, Voucher};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
	#[validate(length(min = 1, message = "a product name is required"))]
	pub name:        String,
	pub base_price:  i64,
	pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
	#[validate(length(min = 1, message = "a product name is required"))]
	pub name:        String,
	pub base_price:  i64,
	pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddOnRequest {
	#[validate(length(min = 1, message = "an add-on name is required"))]
	pub name:  String,
	pub price: i64,
	pub kind:  AddOnKind,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddOnRequest {
	#[validate(length(min = 1, message = "an add-on name is required"))]
	pub name:  String,
	pub price: i64,
	pub kind:  AddOnKind,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
	#[validate(length(min = 1, message = "a voucher code is required"))]
	pub code:            String,
	pub discount_amount: i64,
	pub active:          bool,
	#[validate(range(min = 1, message = "usage limit must be at least 1"))]
	pub usage_limit:     u32,
}

impl From<CreateVoucherRequest> for Voucher {
	fn from(value: CreateVoucherRequest) -> Self {
		Self {
			code:            value.code,
			discount_amount: value.discount_amount,
			active:          value.active,
			usage_count:     0,
			usage_limit:     value.usage_limit,
		}
	}
}

/// Mutable voucher fields; the usage count is only ever advanced by
/// settlements
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoucherRequest {
	pub discount_amount: i64,
	pub active:          bool,
	#[validate(range(min = 1, message = "usage limit must be at least 1"))]
	pub usage_limit:     u32,
}

/// Payload for creating or replacing a testimonial
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialRequest {
	#[validate(length(min = 1, message = "an author is required"))]
	pub author: String,
	#[validate(length(min = 1, message = "a quote is required"))]
	pub quote:  String,
	#[validate(range(min = 1, max = 5, message = "rating must be 1 to 5"))]
	pub rating: Option<u8>,
}

/// Payload for creating or replacing a portfolio item
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemRequest {
	#[validate(length(min = 1, message = "a title is required"))]
	pub title:     String,
	#[validate(url(message = "image url must be a url"))]
	pub image_url: String,
	pub category:  Option<String>,
}
