//! Composition of gateway-facing order ids
//!
//! The gateway sees a single opaque order id; internally an order is keyed
//! by `(owner_id, order_id)`. Format version 1 composes the two as
//! `{owner_id}{separator}{order_id}`: the owner id must not contain the
//! separator, decoding splits on the first occurrence, so the order id
//! itself may contain it freely.

use crate::error::PaymentError;

/// Version of the composed id format
pub const GATEWAY_ORDER_ID_VERSION: u8 = 1;

/// Separator between owner id and order id
pub const GATEWAY_ORDER_ID_SEPARATOR: char = '-';

/// Hard limit imposed by the payment gateway
pub const MAX_GATEWAY_ORDER_ID_LEN: usize = 50;

/// Compose the gateway-facing order id
///
/// # Errors
/// Fails if the owner id cannot round-trip (empty or contains the
/// separator) or if the composed id exceeds the gateway limit
pub fn encode(
	owner_id: &str,
	order_id: &str,
) -> Result<String, PaymentError> {
	if owner_id.is_empty()
		|| order_id.is_empty()
		|| owner_id.contains(GATEWAY_ORDER_ID_SEPARATOR)
	{
		return Err(PaymentError::MalformedOrderId(format!(
			"{owner_id}{GATEWAY_ORDER_ID_SEPARATOR}{order_id}"
		)));
	}

	let composed =
		format!("{owner_id}{GATEWAY_ORDER_ID_SEPARATOR}{order_id}");

	if composed.len() > MAX_GATEWAY_ORDER_ID_LEN {
		return Err(PaymentError::OrderIdTooLong(composed));
	}

	Ok(composed)
}

/// Split a gateway-facing order id back into `(owner_id, order_id)`
///
/// # Errors
/// Fails if the id does not contain the separator or either part is empty
pub fn decode(
	gateway_order_id: &str,
) -> Result<(String, String), PaymentError> {
	let Some((owner_id, order_id)) =
		gateway_order_id.split_once(GATEWAY_ORDER_ID_SEPARATOR)
	else {
		return Err(PaymentError::MalformedOrderId(
			gateway_order_id.to_string(),
		));
	};

	if owner_id.is_empty() || order_id.is_empty() {
		return Err(PaymentError::MalformedOrderId(
			gateway_order_id.to_string(),
		));
	}

	Ok((owner_id.to_string(), order_id.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn encode_decode_round_trips() {
		let composed = encode("U123", "ORD-1718000000-a1b2c3d4").unwrap();
		let (owner_id, order_id) = decode(&composed).unwrap();

		assert_eq!(owner_id, "U123");
		assert_eq!(order_id, "ORD-1718000000-a1b2c3d4");
	}

	#[test]
	fn decode_splits_on_the_first_separator_only() {
		let (owner_id, order_id) = decode("U123-ORD-abc").unwrap();

		assert_eq!(owner_id, "U123");
		assert_eq!(order_id, "ORD-abc");
	}

	#[test]
	fn owner_ids_containing_the_separator_cannot_be_encoded() {
		assert!(encode("U-123", "ORD-abc").is_err());
	}

	#[test]
	fn composed_ids_beyond_the_gateway_limit_are_rejected() {
		let owner_id = "U".repeat(40);

		assert!(matches!(
			encode(&owner_id, "ORD-1718000000-a1b2c3d4"),
			Err(PaymentError::OrderIdTooLong(_))
		));
	}

	#[test]
	fn ids_without_a_separator_do_not_decode() {
		assert!(decode("justonepart").is_err());
		assert!(decode("").is_err());
		assert!(decode("-ORD-abc").is_err());
		assert!(decode("U123-").is_err());
	}
}
