//! Creation of reservation attempts

use chrono::Utc;

use super::availability::{self, Availability};
use super::pricing::{self, AddOnCharge};
use crate::Config;
use crate::error::{BookingError, Error, PaymentError};
use crate::models::{BookingLine, Order, SlotCatalog};
use crate::payment::{ItemLine, PaymentGateway, TokenRequest, order_ref};
use crate::store::{CatalogStore, OrderStore};

/// A freshly created reservation attempt
///
/// `post_check` is the best-effort re-check run after creation; when it
/// carries conflicts the client hides the payment action.
#[derive(Clone, Debug)]
pub struct CreatedOrder {
	pub order:      Order,
	pub post_check: Availability,
}

/// Create a pending order for a set of booking lines and acquire a payment
/// token for it
///
/// The total is recomputed from the authoritative catalog; a client-supplied
/// total is never trusted. The conflict check runs at the moment of
/// creation and is advisory: it narrows but does not close the window in
/// which a competing order can pay for the same slots.
///
/// # Errors
/// Fails on invalid lines, unknown catalog references, conflicting slots,
/// store failures, or token acquisition failure; in the last case the
/// already persisted order is marked `failure` with a note rather than
/// silently deleted.
#[instrument(skip(config, slots, orders, catalog, gateway, lines))]
pub async fn create_order(
	config: &Config,
	slots: &SlotCatalog,
	orders: &dyn OrderStore,
	catalog: &dyn CatalogStore,
	gateway: &dyn PaymentGateway,
	owner_id: &str,
	lines: Vec<BookingLine>,
) -> Result<CreatedOrder, Error> {
	if lines.is_empty() {
		return Err(Error::MissingRequestData(
			"at least one booking line is required".to_string(),
		));
	}

	let mut gross_amount = 0;
	let mut item_lines = vec![];

	for line in &lines {
		check_line(line)?;

		for &time in &line.times {
			slots.check_bookable(line.date, time)?;
		}

		let line_total = quote_line(catalog, line).await?;

		gross_amount += line_total;
		item_lines.push(ItemLine {
			id:       line.product_id.clone(),
			name:     line.product_label.clone(),
			price:    line_total,
			quantity: 1,
		});
	}

	// Authoritative check at the moment of creation; a competing request
	// can still pass the same check before either order is paid
	let availability = availability::check_availability(orders, &lines).await?;

	if !availability.available {
		return Err(BookingError::SlotsTaken(availability.conflicts).into());
	}

	let now = Utc::now();
	let mut order =
		Order::new(owner_id, lines, gross_amount, config.order_lifetime, now);

	// Encode before persisting so an owner id the gateway cannot carry
	// fails with nothing written
	let gateway_order_id = order_ref::encode(&order.owner_id, &order.order_id)?;

	let (customer_name, customer_contact) = order
		.lines
		.first()
		.map(|l| (l.customer_name.clone(), l.customer_contact.clone()))
		.unwrap_or_default();

	orders.put(order.clone()).await?;

	let token_request = TokenRequest {
		gateway_order_id,
		gross_amount: order.gross_amount,
		items: item_lines,
		customer_name,
		customer_contact,
	};

	match gateway.create_token(token_request).await {
		Ok(token) => {
			order.payment_token = Some(token.token);
			order.payment_redirect_url = Some(token.redirect_url);
			order.updated_at = Utc::now();

			orders.update(order.clone()).await?;
		},
		Err(e) => {
			warn!(
				"token acquisition failed for order {} -- {e}",
				order.order_id
			);

			order.mark_failure(&e.to_string(), Utc::now());

			if let Err(update_err) = orders.update(order.clone()).await {
				error!(
					"could not mark order {} as failed -- {update_err:?}",
					order.order_id
				);
			}

			return Err(PaymentError::TokenAcquisition(e.to_string()).into());
		},
	}

	info!(
		"created order {} for {} slots totalling {}",
		order.order_id,
		order.lines.iter().map(|l| l.times.len()).sum::<usize>(),
		order.gross_amount
	);

	// Best-effort second pass to catch a race that slipped past the first
	// check; a failure here must not undo the created order
	let post_check =
		match availability::check_availability(orders, &order.lines).await {
			Ok(check) => check,
			Err(e) => {
				warn!(
					"post-create availability check failed for order {} -- {e:?}",
					order.order_id
				);

				Availability::clear()
			},
		};

	Ok(CreatedOrder { order, post_check })
}

/// Quote one booking line from the authoritative catalog
async fn quote_line(
	catalog: &dyn CatalogStore,
	line: &BookingLine,
) -> Result<i64, Error> {
	let product = catalog
		.product(&line.product_id)
		.await?
		.ok_or_else(|| BookingError::UnknownProduct(line.product_id.clone()))?;

	let mut charges = vec![];

	for selection in &line.add_ons {
		let add_on = catalog.add_on(&selection.add_on_id).await?.ok_or_else(
			|| BookingError::UnknownAddOn(selection.add_on_id.clone()),
		)?;

		let allocated =
			pricing::check_allocation(selection, &add_on, &line.times)?;

		charges.push(AddOnCharge {
			price: add_on.price,
			kind: add_on.kind,
			allocated,
		});
	}

	let voucher_discount = match &line.voucher_code {
		Some(code) => {
			let voucher = catalog.voucher(code).await?.ok_or_else(|| {
				BookingError::VoucherRejected(format!(
					"unknown voucher '{code}'"
				))
			})?;

			voucher.check_redeemable()?;

			voucher.discount_amount
		},
		None => 0,
	};

	#[allow(clippy::cast_possible_truncation)]
	let session_count = line.times.len() as u32;

	Ok(pricing::quote_total(
		product.base_price,
		line.people_count,
		session_count,
		&charges,
		voucher_discount,
	))
}

fn check_line(line: &BookingLine) -> Result<(), Error> {
	if line.times.is_empty() {
		return Err(Error::MissingRequestData(
			"a booking line needs at least one session time".to_string(),
		));
	}

	if line.people_count == 0 {
		return Err(Error::ValidationError(
			"people count must be at least 1".to_string(),
		));
	}

	if line.customer_name.trim().is_empty()
		|| line.customer_contact.trim().is_empty()
	{
		return Err(Error::MissingRequestData(
			"customer name and contact are required".to_string(),
		));
	}

	Ok(())
}
