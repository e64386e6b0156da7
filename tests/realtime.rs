use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde_json::json;

mod common;

use common::{TestEnv, booking_line, date, model_line, time};
use fotoslot::booking::availability::{self, AvailabilityIndex};
use fotoslot::models::{Order, PaymentStatus};
use fotoslot::schemas::order::CreateOrderResponse;
use fotoslot::store::OrderStore;

fn paid_order(owner: &str, order_id: &str, d: &str, times: &[&str]) -> Order {
	let mut order = Order::new(
		owner,
		vec![model_line(d, times)],
		400_000,
		TimeDelta::hours(24),
		Utc::now(),
	);
	order.order_id = order_id.to_string();
	order.payment_status = PaymentStatus::Success;

	order
}

/// The cooperative re-check after order creation: a competing settlement on
/// the same slot is reported so the client can hide the payment action.
#[tokio::test(flavor = "multi_thread")]
async fn a_competing_settlement_triggers_the_conflict_watcher() {
	let env = TestEnv::new().await;

	let requests = vec![model_line("2025-06-01", &["10:00:00"])];
	let mut events = env.order_store.subscribe();

	let watcher = tokio::spawn(async move {
		availability::first_conflict(&mut events, &requests, "ORD-own").await
	});

	// The watcher's own order settling is not a conflict
	env.order_store
		.put(paid_order("U1", "ORD-own", "2025-06-01", &["10:00:00"]))
		.await
		.unwrap();

	// A competing order settling on the same slot is
	env.order_store
		.put(paid_order("U2", "ORD-rival", "2025-06-01", &["10:00:00"]))
		.await
		.unwrap();

	let conflicts = tokio::time::timeout(Duration::from_secs(5), watcher)
		.await
		.unwrap()
		.unwrap()
		.unwrap();

	assert_eq!(conflicts.len(), 1);
	assert_eq!(conflicts[0].times, vec![time("10:00:00")]);
}

#[tokio::test(flavor = "multi_thread")]
async fn unrelated_settlements_do_not_trigger_the_watcher() {
	let env = TestEnv::new().await;

	let requests = vec![model_line("2025-06-01", &["10:00:00"])];
	let mut events = env.order_store.subscribe();

	let watcher = tokio::spawn(async move {
		tokio::time::timeout(
			Duration::from_millis(500),
			availability::first_conflict(&mut events, &requests, "ORD-own"),
		)
		.await
	});

	// A different date and a different time on the same date
	env.order_store
		.put(paid_order("U2", "ORD-a", "2025-06-02", &["10:00:00"]))
		.await
		.unwrap();
	env.order_store
		.put(paid_order("U3", "ORD-b", "2025-06-01", &["14:00:00"]))
		.await
		.unwrap();

	// The watcher times out without reporting a conflict
	assert!(watcher.await.unwrap().is_err());
}

/// The availability index derived from a full scan and one maintained from
/// the live change feed agree.
#[tokio::test(flavor = "multi_thread")]
async fn the_index_follows_the_change_feed() {
	let env = TestEnv::new().await;

	let mut events = env.order_store.subscribe();

	let created = env
		.app
		.post("/orders")
		.add_header("x-client-id", "U1")
		.json(&json!({
			"lines": [booking_line("2025-06-01", &["10:00:00", "10:30:00"])],
		}))
		.await
		.json::<CreateOrderResponse>();

	let mut index = AvailabilityIndex::default();

	// Nothing is taken while the order is only pending
	while let Ok(event) = events.try_recv() {
		index.apply(&event);
	}

	assert!(!index.is_taken(date("2025-06-01"), time("10:00:00")));

	env.app
		.post("/payments/notification")
		.json(&json!({
			"order_id": format!("U1-{}", created.order.order_id),
			"transaction_status": "settlement",
		}))
		.await;

	while let Ok(event) = events.try_recv() {
		index.apply(&event);
	}

	assert!(index.is_taken(date("2025-06-01"), time("10:00:00")));
	assert!(index.is_taken(date("2025-06-01"), time("10:30:00")));
	assert!(!index.is_taken(date("2025-06-01"), time("11:00:00")));

	// A fresh scan-derived index agrees with the incrementally maintained
	// one
	let scan = env.order_store.scan(None).await.unwrap();
	let scanned = AvailabilityIndex::from_orders(scan.orders.iter());

	assert_eq!(
		scanned.taken_on(date("2025-06-01")),
		index.taken_on(date("2025-06-01"))
	);
}
