use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{TestEnv, booking_line};
use fotoslot::models::Cart;

#[tokio::test(flavor = "multi_thread")]
async fn a_fresh_cart_is_empty() {
	let env = TestEnv::new().await;

	let response =
		env.app.get("/cart").add_header("x-client-id", "U1").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<Cart>().lines.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn the_cart_round_trips_through_the_repository() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.put("/cart")
		.add_header("x-client-id", "U1")
		.json(&json!({
			"lines": [booking_line("2025-06-01", &["10:00:00", "10:30:00"])],
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let cart = env
		.app
		.get("/cart")
		.add_header("x-client-id", "U1")
		.await
		.json::<Cart>();

	assert_eq!(cart.lines.len(), 1);
	assert_eq!(cart.lines[0].times.len(), 2);

	// Another owner has their own cart
	let cart = env
		.app
		.get("/cart")
		.add_header("x-client-id", "U2")
		.await
		.json::<Cart>();

	assert!(cart.lines.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_cart_empties_it() {
	let env = TestEnv::new().await;

	env.app
		.put("/cart")
		.add_header("x-client-id", "U1")
		.json(&json!({
			"lines": [booking_line("2025-06-01", &["10:00:00"])],
		}))
		.await;

	let response =
		env.app.delete("/cart").add_header("x-client-id", "U1").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let cart = env
		.app
		.get("/cart")
		.add_header("x-client-id", "U1")
		.await
		.json::<Cart>();

	assert!(cart.lines.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_cart_lines_are_rejected() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.put("/cart")
		.add_header("x-client-id", "U1")
		.json(&json!({
			"lines": [booking_line("2025-06-01", &[])],
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
