use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{ADMIN_KEY, TestEnv};
use fotoslot::models::{AddOn, Product, Voucher};

#[tokio::test(flavor = "multi_thread")]
async fn products_are_publicly_readable() {
	let env = TestEnv::new().await;

	let response = env.app.get("/catalog/products").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let products = response.json::<Vec<Product>>();

	assert!(products.iter().any(|p| p.id == "family-session"));
}

#[tokio::test(flavor = "multi_thread")]
async fn catalog_writes_require_the_admin_key() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/products")
		.json(&json!({ "name": "Mini Session", "basePrice": 75_000 }))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env
		.app
		.post("/catalog/products")
		.add_header("x-admin-key", "wrong-key")
		.json(&json!({ "name": "Mini Session", "basePrice": 75_000 }))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn products_can_be_created_updated_and_deleted() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/products")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({ "name": "Mini Session", "basePrice": 75_000 }))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let product = response.json::<Product>();

	assert!(!product.id.is_empty());
	assert_eq!(product.base_price, 75_000);

	let response = env
		.app
		.put(&format!("/catalog/products/{}", product.id))
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({ "name": "Mini Session", "basePrice": 80_000 }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Product>().base_price, 80_000);

	let response = env
		.app
		.delete(&format!("/catalog/products/{}", product.id))
		.add_header("x-admin-key", ADMIN_KEY)
		.await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env
		.app
		.delete(&format!("/catalog/products/{}", product.id))
		.add_header("x-admin-key", ADMIN_KEY)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_ons_can_be_managed() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/add-ons")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"name": "Extra Edits",
			"price": 40_000,
			"kind": "perSession",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let add_on = response.json::<AddOn>();

	let response = env
		.app
		.put(&format!("/catalog/add-ons/{}", add_on.id))
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"name": "Extra Edits",
			"price": 45_000,
			"kind": "flat",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let add_ons = env.app.get("/catalog/add-ons").await.json::<Vec<AddOn>>();

	assert!(add_ons.iter().any(|a| a.id == add_on.id && a.price == 45_000));
}

#[tokio::test(flavor = "multi_thread")]
async fn voucher_reads_are_admin_only() {
	let env = TestEnv::new().await;

	let response = env.app.get("/catalog/vouchers").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env
		.app
		.get("/catalog/vouchers")
		.add_header("x-admin-key", ADMIN_KEY)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let vouchers = response.json::<Vec<Voucher>>();

	assert!(vouchers.iter().any(|v| v.code == "WELCOME10"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_voucher_codes_are_rejected() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/vouchers")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"code": "WELCOME10",
			"discountAmount": 5_000,
			"active": true,
			"usageLimit": 10,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn voucher_updates_preserve_the_usage_count() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.put("/catalog/vouchers/WELCOME10")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"discountAmount": 15_000,
			"active": false,
			"usageLimit": 5,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let voucher = response.json::<Voucher>();

	assert_eq!(voucher.discount_amount, 15_000);
	assert!(!voucher.active);
	assert_eq!(voucher.usage_count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn testimonials_and_portfolio_can_be_managed() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/testimonials")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"author": "Dewi",
			"quote": "Lovely photos!",
			"rating": 5,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env
		.app
		.post("/catalog/portfolio")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({
			"title": "Golden hour",
			"imageUrl": "https://cdn.example.com/golden.jpg",
			"category": "outdoor",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let testimonials =
		env.app.get("/catalog/testimonials").await.json::<serde_json::Value>();
	let portfolio =
		env.app.get("/catalog/portfolio").await.json::<serde_json::Value>();

	assert_eq!(testimonials.as_array().unwrap().len(), 1);
	assert_eq!(portfolio.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn portfolio_items_need_a_valid_image_url() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/catalog/portfolio")
		.add_header("x-admin-key", ADMIN_KEY)
		.json(&json!({ "title": "Broken", "imageUrl": "not a url" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
