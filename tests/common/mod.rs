use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use fotoslot::models::{
	AddOn,
	AddOnKind,
	BookingLine,
	Product,
	SlotCatalog,
	Voucher,
};
use fotoslot::payment::StubGateway;
use fotoslot::store::{
	CatalogStore,
	MemoryCartStore,
	MemoryCatalogStore,
	MemoryOrderStore,
};
use fotoslot::{AppState, Config, routes};
use serde_json::json;
use url::Url;

/// The admin key the test config is built with
#[allow(dead_code)]
pub const ADMIN_KEY: &str = "test-admin-key";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:           TestServer,
	pub config:        Config,
	pub order_store:   Arc<MemoryOrderStore>,
	pub catalog_store: Arc<MemoryCatalogStore>,
	pub cart_store:    Arc<MemoryCartStore>,
	pub gateway:       Arc<StubGateway>,
}

pub fn test_config() -> Config {
	Config {
		studio_open_time:   NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
		studio_close_time:  NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
		studio_break_times: vec![
			NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
			NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
		],
		order_lifetime:     TimeDelta::hours(24),
		gateway_base_url:   Url::parse("http://gateway.invalid").unwrap(),
		gateway_server_key: "test-server-key".to_string(),
		admin_api_key:      ADMIN_KEY.to_string(),
	}
}

impl TestEnv {
	/// Get a test environment with in-memory stores, a stub gateway, and a
	/// seeded catalog
	///
	/// # Panics
	/// Panics if building the test server fails
	pub async fn new() -> Self {
		let config = test_config();
		let slots = SlotCatalog::from_config(&config);

		let order_store = Arc::new(MemoryOrderStore::new());
		let catalog_store = Arc::new(MemoryCatalogStore::new());
		let cart_store = Arc::new(MemoryCartStore::new());
		let gateway = Arc::new(StubGateway::new());

		seed_catalog(catalog_store.as_ref()).await;

		let state = AppState {
			config: config.clone(),
			slots,
			order_store: order_store.clone(),
			catalog_store: catalog_store.clone(),
			cart_store: cart_store.clone(),
			payment_gateway: gateway.clone(),
		};
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv {
			app: test_server,
			config,
			order_store,
			catalog_store,
			cart_store,
			gateway,
		}
	}
}

async fn seed_catalog(catalog: &MemoryCatalogStore) {
	catalog
		.upsert_product(Product {
			id:          "family-session".to_string(),
			name:        "Family Session".to_string(),
			base_price:  100_000,
			description: None,
		})
		.await
		.unwrap();

	catalog
		.upsert_add_on(AddOn {
			id:    "printed-photo".to_string(),
			name:  "Printed Photo".to_string(),
			price: 25_000,
			kind:  AddOnKind::PerSession,
		})
		.await
		.unwrap();

	catalog
		.upsert_add_on(AddOn {
			id:    "props".to_string(),
			name:  "Props".to_string(),
			price: 50_000,
			kind:  AddOnKind::Flat,
		})
		.await
		.unwrap();

	catalog
		.upsert_voucher(Voucher {
			code:            "WELCOME10".to_string(),
			discount_amount: 10_000,
			active:          true,
			usage_count:     0,
			usage_limit:     2,
		})
		.await
		.unwrap();
}

/// A booking line request body for the seeded family session product
#[allow(dead_code)]
#[must_use]
pub fn booking_line(date: &str, times: &[&str]) -> serde_json::Value {
	json!({
		"productId": "family-session",
		"productLabel": "Family Session",
		"date": date,
		"times": times,
		"peopleCount": 2,
		"customerName": "Ann",
		"customerContact": "0812345678",
	})
}

/// A [`BookingLine`] model value for seeding the store directly
#[allow(dead_code)]
#[must_use]
pub fn model_line(d: &str, times: &[&str]) -> BookingLine {
	BookingLine {
		product_id:       "family-session".to_string(),
		product_label:    "Family Session".to_string(),
		date:             date(d),
		times:            times.iter().map(|t| time(t)).collect(),
		people_count:     2,
		add_ons:          vec![],
		voucher_code:     None,
		customer_name:    "Ann".to_string(),
		customer_contact: "0812345678".to_string(),
	}
}

#[allow(dead_code)]
#[must_use]
pub fn date(d: &str) -> NaiveDate {
	d.parse().unwrap()
}

#[allow(dead_code)]
#[must_use]
pub fn time(t: &str) -> NaiveTime {
	t.parse().unwrap()
}
