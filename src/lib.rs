#[macro_use]
extern crate tracing;

use std::sync::Arc;

use axum::extract::FromRef;

mod config;
mod owner;

pub mod booking;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod payment;
pub mod routes;
pub mod schemas;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use owner::OwnerId;

use models::SlotCatalog;
use payment::PaymentGateway;
use store::{CartRepository, CatalogStore, OrderStore};

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:          Config,
	pub slots:           SlotCatalog,
	pub order_store:     Arc<dyn OrderStore>,
	pub catalog_store:   Arc<dyn CatalogStore>,
	pub cart_store:      Arc<dyn CartRepository>,
	pub payment_gateway: Arc<dyn PaymentGateway>,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self {
		input.config.clone()
	}
}

impl FromRef<AppState> for SlotCatalog {
	fn from_ref(input: &AppState) -> Self {
		input.slots.clone()
	}
}

impl FromRef<AppState> for Arc<dyn OrderStore> {
	fn from_ref(input: &AppState) -> Self {
		input.order_store.clone()
	}
}

impl FromRef<AppState> for Arc<dyn CatalogStore> {
	fn from_ref(input: &AppState) -> Self {
		input.catalog_store.clone()
	}
}

impl FromRef<AppState> for Arc<dyn CartRepository> {
	fn from_ref(input: &AppState) -> Self {
		input.cart_store.clone()
	}
}

impl FromRef<AppState> for Arc<dyn PaymentGateway> {
	fn from_ref(input: &AppState) -> Self {
		input.payment_gateway.clone()
	}
}
