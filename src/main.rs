#[macro_use]
extern crate tracing;

use std::sync::Arc;

use fotoslot::models::SlotCatalog;
use fotoslot::payment::HttpGateway;
use fotoslot::store::{MemoryCartStore, MemoryCatalogStore, MemoryOrderStore};
use fotoslot::{AppState, Config, routes};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::DEBUG)
		.init();

	// Set up the configuration.
	let config = Config::from_env();

	let slots = SlotCatalog::from_config(&config);
	let payment_gateway = Arc::new(HttpGateway::new(&config));

	let state = AppState {
		config,
		slots,
		order_store: Arc::new(MemoryOrderStore::new()),
		catalog_store: Arc::new(MemoryCatalogStore::new()),
		cart_store: Arc::new(MemoryCartStore::new()),
		payment_gateway,
	};

	let app = routes::get_app_router(state);

	let listener = TcpListener::bind("0.0.0.0:80").await.unwrap();
	debug!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
