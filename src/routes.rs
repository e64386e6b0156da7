use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::booking::check_availability;
use crate::controllers::cart::{clear_cart, get_cart, update_cart};
use crate::controllers::catalog::{
	create_add_on,
	create_portfolio_item,
	create_product,
	create_testimonial,
	create_voucher,
	delete_add_on,
	delete_portfolio_item,
	delete_product,
	delete_testimonial,
	delete_voucher,
	get_add_ons,
	get_portfolio,
	get_products,
	get_testimonials,
	get_vouchers,
	update_add_on,
	update_portfolio_item,
	update_product,
	update_testimonial,
	update_voucher,
};
use crate::controllers::healthcheck;
use crate::controllers::ops::sweep_expired_orders;
use crate::controllers::order::{create_order, get_order, get_orders};
use crate::controllers::payment::payment_notification;
use crate::middleware::AdminLayer;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/bookings", booking_routes())
		.nest("/orders", order_routes())
		.nest("/cart", cart_routes())
		.nest("/payments", payment_routes())
		.nest("/ops", ops_routes(&state))
		.nest("/catalog", catalog_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(30)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Availability checking
fn booking_routes() -> Router<AppState> {
	Router::new().route("/availability", post(check_availability))
}

/// Reservation attempts
fn order_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_order).get(get_orders))
		.route("/{order_id}", get(get_order))
}

/// The stored client cart
fn cart_routes() -> Router<AppState> {
	Router::new().route(
		"/",
		get(get_cart).put(update_cart).delete(clear_cart),
	)
}

/// Gateway callbacks
fn payment_routes() -> Router<AppState> {
	Router::new().route("/notification", post(payment_notification))
}

/// Scheduled operations, admin-guarded
fn ops_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/sweep-expired", post(sweep_expired_orders))
		.route_layer(AdminLayer::new(state.clone()))
}

/// Catalog collections: public reads, admin-guarded writes
fn catalog_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/products", post(create_product))
		.route(
			"/products/{id}",
			put(update_product).delete(delete_product),
		)
		.route("/add-ons", post(create_add_on))
		.route("/add-ons/{id}", put(update_add_on).delete(delete_add_on))
		.route("/vouchers", get(get_vouchers).post(create_voucher))
		.route(
			"/vouchers/{code}",
			put(update_voucher).delete(delete_voucher),
		)
		.route("/testimonials", post(create_testimonial))
		.route(
			"/testimonials/{id}",
			put(update_testimonial).delete(delete_testimonial),
		)
		.route("/portfolio", post(create_portfolio_item))
		.route(
			"/portfolio/{id}",
			put(update_portfolio_item).delete(delete_portfolio_item),
		)
		.route_layer(AdminLayer::new(state.clone()));

	Router::new()
		.route("/products", get(get_products))
		.route("/add-ons", get(get_add_ons))
		.route("/testimonials", get(get_testimonials))
		.route("/portfolio", get(get_portfolio))
		.merge(protected)
}
