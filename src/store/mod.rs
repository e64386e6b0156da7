//! Narrow interfaces over the external document store
//!
//! The store is partitioned by owner, but callers only see the aggregate
//! operations below; partitioning is an implementation detail of the
//! concrete store.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::models::{
	AddOn,
	Cart,
	Order,
	PaymentStatus,
	PortfolioItem,
	Product,
	Testimonial,
	Voucher,
};

mod memory;

pub use memory::{MemoryCartStore, MemoryCatalogStore, MemoryOrderStore};

/// Result of an aggregate scan across all owner partitions
///
/// `skipped_owners` counts partitions that could not be read; callers decide
/// whether a partial result is acceptable.
#[derive(Clone, Debug)]
pub struct OrderScan {
	pub orders:         Vec<Order>,
	pub skipped_owners: usize,
}

/// A change notification for the cross-owner orders aggregate
#[derive(Clone, Debug)]
pub enum OrderEvent {
	Added(Order),
	Modified(Order),
	Removed(Order),
}

impl OrderEvent {
	#[must_use]
	pub fn order(&self) -> &Order {
		match self {
			Self::Added(order)
			| Self::Modified(order)
			| Self::Removed(order) => order,
		}
	}
}

/// Order persistence, keyed by owner then order id
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Point read of a single order
	async fn get(
		&self,
		owner_id: &str,
		order_id: &str,
	) -> Result<Option<Order>, StoreError>;

	/// Persist a new order document, overwriting any existing one with the
	/// same id
	async fn put(&self, order: Order) -> Result<(), StoreError>;

	/// Update an existing order document
	async fn update(&self, order: Order) -> Result<(), StoreError>;

	/// All orders for one owner, newest first
	async fn for_owner(
		&self,
		owner_id: &str,
	) -> Result<Vec<Order>, StoreError>;

	/// Aggregate query over all owners, optionally filtered by payment
	/// status
	async fn scan(
		&self,
		status: Option<PaymentStatus>,
	) -> Result<OrderScan, StoreError>;

	/// Subscribe to change events for the cross-owner orders aggregate
	fn subscribe(&self) -> broadcast::Receiver<OrderEvent>;
}

/// Catalog collection persistence: full-collection reads and writes by id
#[async_trait]
pub trait CatalogStore: Send + Sync {
	async fn products(&self) -> Result<Vec<Product>, StoreError>;
	async fn product(&self, id: &str) -> Result<Option<Product>, StoreError>;
	async fn upsert_product(
		&self,
		product: Product,
	) -> Result<(), StoreError>;
	async fn delete_product(&self, id: &str) -> Result<bool, StoreError>;

	async fn add_ons(&self) -> Result<Vec<AddOn>, StoreError>;
	async fn add_on(&self, id: &str) -> Result<Option<AddOn>, StoreError>;
	async fn upsert_add_on(&self, add_on: AddOn) -> Result<(), StoreError>;
	async fn delete_add_on(&self, id: &str) -> Result<bool, StoreError>;

	async fn vouchers(&self) -> Result<Vec<Voucher>, StoreError>;
	async fn voucher(
		&self,
		code: &str,
	) -> Result<Option<Voucher>, StoreError>;
	async fn upsert_voucher(
		&self,
		voucher: Voucher,
	) -> Result<(), StoreError>;
	async fn delete_voucher(&self, code: &str) -> Result<bool, StoreError>;

	async fn testimonials(&self) -> Result<Vec<Testimonial>, StoreError>;
	async fn upsert_testimonial(
		&self,
		testimonial: Testimonial,
	) -> Result<(), StoreError>;
	async fn delete_testimonial(&self, id: &str) -> Result<bool, StoreError>;

	async fn portfolio(&self) -> Result<Vec<PortfolioItem>, StoreError>;
	async fn upsert_portfolio_item(
		&self,
		item: PortfolioItem,
	) -> Result<(), StoreError>;
	async fn delete_portfolio_item(
		&self,
		id: &str,
	) -> Result<bool, StoreError>;
}

/// A client-local cart repository: `get`/`set`/`clear` over a serializable
/// [`Cart`] value, decoupled from any specific storage medium
#[async_trait]
pub trait CartRepository: Send + Sync {
	async fn get(&self, owner_id: &str) -> Result<Cart, StoreError>;
	async fn set(
		&self,
		owner_id: &str,
		cart: Cart,
	) -> Result<(), StoreError>;
	async fn clear(&self, owner_id: &str) -> Result<(), StoreError>;
}
