//! In-memory store implementations
//!
//! Backs the test suite and the default binary wiring; a hosted document
//! store adapter plugs in behind the same traits.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::{CartRepository, CatalogStore, OrderEvent, OrderScan, OrderStore};
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

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owner-partitioned in-memory order store with change notifications
///
/// Fault injection for tests: single partitions can be poisoned (skipped by
/// aggregate scans, unreadable for point operations) and the store as a
/// whole can be taken offline.
#[derive(Clone)]
pub struct MemoryOrderStore {
	owners:   Arc<RwLock<HashMap<String, HashMap<String, Order>>>>,
	poisoned: Arc<RwLock<HashSet<String>>>,
	offline:  Arc<AtomicBool>,
	events:   broadcast::Sender<OrderEvent>,
}

impl Default for MemoryOrderStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryOrderStore {
	#[must_use]
	pub fn new() -> Self {
		let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

		Self {
			owners:   Arc::new(RwLock::new(HashMap::new())),
			poisoned: Arc::new(RwLock::new(HashSet::new())),
			offline:  Arc::new(AtomicBool::new(false)),
			events,
		}
	}

	/// Mark a single owner partition as unreadable
	pub fn poison_owner(&self, owner_id: &str) {
		self.poisoned.write().insert(owner_id.to_string());
	}

	/// Make a poisoned owner partition readable again
	pub fn heal_owner(&self, owner_id: &str) {
		self.poisoned.write().remove(owner_id);
	}

	/// Make every operation fail until switched back on
	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::SeqCst);
	}

	fn check_online(&self) -> Result<(), StoreError> {
		if self.offline.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable(
				"store is offline".to_string(),
			));
		}

		Ok(())
	}

	fn check_partition(&self, owner_id: &str) -> Result<(), StoreError> {
		if self.poisoned.read().contains(owner_id) {
			return Err(StoreError::PartitionUnavailable(
				owner_id.to_string(),
			));
		}

		Ok(())
	}

	fn emit(&self, event: OrderEvent) {
		// Nobody listening is fine
		let _ = self.events.send(event);
	}
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
	async fn get(
		&self,
		owner_id: &str,
		order_id: &str,
	) -> Result<Option<Order>, StoreError> {
		self.check_online()?;
		self.check_partition(owner_id)?;

		let owners = self.owners.read();
		let order =
			owners.get(owner_id).and_then(|o| o.get(order_id)).cloned();

		Ok(order)
	}

	async fn put(&self, order: Order) -> Result<(), StoreError> {
		self.check_online()?;
		self.check_partition(&order.owner_id)?;

		let previous = self
			.owners
			.write()
			.entry(order.owner_id.clone())
			.or_default()
			.insert(order.order_id.clone(), order.clone());

		match previous {
			Some(_) => self.emit(OrderEvent::Modified(order)),
			None => self.emit(OrderEvent::Added(order)),
		}

		Ok(())
	}

	async fn update(&self, order: Order) -> Result<(), StoreError> {
		self.check_online()?;
		self.check_partition(&order.owner_id)?;

		let mut owners = self.owners.write();
		let slot = owners
			.get_mut(&order.owner_id)
			.and_then(|o| o.get_mut(&order.order_id))
			.ok_or(StoreError::NotFound)?;

		*slot = order.clone();
		drop(owners);

		self.emit(OrderEvent::Modified(order));

		Ok(())
	}

	async fn for_owner(
		&self,
		owner_id: &str,
	) -> Result<Vec<Order>, StoreError> {
		self.check_online()?;
		self.check_partition(owner_id)?;

		let owners = self.owners.read();
		let mut orders: Vec<Order> = owners
			.get(owner_id)
			.map(|o| o.values().cloned().collect())
			.unwrap_or_default();

		orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(orders)
	}

	async fn scan(
		&self,
		status: Option<PaymentStatus>,
	) -> Result<OrderScan, StoreError> {
		self.check_online()?;

		let poisoned = self.poisoned.read().clone();
		let owners = self.owners.read();

		let mut orders = vec![];
		let mut skipped_owners = 0;

		for (owner_id, partition) in owners.iter() {
			if poisoned.contains(owner_id) {
				skipped_owners += 1;
				continue;
			}

			orders.extend(
				partition
					.values()
					.filter(|o| {
						status.is_none_or(|s| o.payment_status == s)
					})
					.cloned(),
			);
		}

		Ok(OrderScan { orders, skipped_owners })
	}

	fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
		self.events.subscribe()
	}
}

#[derive(Default)]
struct CatalogData {
	products:     HashMap<String, Product>,
	add_ons:      HashMap<String, AddOn>,
	vouchers:     HashMap<String, Voucher>,
	testimonials: HashMap<String, Testimonial>,
	portfolio:    HashMap<String, PortfolioItem>,
}

/// In-memory catalog collections
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
	data: Arc<RwLock<CatalogData>>,
}

impl MemoryCatalogStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
	async fn products(&self) -> Result<Vec<Product>, StoreError> {
		let mut products: Vec<Product> =
			self.data.read().products.values().cloned().collect();
		products.sort_by(|a, b| a.id.cmp(&b.id));

		Ok(products)
	}

	async fn product(&self, id: &str) -> Result<Option<Product>, StoreError> {
		Ok(self.data.read().products.get(id).cloned())
	}

	async fn upsert_product(
		&self,
		product: Product,
	) -> Result<(), StoreError> {
		self.data.write().products.insert(product.id.clone(), product);

		Ok(())
	}

	async fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
		Ok(self.data.write().products.remove(id).is_some())
	}

	async fn add_ons(&self) -> Result<Vec<AddOn>, StoreError> {
		let mut add_ons: Vec<AddOn> =
			self.data.read().add_ons.values().cloned().collect();
		add_ons.sort_by(|a, b| a.id.cmp(&b.id));

		Ok(add_ons)
	}

	async fn add_on(&self, id: &str) -> Result<Option<AddOn>, StoreError> {
		Ok(self.data.read().add_ons.get(id).cloned())
	}

	async fn upsert_add_on(&self, add_on: AddOn) -> Result<(), StoreError> {
		self.data.write().add_ons.insert(add_on.id.clone(), add_on);

		Ok(())
	}

	async fn delete_add_on(&self, id: &str) -> Result<bool, StoreError> {
		Ok(self.data.write().add_ons.remove(id).is_some())
	}

	async fn vouchers(&self) -> Result<Vec<Voucher>, StoreError> {
		let mut vouchers: Vec<Voucher> =
			self.data.read().vouchers.values().cloned().collect();
		vouchers.sort_by(|a, b| a.code.cmp(&b.code));

		Ok(vouchers)
	}

	async fn voucher(
		&self,
		code: &str,
	) -> Result<Option<Voucher>, StoreError> {
		Ok(self.data.read().vouchers.get(code).cloned())
	}

	async fn upsert_voucher(
		&self,
		voucher: Voucher,
	) -> Result<(), StoreError> {
		self.data.write().vouchers.insert(voucher.code.clone(), voucher);

		Ok(())
	}

	async fn delete_voucher(&self, code: &str) -> Result<bool, StoreError> {
		Ok(self.data.write().vouchers.remove(code).is_some())
	}

	async fn testimonials(&self) -> Result<Vec<Testimonial>, StoreError> {
		let mut testimonials: Vec<Testimonial> =
			self.data.read().testimonials.values().cloned().collect();
		testimonials.sort_by(|a, b| a.id.cmp(&b.id));

		Ok(testimonials)
	}

	async fn upsert_testimonial(
		&self,
		testimonial: Testimonial,
	) -> Result<(), StoreError> {
		self.data
			.write()
			.testimonials
			.insert(testimonial.id.clone(), testimonial);

		Ok(())
	}

	async fn delete_testimonial(
		&self,
		id: &str,
	) -> Result<bool, StoreError> {
		Ok(self.data.write().testimonials.remove(id).is_some())
	}

	async fn portfolio(&self) -> Result<Vec<PortfolioItem>, StoreError> {
		let mut portfolio: Vec<PortfolioItem> =
			self.data.read().portfolio.values().cloned().collect();
		portfolio.sort_by(|a, b| a.id.cmp(&b.id));

		Ok(portfolio)
	}

	async fn upsert_portfolio_item(
		&self,
		item: PortfolioItem,
	) -> Result<(), StoreError> {
		self.data.write().portfolio.insert(item.id.clone(), item);

		Ok(())
	}

	async fn delete_portfolio_item(
		&self,
		id: &str,
	) -> Result<bool, StoreError> {
		Ok(self.data.write().portfolio.remove(id).is_some())
	}
}

/// In-memory cart repository keyed by owner
#[derive(Clone, Default)]
pub struct MemoryCartStore {
	carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl MemoryCartStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl CartRepository for MemoryCartStore {
	async fn get(&self, owner_id: &str) -> Result<Cart, StoreError> {
		Ok(self.carts.read().get(owner_id).cloned().unwrap_or_default())
	}

	async fn set(
		&self,
		owner_id: &str,
		cart: Cart,
	) -> Result<(), StoreError> {
		self.carts.write().insert(owner_id.to_string(), cart);

		Ok(())
	}

	async fn clear(&self, owner_id: &str) -> Result<(), StoreError> {
		self.carts.write().remove(owner_id);

		Ok(())
	}
}
