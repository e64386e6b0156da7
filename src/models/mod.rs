pub mod catalog;
pub mod order;
pub mod slot;

pub use catalog::{
	AddOn,
	AddOnKind,
	PortfolioItem,
	Product,
	Testimonial,
	Voucher,
};
pub use order::{AddOnSelection, BookingLine, Cart, Order, PaymentStatus};
pub use slot::{SLOT_LENGTH_MINUTES, SlotCatalog};
