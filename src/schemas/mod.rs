pub mod booking;
pub mod cart;
pub mod catalog;
pub mod ops;
pub mod order;
pub mod payment;
