//! Core domain entities.
//!
//! - [`Order`] - a purchase record read from the order store
//! - [`OrderStatus`] - the order lifecycle vocabulary
//! - [`SaleStatuses`] - the statuses counted as completed sales

pub mod order;

pub use order::{Order, OrderStatus, SaleStatuses, UnknownStatus};
