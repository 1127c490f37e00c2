//! Checkout module.
//!
//! Contains shipping details, the delivery date rule and order receipts.

mod order;
mod shipping;

pub use order::Order;
pub use shipping::{earliest_delivery_date, validate_delivery_date, ShippingInfo, MIN_DELIVERY_DAYS};
