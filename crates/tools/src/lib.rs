//! Price engine and advisory recommendations
//!
//! The price engine turns accumulated project requirements and a client
//! segment into an itemised quote against the shared catalog store.
//! Recommendations are advisory text keyed by segment and service category.

pub mod discounts;
pub mod price_engine;
pub mod recommendations;

pub use discounts::{DiscountCondition, DiscountRule, DiscountRules};
pub use price_engine::PriceEngine;
pub use recommendations::recommendations;
