//! Core types for the copywriting assistant
//!
//! Domain value types shared by every crate in the workspace:
//! - Client segment and mood classification results
//! - Project requirements accumulated over a conversation
//! - Itemised price quotes
//! - Ordered first-match phrase rules used by all keyword classifiers
//! - Pure pricing arithmetic

pub mod links;
pub mod pricing;
pub mod quote;
pub mod requirements;
pub mod rules;
pub mod segment;

pub use links::QuickLink;
pub use quote::{DeliveryEstimate, DiscountLine, Quote, QuoteComponent, QuoteKind};
pub use requirements::{Complexity, DeadlineBucket, ProjectRequirements};
pub use rules::{PhraseRule, PhraseRuleSet};
pub use segment::{ClientSegment, Mood};
