//! # FreshPlate Order Core
//!
//! Implements the order creation and pricing core of the FreshPlate
//! storefront: charge configuration, delivery eligibility, pricing,
//! promotions, and the transactional order placement flow shared by the
//! online store and the in-store POS.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::collapsible_if)]

pub mod errors;
pub mod implementation;
pub mod storage;
pub mod types;

// Re-exports for public API
pub use implementation::order_placement::OrderPlacementService;
pub use storage::{CommerceStore, InMemoryStore, StoreTx};
pub use types::store_config::{ChargeConfig, FreeDeliveryConfig};
