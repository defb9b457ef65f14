//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (connect/read deadlines on the shared client)
//!     → On failure: the caller decides (odds: next date variant; AI: 502)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No generic retry layer: the odds route's two date variants are the
//!   only repeated calls, and they live in `odds::proxy`

pub mod timeouts;

pub use timeouts::UpstreamTimeouts;
