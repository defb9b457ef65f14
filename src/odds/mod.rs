//! Odds proxy subsystem.
//!
//! # Data Flow
//! ```text
//! POST /odds/prices {date}
//!     → dates.rs (ISO date → ["05-dec-2025", "05-Dec-2025"])
//!     → proxy.rs (one upstream.rs call per variant, sequential)
//!     → normalize.rs (first parseable JSON → canonical rows)
//!     → rows, or [] / 502 once every variant failed
//! ```
//!
//! # Security Constraints
//! - The odds API key only travels to the upstream, never to clients or logs

pub mod dates;
pub mod normalize;
pub mod proxy;
pub mod types;
pub mod upstream;

pub use dates::VARIANT_COUNT;
pub use proxy::OddsProxy;
pub use types::{CanonicalOddsRow, OddsError, OddsPricesRequest, OddsQuery, UpstreamAttemptOutcome};
pub use upstream::{HttpOddsUpstream, OddsUpstream};
