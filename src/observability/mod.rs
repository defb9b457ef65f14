//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the odds orchestrator produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log record of a request
//! - Upstream secrets never appear in log fields

pub mod logging;
pub mod metrics;
