//! Request middleware.

pub mod app_token;
pub mod error_body;
pub mod metrics;

pub use app_token::{require_app_token, APP_TOKEN_HEADER};
pub use error_body::render_layer_errors;
pub use metrics::track_metrics;
