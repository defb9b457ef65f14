//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID set / propagated)
//!     → middleware/app_token.rs (protected routes only)
//!     → odds.rs | chat.rs | health.rs (handlers)
//!     → response.rs (errors → {"detail": ...})
//!     → Send to client
//! ```

pub mod chat;
pub mod health;
pub mod middleware;
pub mod odds;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer};
