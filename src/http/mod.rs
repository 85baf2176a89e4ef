//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, query parsing)
//!     → handlers.rs (one catalog operation per endpoint)
//!     → response.rs (JSON envelope, status code)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::Envelope;
pub use server::{AppState, HttpServer};
