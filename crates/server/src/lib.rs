//! profilenorm server - HTTP REST API for profile normalization
//!
//! Exposes the batch runner over HTTP. Each request is one batch: the body
//! is a profile record or an array of records and the response is the
//! batch report.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /debug` - Counters and active configuration
//! - `POST /api/v1/normalize` - Normalize a record or an array of records
//!
//! # Configuration
//!
//! An optional `server.{toml,yaml,json}` file in the working directory,
//! overridden by `PROFILENORM_SERVER__*` environment variables, e.g.
//! `PROFILENORM_SERVER__PORT=9000` or
//! `PROFILENORM_SERVER__BATCH__ON_RECORD_ERROR=fail`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
