//! HTTP front-end for Quarry
//!
//! - `POST /sql` with `{"text": "..."}` answers one question
//! - `GET /health` reports liveness

pub mod routes;
pub mod server;

mod error;

pub use error::{Result, WebError};
pub use quarry_config::WebConfig;
pub use server::{app, start_server};
