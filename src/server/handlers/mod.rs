//! HTTP handlers.

mod dns;
mod health;

pub use dns::dns_handler;
pub use health::health_handler;
