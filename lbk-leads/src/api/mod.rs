//! HTTP API handlers for lbk-leads
//!
//! Local JSON API standing in for the browser's interaction events.

pub mod account;
pub mod export;
pub mod files;
pub mod health;
pub mod leads;

pub use account::account_routes;
pub use export::export_routes;
pub use files::file_routes;
pub use health::health_routes;
pub use leads::lead_routes;
