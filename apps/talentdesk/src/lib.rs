//! State core of the talentdesk applicant tracking dashboard: the record
//! store, job queries, fitment updates with a progress cache, and the résumé
//! enhancement workflow behind the View Layer's commands.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod enhancement;
pub mod errors;
pub mod fitment;
pub mod models;
pub mod query;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use errors::AppError;
pub use state::AppState;
