pub mod error;
pub mod metrics;
pub mod server;
pub mod web;

pub use error::ApiError;
pub use metrics::{MetricsSnapshot, Operation, ServiceMetrics};
pub use server::StegoService;
pub use web::{build_router, run, AppState};
