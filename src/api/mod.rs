//! HTTP API for the roster engine.
//!
//! Exposes employees, schedules, coverage, payroll and the supporting
//! vocabularies and settings as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BulkDeleteRequest, DraftQuery, FinancialQuery, VocabularyRequest};
pub use response::{ApiError, ApiErrorResponse, BulkDeleteResponse, EmployeeDetail};
pub use state::AppState;
