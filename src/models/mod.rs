//! Core data models for the roster engine.
//!
//! This module contains the documents stored in the roster collections and
//! the projection types produced from them.

mod attachment;
mod business_hours;
mod employee;
mod operational_cost;
mod projection;
mod shift;
mod user;
mod vocabulary;
mod weekday;

pub use attachment::{Attachment, HistoryEntry};
pub use business_hours::{BusinessHours, DayHours};
pub use employee::{ContractType, Employee};
pub use operational_cost::OperationalCost;
pub use projection::{
    CalculationWarning, DashboardSummary, EmployeeCostLine, FinancialSummary, PayrollProjection,
    RoleCost, WarningSeverity,
};
pub use shift::Shift;
pub use user::{AccessLevel, UserProfile};
pub use vocabulary::{VocabularyEntry, VocabularyKind};
pub use weekday::Weekday;
