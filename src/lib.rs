//! Roster, coverage and payroll engine for gym staff.
//!
//! This crate keeps employees and their weekly shifts in a document store,
//! and projects them into coverage heatmaps, payroll estimates and
//! break-even figures. The [`api`] module serves all of it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod store;
