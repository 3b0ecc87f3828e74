//! Result presentation controller for the data quality dashboard.
//!
//! This crate owns everything the browser front end shows about an analysis
//! without touching the DOM: the view models derived from an
//! `AnalysisResult`, the issue detail and affected-rows state, the history
//! list, the upload progress and the markdown adapter for generated analyses.
//!
//! State changes are plain synchronous methods on [`Dashboard`]. Network work
//! is expressed as async functions over the injected [`Backend`] trait, so the
//! caller (a Yew component in `frontend`, or a test) decides where futures run
//! and feeds their results back. Every request carries the selection context it
//! was issued in; results that arrive after the context changed are dropped.

pub mod analysis_view;
pub mod auth;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod history;
pub mod markdown;
pub mod paginator;
pub mod quality;
pub mod sections;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, UploadFile};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, FetchError};
