//! Advisory error reporting.
//!
//! SYSTEM CONTEXT
//! ==============
//! The drawer never throws across its public surface. Internal failures are
//! turned into an [`ErrorReport`], written to the `log` facade, and otherwise
//! ignored. Under `hydrate` the facade is backed by the browser console.

use serde::Serialize;
use uuid::Uuid;

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

/// How loudly a failure should be surfaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Optional chrome is missing; the page still works.
    Low,
    #[default]
    Medium,
    High,
    /// Something the page cannot recover from.
    Critical,
}

impl Severity {
    /// Log level used when this severity is written to the facade.
    #[must_use]
    pub fn level(self) -> log::Level {
        match self {
            Self::Low => log::Level::Warn,
            Self::Medium | Self::High | Self::Critical => log::Level::Error,
        }
    }
}

/// Structured record of a handled failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub id: Uuid,
    /// Operation that observed the failure, e.g. `DrawerController::mount`.
    pub context: String,
    pub severity: Severity,
    pub message: String,
}

/// Log `err` under `context` and return the report that was written.
pub fn handle_error(err: &impl std::fmt::Display, context: &str, severity: Severity) -> ErrorReport {
    let report = ErrorReport {
        id: Uuid::new_v4(),
        context: context.to_owned(),
        severity,
        message: err.to_string(),
    };
    log::log!(
        target: "navdrawer",
        severity.level(),
        "{}: {} (severity={:?}, id={})",
        report.context,
        report.message,
        report.severity,
        report.id
    );
    report
}
