//! Foundation types for flatconf.
//!
//! This crate provides the small value types shared by the config resolver,
//! the plugin catalog, and the CLI. It has zero external dependencies, making
//! it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Severity types**: [`RuleSeverity`]
//! - **Rule identifiers**: [`RuleId`]

mod rule_id;
mod severity;

pub use rule_id::RuleId;
pub use severity::{ParseSeverityError, RuleSeverity};
