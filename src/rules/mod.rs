// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! This module holds the typed rule table, the catalogue of built-in rule
//! predicates and the engine that evaluates a commit message against them.

pub mod builtin;
mod case;
mod engine;
mod table;
mod validator;

pub use case::Case;
pub use engine::RuleEngine;
pub use table::{
    Applicability, ParamKind, RawEntry, RawValue, RuleConfig, RuleParam, RuleSet, Severity,
};
pub use validator::{ValidationIssue, ValidationResult};
