// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for clint.
//!
//! This module handles finding, parsing, and resolving configuration files
//! and their `extends` chains into a single rule table.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, parse_config,
    parse_json_config, resolve_rules,
};
pub use schema::*;
