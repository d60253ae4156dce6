/*!
 * # erashape - structural drift of MLB game data across eras
 *
 * A Rust library and CLI that samples one game per season from the public
 * MLB Stats API and reports which fields changed type or presence between
 * tracking eras.
 *
 * ## Features
 *
 * - Fetch the first regular-season game of a season and its live feed
 * - Infer field paths and value types of arbitrary JSON documents
 * - Compare inferred structures across any number of labeled eras
 * - Write the differing fields as CSV and print them as a table
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `providers`: Data sources for schedules and game documents:
 *   - `providers::mlb_stats`: MLB Stats API client
 * - `structure`: Recursive structure inference
 * - `comparison`: Cross-era alignment and filtering
 * - `report`: CSV and console output
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod comparison;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod report;
pub mod structure;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use comparison::{compare, Cell, ComparisonRow, ComparisonTable, Era, EraStructure};
pub use errors::{AppError, ConfigError, FetchError, ReportError};
pub use providers::{GameId, StatsSource};
pub use structure::{analyze, analyze_with, ListPolicy, StructureMap, TypeTag};
