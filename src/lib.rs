//! Costar - Serverless function cost analyzer
//!
//! This library ingests serverless-function telemetry CSVs and produces
//! derived metrics, threshold-classified candidate views, and a two-feature
//! linear cost model, rendered as text, JSON, CSV, or HTML reports.

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod cost_model;
pub mod csv_output;
pub mod filter;
pub mod html_output;
pub mod json_output;
pub mod loader;
pub mod metrics;
pub mod record;
pub mod report;
pub mod stats;
