//! # Sentiment Dashboard
//!
//! Cleans Indonesian app reviews, scores them with a Burn transformer classifier, and
//! aggregates the results into KPIs, bigrams and word clouds.
#![forbid(unsafe_code)]

/// Text cleaning and slang normalization
pub mod text;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Historical dashboard views
pub mod dashboard;

/// Configuration
pub mod config;

/// Backend and device selection
pub mod backend;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;
