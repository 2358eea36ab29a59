//! Core library for the appraise performance-review platform: weight
//! snapshots, redistribution, scoring, and the service facade the API
//! layer drives.

pub mod config;
pub mod error;
pub mod reviews;
pub mod telemetry;
