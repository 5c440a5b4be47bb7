//! Data synthesis for the reservoir dashboard.
//!
//! This crate turns static reservoir metadata into the values the charts
//! and map layers draw: a deterministic seasonal history, capacity-derived
//! display metrics, and an approximate water-extent polygon.

pub mod generator;
pub mod metrics;
pub mod polygon;
