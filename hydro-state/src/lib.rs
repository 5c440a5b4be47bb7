//! Dashboard state shared by every HydroAI front end.
//!
//! This crate provides:
//! - `state`: the selection model and its single merge-update operation
//! - `session`: backend status and the cached AI analysis
//! - `display`: icon/colour descriptors for severities and status
//! - `overlay`: best-effort backend facts for one display update
//! - `training`: metrics polling while a retrain is outstanding

pub mod display;
pub mod overlay;
pub mod session;
pub mod state;
pub mod training;

#[cfg(test)]
mod testing;
