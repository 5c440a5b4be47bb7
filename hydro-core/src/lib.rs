//! Core types for the HydroAI reservoir toolkit.
//!
//! - `reservoir`: embedded reference list of monitored reservoirs
//! - `season`, `record`: seasonal observations produced by `hydro-data`
//! - `coordinate`: the validator every geographic computation goes through
//! - `analysis`: AI risk reports and their local fallback
//! - `backend`: the optional HydroAI backend contract
//! - `client` (feature `api`): `reqwest` implementation of that contract

pub mod analysis;
pub mod backend;
#[cfg(feature = "api")]
pub mod client;
pub mod coordinate;
pub mod error;
pub mod record;
pub mod reservoir;
pub mod season;
