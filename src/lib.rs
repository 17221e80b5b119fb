//! Marathon and half-marathon pacing core: negative-split pace solver,
//! checkpoint split projector, finish-time predictor, and the wire types the
//! HTTP service exposes them through.

pub mod config;
pub mod error;
pub mod model;
pub mod predict;
pub mod solver;
pub mod splits;
pub mod timefmt;

pub use config::PlannerConfig;
pub use error::PaceError;
pub use solver::{PaceCurve, PaceProfile};
pub use splits::Split;
