//! Core domain models
//!
//! This module defines activities, pipelines, their run state and the
//! naming and parameter rules they share.

pub mod activity;
pub mod config;
pub mod dataset;
pub mod error;
pub mod naming;
pub mod params;
pub mod pipeline;
pub mod state;

pub use activity::*;
pub use dataset::*;
pub use error::*;
pub use naming::{is_valid_name, validate_name};
pub use params::{Parameters, PropagatedVariable};
pub use pipeline::*;
pub use state::*;
