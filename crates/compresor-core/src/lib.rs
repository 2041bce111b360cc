//! Compresor Core - support layer for the compresor dynamics processor
//!
//! This crate provides everything the dynamics engine needs around the
//! per-sample gain math itself:
//!
//! - [`LinearSmoother`] - fixed-duration linear parameter ramps, advanced
//!   once per sample for zipper-free automation
//! - [`ParamSet`] / [`ParamId`] - the six compressor parameters with
//!   range-clamped target setters and serializable snapshots
//! - [`AudioBuffer`] - planar N-channel sample buffer, mutated in place by
//!   the engine
//! - Level math: [`db_to_linear`], [`linear_to_db`], [`squared_to_db`]
//!
//! # Design Principles
//!
//! - **Real-time safe**: nothing here allocates after construction; the
//!   engine calls [`LinearSmoother::advance`] on the audio thread only
//! - **libm math**: level conversions go through `libm` so results are
//!   identical across platforms
//! - **Plain data over hierarchy**: a parameter is a descriptor plus a
//!   smoother, not a class tree

pub mod buffer;
pub mod math;
pub mod param;
pub mod smooth;

pub use buffer::AudioBuffer;
pub use math::{
    LEVEL_FLOOR_DB, LEVEL_OVERLOAD_DB, SQUARED_LEVEL_EPSILON, db_to_linear, linear_to_db,
    ms_to_samples, squared_to_db,
};
pub use param::{ParamDescriptor, ParamId, ParamSet, ParamSnapshot, ParamUnit};
pub use smooth::LinearSmoother;
