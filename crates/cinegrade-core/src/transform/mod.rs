//! Transform pipeline: parameter model, per-voxel evaluation, and LUT synthesis.

pub mod evaluate;
pub mod lut;
pub mod params;
pub mod raw;
