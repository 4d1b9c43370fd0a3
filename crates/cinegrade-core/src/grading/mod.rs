//! Grading math for white balance, sliders and three-way color wheels.
//!
//! Pure functions over `[0, 1]` gamma-encoded values. The LUT synthesizer
//! chains them per voxel.

pub mod sliders;
pub mod wheels;
pub mod white_balance;

pub use sliders::{contrast_curve, exposure_scale, rec709_luma, saturation_mix};
pub use wheels::{ToneWeights, hue_sat_lum_to_offset, three_way_weights};
pub use white_balance::white_balance_adjust;
