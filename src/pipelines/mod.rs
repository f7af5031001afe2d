//! Shading inputs: material descriptors, lights and the reference lighting model.
//!
//! - `material` holds data-driven material descriptors and colours
//! - `light` holds scene lights and their GPU uniform layout
//! - `shading` is the single lighting routine every material kind goes through

pub mod light;
pub mod material;
pub mod shading;
