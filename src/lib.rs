//! maze-flow
//!
//! A grid-locked 3D maze walkthrough core. A single avatar walks a hand-authored
//! maze in discrete steps, blocked by axis-aligned colliders, while the scene
//! switches between display themes, a slide presentation on the boundary walls
//! and a bird's-eye help view. Drawing is delegated to a [`render::Renderer`],
//! so the whole scene runs and is tested without a GPU.
//!
//! High-level modules
//! - `camera`: projection and the smoothed camera blender
//! - `collision`: AABBs and the collider registry
//! - `context`: scene-wide settings
//! - `data_structures`: unit instances, building block runs and the maze table
//! - `flow`: flow lifecycle, the windowed runner and the scripted runner
//! - `input`: key bindings for the scene's actions
//! - `movement`: facing, player state and the movement controller
//! - `pipelines`: materials, lights and the reference shading model
//! - `props`: transient props that toggle colliders on a cycle
//! - `render`: the renderer trait, draw recording and batching
//! - `scene`: the walkthrough scene tying everything together
//! - `theme`: display themes and the presentation and help toggles
//!

pub mod camera;
pub mod collision;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod movement;
pub mod pipelines;
pub mod props;
pub mod render;
pub mod scene;
pub mod theme;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
