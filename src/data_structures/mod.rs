//! Maze data structures: unit instances, building block runs and the maze table.
//!
//! - `instance` holds per-instance transformation data and its GPU layout
//! - `block` turns a unit template into a run of placed transforms
//! - `layout` is the authored maze table and its static colliders

pub mod block;
pub mod instance;
pub mod layout;
