use anyhow::ensure;
use cgmath::{Deg, Matrix4, Vector3};

use crate::{
    camera::Projection,
    movement::{Facing, Spawn},
    pipelines::material::Colour,
};

/// Scene-wide settings shared by every subsystem.
///
/// `Default` reproduces the walkthrough as authored: cells two units wide,
/// one-unit steps, a five second prop cycle and a twelve slide deck.
#[derive(Clone, Debug)]
pub struct Context {
    /// World units per grid cell; every maze table coordinate is multiplied by it.
    pub scale_factor: f32,
    /// Distance covered by a single advance or retreat.
    pub step: f32,
    pub player_height: f32,
    /// Per-frame lerp factor of the camera blender.
    pub camera_smoothing: f32,
    /// Camera placement relative to the avatar, in the avatar's local frame.
    pub camera_offset: Matrix4<f32>,
    /// Length in seconds of one transient prop cycle.
    pub prop_period: f32,
    pub slide_count: usize,
    pub projection: Projection,
    pub clear_colour: Colour,
    pub start: Spawn,
    pub exit: Spawn,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            step: 1.0,
            player_height: 1.0,
            camera_smoothing: 0.1,
            camera_offset: Matrix4::from_translation(Vector3::new(0.0, 2.0, 5.0))
                * Matrix4::from_angle_x(Deg(-15.0)),
            prop_period: 5.0,
            slide_count: 12,
            projection: Projection::new(1280, 720, Deg(45.0), 0.1, 1000.0),
            clear_colour: Colour::BLACK,
            start: Spawn {
                cell: (0, 8),
                facing: Facing::North,
            },
            exit: Spawn {
                cell: (23, 8),
                facing: Facing::East,
            },
        }
    }
}

impl Context {
    /// Rejects settings the scene cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.scale_factor > 0.0,
            "scale_factor must be positive, got {}",
            self.scale_factor
        );
        ensure!(
            self.step > 0.0 && self.step <= self.scale_factor,
            "step must be in (0, scale_factor], got {}",
            self.step
        );
        ensure!(self.player_height > 0.0, "player_height must be positive");
        ensure!(
            self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0,
            "camera_smoothing must be in (0, 1], got {}",
            self.camera_smoothing
        );
        ensure!(
            self.prop_period >= 1.0,
            "prop_period must be at least one second, got {}",
            self.prop_period
        );
        ensure!(self.slide_count > 0, "the slide deck cannot be empty");
        Ok(())
    }
}
