//! Camera projection and the per-frame camera blender.
//!
//! The scene never jumps the camera (except on an explicit point-of-view
//! request). Each frame the active camera inverse is pulled a fixed fraction of
//! the way toward a target, which yields exponential-decay smoothing.

use cgmath::{Matrix4, Point3, Rad, SquareMatrix, Vector3, VectorSpace};

use crate::{
    context::Context,
    data_structures::layout::{GRID_COLUMNS, GRID_ROWS},
};

/// Perspective projection parameters, kept in sync with the window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// What the camera is asked to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraTarget {
    /// Third person, behind the avatar.
    Avatar,
    /// Fixed bird's-eye view of the whole maze.
    Overview,
}

/// Camera inverse placed at `offset` in the avatar's local frame.
///
/// `None` only if the composed transform is singular, which a rigid avatar
/// transform never is.
pub fn avatar_target(avatar: &Matrix4<f32>, offset: &Matrix4<f32>) -> Option<Matrix4<f32>> {
    (avatar * offset).invert()
}

/// Looks straight down onto the centre of the maze with north at the top.
pub fn overview_target(ctx: &Context) -> Matrix4<f32> {
    let s = ctx.scale_factor;
    let center_x = GRID_COLUMNS as f32 * 0.5 * s;
    let center_z = GRID_ROWS as f32 * 0.5 * s;
    Matrix4::look_at_rh(
        Point3::new(center_x, 14.0 * s, center_z),
        Point3::new(center_x, 0.0, center_z),
        Vector3::new(0.0, 0.0, -1.0),
    )
}

/// Moves every cell of `current` a `factor` fraction toward `target`.
pub fn blend(current: &Matrix4<f32>, target: &Matrix4<f32>, factor: f32) -> Matrix4<f32> {
    Matrix4::from_cols(
        current.x.lerp(target.x, factor),
        current.y.lerp(target.y, factor),
        current.z.lerp(target.z, factor),
        current.w.lerp(target.w, factor),
    )
}

#[derive(Clone, Debug)]
pub struct CameraBlender {
    camera_inverse: Matrix4<f32>,
    smoothing: f32,
}

impl CameraBlender {
    pub fn new(camera_inverse: Matrix4<f32>, smoothing: f32) -> Self {
        Self {
            camera_inverse,
            smoothing,
        }
    }

    /// One frame of smoothing toward `target`.
    pub fn blend_toward(&mut self, target: &Matrix4<f32>) -> &Matrix4<f32> {
        self.camera_inverse = blend(&self.camera_inverse, target, self.smoothing);
        &self.camera_inverse
    }

    pub fn snap_to(&mut self, target: Matrix4<f32>) {
        self.camera_inverse = target;
    }

    pub fn camera_inverse(&self) -> &Matrix4<f32> {
        &self.camera_inverse
    }
}
