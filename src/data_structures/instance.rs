//! Unit transforms and their GPU instance layout.
//!
//! Maze unit templates are authored as an [`Instance`] (translate, rotate,
//! scale) and turned into matrices for composition. Every recorded draw can be
//! packed into an [`InstanceRaw`] for upload as per-instance vertex data.

use cgmath::{One, SquareMatrix};

use crate::pipelines::material::Colour;

/// Per-instance transformation: position, rotation (as quaternion), and scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn scaled(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            scale: cgmath::Vector3::new(x, y, z),
            ..self
        }
    }

    /// `T * R * S`: scale first, then rotate, then translate.
    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl From<cgmath::Vector3<f32>> for Instance {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data a GPU backend stores per instance:
 * the model matrix as four column vectors, the material colour and the sign of
 * the model determinant so mirrored units can flip their normals.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub colour: [f32; 4],
    pub handedness: f32,
}

impl InstanceRaw {
    pub fn new(model: &cgmath::Matrix4<f32>, colour: Colour) -> Self {
        Self {
            model: (*model).into(),
            colour: colour.0,
            handedness: model.determinant().signum(),
        }
    }
}
