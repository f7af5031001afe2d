use cgmath::Vector4;

use crate::pipelines::material::Colour;

/// A scene light.
///
/// `position.w == 1.0` makes a point light, `0.0` a directional one whose xyz
/// is the direction towards the light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vector4<f32>,
    pub colour: Colour,
    /// Quadratic falloff coefficient.
    pub attenuation: f32,
}

impl Light {
    /// `size` is the reach of the light; falloff is its reciprocal.
    pub fn new(position: Vector4<f32>, colour: Colour, size: f32) -> Self {
        Self {
            position,
            colour,
            attenuation: 1.0 / size,
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: self.position.into(),
            colour: self.colour.0,
            attenuation: self.attenuation,
            _padding: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    position: [f32; 4],
    colour: [f32; 4],
    attenuation: f32,
    // Uniforms require 16 byte (4 float) spacing
    _padding: [u32; 3],
}
