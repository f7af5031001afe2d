//! Reference Blinn-Phong lighting shared by every [`Shading`] kind.
//!
//! GPU backends evaluate the same model per vertex ([`Shading::Gouraud`]) or
//! per fragment ([`Shading::Phong`], [`Shading::Textured`]). This CPU version is
//! what their output is checked against.
//!
//! [`Shading`]: crate::pipelines::material::Shading
//! [`Shading::Gouraud`]: crate::pipelines::material::Shading::Gouraud
//! [`Shading::Phong`]: crate::pipelines::material::Shading::Phong
//! [`Shading::Textured`]: crate::pipelines::material::Shading::Textured

use cgmath::{ElementWise, EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::pipelines::{
    light::Light,
    material::{Colour, Material},
};

/// Colour of a surface point lit by `lights`, seen from `eye`.
///
/// For textured materials pass the sampled texel as the material colour.
pub fn shade(
    material: &Material,
    lights: &[Light],
    point: Point3<f32>,
    normal: Vector3<f32>,
    eye: Point3<f32>,
) -> Colour {
    let n = normal.normalize();
    let e = (eye - point).normalize();
    let base = Vector3::from(material.colour.rgb());

    let lit = lights.iter().fold(base * material.ambient, |acc, light| {
        let to_light = light.position.truncate() - point.to_vec() * light.position.w;
        let distance = to_light.magnitude();
        let l = to_light.normalize();
        let h = (l + e).normalize();
        let diffuse = n.dot(l).max(0.0);
        let specular = n.dot(h).max(0.0).powf(material.smoothness);
        let attenuation = 1.0 / (1.0 + light.attenuation * distance * distance);
        let light_colour = Vector3::from(light.colour.rgb());
        let contribution = base.mul_element_wise(light_colour) * (material.diffusivity * diffuse)
            + light_colour * (material.specularity * specular);
        acc + contribution * attenuation
    });

    Colour([
        lit.x.clamp(0.0, 1.0),
        lit.y.clamp(0.0, 1.0),
        lit.z.clamp(0.0, 1.0),
        material.colour.alpha(),
    ])
}
