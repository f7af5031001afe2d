//! The rendering collaborator and draw batching.
//!
//! The scene never talks to a GPU directly. Every frame it hands its draws to a
//! [`Renderer`]: the projection, the light list, the camera inverse and one
//! `draw_unit` call per placed mesh. Backends are free to upload these however
//! they like; [`RecordingRenderer`] keeps them in memory so the draws of a
//! frame can be inspected and sorted into instanced batches.
//!
//! # Key types
//!
//! - [`Renderer`] is the trait a backend implements
//! - [`DrawCall`] is one recorded `draw_unit` call
//! - [`Instanced`] groups draws sharing a mesh and material into one instance list
//! - [`Batches`] splits instanced groups into the opaque and transparent passes
//!

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::{
    camera::Projection,
    data_structures::instance::InstanceRaw,
    pipelines::{light::Light, material::Material},
};

/// Primitive meshes the scene draws. Generating their geometry is up to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mesh {
    /// The unit cube `[-1, 1]³`; every maze unit is a scaled cube.
    Cube,
    Sphere,
    Avatar,
}

/// A frame sink for the scene.
///
/// Calls arrive in this order each frame: `begin_frame`, `set_projection`,
/// `set_lights`, `set_camera_inverse`, any number of `draw_unit`, `end_frame`.
pub trait Renderer {
    fn begin_frame(&mut self) {}

    fn set_projection(&mut self, projection: &Projection);

    fn set_lights(&mut self, lights: &[Light]);

    fn set_camera_inverse(&mut self, camera_inverse: &Matrix4<f32>);

    fn draw_unit(&mut self, mesh: Mesh, transform: &Matrix4<f32>, material: &Material);

    fn end_frame(&mut self) {}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
    pub material: Material,
}

/// All draws of a frame sharing one mesh and one material.
#[derive(Clone, Debug, PartialEq)]
pub struct Instanced {
    pub mesh: Mesh,
    pub material: Material,
    pub instances: Vec<InstanceRaw>,
}

/// Instanced groups split by pass, in the order they should be submitted.
///
/// Transparent groups come sorted back to front by their nearest instance so
/// that blending composes correctly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batches {
    pub opaque: Vec<Instanced>,
    pub transparent: Vec<Instanced>,
}

impl Batches {
    /// Packed per-instance data of every opaque group, ready for a vertex buffer.
    pub fn opaque_bytes(&self) -> Vec<u8> {
        let raws: Vec<InstanceRaw> = self
            .opaque
            .iter()
            .flat_map(|group| group.instances.iter().copied())
            .collect();
        bytemuck::cast_slice(&raws).to_vec()
    }

    pub fn instance_count(&self) -> usize {
        self.opaque
            .iter()
            .chain(self.transparent.iter())
            .map(|group| group.instances.len())
            .sum()
    }
}

/**
 * Keeps everything the scene submitted during the last frame.
 *
 * `begin_frame` drops the previous frame's draws, so after a call to
 * `MazeScene::render` the recorder holds exactly that frame.
 */
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    frames: u32,
    projection: Option<Projection>,
    lights: Vec<Light>,
    camera_inverse: Option<Matrix4<f32>>,
    draws: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames begun so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera_inverse(&self) -> Option<&Matrix4<f32>> {
        self.camera_inverse.as_ref()
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn draws_of(&self, mesh: Mesh) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |draw| draw.mesh == mesh)
    }

    pub fn count_with_material(&self, material: &Material) -> usize {
        self.draws
            .iter()
            .filter(|draw| draw.material == *material)
            .count()
    }

    /// Groups the recorded draws into opaque and transparent instanced batches.
    ///
    /// Groups keep the order in which their first draw was recorded.
    pub fn batches(&self) -> Batches {
        let mut batches = Batches::default();
        for draw in &self.draws {
            let pass = if draw.material.is_transparent() {
                &mut batches.transparent
            } else {
                &mut batches.opaque
            };
            let raw = InstanceRaw::new(&draw.transform, draw.material.colour);
            match pass
                .iter_mut()
                .find(|group| group.mesh == draw.mesh && group.material == draw.material)
            {
                Some(group) => group.instances.push(raw),
                None => pass.push(Instanced {
                    mesh: draw.mesh,
                    material: draw.material,
                    instances: vec![raw],
                }),
            }
        }
        if let Some(eye) = self.eye() {
            let distance = |group: &Instanced| {
                group
                    .instances
                    .iter()
                    .map(|raw| (Vector4::from(raw.model[3]).truncate() - eye).magnitude2())
                    .fold(f32::INFINITY, f32::min)
            };
            batches
                .transparent
                .sort_by(|a, b| distance(b).total_cmp(&distance(a)));
        }
        batches
    }

    fn eye(&self) -> Option<Vector3<f32>> {
        self.camera_inverse
            .and_then(|camera_inverse| camera_inverse.invert())
            .map(|camera| camera.w.truncate())
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.draws.clear();
    }

    fn set_projection(&mut self, projection: &Projection) {
        self.projection = Some(*projection);
    }

    fn set_lights(&mut self, lights: &[Light]) {
        self.lights = lights.to_vec();
    }

    fn set_camera_inverse(&mut self, camera_inverse: &Matrix4<f32>) {
        self.camera_inverse = Some(*camera_inverse);
    }

    fn draw_unit(&mut self, mesh: Mesh, transform: &Matrix4<f32>, material: &Material) {
        self.draws.push(DrawCall {
            mesh,
            transform: *transform,
            material: *material,
        });
    }
}

/// Renderer that only logs a per-frame summary. Useful without a GPU backend.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frame: u64,
    draws: usize,
    transparent: usize,
}

impl Renderer for LogRenderer {
    fn begin_frame(&mut self) {
        self.frame += 1;
        self.draws = 0;
        self.transparent = 0;
    }

    fn set_projection(&mut self, projection: &Projection) {
        log::trace!("Projection aspect {:.3}", projection.aspect);
    }

    fn set_lights(&mut self, lights: &[Light]) {
        log::trace!("{} lights", lights.len());
    }

    fn set_camera_inverse(&mut self, _camera_inverse: &Matrix4<f32>) {}

    fn draw_unit(&mut self, _mesh: Mesh, _transform: &Matrix4<f32>, material: &Material) {
        self.draws += 1;
        if material.is_transparent() {
            self.transparent += 1;
        }
    }

    fn end_frame(&mut self) {
        log::debug!(
            "Frame {}: {} draws ({} transparent)",
            self.frame,
            self.draws,
            self.transparent
        );
    }
}
