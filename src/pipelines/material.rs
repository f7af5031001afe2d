//! Data-driven material descriptors.
//!
//! A [`Material`] is plain data: a shading kind, the lighting coefficients and
//! an optional texture reference. One shading routine
//! ([`crate::pipelines::shading::shade`]) consumes every kind.

/// Linear RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour(pub [f32; 4]);

impl Colour {
    pub const BLACK: Colour = Colour([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Colour = Colour([1.0, 1.0, 1.0, 1.0]);

    /// Opaque colour from a `0xRRGGBB` literal.
    pub fn hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Colour([channel(16), channel(8), channel(0), 1.0])
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Colour([r, g, b, alpha.clamp(0.0, 1.0)])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

/// Where the lighting model is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Per fragment.
    Phong,
    /// Per vertex, interpolated across the face.
    Gouraud,
    /// Per fragment, base colour sampled from the texture.
    Textured,
}

/// Texture a material samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureRef {
    Asset(&'static str),
    /// Page of the presentation deck.
    Slide(usize),
}

impl TextureRef {
    pub fn path(&self) -> String {
        match self {
            TextureRef::Asset(path) => path.to_string(),
            TextureRef::Slide(index) => format!("assets/slides/slide_{:02}.png", index + 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub colour: Colour,
    pub ambient: f32,
    pub diffusivity: f32,
    pub specularity: f32,
    pub smoothness: f32,
    pub texture: Option<TextureRef>,
}

impl Material {
    /// Matte plastic lit per fragment.
    pub fn phong(colour: Colour) -> Self {
        Self {
            shading: Shading::Phong,
            colour,
            ambient: 0.5,
            diffusivity: 0.6,
            specularity: 0.4,
            smoothness: 40.0,
            texture: None,
        }
    }

    pub fn gouraud(colour: Colour) -> Self {
        Self {
            shading: Shading::Gouraud,
            colour,
            ambient: 0.0,
            diffusivity: 1.0,
            specularity: 1.0,
            smoothness: 40.0,
            texture: None,
        }
    }

    /// Fully ambient so the texture shows at its own brightness.
    pub fn textured(texture: TextureRef) -> Self {
        Self {
            shading: Shading::Textured,
            colour: Colour::BLACK,
            ambient: 1.0,
            diffusivity: 0.1,
            specularity: 0.1,
            smoothness: 40.0,
            texture: Some(texture),
        }
    }

    /// Same parameters, different base colour.
    pub fn with_colour(self, colour: Colour) -> Self {
        Self { colour, ..self }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            colour: self.colour.with_alpha(opacity),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.colour.alpha() < 1.0
    }
}
