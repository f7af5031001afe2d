//! Display themes and the orthogonal presentation and help toggles.
//!
//! Exactly one [`Theme`] is active at a time. Presentation mode and help mode
//! are independent booleans layered on top of whichever theme is selected.

use cgmath::Vector4;

use crate::{
    camera::CameraTarget,
    pipelines::{
        light::Light,
        material::{Colour, Material, TextureRef},
    },
};

const YELLOW: u32 = 0xfac91a;
const BLUE: u32 = 0x1a9ffa;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    WalkingToClass,
    NavigateHall,
    Observatory,
    /// The old desktop screen saver look, with the textured floor.
    Classic,
}

/// Everything a theme decides about how the maze looks.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub wall: Material,
    pub floor: Material,
    pub accent: Material,
    pub start_wall: Material,
    pub end_wall: Material,
    pub sky: Material,
    pub ground: Material,
    pub avatar: Material,
    pub prop: Material,
    pub lights: Vec<Light>,
    /// `Some` for themes that close the maze with a ceiling tiling.
    pub ceiling: Option<Material>,
}

fn sun() -> Light {
    Light::new(Vector4::new(-10.0, 100.0, -10.0, 1.0), Colour::WHITE, 10000.0)
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::WalkingToClass,
        Theme::NavigateHall,
        Theme::Observatory,
        Theme::Classic,
    ];

    /// Themes are numbered from 1, matching the number row.
    pub fn from_index(index: usize) -> Option<Theme> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::WalkingToClass => "walking to class",
            Theme::NavigateHall => "navigate the hall",
            Theme::Observatory => "observatory",
            Theme::Classic => "classic",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::WalkingToClass => Palette {
                wall: Material::phong(Colour::hex(0xb8b8b8)),
                floor: Material::phong(Colour::hex(YELLOW)),
                accent: Material::phong(Colour::hex(BLUE)),
                start_wall: Material::phong(Colour::hex(0x3fb950)),
                end_wall: Material::phong(Colour::hex(0xe5534b)),
                sky: Material::phong(Colour::hex(0x87ceeb)),
                ground: Material::phong(Colour::hex(0x4c7a34)),
                avatar: Material::phong(Colour::WHITE),
                prop: Material::phong(Colour::hex(0xff8c1a)),
                lights: vec![sun()],
                ceiling: None,
            },
            Theme::NavigateHall => Palette {
                wall: Material::gouraud(Colour::hex(0xf2e8d5)),
                floor: Material::phong(Colour::hex(0x8a5a2b)),
                accent: Material::phong(Colour::hex(BLUE)),
                start_wall: Material::gouraud(Colour::hex(0x2e7d32)),
                end_wall: Material::gouraud(Colour::hex(0xc62828)),
                sky: Material::phong(Colour::hex(0x5a5a5a)),
                ground: Material::phong(Colour::hex(0x3a3a3a)),
                avatar: Material::phong(Colour::hex(0x1a237e)),
                prop: Material::phong(Colour::hex(0xffe082)),
                lights: vec![
                    sun(),
                    Light::new(
                        Vector4::new(24.0, 6.0, 9.0, 1.0),
                        Colour::hex(0xfff3c4),
                        100.0,
                    ),
                ],
                ceiling: Some(Material::phong(Colour::hex(0xfafafa))),
            },
            Theme::Observatory => Palette {
                wall: Material::phong(Colour::hex(0x2b2d42)),
                floor: Material::phong(Colour::hex(0x1b1b2f)),
                accent: Material::gouraud(Colour::hex(0x8d99ae)),
                start_wall: Material::phong(Colour::hex(0x3a506b)),
                end_wall: Material::phong(Colour::hex(0x5bc0be)),
                sky: Material::gouraud(Colour::hex(0x0b0c1e)),
                ground: Material::phong(Colour::hex(0x111111)),
                avatar: Material::gouraud(Colour::hex(0xedf2f4)),
                prop: Material::gouraud(Colour::hex(0xfff8dc)),
                lights: vec![Light::new(
                    Vector4::new(-10.0, 100.0, -10.0, 1.0),
                    Colour([0.6, 0.6, 0.8, 1.0]),
                    10000.0,
                )],
                ceiling: None,
            },
            Theme::Classic => Palette {
                wall: Material::phong(Colour::hex(0xc0c0c0)),
                floor: Material::textured(TextureRef::Asset("assets/earth.gif")),
                accent: Material::phong(Colour::hex(BLUE)),
                start_wall: Material::phong(Colour::hex(0xc0c0c0)),
                end_wall: Material::phong(Colour::hex(0xc0c0c0)),
                sky: Material::phong(Colour::hex(0x008080)),
                ground: Material::phong(Colour::hex(0x808080)),
                avatar: Material::phong(Colour::hex(YELLOW)),
                prop: Material::gouraud(Colour::hex(0xff0000)),
                lights: vec![sun()],
                ceiling: Some(Material::phong(Colour::hex(0xdcdcdc))),
            },
        }
    }
}

/// The active theme plus the presentation and help toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeState {
    pub theme: Theme,
    pub presentation_mode: bool,
    pub help_mode: bool,
    slide_index: usize,
    slide_count: usize,
}

impl ModeState {
    /// An empty deck is treated as a single slide.
    pub fn new(slide_count: usize) -> Self {
        Self {
            theme: Theme::default(),
            presentation_mode: false,
            help_mode: false,
            slide_index: 0,
            slide_count: slide_count.max(1),
        }
    }

    /// Returns whether the theme changed.
    pub fn select_theme(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        log::info!("Switching theme from {} to {}", self.theme.name(), theme.name());
        self.theme = theme;
        true
    }

    pub fn toggle_presentation(&mut self) -> bool {
        self.presentation_mode = !self.presentation_mode;
        log::info!("Presentation mode {}", on_off(self.presentation_mode));
        self.presentation_mode
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn next_slide(&mut self) -> usize {
        self.slide_index = (self.slide_index + 1) % self.slide_count;
        self.slide_index
    }

    pub fn prev_slide(&mut self) -> usize {
        self.slide_index = (self.slide_index + self.slide_count - 1) % self.slide_count;
        self.slide_index
    }

    pub fn toggle_help(&mut self) -> bool {
        self.set_help(!self.help_mode);
        self.help_mode
    }

    pub fn set_help(&mut self, help_mode: bool) {
        if self.help_mode != help_mode {
            log::info!("Help mode {}", on_off(help_mode));
        }
        self.help_mode = help_mode;
    }

    /// The material boundary walls are drawn with while presenting.
    pub fn slide_material(&self) -> Material {
        Material::textured(TextureRef::Slide(self.slide_index))
    }

    pub fn camera_target(&self) -> CameraTarget {
        if self.help_mode {
            CameraTarget::Overview
        } else {
            CameraTarget::Avatar
        }
    }

    pub fn avatar_visible(&self) -> bool {
        !self.help_mode
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
