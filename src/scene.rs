//! The maze walkthrough scene.
//!
//! [`SceneState`] is everything that changes while the user walks the maze.
//! [`MazeScene`] owns it together with the static layout and the subsystems
//! that operate on it, and orders one frame:
//!
//! 1. at most one pending movement is applied
//! 2. the palette follows the selected theme
//! 3. prop colliders follow the animation time
//! 4. the finish line is checked
//! 5. the camera is blended toward its target
//!
//! Prop colliders toggled during a frame are therefore first seen by the
//! movement step of the next frame.

use anyhow::{Context as _, bail, ensure};
use cgmath::{Matrix4, Vector3};

use crate::{
    camera::{CameraBlender, CameraTarget, avatar_target, overview_target},
    collision::{ColliderRegistry, PLAYER_ID},
    context::Context,
    data_structures::layout::{GRID_COLUMNS, GRID_ROWS, MAZE, MazeLayout, Section, SectionRole},
    flow::{FrameTime, GraphicsFlow},
    input::Action,
    movement::{MovementController, PendingMovement, Player, Spawn},
    pipelines::material::Material,
    props::{PROP_GROUPS, PropGroup, PropScheduler},
    render::{Mesh, Renderer},
    theme::{ModeState, Palette, Theme},
};

/// Mutable state of one walkthrough.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub player: Player,
    pub colliders: ColliderRegistry,
    pub modes: ModeState,
    pub pending: PendingMovement,
    /// Set once the player leaves through the exit or skips to it.
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct MazeScene {
    state: SceneState,
    layout: MazeLayout,
    movement: MovementController,
    props: PropScheduler,
    camera: CameraBlender,
    palette: Palette,
    palette_theme: Theme,
    time: FrameTime,
}

impl MazeScene {
    /// The authored maze with the default prop groups.
    pub fn new(ctx: &Context) -> anyhow::Result<Self> {
        Self::with_layout(ctx, MAZE, PROP_GROUPS)
    }

    pub fn with_layout(
        ctx: &Context,
        sections: &'static [Section],
        prop_groups: &[PropGroup],
    ) -> anyhow::Result<Self> {
        ctx.validate().context("invalid scene context")?;
        let layout = MazeLayout::load(sections, ctx).context("invalid maze table")?;

        let (player, player_aabb) = Player::spawn(ctx.start, ctx)?;
        let mut colliders = ColliderRegistry::new(player_aabb);
        for (id, aabb) in layout.colliders() {
            ensure!(
                colliders.insert(*id, *aabb),
                "static collider {} was inserted twice",
                id
            );
        }
        if let Some(id) = colliders.overlaps_any(&player_aabb, PLAYER_ID) {
            bail!("the start cell {:?} overlaps collider {}", ctx.start.cell, id);
        }

        let props = PropScheduler::new(prop_groups, ctx)?;
        let modes = ModeState::new(ctx.slide_count);
        let palette_theme = modes.theme;
        log::info!(
            "Maze scene set up with {} colliders, starting at {:?}",
            colliders.len(),
            ctx.start.cell
        );

        Ok(Self {
            state: SceneState {
                player,
                colliders,
                modes,
                pending: PendingMovement::default(),
                finished: false,
            },
            layout,
            movement: MovementController::new(ctx.step),
            props,
            camera: CameraBlender::new(overview_target(ctx), ctx.camera_smoothing),
            palette: palette_theme.palette(),
            palette_theme,
            time: FrameTime::default(),
        })
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn camera(&self) -> &CameraBlender {
        &self.camera
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn props(&self) -> &PropScheduler {
        &self.props
    }

    /// Time of the last update.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Applies a user action.
    ///
    /// Movement actions are only queued and take effect on the next update.
    /// Everything else applies immediately.
    pub fn trigger(&mut self, ctx: &Context, action: Action) -> anyhow::Result<()> {
        let modes = &mut self.state.modes;
        match action {
            Action::TurnLeft
            | Action::TurnRight
            | Action::TurnAround
            | Action::MoveForward
            | Action::MoveBackward => {
                if let Some(movement) = action.movement() {
                    self.state.pending.arm(movement);
                }
            }
            Action::SelectTheme(theme) => {
                modes.select_theme(theme);
            }
            Action::TogglePresentation => {
                modes.toggle_presentation();
            }
            Action::NextSlide => {
                let slide = modes.next_slide();
                log::debug!("Slide {}/{}", slide + 1, modes.slide_count());
            }
            Action::PrevSlide => {
                let slide = modes.prev_slide();
                log::debug!("Slide {}/{}", slide + 1, modes.slide_count());
            }
            Action::ToggleHelp => {
                modes.toggle_help();
            }
            Action::SetPlayerPov => {
                modes.set_help(false);
                match avatar_target(&self.state.player.transform, &ctx.camera_offset) {
                    Some(target) => self.camera.snap_to(target),
                    None => log::warn!("Avatar transform is singular, keeping the current camera"),
                }
            }
            Action::Restart => {
                self.respawn(ctx.start, ctx)?;
                self.state.finished = false;
                log::info!("Restarting at {:?}", ctx.start.cell);
            }
            Action::Finish => {
                self.respawn(ctx.exit, ctx)?;
                self.state.finished = true;
                log::info!("Skipping to the exit at {:?}", ctx.exit.cell);
            }
        }
        Ok(())
    }

    fn respawn(&mut self, spawn: Spawn, ctx: &Context) -> anyhow::Result<()> {
        let (player, aabb) = Player::spawn(spawn, ctx)?;
        self.state.player = player;
        self.state.colliders.set_player(aabb);
        self.state.pending.clear();
        Ok(())
    }

    /// Advances the scene by one frame.
    pub fn update(&mut self, ctx: &Context, time: FrameTime) {
        let state = &mut self.state;

        if let Some(movement) = state.pending.take_next() {
            let outcome = self
                .movement
                .apply(&mut state.player, &mut state.colliders, movement);
            log::debug!("{:?}: {:?}", movement, outcome);
        }

        if self.palette_theme != state.modes.theme {
            self.palette_theme = state.modes.theme;
            self.palette = self.palette_theme.palette();
        }

        self.props.update(time.t, &mut state.colliders);

        if !state.finished && self.layout.is_outside_east(state.colliders.player(), ctx) {
            state.finished = true;
            log::info!("Maze completed after {:.1}s", time.t);
        }

        let target = match state.modes.camera_target() {
            CameraTarget::Avatar => avatar_target(&state.player.transform, &ctx.camera_offset)
                .unwrap_or(*self.camera.camera_inverse()),
            CameraTarget::Overview => overview_target(ctx),
        };
        self.camera.blend_toward(&target);

        self.time = time;
    }

    /// Submits one frame of draws.
    pub fn render(&self, ctx: &Context, renderer: &mut dyn Renderer) {
        let palette = &self.palette;
        let modes = &self.state.modes;
        let s = ctx.scale_factor;

        renderer.begin_frame();
        renderer.set_projection(&ctx.projection);
        renderer.set_lights(&palette.lights);
        renderer.set_camera_inverse(self.camera.camera_inverse());

        let center = Vector3::new(
            GRID_COLUMNS as f32 * 0.5 * s,
            0.0,
            GRID_ROWS as f32 * 0.5 * s,
        );
        let sky = Matrix4::from_translation(center) * Matrix4::from_scale(GRID_COLUMNS as f32 * s * 2.0);
        renderer.draw_unit(Mesh::Sphere, &sky, &palette.sky);
        let ground = Matrix4::from_translation(center + Vector3::new(0.0, -0.6, 0.0))
            * Matrix4::from_nonuniform_scale(
                GRID_COLUMNS as f32 * s * 1.5,
                0.5,
                GRID_ROWS as f32 * s * 1.5,
            );
        renderer.draw_unit(Mesh::Cube, &ground, &palette.ground);

        let slide = modes.slide_material();
        for section in self.layout.sections() {
            let material = match section.role {
                role if modes.presentation_mode && role.is_boundary() => Some(slide),
                SectionRole::StartWall => Some(palette.start_wall),
                SectionRole::EndWall => Some(palette.end_wall),
                SectionRole::Boundary | SectionRole::Walls => Some(palette.wall),
                SectionRole::Floor => Some(palette.floor),
                SectionRole::Path => Some(palette.accent),
                SectionRole::Ceiling => palette.ceiling,
            };
            let Some(material) = material else {
                continue;
            };
            draw_section(renderer, section, &material, s);
        }

        self.props.draw(self.time.t, &palette.prop, renderer);

        if modes.avatar_visible() {
            let avatar = self.state.player.transform
                * Matrix4::from_nonuniform_scale(
                    ctx.step * 0.5,
                    ctx.player_height * 0.5,
                    ctx.step * 0.5,
                );
            renderer.draw_unit(Mesh::Avatar, &avatar, &palette.avatar);
        }

        renderer.end_frame();
    }
}

fn draw_section(renderer: &mut dyn Renderer, section: &Section, material: &Material, scale_factor: f32) {
    for blocks in section.runs {
        for transform in blocks.placements(scale_factor) {
            renderer.draw_unit(Mesh::Cube, &transform, material);
        }
    }
}

impl GraphicsFlow for MazeScene {
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.validate()?;
        ctx.clear_colour = self.palette.sky.colour;
        Ok(())
    }

    fn on_action(&mut self, ctx: &Context, action: Action) {
        if let Err(e) = self.trigger(ctx, action) {
            log::error!("{:?} failed: {:#}", action, e);
        }
    }

    fn on_update(&mut self, ctx: &Context, time: FrameTime) {
        self.update(ctx, time);
    }

    fn on_render(&self, ctx: &Context, renderer: &mut dyn Renderer) {
        self.render(ctx, renderer);
    }
}
