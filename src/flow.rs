//! Flow control and the application event loop.
//!
//! A "flow" is a scene that handles user input, advances its simulation once
//! per frame and submits its draws to a [`Renderer`]. The runners in this
//! module own the frame loop and drive a flow through its lifecycle.
//!
//! # Lifecycle
//!
//! Every frame follows the same order:
//! 1. Collect window events and hand them to `on_window_events`
//! 2. Advance the flow with `on_update`, passing the frame's [`FrameTime`]
//! 3. Let the flow submit its draws via `on_render`
//!
//! [`run`] drives a flow from a winit window. [`run_scripted`] drives it
//! headlessly from a fixed list of actions with a fixed time step, which is
//! what the tests use.

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    context::Context,
    input::Action,
    render::Renderer,
};

/// Animation time handed to a flow each frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the flow started.
    pub t: f32,
    /// Time since the previous frame.
    pub dt: f32,
}

impl FrameTime {
    /// Time of frame `frame` when every frame lasts exactly `dt`.
    pub fn fixed(frame: u32, dt: f32) -> Self {
        Self {
            t: frame as f32 * dt,
            dt,
        }
    }
}

/// Monotonic wall clock producing one [`FrameTime`] per tick.
#[derive(Clone, Copy, Debug)]
pub struct AnimationClock {
    start: Instant,
    last: Instant,
}

impl AnimationClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt: Duration = now - self.last;
        self.last = now;
        FrameTime {
            t: (now - self.start).as_secs_f32(),
            dt: dt.as_secs_f32(),
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for implementing a scene driven by one of the runners.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once before the first frame; this is the only place
///    the flow may change the Context
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame
/// 4. `on_render()` is called every frame after `on_update()`
pub trait GraphicsFlow {
    /// Initialize the flow and configure the context.
    ///
    /// Returning an error aborts the runner before the first frame.
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()>;

    /// Handle one discrete user action.
    fn on_action(&mut self, ctx: &Context, action: Action);

    /// Handle window events (keyboard, resizing, etc.).
    ///
    /// The default maps key presses through [`Action::from_window_event`].
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) {
        if let Some(action) = Action::from_window_event(event) {
            self.on_action(ctx, action);
        }
    }

    /// Advance the flow by one frame.
    fn on_update(&mut self, ctx: &Context, time: FrameTime);

    /// Submit this frame's draws.
    fn on_render(&self, ctx: &Context, renderer: &mut dyn Renderer);
}

struct App<F, R> {
    ctx: Context,
    flow: F,
    renderer: R,
    clock: AnimationClock,
    window: Option<Window>,
    error: Option<anyhow::Error>,
}

impl<F: GraphicsFlow, R: Renderer> App<F, R> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl<F: GraphicsFlow, R: Renderer> ApplicationHandler for App<F, R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes().with_title("maze-flow");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e.into()),
        };
        let size = window.inner_size();
        self.ctx.projection.resize(size.width, size.height);
        if let Err(e) = self.flow.on_init(&mut self.ctx) {
            return self.fail(event_loop, e);
        }
        self.clock = AnimationClock::new();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.ctx.projection.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let time = self.clock.tick();
                self.flow.on_update(&self.ctx, time);
                self.flow.on_render(&self.ctx, &mut self.renderer);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            event => self.flow.on_window_events(&self.ctx, &event),
        }
    }
}

/// Opens a window and drives `flow` until it is closed.
pub fn run<F, R>(ctx: Context, flow: F, renderer: R) -> anyhow::Result<()>
where
    F: GraphicsFlow,
    R: Renderer,
{
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App {
        ctx,
        flow,
        renderer,
        clock: AnimationClock::new(),
        window: None,
        error: None,
    };

    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Drives `flow` for `frames` frames of `dt` seconds each without a window.
///
/// Each `(frame, action)` entry of `script` is delivered right before that
/// frame's update. Returns the context the flow ended with.
pub fn run_scripted<F, R>(
    mut ctx: Context,
    flow: &mut F,
    renderer: &mut R,
    script: &[(u32, Action)],
    frames: u32,
    dt: f32,
) -> anyhow::Result<Context>
where
    F: GraphicsFlow,
    R: Renderer,
{
    if let Err(e) = env_logger::try_init() {
        log::trace!("Logger already initialized: {}", e);
    };

    flow.on_init(&mut ctx)?;
    for frame in 0..frames {
        script
            .iter()
            .filter(|(at, _)| *at == frame)
            .for_each(|(_, action)| flow.on_action(&ctx, *action));
        flow.on_update(&ctx, FrameTime::fixed(frame, dt));
        flow.on_render(&ctx, &mut *renderer);
    }
    Ok(ctx)
}
