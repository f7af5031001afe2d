#![allow(dead_code)]

use std::cell::Cell;

use maze_flow::{
    Matrix4, Vector3,
    collision::Aabb,
    context::Context,
    flow::{FrameTime, GraphicsFlow},
    input::Action,
    render::Renderer,
};

pub(crate) const EPSILON: f32 = 1e-4;

/// Lifecycle bookkeeping for a flow under test.
pub(crate) struct State {
    frame_counter: u32,
    init_invocations: u32,
    action_invocations: u32,
    update_invocations: u32,
    render_invocations: Cell<u32>,
}
impl State {
    pub fn new() -> Self {
        Self {
            frame_counter: 0,
            init_invocations: 0,
            action_invocations: 0,
            update_invocations: 0,
            render_invocations: Cell::new(0),
        }
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn init_invocations(&self) -> u32 {
        self.init_invocations
    }

    pub fn action_invocations(&self) -> u32 {
        self.action_invocations
    }

    pub fn update_invocations(&self) -> u32 {
        self.update_invocations
    }

    pub fn render_invocations(&self) -> u32 {
        self.render_invocations.get()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a flow and checks that the runner calls it in lifecycle order.
pub(crate) struct Counted<F> {
    pub(crate) inner: F,
    pub(crate) state: State,
}

impl<F> Counted<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            state: State::new(),
        }
    }
}

impl<F: GraphicsFlow> GraphicsFlow for Counted<F> {
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        assert_eq!(self.state.init_invocations, 0);
        assert_eq!(self.state.update_invocations, 0);
        self.state.init_invocations += 1;
        self.inner.on_init(ctx)
    }

    fn on_action(&mut self, ctx: &Context, action: Action) {
        assert_eq!(self.state.init_invocations, 1);
        self.state.action_invocations += 1;
        self.inner.on_action(ctx, action);
    }

    fn on_update(&mut self, ctx: &Context, time: FrameTime) {
        assert_eq!(self.state.update_invocations, self.state.render_invocations());
        self.state.update_invocations += 1;
        self.state.frame_counter += 1;
        self.inner.on_update(ctx, time);
    }

    fn on_render(&self, ctx: &Context, renderer: &mut dyn Renderer) {
        assert_eq!(self.state.update_invocations, self.state.render_invocations() + 1);
        self.state
            .render_invocations
            .set(self.state.render_invocations.get() + 1);
        self.inner.on_render(ctx, renderer);
    }
}

pub(crate) fn aabb(extents: [f32; 6]) -> Aabb {
    let [min_x, max_x, min_y, max_y, min_z, max_z] = extents;
    Aabb::from_extents(min_x, max_x, min_y, max_y, min_z, max_z).expect("well-formed test box")
}

pub(crate) fn assert_extents_eq(actual: &Aabb, expected: [f32; 6]) {
    let extents = actual.extents();
    for (a, e) in extents.iter().zip(expected.iter()) {
        assert!(
            (a - e).abs() < EPSILON,
            "extents {:?} differ from {:?}",
            extents,
            expected
        );
    }
}

pub(crate) fn assert_matrix_eq(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
    let a: &[f32; 16] = actual.as_ref();
    let e: &[f32; 16] = expected.as_ref();
    for (x, y) in a.iter().zip(e.iter()) {
        assert!(
            (x - y).abs() < EPSILON,
            "matrices differ:\n{:?}\n{:?}",
            actual,
            expected
        );
    }
}

pub(crate) fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual.x - expected.x).abs() < EPSILON
            && (actual.y - expected.y).abs() < EPSILON
            && (actual.z - expected.z).abs() < EPSILON,
        "{:?} differs from {:?}",
        actual,
        expected
    );
}
