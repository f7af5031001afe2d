use maze_flow::{
    Matrix4, Vector3,
    collision::{ColliderRegistry, PROP_ID_BASE},
    context::Context,
    movement::{Facing, MoveOutcome, Movement, MovementController, Player},
    pipelines::material::{Colour, Material},
    props::{GROUP_ID_SPAN, PROP_GROUPS, PropGroup, PropSchedule, PropScheduler},
    render::{Mesh, RecordingRenderer, Renderer},
};

use crate::common::test_utils::aabb;

mod common;

static SINGLE: &[PropGroup] = &[PropGroup {
    name: "single",
    cells: &[(1, 0)],
}];

#[test]
fn props_hide_for_the_first_second_of_each_period() {
    let schedule = PropSchedule::new(5.0).unwrap();
    for t in 0..30 {
        let t = t as f32;
        assert_eq!(schedule.is_visible(t), t % 5.0 != 0.0, "t = {}", t);
    }
    assert!(!schedule.is_visible(0.99));
    assert!(schedule.is_visible(4.99));
    assert!(!schedule.is_visible(5.5));
}

#[test]
fn opacity_fades_over_the_period() {
    let schedule = PropSchedule::new(5.0).unwrap();
    assert!((schedule.opacity(0.0) - 1.0).abs() < 1e-6);
    assert!((schedule.opacity(2.5) - 0.5).abs() < 1e-6);
    assert!((schedule.opacity(7.5) - 0.5).abs() < 1e-6);
    assert!(schedule.opacity(4.9) < 0.05);
}

#[test]
fn period_shorter_than_the_hidden_window_is_rejected() {
    assert!(PropSchedule::new(0.5).is_err());
}

#[test]
fn registry_follows_visibility() {
    let ctx = Context::default();
    let mut scheduler = PropScheduler::new(SINGLE, &ctx).unwrap();
    let mut registry = ColliderRegistry::new(aabb([0.5, 1.5, 0.0, 1.0, 16.5, 17.5]));

    for t in 0..12 {
        let visible = scheduler.update(t as f32, &mut registry);
        assert_eq!(visible, t % 5 != 0);
        assert_eq!(registry.contains(PROP_ID_BASE), visible, "t = {}", t);
    }
}

#[test]
fn groups_own_disjoint_id_ranges() {
    let ctx = Context::default();
    let scheduler = PropScheduler::new(PROP_GROUPS, &ctx).unwrap();
    let lanterns = scheduler.collider_ids(0);
    let orbs = scheduler.collider_ids(1);
    assert_eq!(lanterns.len(), PROP_GROUPS[0].cells.len());
    assert_eq!(orbs.len(), PROP_GROUPS[1].cells.len());
    assert_eq!(lanterns[0], PROP_ID_BASE);
    assert_eq!(orbs[0], PROP_ID_BASE + GROUP_ID_SPAN);
    assert!(scheduler.collider_ids(2).is_empty());

    let mut registry = ColliderRegistry::new(aabb([0.5, 1.5, 0.0, 1.0, 16.5, 17.5]));
    let mut scheduler = scheduler;
    scheduler.update(1.0, &mut registry);
    for id in lanterns.iter().chain(orbs.iter()) {
        assert!(registry.contains(*id));
    }
    scheduler.update(5.0, &mut registry);
    assert_eq!(registry.len(), 1);
}

#[test]
fn visible_props_block_the_player() {
    let ctx = Context::default();
    let mut scheduler = PropScheduler::new(SINGLE, &ctx).unwrap();
    // one step west of the prop on cell (1, 0), facing it
    let center = Vector3::new(2.0, 0.5, 1.0);
    let mut player = Player {
        transform: Matrix4::from_translation(center) * Matrix4::from_angle_y(Facing::East.yaw()),
        facing: Facing::East,
    };
    let mut registry = ColliderRegistry::new(aabb([1.5, 2.5, 0.0, 1.0, 0.5, 1.5]));
    let controller = MovementController::new(ctx.step);

    scheduler.update(2.0, &mut registry);
    assert_eq!(
        controller.apply(&mut player, &mut registry, Movement::Advance),
        MoveOutcome::Blocked(PROP_ID_BASE)
    );

    scheduler.update(5.0, &mut registry);
    assert!(matches!(
        controller.apply(&mut player, &mut registry, Movement::Advance),
        MoveOutcome::Moved(_)
    ));
}

#[test]
fn props_are_drawn_faded_only_while_visible() {
    let ctx = Context::default();
    let scheduler = PropScheduler::new(SINGLE, &ctx).unwrap();
    let material = Material::phong(Colour::hex(0xff8c1a));
    let mut renderer = RecordingRenderer::new();

    renderer.begin_frame();
    scheduler.draw(0.5, &material, &mut renderer);
    assert!(renderer.draws().is_empty());

    renderer.begin_frame();
    scheduler.draw(2.5, &material, &mut renderer);
    let spheres: Vec<_> = renderer.draws_of(Mesh::Sphere).collect();
    assert_eq!(spheres.len(), 1);
    assert!((spheres[0].material.colour.alpha() - 0.5).abs() < 1e-6);
    assert!((spheres[0].transform.w.x - 3.0).abs() < 1e-6);

    let batches = renderer.batches();
    assert!(batches.opaque.is_empty());
    assert_eq!(batches.transparent.len(), 1);
}
