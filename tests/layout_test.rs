use std::collections::HashSet;

use maze_flow::{
    Matrix4, SquareMatrix, Vector3,
    collision::{PLAYER_ID, PROP_ID_BASE},
    context::Context,
    data_structures::{
        block::{Axis, BuildingBlocks, UnitKind, place_units},
        layout::{GRID_COLUMNS, GRID_ROWS, MAZE, MazeLayout, Section, SectionRole},
    },
};

use crate::common::test_utils::{assert_extents_eq, assert_matrix_eq};

mod common;

#[test]
fn placement_composes_the_increment() {
    let s = 2.0;
    let unit = UnitKind::WallZ.template(s);
    let increment = Axis::Z.increment(s);
    let start = Matrix4::from_translation(Vector3::new(2.0 * s, 0.0, 0.0));

    let placed = place_units(&unit, &increment, Vector3::new(2.0 * s, 0.0, 0.0), 9);

    assert_eq!(placed.len(), 9);
    let mut power = Matrix4::identity();
    for transform in &placed {
        assert_matrix_eq(transform, &(power * start * unit));
        power = power * increment;
    }
    assert_eq!(
        placed,
        BuildingBlocks::new(UnitKind::WallZ, Axis::Z, 2, 0, 9).placements(s)
    );
}

#[test]
fn templates_fill_one_cell() {
    let s = 2.0;
    let floor = UnitKind::Floor.template(s);
    assert_matrix_eq(
        &floor,
        &(Matrix4::from_translation(Vector3::new(1.0, 0.0, 1.0))
            * Matrix4::from_nonuniform_scale(1.0, 0.01, 1.0)),
    );
    let ceiling = UnitKind::Ceiling.template(s);
    assert!((ceiling.w.y - s).abs() < 1e-6);
    let accent = UnitKind::AccentFloor.template(s);
    assert!(accent.w.y > floor.w.y);
    assert!(UnitKind::WallX.is_solid());
    assert!(UnitKind::WallZ.is_solid());
    assert!(!UnitKind::Floor.is_solid());
    assert!(!UnitKind::Ceiling.is_solid());
}

#[test]
fn placements_scale_with_the_scene() {
    let blocks = BuildingBlocks::new(UnitKind::WallX, Axis::X, 3, 4, 2);
    for s in [1.0, 2.0, 3.5] {
        let placed = blocks.placements(s);
        assert_eq!(placed.len(), 2);
        assert!((placed[0].w.x - (3.0 * s + s / 2.0)).abs() < 1e-5);
        assert!((placed[0].w.z - 4.0 * s).abs() < 1e-5);
        assert!((placed[1].w.x - placed[0].w.x - s).abs() < 1e-5);
    }
}

#[test]
fn wall_runs_collide_and_floors_do_not() {
    let west = BuildingBlocks::new(UnitKind::WallZ, Axis::Z, 0, 0, 8);
    let collider = west.collider(2.0).unwrap().unwrap();
    assert_extents_eq(&collider, [-0.01, 0.01, 0.0, 2.0, 0.0, 16.0]);

    let floor = BuildingBlocks::new(UnitKind::Floor, Axis::Z, 0, 0, 9);
    assert!(floor.collider(2.0).unwrap().is_none());
}

#[test]
fn standard_maze_loads() {
    let ctx = Context::default();
    let layout = MazeLayout::standard(&ctx).unwrap();

    let wall_runs = MAZE
        .iter()
        .flat_map(|section| section.runs.iter())
        .filter(|blocks| blocks.unit.is_solid())
        .count();
    assert_eq!(wall_runs, 67);
    assert_eq!(layout.colliders().len(), wall_runs);

    let ids: HashSet<_> = layout.colliders().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), wall_runs);
    assert!(ids.iter().all(|id| *id > PLAYER_ID && *id < PROP_ID_BASE));
    assert_eq!(layout.colliders()[0].0, PLAYER_ID + 1);
}

#[test]
fn maze_table_stays_on_the_grid() {
    for section in MAZE {
        for blocks in section.runs {
            let (end_x, end_z) = blocks.end().expect(section.name);
            assert!(blocks.count > 0, "{}", section.name);
            assert!(end_x <= GRID_COLUMNS && end_z <= GRID_ROWS, "{}", section.name);
        }
    }
}

#[test]
fn floor_and_ceiling_tile_every_cell() {
    for role in [SectionRole::Floor, SectionRole::Ceiling] {
        let cells: usize = MAZE
            .iter()
            .filter(|section| section.role == role)
            .flat_map(|section| section.runs.iter())
            .map(|blocks| blocks.count as usize)
            .sum();
        assert_eq!(cells, (GRID_COLUMNS * GRID_ROWS) as usize);
    }
}

#[test]
fn boundary_leaves_entrance_and_exit_open() {
    let ctx = Context::default();
    let layout = MazeLayout::standard(&ctx).unwrap();
    let s = ctx.scale_factor;
    let west = layout.colliders()[0].1;
    let east = layout.colliders()[1].1;
    assert!(west.max().z <= 8.0 * s + 1e-4);
    assert!(east.max().z <= 8.0 * s + 1e-4);
    assert!((east.center().x - GRID_COLUMNS as f32 * s).abs() < 1e-4);
}

static OFF_GRID: &[Section] = &[Section {
    name: "too long",
    role: SectionRole::Walls,
    runs: &[BuildingBlocks::new(UnitKind::WallX, Axis::X, 20, 0, 10)],
}];

static EMPTY_RUN: &[Section] = &[Section {
    name: "empty",
    role: SectionRole::Walls,
    runs: &[BuildingBlocks::new(UnitKind::WallZ, Axis::Z, 3, 3, 0)],
}];

static OVERFLOWING_RUN: &[Section] = &[Section {
    name: "overflowing",
    role: SectionRole::Walls,
    runs: &[BuildingBlocks::new(UnitKind::WallX, Axis::X, 1, 0, u32::MAX)],
}];

static FLOOR_PAST_THE_EAST_EDGE: &[Section] = &[Section {
    name: "floor past the east edge",
    role: SectionRole::Path,
    runs: &[BuildingBlocks::new(UnitKind::AccentFloor, Axis::Z, GRID_COLUMNS, 0, 3)],
}];

static WALL_ON_THE_EAST_EDGE: &[Section] = &[Section {
    name: "wall on the east edge",
    role: SectionRole::Walls,
    runs: &[BuildingBlocks::new(UnitKind::WallZ, Axis::Z, GRID_COLUMNS, 0, 3)],
}];

#[test]
fn malformed_tables_are_rejected() {
    let ctx = Context::default();
    let off_grid = MazeLayout::load(OFF_GRID, &ctx).unwrap_err();
    assert!(format!("{:#}", off_grid).contains("too long"));
    assert!(MazeLayout::load(EMPTY_RUN, &ctx).is_err());
}

#[test]
fn overflowing_runs_are_rejected() {
    let ctx = Context::default();
    let error = MazeLayout::load(OVERFLOWING_RUN, &ctx).unwrap_err();
    assert!(format!("{:#}", error).contains("overflows"));
    assert_eq!(
        BuildingBlocks::new(UnitKind::WallX, Axis::X, 1, 0, u32::MAX).end(),
        None
    );
}

#[test]
fn only_walls_may_sit_on_the_far_edge() {
    let ctx = Context::default();
    let error = MazeLayout::load(FLOOR_PAST_THE_EAST_EDGE, &ctx).unwrap_err();
    assert!(format!("{:#}", error).contains("floor past the east edge"));
    let layout = MazeLayout::load(WALL_ON_THE_EAST_EDGE, &ctx).unwrap();
    assert_eq!(layout.colliders().len(), 1);
}
