//! The authored maze.
//!
//! The maze is a 24 × 9 grid laid out as four letter-shaped chambers (U, C, L
//! and A) joined by corridors. It is stored as a table of [`BuildingBlocks`]
//! runs grouped into named sections; the section role decides which material a
//! run is drawn with. Entry is through the gap at the bottom of the west wall,
//! exit through the matching gap in the east wall.

use anyhow::{Context as _, ensure};

use crate::{
    collision::{Aabb, ColliderId, PLAYER_ID, PROP_ID_BASE},
    context::Context,
    data_structures::block::{
        Axis::{self, X, Z},
        BuildingBlocks, UnitKind,
        UnitKind::{AccentFloor, WallX, WallZ},
    },
};

pub const GRID_COLUMNS: u32 = 24;
pub const GRID_ROWS: u32 = 9;

/// Which palette entry a section is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionRole {
    /// West boundary, next to the entrance.
    StartWall,
    /// East boundary, next to the exit.
    EndWall,
    Boundary,
    Floor,
    /// Only drawn by themes with a ceiling pass.
    Ceiling,
    /// Accent floor tracing a chamber's letter.
    Path,
    Walls,
}

impl SectionRole {
    /// Roles the presentation deck is projected onto.
    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            SectionRole::StartWall | SectionRole::EndWall | SectionRole::Boundary
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Section {
    pub name: &'static str,
    pub role: SectionRole,
    pub runs: &'static [BuildingBlocks],
}

const fn run(
    unit: UnitKind,
    axis: Axis,
    x: u32,
    z: u32,
    count: u32,
) -> BuildingBlocks {
    BuildingBlocks::new(unit, axis, x, z, count)
}

/// One column of `unit` per grid column, each spanning every row.
const fn tiling(unit: UnitKind) -> [BuildingBlocks; GRID_COLUMNS as usize] {
    let mut runs = [run(unit, Z, 0, 0, GRID_ROWS); GRID_COLUMNS as usize];
    let mut column = 0;
    while column < GRID_COLUMNS as usize {
        runs[column].start_x = column as u32;
        column += 1;
    }
    runs
}

const FLOOR: [BuildingBlocks; GRID_COLUMNS as usize] = tiling(UnitKind::Floor);
const CEILING: [BuildingBlocks; GRID_COLUMNS as usize] = tiling(UnitKind::Ceiling);

pub static MAZE: &[Section] = &[
    Section {
        name: "floor",
        role: SectionRole::Floor,
        runs: &FLOOR,
    },
    Section {
        name: "ceiling",
        role: SectionRole::Ceiling,
        runs: &CEILING,
    },
    Section {
        name: "west wall",
        role: SectionRole::StartWall,
        runs: &[run(WallZ, Z, 0, 0, 8)],
    },
    Section {
        name: "east wall",
        role: SectionRole::EndWall,
        runs: &[run(WallZ, Z, 24, 0, 8)],
    },
    Section {
        name: "north and south walls",
        role: SectionRole::Boundary,
        runs: &[run(WallX, X, 0, 0, 24), run(WallX, X, 0, 9, 24)],
    },
    Section {
        name: "U path",
        role: SectionRole::Path,
        runs: &[
            run(AccentFloor, Z, 1, 1, 7),
            run(AccentFloor, Z, 4, 1, 7),
            run(AccentFloor, X, 2, 7, 2),
        ],
    },
    Section {
        name: "U chamber",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 1, 1, 7),
            run(WallZ, Z, 5, 1, 7),
            run(WallZ, Z, 2, 1, 6),
            run(WallZ, Z, 4, 1, 6),
            run(WallX, X, 1, 8, 4),
            run(WallX, X, 2, 7, 2),
        ],
    },
    Section {
        name: "C path",
        role: SectionRole::Path,
        runs: &[
            run(AccentFloor, Z, 7, 1, 7),
            run(AccentFloor, X, 8, 1, 3),
            run(AccentFloor, X, 8, 7, 3),
        ],
    },
    Section {
        name: "C chamber",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 7, 1, 7),
            run(WallZ, Z, 8, 2, 5),
            run(WallX, X, 7, 8, 4),
            run(WallX, X, 7, 1, 4),
            run(WallX, X, 8, 2, 3),
            run(WallX, X, 8, 7, 3),
        ],
    },
    Section {
        name: "L path",
        role: SectionRole::Path,
        runs: &[run(AccentFloor, Z, 13, 1, 7), run(AccentFloor, X, 14, 7, 3)],
    },
    Section {
        name: "L chamber",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 13, 1, 7),
            run(WallZ, Z, 14, 1, 6),
            run(WallX, X, 13, 8, 4),
            run(WallX, X, 14, 7, 3),
        ],
    },
    Section {
        name: "A path",
        role: SectionRole::Path,
        runs: &[
            run(AccentFloor, Z, 19, 1, 7),
            run(AccentFloor, Z, 22, 1, 7),
            run(AccentFloor, X, 20, 1, 2),
            run(AccentFloor, X, 20, 4, 2),
        ],
    },
    Section {
        name: "A chamber",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 19, 1, 7),
            run(WallZ, Z, 20, 2, 2),
            run(WallZ, Z, 22, 2, 2),
            run(WallZ, Z, 23, 1, 7),
            run(WallZ, Z, 20, 5, 3),
            run(WallZ, Z, 22, 5, 3),
            run(WallX, X, 19, 1, 4),
            run(WallX, X, 20, 2, 2),
            run(WallX, X, 20, 4, 2),
            run(WallX, X, 20, 5, 2),
        ],
    },
    Section {
        name: "U connectors",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 3, 8, 1),
            run(WallZ, Z, 3, 0, 3),
            run(WallZ, Z, 3, 5, 1),
            run(WallZ, Z, 6, 0, 3),
            run(WallZ, Z, 6, 4, 5),
            run(WallX, X, 2, 3, 1),
            run(WallX, X, 3, 4, 1),
            run(WallX, X, 2, 6, 1),
            run(WallX, X, 6, 3, 1),
        ],
    },
    Section {
        name: "C connectors",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 12, 1, 4),
            run(WallZ, Z, 12, 6, 3),
            run(WallZ, Z, 11, 2, 2),
            run(WallZ, Z, 9, 3, 1),
            run(WallZ, Z, 9, 5, 1),
            run(WallX, X, 11, 3, 1),
            run(WallX, X, 9, 3, 1),
            run(WallX, X, 9, 4, 2),
            run(WallX, X, 9, 5, 3),
            run(WallX, X, 9, 6, 3),
        ],
    },
    Section {
        name: "L connectors",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 18, 6, 3),
            run(WallZ, Z, 18, 1, 2),
            run(WallZ, Z, 18, 4, 1),
            run(WallZ, Z, 16, 0, 3),
            run(WallZ, Z, 17, 0, 3),
            run(WallZ, Z, 15, 3, 3),
            run(WallX, X, 12, 1, 1),
            run(WallX, X, 14, 1, 2),
            run(WallX, X, 14, 2, 1),
            run(WallX, X, 15, 3, 1),
            run(WallX, X, 16, 4, 2),
            run(WallX, X, 15, 5, 2),
            run(WallX, X, 16, 6, 2),
            run(WallX, X, 17, 1, 1),
        ],
    },
    Section {
        name: "A connectors",
        role: SectionRole::Walls,
        runs: &[
            run(WallZ, Z, 21, 6, 3),
            run(WallX, X, 18, 5, 1),
            run(WallX, X, 21, 8, 1),
            run(WallX, X, 23, 7, 1),
        ],
    },
];

/// A validated maze table together with the static colliders of its walls.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    sections: &'static [Section],
    colliders: Vec<(ColliderId, Aabb)>,
}

impl MazeLayout {
    /// The walkthrough maze at the context's scale.
    pub fn standard(ctx: &Context) -> anyhow::Result<Self> {
        Self::load(MAZE, ctx)
    }

    /// Checks every run and derives one static collider per wall run.
    ///
    /// Collider ids are handed out in table order, starting right after the
    /// player's id.
    pub fn load(sections: &'static [Section], ctx: &Context) -> anyhow::Result<Self> {
        let mut colliders = Vec::new();
        let mut next_id = PLAYER_ID + 1;
        for section in sections {
            for (idx, blocks) in section.runs.iter().enumerate() {
                validate_run(blocks)
                    .with_context(|| format!("run {} of section '{}'", idx, section.name))?;
                let collider = blocks
                    .collider(ctx.scale_factor)
                    .with_context(|| format!("run {} of section '{}'", idx, section.name))?;
                if let Some(aabb) = collider {
                    ensure!(
                        next_id < PROP_ID_BASE,
                        "the maze needs more static colliders than ids below {}",
                        PROP_ID_BASE
                    );
                    colliders.push((next_id, aabb));
                    next_id += 1;
                }
            }
        }
        log::debug!(
            "Loaded maze with {} sections and {} static colliders",
            sections.len(),
            colliders.len()
        );
        Ok(Self {
            sections,
            colliders,
        })
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn colliders(&self) -> &[(ColliderId, Aabb)] {
        &self.colliders
    }

    /// True once `aabb` lies entirely east of the maze.
    pub fn is_outside_east(&self, aabb: &Aabb, ctx: &Context) -> bool {
        aabb.min().x > GRID_COLUMNS as f32 * ctx.scale_factor
    }
}

fn validate_run(blocks: &BuildingBlocks) -> anyhow::Result<()> {
    ensure!(blocks.count > 0, "a run must place at least one unit");
    let (end_x, end_z) = blocks.end().with_context(|| {
        format!(
            "run from ({}, {}) with {} units overflows",
            blocks.start_x, blocks.start_z, blocks.count
        )
    })?;
    // walls sit on grid lines and may use the far edge, tiles fill cells
    let (across, across_limit) = match blocks.axis {
        X => (blocks.start_z, GRID_ROWS),
        Z => (blocks.start_x, GRID_COLUMNS),
    };
    let across_fits = if blocks.unit.is_solid() {
        across <= across_limit
    } else {
        across < across_limit
    };
    ensure!(
        end_x <= GRID_COLUMNS && end_z <= GRID_ROWS && across_fits,
        "{:?} run from ({}, {}) to ({}, {}) leaves the {}x{} grid",
        blocks.unit,
        blocks.start_x,
        blocks.start_z,
        end_x,
        end_z,
        GRID_COLUMNS,
        GRID_ROWS
    );
    Ok(())
}
