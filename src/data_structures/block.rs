use cgmath::{Matrix4, Vector3};

use crate::{collision::Aabb, data_structures::instance::Instance};

/// The building blocks the maze is assembled from.
///
/// Each template scales the unit cube `[-1, 1]³` into one grid cell's worth of
/// floor, ceiling or wall, anchored at the cell's minimum corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Floor,
    /// Floor tile drawn slightly above the floor, marking a chamber's letter.
    AccentFloor,
    Ceiling,
    /// Wall spanning a cell along X (thin along Z).
    WallX,
    /// Wall spanning a cell along Z (thin along X).
    WallZ,
}

const THICKNESS: f32 = 0.01;

impl UnitKind {
    pub fn template(self, scale_factor: f32) -> Matrix4<f32> {
        let half = scale_factor / 2.0;
        let (position, scale) = match self {
            UnitKind::Floor => ((half, 0.0, half), (half, THICKNESS, half)),
            UnitKind::AccentFloor => ((half, THICKNESS, half), (half, THICKNESS, half)),
            UnitKind::Ceiling => ((half, scale_factor, half), (half, THICKNESS, half)),
            UnitKind::WallX => ((half, half, 0.0), (half, half, THICKNESS)),
            UnitKind::WallZ => ((0.0, half, half), (THICKNESS, half, half)),
        };
        Instance::from(Vector3::from(position))
            .scaled(scale.0, scale.1, scale.2)
            .to_matrix()
    }

    /// Only walls stop the player.
    pub fn is_solid(self) -> bool {
        matches!(self, UnitKind::WallX | UnitKind::WallZ)
    }
}

/// The grid axis a run of blocks grows along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Translation by one cell along this axis.
    pub fn increment(self, scale_factor: f32) -> Matrix4<f32> {
        match self {
            Axis::X => Matrix4::from_translation(Vector3::new(scale_factor, 0.0, 0.0)),
            Axis::Z => Matrix4::from_translation(Vector3::new(0.0, 0.0, scale_factor)),
        }
    }
}

/// Instances `count` copies of `unit`, the first translated to `start`, each
/// following one `increment` further: `t₀ = T(start)·unit`, `tₖ₊₁ = increment·tₖ`.
pub fn place_units(
    unit: &Matrix4<f32>,
    increment: &Matrix4<f32>,
    start: Vector3<f32>,
    count: u32,
) -> Vec<Matrix4<f32>> {
    let first = Matrix4::from_translation(start) * unit;
    std::iter::successors(Some(first), |previous| Some(increment * previous))
        .take(count as usize)
        .collect()
}

/**
 * A `BuildingBlocks` run is a straight line of identical maze units starting at
 * grid cell `(start_x, start_z)` and growing `count` cells along `axis`.
 *
 * Grid coordinates are multiplied by the scene's scale factor when placed, so
 * the same run describes the maze at any scale.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingBlocks {
    pub unit: UnitKind,
    pub axis: Axis,
    pub start_x: u32,
    pub start_z: u32,
    pub count: u32,
}

impl BuildingBlocks {
    pub const fn new(unit: UnitKind, axis: Axis, start_x: u32, start_z: u32, count: u32) -> Self {
        Self {
            unit,
            axis,
            start_x,
            start_z,
            count,
        }
    }

    pub fn placements(&self, scale_factor: f32) -> Vec<Matrix4<f32>> {
        place_units(
            &self.unit.template(scale_factor),
            &self.axis.increment(scale_factor),
            Vector3::new(
                self.start_x as f32 * scale_factor,
                0.0,
                self.start_z as f32 * scale_factor,
            ),
            self.count,
        )
    }

    /// Last cell (exclusive) the run reaches on each grid axis, `None` if it
    /// does not fit a `u32`.
    pub fn end(&self) -> Option<(u32, u32)> {
        match self.axis {
            Axis::X => Some((self.start_x.checked_add(self.count)?, self.start_z)),
            Axis::Z => Some((self.start_x, self.start_z.checked_add(self.count)?)),
        }
    }

    /// Bounds of every placed unit cube, `None` for runs the player walks through.
    pub fn collider(&self, scale_factor: f32) -> anyhow::Result<Option<Aabb>> {
        if !self.unit.is_solid() {
            return Ok(None);
        }
        let mut bounds: Option<Aabb> = None;
        for placement in self.placements(scale_factor) {
            let cube = Aabb::from_transformed_cube(&placement)?;
            bounds = Some(match bounds {
                Some(acc) => acc.union(&cube),
                None => cube,
            });
        }
        Ok(bounds)
    }
}
