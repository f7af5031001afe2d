//! Grid-locked player movement.
//!
//! The player moves in discrete steps. Turning is always allowed; advancing and
//! retreating first probe the collider registry with the box the player would
//! occupy after the step and are silently rejected on any overlap.

use cgmath::{Deg, Matrix4, Vector3};

use crate::{
    collision::{Aabb, ColliderId, ColliderRegistry, PLAYER_ID},
    context::Context,
};

/// Discrete player orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// A right turn.
    pub fn rotate_cw(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// A left turn.
    pub fn rotate_ccw(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    pub fn opposite(self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// World-space unit vector a step in this direction moves along.
    pub fn forward(self) -> Vector3<f32> {
        match self {
            Facing::North => Vector3::new(0.0, 0.0, -1.0),
            Facing::East => Vector3::new(1.0, 0.0, 0.0),
            Facing::South => Vector3::new(0.0, 0.0, 1.0),
            Facing::West => Vector3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Rotation about +Y that turns local -Z into [`Facing::forward`].
    pub fn yaw(self) -> Deg<f32> {
        match self {
            Facing::North => Deg(0.0),
            Facing::West => Deg(90.0),
            Facing::South => Deg(180.0),
            Facing::East => Deg(270.0),
        }
    }
}

/// One discrete movement intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    TurnRight,
    TurnLeft,
    Advance,
    TurnAround,
    Retreat,
}

impl Movement {
    /// Order in which simultaneously armed intents are served.
    pub const PRIORITY: [Movement; 5] = [
        Movement::TurnRight,
        Movement::TurnLeft,
        Movement::Advance,
        Movement::TurnAround,
        Movement::Retreat,
    ];

    fn slot(self) -> usize {
        match self {
            Movement::TurnRight => 0,
            Movement::TurnLeft => 1,
            Movement::Advance => 2,
            Movement::TurnAround => 3,
            Movement::Retreat => 4,
        }
    }
}

/// Movement flags set by input handlers and drained one per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingMovement {
    armed: [bool; 5],
}

impl PendingMovement {
    pub fn arm(&mut self, movement: Movement) {
        self.armed[movement.slot()] = true;
    }

    pub fn is_armed(&self, movement: Movement) -> bool {
        self.armed[movement.slot()]
    }

    /// Clears and returns the highest priority armed intent, leaving the rest armed.
    pub fn take_next(&mut self) -> Option<Movement> {
        let next = Movement::PRIORITY
            .into_iter()
            .find(|movement| self.is_armed(*movement))?;
        self.armed[next.slot()] = false;
        Some(next)
    }

    pub fn is_empty(&self) -> bool {
        !self.armed.iter().any(|armed| *armed)
    }

    pub fn clear(&mut self) {
        self.armed = [false; 5];
    }
}

/// A grid cell and orientation the player can be placed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub cell: (u32, u32),
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub transform: Matrix4<f32>,
    pub facing: Facing,
}

impl Player {
    /// Places the player at the centre of `spawn.cell`, standing on the floor.
    ///
    /// Returns the player together with the collider it occupies there.
    pub fn spawn(spawn: Spawn, ctx: &Context) -> anyhow::Result<(Player, Aabb)> {
        let (cell_x, cell_z) = spawn.cell;
        let half_height = ctx.player_height * 0.5;
        let center = Vector3::new(
            (cell_x as f32 + 0.5) * ctx.scale_factor,
            half_height,
            (cell_z as f32 + 0.5) * ctx.scale_factor,
        );
        let aabb = Aabb::centered(
            center,
            Vector3::new(ctx.step * 0.5, half_height, ctx.step * 0.5),
        )?;
        let transform = Matrix4::from_translation(center) * Matrix4::from_angle_y(spawn.facing.yaw());
        Ok((
            Player {
                transform,
                facing: spawn.facing,
            },
            aabb,
        ))
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }
}

/// What a processed movement did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    Turned(Facing),
    Moved(Vector3<f32>),
    Blocked(ColliderId),
}

/// Applies movement intents to the player and its registry slot.
#[derive(Clone, Copy, Debug)]
pub struct MovementController {
    step: f32,
}

impl MovementController {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    pub fn apply(
        &self,
        player: &mut Player,
        colliders: &mut ColliderRegistry,
        movement: Movement,
    ) -> MoveOutcome {
        let facing = player.facing;
        match movement {
            Movement::TurnRight => self.turn(player, facing.rotate_cw(), Deg(-90.0)),
            Movement::TurnLeft => self.turn(player, facing.rotate_ccw(), Deg(90.0)),
            Movement::TurnAround => self.turn(player, facing.opposite(), Deg(180.0)),
            Movement::Advance => self.advance(player, colliders),
            Movement::Retreat => self.retreat(player, colliders),
        }
    }

    fn turn(&self, player: &mut Player, facing: Facing, angle: Deg<f32>) -> MoveOutcome {
        player.facing = facing;
        player.transform = player.transform * Matrix4::from_angle_y(angle);
        MoveOutcome::Turned(facing)
    }

    pub fn advance(&self, player: &mut Player, colliders: &mut ColliderRegistry) -> MoveOutcome {
        let facing = player.facing;
        self.step_towards(player, colliders, facing, -self.step)
    }

    /// Steps backwards, probing as if facing the other way; `facing` is untouched.
    pub fn retreat(&self, player: &mut Player, colliders: &mut ColliderRegistry) -> MoveOutcome {
        let behind = player.facing.opposite();
        self.step_towards(player, colliders, behind, self.step)
    }

    fn step_towards(
        &self,
        player: &mut Player,
        colliders: &mut ColliderRegistry,
        direction: Facing,
        local_z: f32,
    ) -> MoveOutcome {
        let delta = direction.forward() * self.step;
        let probe = colliders.player().translated(delta);
        if let Some(id) = colliders.overlaps_any(&probe, PLAYER_ID) {
            return MoveOutcome::Blocked(id);
        }
        player.transform = player.transform * Matrix4::from_translation(Vector3::new(0.0, 0.0, local_z));
        colliders.set_player(probe);
        MoveOutcome::Moved(delta)
    }
}
