//! Axis-aligned collision primitives and the collider registry.
//!
//! The registry is the single source of truth for occupied space in the maze.
//! Ids are split into three ranges:
//!
//! - [`PLAYER_ID`] is the player's own box. It lives in a dedicated slot and is
//!   therefore present for the whole lifetime of the registry.
//! - `2..PROP_ID_BASE` are static maze boundaries, inserted once during scene
//!   setup and never mutated or removed afterwards.
//! - `PROP_ID_BASE..` are transient props that the prop scheduler inserts and
//!   removes as they appear and disappear.
//!
//! Slots live in an arena indexed by id with an explicit `active` bit, so props
//! toggling every few seconds never reallocate.

use anyhow::ensure;
use cgmath::{Matrix4, Point3, Transform, Vector3};

pub type ColliderId = u32;

/// The player's own collider.
pub const PLAYER_ID: ColliderId = 1;

/// First id reserved for transient props.
pub const PROP_ID_BASE: ColliderId = 1000;

/// The role an id plays, derived from the range it falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColliderKind {
    Player,
    Static,
    Prop,
}

impl ColliderKind {
    /// Id 0 is never valid.
    pub fn of(id: ColliderId) -> Option<Self> {
        match id {
            0 => None,
            PLAYER_ID => Some(Self::Player),
            id if id >= PROP_ID_BASE => Some(Self::Prop),
            _ => Some(Self::Static),
        }
    }
}

/// Axis-aligned bounding box in world units.
///
/// The extents are private so that `min <= max` holds on every axis for every
/// value of this type. Zero-width boxes are allowed and used for thin walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vector3<f32>,
    max: Vector3<f32>,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    ///
    /// Fails if any component of `min` exceeds (or cannot be compared with) the
    /// matching component of `max`.
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> anyhow::Result<Self> {
        ensure!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "malformed AABB: min {:?} exceeds max {:?}",
            min,
            max
        );
        Ok(Self { min, max })
    }

    /// Creates a box from `(minX, maxX, minY, maxY, minZ, maxZ)`.
    pub fn from_extents(
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
    ) -> anyhow::Result<Self> {
        Self::new(
            Vector3::new(min_x, min_y, min_z),
            Vector3::new(max_x, max_y, max_z),
        )
    }

    pub fn centered(center: Vector3<f32>, half_extents: Vector3<f32>) -> anyhow::Result<Self> {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The world-space bounds of the unit cube `[-1, 1]³` placed by `transform`.
    pub fn from_transformed_cube(transform: &Matrix4<f32>) -> anyhow::Result<Self> {
        let mut min = Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for corner in 0..8 {
            let local = Point3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            let world = transform.transform_point(local);
            min = Vector3::new(min.x.min(world.x), min.y.min(world.y), min.z.min(world.z));
            max = Vector3::new(max.x.max(world.x), max.y.max(world.y), max.z.max(world.z));
        }
        Self::new(min, max)
    }

    pub fn min(&self) -> Vector3<f32> {
        self.min
    }

    pub fn max(&self) -> Vector3<f32> {
        self.max
    }

    /// `[minX, maxX, minY, maxY, minZ, maxZ]`
    pub fn extents(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Inclusive overlap on all three axes; touching faces count as overlapping.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Shifting both corners by the same delta cannot break `min <= max`.
    pub fn translated(&self, delta: Vector3<f32>) -> Aabb {
        Aabb {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    aabb: Aabb,
    active: bool,
}

/// Mapping from collider id to [`Aabb`].
#[derive(Clone, Debug)]
pub struct ColliderRegistry {
    player: Aabb,
    slots: Vec<Slot>,
}

impl ColliderRegistry {
    pub fn new(player: Aabb) -> Self {
        Self {
            player,
            slots: Vec::new(),
        }
    }

    /// Stores `aabb` under `id` and returns whether the registry changed.
    ///
    /// Static ids can be filled once; later inserts for an occupied static id
    /// are refused. Prop ids are overwritten freely.
    pub fn insert(&mut self, id: ColliderId, aabb: Aabb) -> bool {
        match ColliderKind::of(id) {
            None => {
                log::warn!("Refusing to insert a collider under the reserved id 0");
                false
            }
            Some(ColliderKind::Player) => {
                self.player = aabb;
                true
            }
            Some(ColliderKind::Static) if self.contains(id) => {
                log::warn!("Static collider {} is immutable once inserted", id);
                false
            }
            Some(_) => {
                let idx = id as usize;
                if idx >= self.slots.len() {
                    self.slots.resize(idx + 1, Slot::default());
                }
                self.slots[idx] = Slot { aabb, active: true };
                true
            }
        }
    }

    /// Deactivates a prop collider and returns the box it held.
    ///
    /// The player and static boundaries cannot be removed.
    pub fn remove(&mut self, id: ColliderId) -> Option<Aabb> {
        match ColliderKind::of(id) {
            Some(ColliderKind::Prop) => {
                let slot = self.slots.get_mut(id as usize)?;
                if !slot.active {
                    return None;
                }
                slot.active = false;
                Some(slot.aabb)
            }
            _ => {
                log::warn!("Collider {} is not removable", id);
                None
            }
        }
    }

    pub fn get(&self, id: ColliderId) -> Option<Aabb> {
        if id == PLAYER_ID {
            return Some(self.player);
        }
        self.slots
            .get(id as usize)
            .filter(|slot| slot.active)
            .map(|slot| slot.aabb)
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.get(id).is_some()
    }

    pub fn player(&self) -> &Aabb {
        &self.player
    }

    pub fn set_player(&mut self, aabb: Aabb) {
        self.player = aabb;
    }

    /// Every present collider, the player first, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &Aabb)> {
        std::iter::once((PLAYER_ID, &self.player)).chain(
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.active)
                .map(|(idx, slot)| (idx as ColliderId, &slot.aabb)),
        )
    }

    pub fn for_each(&self, mut f: impl FnMut(ColliderId, &Aabb)) {
        self.iter().for_each(|(id, aabb)| f(id, aabb));
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Never true: the player slot is always occupied.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first collider other than `except` that overlaps `probe`.
    pub fn overlaps_any(&self, probe: &Aabb, except: ColliderId) -> Option<ColliderId> {
        self.iter()
            .filter(|(id, _)| *id != except)
            .find(|(_, aabb)| probe.overlaps(aabb))
            .map(|(id, _)| id)
    }
}
