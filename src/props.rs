//! Transient props: decorations that blink in and out on a fixed cycle.
//!
//! All groups share one period and phase. A group is hidden during the first
//! second of every period and visible for the rest of it, fading out as the
//! period runs on. While visible its props occupy space in the collider
//! registry, so they block the player just like walls do.

use anyhow::ensure;
use cgmath::{Matrix4, Vector3};

use crate::{
    collision::{Aabb, ColliderId, ColliderRegistry, PROP_ID_BASE},
    context::Context,
    data_structures::layout::{GRID_COLUMNS, GRID_ROWS},
    pipelines::material::Material,
    render::{Mesh, Renderer},
};

/// Ids reserved for each group, starting at `PROP_ID_BASE`.
pub const GROUP_ID_SPAN: ColliderId = 100;

const PROP_RADIUS: f32 = 0.4;
const PROP_HEIGHT: f32 = 1.0;

/// Timing shared by every prop group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropSchedule {
    period: f32,
}

impl PropSchedule {
    pub fn new(period: f32) -> anyhow::Result<Self> {
        ensure!(
            period >= 1.0,
            "a prop period shorter than the hidden window never shows its props, got {}",
            period
        );
        Ok(Self { period })
    }

    fn phase(&self, t: f32) -> f32 {
        t.rem_euclid(self.period)
    }

    /// Hidden during the first second of each period.
    pub fn is_visible(&self, t: f32) -> bool {
        self.phase(t).floor() != 0.0
    }

    /// Fades linearly from 1 at the start of a period toward 0 at its end.
    pub fn opacity(&self, t: f32) -> f32 {
        1.0 - self.phase(t) / self.period
    }
}

/// A named set of grid cells holding one prop each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropGroup {
    pub name: &'static str,
    pub cells: &'static [(u32, u32)],
}

pub static PROP_GROUPS: &[PropGroup] = &[
    PropGroup {
        name: "lanterns",
        cells: &[(2, 0), (11, 0), (20, 0)],
    },
    PropGroup {
        name: "orbs",
        cells: &[(3, 5), (10, 4), (16, 5), (21, 4)],
    },
];

#[derive(Clone, Debug)]
struct Prop {
    id: ColliderId,
    aabb: Aabb,
    transform: Matrix4<f32>,
}

#[derive(Clone, Debug)]
struct ScheduledGroup {
    name: &'static str,
    props: Vec<Prop>,
}

/// Keeps the registry in step with prop visibility and draws the visible props.
#[derive(Clone, Debug)]
pub struct PropScheduler {
    schedule: PropSchedule,
    groups: Vec<ScheduledGroup>,
    visible: Option<bool>,
}

impl PropScheduler {
    /// Lays out `groups` on the grid. Group `g` owns the ids
    /// `PROP_ID_BASE + g * GROUP_ID_SPAN ..`.
    pub fn new(groups: &[PropGroup], ctx: &Context) -> anyhow::Result<Self> {
        let schedule = PropSchedule::new(ctx.prop_period)?;
        let s = ctx.scale_factor;
        let mut scheduled = Vec::with_capacity(groups.len());
        for (g, group) in groups.iter().enumerate() {
            ensure!(
                (group.cells.len() as ColliderId) < GROUP_ID_SPAN,
                "prop group '{}' has more props than its id range holds",
                group.name
            );
            let base = (g as ColliderId)
                .checked_mul(GROUP_ID_SPAN)
                .and_then(|offset| offset.checked_add(PROP_ID_BASE))
                .ok_or_else(|| anyhow::anyhow!("too many prop groups"))?;
            let mut props = Vec::with_capacity(group.cells.len());
            for (i, &(x, z)) in group.cells.iter().enumerate() {
                ensure!(
                    x < GRID_COLUMNS && z < GRID_ROWS,
                    "prop {} of group '{}' sits outside the grid at ({}, {})",
                    i,
                    group.name,
                    x,
                    z
                );
                let center = Vector3::new((x as f32 + 0.5) * s, PROP_HEIGHT, (z as f32 + 0.5) * s);
                props.push(Prop {
                    id: base + i as ColliderId,
                    aabb: Aabb::centered(
                        center,
                        Vector3::new(PROP_RADIUS, PROP_RADIUS, PROP_RADIUS),
                    )?,
                    transform: Matrix4::from_translation(center) * Matrix4::from_scale(PROP_RADIUS),
                });
            }
            scheduled.push(ScheduledGroup {
                name: group.name,
                props,
            });
        }
        Ok(Self {
            schedule,
            groups: scheduled,
            visible: None,
        })
    }

    /// Collider ids owned by the group at `group`, in cell order.
    pub fn collider_ids(&self, group: usize) -> Vec<ColliderId> {
        self.groups
            .get(group)
            .map(|g| g.props.iter().map(|prop| prop.id).collect())
            .unwrap_or_default()
    }

    /// Inserts or removes every prop collider for time `t`; returns the visibility.
    pub fn update(&mut self, t: f32, colliders: &mut ColliderRegistry) -> bool {
        let visible = self.schedule.is_visible(t);
        if self.visible == Some(visible) {
            return visible;
        }
        for group in &self.groups {
            log::debug!(
                "Props '{}' {} at t={:.2}",
                group.name,
                if visible { "appear" } else { "disappear" },
                t
            );
            for prop in &group.props {
                if visible {
                    colliders.insert(prop.id, prop.aabb);
                } else {
                    colliders.remove(prop.id);
                }
            }
        }
        self.visible = Some(visible);
        visible
    }

    /// Draws visible props faded to the current opacity.
    pub fn draw(&self, t: f32, material: &Material, renderer: &mut dyn Renderer) {
        if !self.schedule.is_visible(t) {
            return;
        }
        let faded = material.with_opacity(self.schedule.opacity(t));
        self.groups
            .iter()
            .flat_map(|group| group.props.iter())
            .for_each(|prop| renderer.draw_unit(Mesh::Sphere, &prop.transform, &faded));
    }
}
