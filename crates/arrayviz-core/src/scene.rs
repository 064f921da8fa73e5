//! Entity set with explicit lifecycles.
//!
//! Every logical entity lives in a slot that starts `Uninitialized`, becomes
//! `Active` once a body is inserted, and can move between `Active` and
//! `Hidden`. Only active entities are visible; hiding keeps the body so that
//! showing it again is a set-membership change, never a rebuild.

use crate::bounds::Aabb;
use crate::entity::BoxEntity;
use crate::error::{FitError, FitResult};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    Array,
    ArrayMirror,
    Sub,
    SubMirror,
    Audience,
}

impl EntityId {
    pub const ALL: [EntityId; 5] = [
        EntityId::Array,
        EntityId::ArrayMirror,
        EntityId::Sub,
        EntityId::SubMirror,
        EntityId::Audience,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Active,
    Hidden,
}

/// Which entities a camera fit should frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// Everything currently visible.
    Visible,
    /// An explicit list. An empty list is an error, not "everything".
    Only(SmallVec<[EntityId; 4]>),
}

impl Selection {
    pub fn only(ids: &[EntityId]) -> Self {
        Selection::Only(ids.iter().copied().collect())
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    state: Lifecycle,
    body: Option<BoxEntity>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    slots: FnvHashMap<EntityId, Slot>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a body and make it visible.
    pub fn insert(&mut self, id: EntityId, body: BoxEntity) {
        self.slots.insert(
            id,
            Slot {
                state: Lifecycle::Active,
                body: Some(body),
            },
        );
    }

    /// Insert a body only if the slot is still uninitialized. The slot keeps
    /// its current visibility otherwise. Returns `true` if a body was created.
    pub fn ensure_with(&mut self, id: EntityId, make: impl FnOnce() -> BoxEntity) -> bool {
        if self.lifecycle(id) != Lifecycle::Uninitialized {
            return false;
        }
        let body = make();
        self.slots.insert(
            id,
            Slot {
                state: Lifecycle::Hidden,
                body: Some(body),
            },
        );
        true
    }

    pub fn lifecycle(&self, id: EntityId) -> Lifecycle {
        self.slots.get(&id).map(|s| s.state).unwrap_or_default()
    }

    pub fn is_visible(&self, id: EntityId) -> bool {
        self.lifecycle(id) == Lifecycle::Active
    }

    /// Hidden → Active. Returns `true` only when the visible set changed.
    pub fn show(&mut self, id: EntityId) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) if slot.state == Lifecycle::Hidden => {
                slot.state = Lifecycle::Active;
                true
            }
            _ => false,
        }
    }

    /// Active → Hidden. Returns `true` only when the visible set changed.
    pub fn hide(&mut self, id: EntityId) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) if slot.state == Lifecycle::Active => {
                slot.state = Lifecycle::Hidden;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&BoxEntity> {
        self.slots.get(&id).and_then(|s| s.body.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut BoxEntity> {
        self.slots.get_mut(&id).and_then(|s| s.body.as_mut())
    }

    /// Visible entities in stable `EntityId` order.
    pub fn visible(&self) -> impl Iterator<Item = (EntityId, &BoxEntity)> + '_ {
        EntityId::ALL.into_iter().filter_map(move |id| {
            let slot = self.slots.get(&id)?;
            if slot.state != Lifecycle::Active {
                return None;
            }
            slot.body.as_ref().map(|b| (id, b))
        })
    }

    pub fn bounds(&self, selection: &Selection) -> FitResult<Aabb> {
        match selection {
            Selection::Visible => {
                let aabb: Aabb = self.visible().map(|(_, b)| b.aabb()).collect();
                if aabb.is_empty() {
                    Err(FitError::NoVisibleEntities)
                } else {
                    Ok(aabb)
                }
            }
            Selection::Only(ids) if ids.is_empty() => Err(FitError::EmptySelection),
            Selection::Only(ids) => ids.iter().try_fold(Aabb::EMPTY, |acc, id| {
                self.get(*id)
                    .map(|b| acc.union(&b.aabb()))
                    .ok_or(FitError::MissingEntity(*id))
            }),
        }
    }
}
