//! Entity/component store.
//!
//! A generational arena: every slot carries a generation counter that is
//! bumped on despawn, so a stale [`EntityId`] held by another entity (a
//! harvester's spice target, say) fails [`Store::contains`] instead of
//! silently resolving to whatever reused the slot.
//!
//! Components live in a struct-of-`Option`s record per entity. Only
//! components that are `Some` are active. This gives typed component
//! access without a reflection-style ECS framework.

use serde::{Deserialize, Serialize};

use crate::components::{
    Barracks, Footprint, HarvesterData, Health, MoveTarget, Position, Refinery, Selectable,
    SpiceAmount, Unit, Velocity,
};
use crate::error::{GameError, Result};

/// Stable handle to an entity.
///
/// The handle stays unique for the life of the process: a despawned slot
/// can be reused, but only under a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

/// Discriminants for component kinds, used by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// [`Position`]
    Position,
    /// [`Velocity`]
    Velocity,
    /// [`MoveTarget`]
    MoveTarget,
    /// [`Footprint`]
    Footprint,
    /// [`Unit`]
    Unit,
    /// [`Selectable`]
    Selectable,
    /// [`Health`]
    Health,
    /// [`HarvesterData`]
    Harvester,
    /// [`SpiceAmount`]
    Spice,
    /// [`Refinery`]
    Refinery,
    /// [`Barracks`]
    Barracks,
}

/// Per-entity component record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Record {
    position: Option<Position>,
    velocity: Option<Velocity>,
    move_target: Option<MoveTarget>,
    footprint: Option<Footprint>,
    unit: Option<Unit>,
    selectable: Option<Selectable>,
    health: Option<Health>,
    harvester: Option<HarvesterData>,
    spice: Option<SpiceAmount>,
    refinery: Option<Refinery>,
    barracks: Option<Barracks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    record: Option<Record>,
}

/// Storage for all entities in the simulation.
///
/// Single-threaded, single-writer: the tick pipeline is the only mutator,
/// and it runs systems strictly one after another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(Record::default());
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                record: Some(Record::default()),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    /// Remove an entity, invalidating its id and all component data.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EntityNotFound`] if the id is already stale.
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.record.is_some())
            .ok_or(GameError::EntityNotFound(id))?;
        slot.record = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(())
    }

    /// Check whether an id still refers to a live entity.
    ///
    /// This is the validity check that guards every weak-reference
    /// dereference in the harvester state machine.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.record(id).is_some()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live entity ids, in slot-index order.
    ///
    /// Slot order matches creation order until a despawned slot is reused;
    /// systems that need a deterministic scan rely only on the order being
    /// stable within a tick.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.record.is_some())
            .map(|(index, slot)| EntityId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    /// Check whether an entity carries a component kind.
    #[must_use]
    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        let Some(record) = self.record(id) else {
            return false;
        };
        match kind {
            ComponentKind::Position => record.position.is_some(),
            ComponentKind::Velocity => record.velocity.is_some(),
            ComponentKind::MoveTarget => record.move_target.is_some(),
            ComponentKind::Footprint => record.footprint.is_some(),
            ComponentKind::Unit => record.unit.is_some(),
            ComponentKind::Selectable => record.selectable.is_some(),
            ComponentKind::Health => record.health.is_some(),
            ComponentKind::Harvester => record.harvester.is_some(),
            ComponentKind::Spice => record.spice.is_some(),
            ComponentKind::Refinery => record.refinery.is_some(),
            ComponentKind::Barracks => record.barracks.is_some(),
        }
    }

    fn record(&self, id: EntityId) -> Option<&Record> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut Record> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    // Typed accessors. `set_*` attaches (or replaces) a component on a live
    // entity and is a no-op on a stale id; getters return None for stale
    // ids and missing components alike.

    /// Attach or replace a position.
    pub fn set_position(&mut self, id: EntityId, value: Position) {
        if let Some(record) = self.record_mut(id) {
            record.position = Some(value);
        }
    }

    /// Position of an entity, if present.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<&Position> {
        self.record(id)?.position.as_ref()
    }

    /// Mutable position of an entity, if present.
    pub fn position_mut(&mut self, id: EntityId) -> Option<&mut Position> {
        self.record_mut(id)?.position.as_mut()
    }

    /// Position, failing with [`GameError::ComponentMissing`] if absent.
    pub fn try_position(&self, id: EntityId) -> Result<&Position> {
        if !self.contains(id) {
            return Err(GameError::EntityNotFound(id));
        }
        self.position(id).ok_or(GameError::ComponentMissing {
            entity: id,
            component: "Position",
        })
    }

    /// Attach or replace a velocity.
    pub fn set_velocity(&mut self, id: EntityId, value: Velocity) {
        if let Some(record) = self.record_mut(id) {
            record.velocity = Some(value);
        }
    }

    /// Velocity of an entity, if present.
    #[must_use]
    pub fn velocity(&self, id: EntityId) -> Option<&Velocity> {
        self.record(id)?.velocity.as_ref()
    }

    /// Mutable velocity of an entity, if present.
    pub fn velocity_mut(&mut self, id: EntityId) -> Option<&mut Velocity> {
        self.record_mut(id)?.velocity.as_mut()
    }

    /// Attach or replace a move target.
    pub fn set_move_target(&mut self, id: EntityId, value: MoveTarget) {
        if let Some(record) = self.record_mut(id) {
            record.move_target = Some(value);
        }
    }

    /// Move target of an entity, if present.
    #[must_use]
    pub fn move_target(&self, id: EntityId) -> Option<&MoveTarget> {
        self.record(id)?.move_target.as_ref()
    }

    /// Mutable move target of an entity, if present.
    pub fn move_target_mut(&mut self, id: EntityId) -> Option<&mut MoveTarget> {
        self.record_mut(id)?.move_target.as_mut()
    }

    /// Attach or replace a footprint.
    pub fn set_footprint(&mut self, id: EntityId, value: Footprint) {
        if let Some(record) = self.record_mut(id) {
            record.footprint = Some(value);
        }
    }

    /// Footprint of an entity, if present.
    #[must_use]
    pub fn footprint(&self, id: EntityId) -> Option<&Footprint> {
        self.record(id)?.footprint.as_ref()
    }

    /// Attach or replace a unit classification.
    pub fn set_unit(&mut self, id: EntityId, value: Unit) {
        if let Some(record) = self.record_mut(id) {
            record.unit = Some(value);
        }
    }

    /// Unit classification of an entity, if present.
    #[must_use]
    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.record(id)?.unit.as_ref()
    }

    /// Attach or replace selectability state.
    pub fn set_selectable(&mut self, id: EntityId, value: Selectable) {
        if let Some(record) = self.record_mut(id) {
            record.selectable = Some(value);
        }
    }

    /// Selectability state of an entity, if present.
    #[must_use]
    pub fn selectable(&self, id: EntityId) -> Option<&Selectable> {
        self.record(id)?.selectable.as_ref()
    }

    /// Mutable selectability state of an entity, if present.
    pub fn selectable_mut(&mut self, id: EntityId) -> Option<&mut Selectable> {
        self.record_mut(id)?.selectable.as_mut()
    }

    /// Attach or replace health.
    pub fn set_health(&mut self, id: EntityId, value: Health) {
        if let Some(record) = self.record_mut(id) {
            record.health = Some(value);
        }
    }

    /// Health of an entity, if present.
    #[must_use]
    pub fn health(&self, id: EntityId) -> Option<&Health> {
        self.record(id)?.health.as_ref()
    }

    /// Attach or replace harvester data.
    pub fn set_harvester(&mut self, id: EntityId, value: HarvesterData) {
        if let Some(record) = self.record_mut(id) {
            record.harvester = Some(value);
        }
    }

    /// Harvester data of an entity, if present.
    #[must_use]
    pub fn harvester(&self, id: EntityId) -> Option<&HarvesterData> {
        self.record(id)?.harvester.as_ref()
    }

    /// Mutable harvester data of an entity, if present.
    pub fn harvester_mut(&mut self, id: EntityId) -> Option<&mut HarvesterData> {
        self.record_mut(id)?.harvester.as_mut()
    }

    /// Attach or replace a spice amount.
    pub fn set_spice(&mut self, id: EntityId, value: SpiceAmount) {
        if let Some(record) = self.record_mut(id) {
            record.spice = Some(value);
        }
    }

    /// Spice amount of an entity, if present.
    #[must_use]
    pub fn spice(&self, id: EntityId) -> Option<&SpiceAmount> {
        self.record(id)?.spice.as_ref()
    }

    /// Mutable spice amount of an entity, if present.
    pub fn spice_mut(&mut self, id: EntityId) -> Option<&mut SpiceAmount> {
        self.record_mut(id)?.spice.as_mut()
    }

    /// Attach the refinery marker.
    pub fn set_refinery(&mut self, id: EntityId) {
        if let Some(record) = self.record_mut(id) {
            record.refinery = Some(Refinery);
        }
    }

    /// Attach the barracks marker.
    pub fn set_barracks(&mut self, id: EntityId) {
        if let Some(record) = self.record_mut(id) {
            record.barracks = Some(Barracks);
        }
    }
}
