// world.rs - Entity store with slot arena and deferred deletion

use crate::ecs::{Component, ComponentSet, Entity};
use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced by store lookups.
///
/// A lookup failure is a programming error in the calling system, not a
/// recoverable runtime condition; systems either assert on it (debug) or
/// skip the entity (release).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("stale or dead entity handle {0:?}")]
    StaleEntity(Entity),
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
}

/// Query filter mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// Entity must carry every component in the set.
    All,
    /// Entity must carry at least one component in the set.
    Any,
}

#[derive(Debug, Default, Clone, Copy)]
struct Slot {
    generation: u32,
    mask: u32,
    alive: bool,
    doomed: bool,
}

/// The main store containing all entities and components.
///
/// Ownership of every game object is vested solely in the store;
/// cross-entity fields elsewhere are non-owning `Entity` handles resolved
/// by lookup each frame. Slots are pooled: a freed slot is reused with a
/// bumped generation, which invalidates any handle to the old entity.
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live entities in creation order (stable within a frame).
    order: Vec<Entity>,
    doomed: Vec<Entity>,
    columns: HashMap<u32, Box<dyn Column>>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            doomed: Vec::new(),
            columns: HashMap::new(),
        }
    }

    /// Create an empty entity. Reuses a freed slot if one is available.
    pub fn create(&mut self) -> Entity {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.alive = true;
        slot.doomed = false;
        slot.mask = 0;
        let entity = Entity::new(index, slot.generation);
        self.order.push(entity);
        entity
    }

    /// Attach (or overwrite) a component on a live entity.
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        let slot = self.live_slot_mut(entity)?;
        slot.mask |= T::MASK;
        let column = self
            .columns
            .entry(T::ID)
            .or_insert_with(|| Box::new(TypedColumn::<T> { slots: Vec::new() }));
        let column = column
            .as_any_mut()
            .downcast_mut::<TypedColumn<T>>()
            .expect("column type mismatch");
        let index = entity.index() as usize;
        if column.slots.len() <= index {
            column.slots.resize_with(index + 1, || None);
        }
        column.slots[index] = Some(value);
        Ok(())
    }

    /// Get an immutable reference to a component.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, WorldError> {
        self.validate(entity)?;
        self.columns
            .get(&T::ID)
            .and_then(|c| c.as_any().downcast_ref::<TypedColumn<T>>())
            .and_then(|c| c.slots.get(entity.index() as usize))
            .and_then(|s| s.as_ref())
            .ok_or(WorldError::MissingComponent {
                entity,
                component: T::NAME,
            })
    }

    /// Get a mutable reference to a component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, WorldError> {
        self.validate(entity)?;
        self.columns
            .get_mut(&T::ID)
            .and_then(|c| c.as_any_mut().downcast_mut::<TypedColumn<T>>())
            .and_then(|c| c.slots.get_mut(entity.index() as usize))
            .and_then(|s| s.as_mut())
            .ok_or(WorldError::MissingComponent {
                entity,
                component: T::NAME,
            })
    }

    /// Check whether a live entity carries a component.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.slot_of(entity)
            .map(|s| s.mask & T::MASK != 0)
            .unwrap_or(false)
    }

    /// Entities matching the component set, in creation order.
    ///
    /// Entities marked for deletion this frame are still returned; they
    /// stay queryable until `flush`.
    pub fn query(&self, set: ComponentSet, mode: QueryMode) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|e| {
                let mask = self.slots[e.index() as usize].mask;
                match mode {
                    QueryMode::All => set.all_in(mask),
                    QueryMode::Any => set.any_in(mask),
                }
            })
            .collect()
    }

    /// Mark an entity for removal at the next `flush`.
    ///
    /// The handle (and all component lookups through it) stays valid for
    /// the remainder of the frame.
    pub fn delete(&mut self, entity: Entity) {
        if let Ok(slot) = self.live_slot_mut(entity) {
            if !slot.doomed {
                slot.doomed = true;
                self.doomed.push(entity);
            }
        }
    }

    /// True if the handle refers to a live (possibly doomed) entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slot_of(entity).map(|s| s.alive).unwrap_or(false)
    }

    /// True if the entity is marked for removal this frame.
    pub fn is_doomed(&self, entity: Entity) -> bool {
        self.slot_of(entity).map(|s| s.doomed).unwrap_or(false)
    }

    /// Number of live entities (doomed entities count until flushed).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove all entities marked by `delete`.
    ///
    /// Called once per frame after all systems have run. Frees slots back
    /// to the pool and bumps their generation so stale handles fail
    /// validation.
    pub fn flush(&mut self) {
        if self.doomed.is_empty() {
            return;
        }
        tracing::trace!(count = self.doomed.len(), "flushing deleted entities");
        for entity in std::mem::take(&mut self.doomed) {
            let index = entity.index() as usize;
            let slot = &mut self.slots[index];
            if !slot.alive || slot.generation != entity.generation() {
                continue;
            }
            for column in self.columns.values_mut() {
                column.clear_slot(index);
            }
            slot.alive = false;
            slot.doomed = false;
            slot.mask = 0;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(entity.index());
        }
        let slots = &self.slots;
        self.order.retain(|e| slots[e.index() as usize].alive);
    }

    fn slot_of(&self, entity: Entity) -> Option<&Slot> {
        let slot = self.slots.get(entity.index() as usize)?;
        (slot.generation == entity.generation()).then_some(slot)
    }

    fn validate(&self, entity: Entity) -> Result<(), WorldError> {
        match self.slot_of(entity) {
            Some(slot) if slot.alive => Ok(()),
            _ => Err(WorldError::StaleEntity(entity)),
        }
    }

    fn live_slot_mut(&mut self, entity: Entity) -> Result<&mut Slot, WorldError> {
        match self.slots.get_mut(entity.index() as usize) {
            Some(slot) if slot.alive && slot.generation == entity.generation() => Ok(slot),
            _ => Err(WorldError::StaleEntity(entity)),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// One storage column per component type, type-erased behind `Any`.
trait Column {
    fn clear_slot(&mut self, index: usize);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct TypedColumn<T: 'static> {
    slots: Vec<Option<T>>,
}

impl<T: 'static> Column for TypedColumn<T> {
    fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_component;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }
    define_component!(Position, 0, "Position");

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Velocity {
        x: i32,
        y: i32,
    }
    define_component!(Velocity, 1, "Velocity");

    #[derive(Debug, PartialEq)]
    struct Tag;
    define_component!(Tag, 2, "Tag");

    #[test]
    fn attach_and_get() {
        let mut world = World::new();
        let e = world.create();
        world.attach(e, Position { x: 1, y: 2 }).unwrap();

        assert_eq!(world.get::<Position>(e), Ok(&Position { x: 1, y: 2 }));
        assert!(world.has::<Position>(e));
        assert!(!world.has::<Velocity>(e));
        assert_eq!(
            world.get::<Velocity>(e),
            Err(WorldError::MissingComponent {
                entity: e,
                component: "Velocity"
            })
        );

        world.get_mut::<Position>(e).unwrap().x = 9;
        assert_eq!(world.get::<Position>(e).unwrap().x, 9);
    }

    #[test]
    fn query_preserves_creation_order() {
        let mut world = World::new();
        let a = world.create();
        let b = world.create();
        let c = world.create();
        world.attach(a, Position { x: 0, y: 0 }).unwrap();
        world.attach(b, Velocity { x: 0, y: 0 }).unwrap();
        world.attach(c, Position { x: 0, y: 0 }).unwrap();
        world.attach(c, Velocity { x: 0, y: 0 }).unwrap();

        let positions = ComponentSet::new().with::<Position>();
        assert_eq!(world.query(positions, QueryMode::All), vec![a, c]);

        let either = ComponentSet::new().with::<Position>().with::<Velocity>();
        assert_eq!(world.query(either, QueryMode::Any), vec![a, b, c]);
        assert_eq!(world.query(either, QueryMode::All), vec![c]);
    }

    #[test]
    fn delete_is_deferred_until_flush() {
        let mut world = World::new();
        let e = world.create();
        world.attach(e, Tag).unwrap();

        world.delete(e);
        // Still queryable this frame.
        assert!(world.is_alive(e));
        assert!(world.is_doomed(e));
        assert!(world.has::<Tag>(e));
        let tags = ComponentSet::new().with::<Tag>();
        assert_eq!(world.query(tags, QueryMode::All), vec![e]);

        world.flush();
        assert!(!world.is_alive(e));
        assert_eq!(world.get::<Tag>(e), Err(WorldError::StaleEntity(e)));
        assert!(world.query(tags, QueryMode::All).is_empty());
    }

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut world = World::new();
        let a = world.create();
        world.delete(a);
        world.flush();

        let b = world.create();
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());
        // The stale handle does not alias the new entity.
        world.attach(b, Position { x: 3, y: 4 }).unwrap();
        assert_eq!(world.get::<Position>(a), Err(WorldError::StaleEntity(a)));
    }

    #[test]
    fn double_delete_is_harmless() {
        let mut world = World::new();
        let e = world.create();
        world.delete(e);
        world.delete(e);
        world.flush();
        assert_eq!(world.len(), 0);
    }
}
