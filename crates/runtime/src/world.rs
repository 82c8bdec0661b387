//! Actor arena implementing [`ActorSpawner`].
//!
//! Slots are reused after destruction; each reuse bumps the slot generation so
//! handles to destroyed actors stay dead. Enemies carry a [`StatSheet`] built
//! from the shared level table, and report their death through a channel the
//! session drains after applying damage.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use game_core::{
    ActorHandle, ActorKind, ActorSpawner, GameConfig, Position, StatSheet, StatTable,
};

/// Lifecycle of an actor between the two spawn phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorPhase {
    /// Reserved and configured, not yet placed in the world.
    Deferred,
    /// Placed and interacting.
    Active,
}

#[derive(Debug)]
pub struct Actor {
    kind: ActorKind,
    position: Position,
    phase: ActorPhase,
    stats: Option<StatSheet>,
}

impl Actor {
    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> ActorPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ActorPhase::Active
    }

    /// Stat sheet of an enemy; `None` for pickups.
    pub fn stats(&self) -> Option<&StatSheet> {
        self.stats.as_ref()
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

#[derive(Debug)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    capacity: usize,
    tables: Arc<StatTable>,
    death_tx: Sender<ActorHandle>,
    death_rx: Receiver<ActorHandle>,
}

impl World {
    pub fn new(config: &GameConfig, tables: Arc<StatTable>) -> Self {
        let (death_tx, death_rx) = mpsc::channel();
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            capacity: config.max_actors,
            tables,
            death_tx,
            death_rx,
        }
    }

    /// Number of actors currently alive, in either spawn phase.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, handle: ActorHandle) -> Option<&Actor> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.actor.as_ref())
    }

    fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut Actor> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.actor.as_mut())
    }

    /// Handles of every active actor matching `filter`, in slot order.
    pub fn handles(&self, mut filter: impl FnMut(&Actor) -> bool) -> Vec<ActorHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let actor = slot.actor.as_ref()?;
                (actor.is_active() && filter(actor))
                    .then(|| ActorHandle::new(index as u32, slot.generation))
            })
            .collect()
    }

    pub fn enemies(&self) -> Vec<ActorHandle> {
        self.handles(|actor| matches!(actor.kind, ActorKind::Enemy { .. }))
    }

    pub fn rewards(&self) -> Vec<ActorHandle> {
        self.handles(|actor| matches!(actor.kind, ActorKind::Reward { .. }))
    }

    /// Applies damage to an active enemy and returns its remaining HP, or
    /// `None` if `handle` is not an active enemy.
    pub fn damage(&mut self, handle: ActorHandle, amount: f32) -> Option<f32> {
        let actor = self.get_mut(handle)?;
        if !actor.is_active() {
            return None;
        }
        actor.stats.as_mut().map(|stats| stats.apply_damage(amount))
    }

    /// Enemies whose HP reached zero since the last call.
    pub fn drain_deaths(&self) -> Vec<ActorHandle> {
        self.death_rx.try_iter().collect()
    }

    fn allocate(&mut self) -> ActorHandle {
        match self.free.pop() {
            Some(index) => ActorHandle::new(index, self.slots[index as usize].generation),
            None => {
                self.slots.push(Slot::default());
                ActorHandle::new(self.slots.len() as u32 - 1, 0)
            }
        }
    }

    fn enemy_sheet(&self, handle: ActorHandle, level: u32) -> StatSheet {
        let mut sheet = StatSheet::new(level, self.tables.as_tables());
        let deaths = self.death_tx.clone();
        sheet.subscribe_hp_zero(move || {
            // the receiver lives as long as the world
            let _ = deaths.send(handle);
        });
        sheet
    }
}

impl ActorSpawner for World {
    fn spawn_deferred(&mut self, kind: ActorKind, position: Position) -> Option<ActorHandle> {
        if self.live >= self.capacity {
            tracing::warn!(live = self.live, capacity = self.capacity, ?kind, "world is full");
            return None;
        }

        let handle = self.allocate();
        let stats = match kind {
            ActorKind::Enemy { level } => Some(self.enemy_sheet(handle, level)),
            ActorKind::Reward { .. } => None,
        };
        self.slots[handle.index as usize].actor = Some(Actor {
            kind,
            position,
            phase: ActorPhase::Deferred,
            stats,
        });
        self.live += 1;

        tracing::trace!(%handle, ?kind, %position, "actor spawn deferred");
        Some(handle)
    }

    fn finish_spawn(&mut self, handle: ActorHandle, position: Position) {
        match self.get_mut(handle) {
            Some(actor) => {
                actor.position = position;
                actor.phase = ActorPhase::Active;
            }
            None => tracing::warn!(%handle, "finish_spawn on unknown actor"),
        }
    }

    fn destroy(&mut self, handle: ActorHandle) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.actor.is_some())
        else {
            return false;
        };

        slot.actor = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        tracing::trace!(%handle, "actor destroyed");
        true
    }

    fn is_alive(&self, handle: ActorHandle) -> bool {
        self.get(handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use game_core::CharacterStat;

    use super::*;

    fn world(capacity: usize) -> World {
        let table = StatTable::new(
            vec![
                CharacterStat::with_max_hp(100.0),
                CharacterStat::with_max_hp(200.0),
            ],
            CharacterStat::with_max_hp(1000.0),
        )
        .unwrap();
        World::new(&GameConfig::with_max_actors(capacity), Arc::new(table))
    }

    fn spawn(world: &mut World, kind: ActorKind) -> ActorHandle {
        let handle = world.spawn_deferred(kind, Position::ORIGIN).unwrap();
        world.finish_spawn(handle, Position::ORIGIN);
        handle
    }

    #[test]
    fn two_phase_spawn_activates_actor() {
        let mut world = world(4);
        let handle = world
            .spawn_deferred(ActorKind::Reward { empty: true }, Position::ORIGIN)
            .unwrap();

        assert_eq!(world.get(handle).unwrap().phase(), ActorPhase::Deferred);
        assert!(world.rewards().is_empty());

        world.finish_spawn(handle, Position::new(1.0, 2.0, 3.0));

        let actor = world.get(handle).unwrap();
        assert!(actor.is_active());
        assert_eq!(actor.position(), Position::new(1.0, 2.0, 3.0));
        assert_eq!(world.rewards(), vec![handle]);
    }

    #[test]
    fn capacity_limits_spawns() {
        let mut world = world(1);
        spawn(&mut world, ActorKind::Reward { empty: false });

        assert!(
            world
                .spawn_deferred(ActorKind::Enemy { level: 1 }, Position::ORIGIN)
                .is_none()
        );
        assert_eq!(world.live_count(), 1);
    }

    #[test]
    fn destroyed_handles_stay_dead_after_slot_reuse() {
        let mut world = world(4);
        let first = spawn(&mut world, ActorKind::Reward { empty: false });
        assert!(world.destroy(first));
        assert!(!world.destroy(first));

        let second = spawn(&mut world, ActorKind::Reward { empty: false });

        assert_eq!(second.index, first.index);
        assert_ne!(second.generation, first.generation);
        assert!(!world.is_alive(first));
        assert!(world.is_alive(second));
    }

    #[test]
    fn enemies_are_leveled_and_report_death_once() {
        let mut world = world(4);
        let enemy = spawn(&mut world, ActorKind::Enemy { level: 2 });

        assert_eq!(world.get(enemy).unwrap().stats().unwrap().max_hp(), 200.0);
        assert_eq!(world.damage(enemy, 150.0), Some(50.0));
        assert!(world.drain_deaths().is_empty());

        assert_eq!(world.damage(enemy, 100.0), Some(0.0));
        assert_eq!(world.damage(enemy, 100.0), Some(0.0));
        assert_eq!(world.drain_deaths(), vec![enemy]);
    }

    #[test]
    fn pickups_cannot_be_damaged() {
        let mut world = world(4);
        let reward = spawn(&mut world, ActorKind::Reward { empty: false });

        assert_eq!(world.damage(reward, 10.0), None);
        assert_eq!(world.damage(ActorHandle::new(9, 0), 10.0), None);
    }
}
