//! # Ids and Actor Storage
//!
//! Actors and components refer to each other through ids instead of
//! pointers. An [`ActorId`] is a generational index into [`Slots`]; a
//! [`ComponentId`] is a plain counter handed out by the
//! [`World`](super::World).
//!
//! ## Generational Indices
//!
//! Slots are recycled when actors are destroyed. Each slot carries a
//! generation that is bumped on removal, so an old id that points at a
//! recycled slot no longer resolves:
//!
//! ```text
//! ActorId { index: 5, generation: 0 }  ← original
//! ActorId { index: 5, generation: 1 }  ← after recycle
//! ```
//!
//! ## Check-out
//!
//! While an actor runs its update it needs `&mut World`, and the world owns
//! the actor. [`Slots::check_out`] moves the actor out of its slot for the
//! duration of the call and leaves the slot marked as checked out; the id
//! stays alive and cannot be reused until [`Slots::check_in`] puts it back.
//!
//! ```text
//! Vacant ──insert──► Occupied ──check_out──► CheckedOut
//!   ▲                 │  ▲                      │
//!   └─────remove──────┘  └───────check_in───────┘
//! ```

use std::fmt;

/// A handle to an actor in the [`World`](super::World).
///
/// Only valid for the world that created it, and only while its generation
/// matches the slot's.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ActorId {
    /// Returns the raw slot index. Useful for diagnostics.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation. Useful for diagnostics.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Identity of one attached component. Unique for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

enum SlotState<T> {
    Vacant,
    Occupied(T),
    CheckedOut,
}

struct Slot<T> {
    generation: u32,
    state: SlotState<T>,
}

/// Generational slot storage.
///
/// ## Memory Layout
///
/// ```text
/// slots:     [Occupied g0, Vacant g1, CheckedOut g0, Vacant g2]
/// free_list: [1, 3]          ← vacant slots available for reuse
/// ```
pub(crate) struct Slots<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate an id and store the value built for it.
    pub fn insert_with(&mut self, build: impl FnOnce(ActorId) -> T) -> ActorId {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            let id = ActorId {
                index,
                generation: slot.generation,
            };
            slot.state = SlotState::Occupied(build(id));
            id
        } else {
            let id = ActorId {
                index: self.slots.len() as u32,
                generation: 0,
            };
            self.slots.push(Slot {
                generation: 0,
                state: SlotState::Occupied(build(id)),
            });
            id
        }
    }

    fn slot(&self, id: ActorId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ActorId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    pub fn get(&self, id: ActorId) -> Option<&T> {
        match &self.slot(id)?.state {
            SlotState::Occupied(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut T> {
        match &mut self.slot_mut(id)?.state {
            SlotState::Occupied(value) => Some(value),
            _ => None,
        }
    }

    /// `true` if the id is live, whether stored or checked out.
    pub fn contains(&self, id: ActorId) -> bool {
        self.slot(id)
            .is_some_and(|s| !matches!(s.state, SlotState::Vacant))
    }

    pub fn is_checked_out(&self, id: ActorId) -> bool {
        self.slot(id)
            .is_some_and(|s| matches!(s.state, SlotState::CheckedOut))
    }

    /// Take the value out, leaving the id reserved.
    pub fn check_out(&mut self, id: ActorId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        if !matches!(slot.state, SlotState::Occupied(_)) {
            return None;
        }
        match std::mem::replace(&mut slot.state, SlotState::CheckedOut) {
            SlotState::Occupied(value) => Some(value),
            _ => None,
        }
    }

    /// Put a checked-out value back. Returns the value if the id was not
    /// checked out.
    pub fn check_in(&mut self, id: ActorId, value: T) -> Result<(), T> {
        match self.slot_mut(id) {
            Some(slot) if matches!(slot.state, SlotState::CheckedOut) => {
                slot.state = SlotState::Occupied(value);
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Remove a stored value and retire its id.
    pub fn remove(&mut self, id: ActorId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        if !matches!(slot.state, SlotState::Occupied(_)) {
            return None;
        }
        let SlotState::Occupied(value) = std::mem::replace(&mut slot.state, SlotState::Vacant) else {
            return None;
        };
        slot.generation += 1;
        self.free_list.push(id.index);
        Some(value)
    }

    /// Number of live ids (stored or checked out).
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sequential() {
        let mut slots = Slots::new();
        let a = slots.insert_with(|_| "a");
        let b = slots.insert_with(|_| "b");
        assert_eq!((a.index, a.generation), (0, 0));
        assert_eq!((b.index, b.generation), (1, 0));
        assert_eq!(slots.get(b), Some(&"b"));
    }

    #[test]
    fn builder_sees_its_own_id() {
        let mut slots = Slots::new();
        let id = slots.insert_with(|id| id);
        assert_eq!(slots.get(id), Some(&id));
    }

    #[test]
    fn recycle_bumps_generation() {
        let mut slots = Slots::new();
        let a = slots.insert_with(|_| 1);
        assert_eq!(slots.remove(a), Some(1));
        let reused = slots.insert_with(|_| 2);
        assert_eq!(reused.index, a.index);
        assert_eq!(reused.generation, 1);
        assert!(slots.get(a).is_none());
        assert!(!slots.contains(a));
    }

    #[test]
    fn double_remove_returns_none() {
        let mut slots = Slots::new();
        let a = slots.insert_with(|_| 1);
        assert!(slots.remove(a).is_some());
        assert!(slots.remove(a).is_none());
        assert_eq!(slots.len(), 0);
    }

    #[test]
    fn checked_out_id_stays_reserved() {
        let mut slots = Slots::new();
        let a = slots.insert_with(|_| 7);
        let value = slots.check_out(a).unwrap();
        assert!(slots.contains(a));
        assert!(slots.is_checked_out(a));
        assert!(slots.get(a).is_none());
        assert!(slots.remove(a).is_none());
        assert!(slots.check_out(a).is_none());

        // Reserved ids are not handed out again.
        let b = slots.insert_with(|_| 8);
        assert_ne!(a.index, b.index);

        assert!(slots.check_in(a, value).is_ok());
        assert_eq!(slots.get(a), Some(&7));
    }

    #[test]
    fn check_in_rejects_stored_id() {
        let mut slots = Slots::new();
        let a = slots.insert_with(|_| 1);
        assert_eq!(slots.check_in(a, 2), Err(2));
        assert_eq!(slots.get(a), Some(&1));
    }
}
