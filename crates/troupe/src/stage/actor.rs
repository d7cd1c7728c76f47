//! # Actors — Entities with a Transform and Behaviors
//!
//! An [`Actor`] is a game object: it has a [`Transform2d`], a lifecycle
//! [`ActorState`], an ordered list of [`Component`]s it owns, and an
//! [`ActorBehavior`] holding entity-specific logic (a player ship, a
//! projectile). Plain scenery uses `()` as its behavior.
//!
//! ## Update Order
//!
//! ```text
//! Actor::update(dt)            (skipped unless Active)
//!   ├─ component[0].update     lowest update_order first
//!   ├─ component[1].update
//!   ├─ ...
//!   └─ behavior.update_actor   entity-specific logic last
//! ```
//!
//! ## Lifecycle
//!
//! `Active ⇄ Paused` is driven by game code and only gates `update` and
//! `process_input`. `Dead` is terminal: the actor is inert and the
//! [`World`] destroys it at the end of the current update pass.

use super::component::{AsAny, Component};
use super::id::{ActorId, ComponentId};
use super::world::World;
use crate::input::InputState;
use crate::math::{Transform2d, Vec2};

/// Lifecycle state of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    #[default]
    Active,
    Paused,
    Dead,
}

/// The part of an actor its components and behavior may modify: identity,
/// lifecycle state and transform.
#[derive(Debug, Clone)]
pub struct ActorCore {
    id: ActorId,
    state: ActorState,
    pub transform: Transform2d,
}

impl ActorCore {
    pub(crate) fn new(id: ActorId, transform: Transform2d) -> Self {
        Self {
            id,
            state: ActorState::Active,
            transform,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Change the lifecycle state. Ignored once the actor is dead.
    pub fn set_state(&mut self, state: ActorState) {
        if self.state == ActorState::Dead && state != ActorState::Dead {
            log::debug!("Ignoring {state:?} for dead actor {}", self.id);
            return;
        }
        self.state = state;
    }

    /// Mark the actor dead. It is destroyed at the end of the update pass.
    pub fn kill(&mut self) {
        self.set_state(ActorState::Dead);
    }

    pub fn is_active(&self) -> bool {
        self.state == ActorState::Active
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = rotation;
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Set the uniform scale. Negative values clamp to 0.
    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale.max(0.0);
    }
}

/// Entity-specific logic that runs after an actor's components.
pub trait ActorBehavior: AsAny {
    /// Called every frame after the components, while the actor is active.
    fn update_actor(&mut self, _actor: &mut ActorCore, _world: &mut World, _dt: f32) {}

    /// Called with this frame's input after the components' input hooks,
    /// while the actor is active.
    fn process_input(&mut self, _actor: &mut ActorCore, _world: &mut World, _input: &InputState) {}
}

impl ActorBehavior for () {}

impl dyn ActorBehavior {
    pub fn downcast_ref<T: ActorBehavior>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: ActorBehavior>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A component in its owner's list. `order` is cached at attachment.
pub(crate) struct Attached {
    pub id: ComponentId,
    pub order: i32,
    pub component: Box<dyn Component>,
}

/// An entity owning an ordered list of components.
pub struct Actor {
    core: ActorCore,
    components: Vec<Attached>,
    behavior: Box<dyn ActorBehavior>,
}

impl Actor {
    pub(crate) fn new(core: ActorCore, behavior: Box<dyn ActorBehavior>) -> Self {
        Self {
            core,
            components: Vec::new(),
            behavior,
        }
    }

    pub fn core(&self) -> &ActorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    pub fn id(&self) -> ActorId {
        self.core.id
    }

    pub fn state(&self) -> ActorState {
        self.core.state
    }

    /// Ids of the attached components, in update order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().map(|c| c.id)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn behavior<T: ActorBehavior>(&self) -> Option<&T> {
        self.behavior.downcast_ref::<T>()
    }

    pub fn behavior_mut<T: ActorBehavior>(&mut self) -> Option<&mut T> {
        self.behavior.downcast_mut::<T>()
    }

    /// Insert before the first component whose order is strictly greater,
    /// so equal orders keep arrival order.
    pub(crate) fn add_component(&mut self, id: ComponentId, component: Box<dyn Component>) {
        let order = component.update_order();
        let at = self.components.partition_point(|c| c.order <= order);
        self.components.insert(
            at,
            Attached {
                id,
                order,
                component,
            },
        );
    }

    /// Detach by identity. `None` if the component is not attached here.
    pub(crate) fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let at = self.components.iter().position(|c| c.id == id)?;
        Some(self.components.remove(at).component)
    }

    pub(crate) fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.component.as_ref())
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| c.component.as_mut())
    }

    pub(crate) fn update(&mut self, world: &mut World, dt: f32) {
        if !self.core.is_active() {
            return;
        }
        for attached in &mut self.components {
            attached.component.update(&mut self.core, world, dt);
        }
        self.behavior.update_actor(&mut self.core, world, dt);
    }

    pub(crate) fn process_input(&mut self, world: &mut World, input: &InputState) {
        if !self.core.is_active() {
            return;
        }
        for attached in &mut self.components {
            attached.component.process_input(&mut self.core, world, input);
        }
        self.behavior.process_input(&mut self.core, world, input);
    }

    /// Tear the actor apart, handing back its components for deregistration.
    pub(crate) fn into_components(self) -> Vec<Attached> {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Prioritized(i32);

    impl Component for Prioritized {
        fn update_order(&self) -> i32 {
            self.0
        }
    }

    fn actor() -> Actor {
        let id = ActorId {
            index: 0,
            generation: 0,
        };
        Actor::new(ActorCore::new(id, Transform2d::IDENTITY), Box::new(()))
    }

    #[test]
    fn ordered_insert_is_stable() {
        let mut actor = actor();
        for (i, order) in [5, 1, 5, 3].into_iter().enumerate() {
            actor.add_component(ComponentId(i as u64), Box::new(Prioritized(order)));
        }

        let ids: Vec<_> = actor.component_ids().map(|c| c.0).collect();
        // 1 (id 1), 3 (id 3), first 5 (id 0), second 5 (id 2)
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn remove_absent_component_is_noop() {
        let mut actor = actor();
        actor.add_component(ComponentId(0), Box::new(Prioritized(1)));
        assert!(actor.remove_component(ComponentId(9)).is_none());
        assert_eq!(actor.component_count(), 1);
        assert!(actor.remove_component(ComponentId(0)).is_some());
        assert_eq!(actor.component_count(), 0);
    }

    #[test]
    fn dead_is_terminal() {
        let mut actor = actor();
        let core = actor.core_mut();
        core.set_state(ActorState::Paused);
        assert_eq!(core.state(), ActorState::Paused);
        core.set_state(ActorState::Active);
        core.kill();
        core.set_state(ActorState::Active);
        assert_eq!(core.state(), ActorState::Dead);
    }

    #[test]
    fn downcast_component_and_behavior() {
        let mut actor = actor();
        actor.add_component(ComponentId(4), Box::new(Prioritized(7)));
        let c = actor.component(ComponentId(4)).unwrap();
        assert_eq!(c.downcast_ref::<Prioritized>().map(|p| p.0), Some(7));
        assert!(actor.behavior::<()>().is_some());
    }

    #[test]
    fn scale_never_negative() {
        let mut actor = actor();
        actor.core_mut().set_scale(-1.0);
        assert_eq!(actor.core().scale(), 0.0);
    }
}
