//! # Components — Attachable Behaviors
//!
//! A [`Component`] is one reusable behavior owned by exactly one actor: a
//! sprite, an animation, a movement rule. Components are attached through
//! [`World::add_component`](super::World::add_component), which places them
//! in the owner's list ordered by [`update_order`](Component::update_order):
//! lower values run first, and equal values keep their attachment order.
//!
//! Each hook receives the owner's [`ActorCore`] and the [`World`]. The owner
//! is reached through the argument, never through a stored back-reference,
//! so a component can move its actor, spawn new actors or kill its owner
//! without aliasing anything.

use std::any::Any;

use super::actor::ActorCore;
use super::world::World;
use crate::input::InputState;
use crate::sprite::Sprite;

/// Update order used when a component does not override it.
pub const DEFAULT_UPDATE_ORDER: i32 = 100;

/// Upcast to [`Any`] for downcasting trait objects back to concrete types.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behavior attached to an actor.
///
/// # Example
///
/// ```ignore
/// struct Spin(f32);
///
/// impl Component for Spin {
///     fn update(&mut self, owner: &mut ActorCore, _world: &mut World, dt: f32) {
///         owner.transform.rotation += self.0 * dt;
///     }
/// }
/// ```
pub trait Component: AsAny {
    /// Position in the owner's update sequence. Read once, at attachment.
    fn update_order(&self) -> i32 {
        DEFAULT_UPDATE_ORDER
    }

    /// Per-frame logic. Only called while the owner is active.
    fn update(&mut self, _owner: &mut ActorCore, _world: &mut World, _dt: f32) {}

    /// React to this frame's input. Only called while the owner is active.
    fn process_input(&mut self, _owner: &mut ActorCore, _world: &mut World, _input: &InputState) {}

    /// The draw capability, for components that render.
    fn as_sprite(&self) -> Option<&dyn Sprite> {
        None
    }
}

impl dyn Component {
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
