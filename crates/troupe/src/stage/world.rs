//! # World — Actor Storage and Frame Orchestration
//!
//! The [`World`] owns every [`Actor`], the draw-ordered sprite list and the
//! texture cache. Once per frame the game loop calls
//! [`update_actors`](World::update_actors), then [`render`](World::render).
//!
//! ## The Update Pass
//!
//! ```text
//! update_actors(dt)
//!   1. updating_actors = true
//!   2. for id in snapshot(live):  check_out ─► actor.update(world, dt) ─► check_in
//!   3. updating_actors = false
//!   4. live += pending; pending = []
//!   5. destroy every live actor whose state is Dead
//! ```
//!
//! Actors spawned while the pass runs go to the pending list and are not
//! visited until the next pass. Actors that die during the pass are gone
//! by the time it returns.
//!
//! ## Mutating the Actor Being Updated
//!
//! The actor under update is checked out of its slot, so the world cannot
//! reach it directly. Operations that target it are staged:
//!
//! | Operation on the checked-out actor | Effect                          |
//! |------------------------------------|---------------------------------|
//! | `add_component`                    | attached at check-in            |
//! | `remove_component`                 | detached at check-in            |
//! | `destroy_actor`                    | destroyed right after check-in  |
//!
//! Any other actor is modified immediately; a destroyed actor's id stops
//! resolving and the pass skips it.
//!
//! ## Sprite List
//!
//! Sprites are kept sorted by draw order. Insertion goes before the first
//! entry with a strictly greater order, so equal orders draw in the order
//! they were attached. Removal is by component identity and keeps the order.

use std::collections::HashMap;

use super::actor::{Actor, ActorBehavior, ActorCore, ActorState};
use super::component::Component;
use super::id::{ActorId, ComponentId, Slots};
use crate::asset::{TextureLoader, TextureRef, TextureStore};
use crate::input::InputState;
use crate::math::{Transform2d, Vec2};
use crate::render::Renderer;

/// One entry of the draw-ordered sprite list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpriteEntry {
    draw_order: i32,
    actor: ActorId,
    component: ComponentId,
}

/// Owner of all actors, sprites and textures.
pub struct World {
    slots: Slots<Actor>,
    /// Actors visited by update passes.
    actors: Vec<ActorId>,
    /// Actors spawned during a pass, committed to `actors` when it ends.
    pending_actors: Vec<ActorId>,
    updating_actors: bool,
    sprites: Vec<SpriteEntry>,
    owners: HashMap<ComponentId, ActorId>,
    next_component: u64,
    /// Components attached to the checked-out actor, applied at check-in.
    staged_components: Vec<(ActorId, ComponentId, Box<dyn Component>)>,
    staged_removals: Vec<(ActorId, ComponentId)>,
    /// Checked-out actors destroyed mid-pass.
    doomed: Vec<ActorId>,
    textures: TextureStore,
    screen_size: Vec2,
    exit_requested: bool,
    #[cfg(feature = "diagnostics")]
    updated_this_frame: u32,
    #[cfg(feature = "diagnostics")]
    spawned_this_frame: u32,
    #[cfg(feature = "diagnostics")]
    destroyed_this_frame: u32,
}

impl World {
    pub fn new(loader: Box<dyn TextureLoader>) -> Self {
        Self {
            slots: Slots::new(),
            actors: Vec::new(),
            pending_actors: Vec::new(),
            updating_actors: false,
            sprites: Vec::new(),
            owners: HashMap::new(),
            next_component: 0,
            staged_components: Vec::new(),
            staged_removals: Vec::new(),
            doomed: Vec::new(),
            textures: TextureStore::new(loader),
            screen_size: Vec2::ZERO,
            exit_requested: false,
            #[cfg(feature = "diagnostics")]
            updated_this_frame: 0,
            #[cfg(feature = "diagnostics")]
            spawned_this_frame: 0,
            #[cfg(feature = "diagnostics")]
            destroyed_this_frame: 0,
        }
    }

    // ── Screen and Exit ──────────────────────────────────────────────

    /// Logical screen size in pixels.
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    /// Ask the game loop to stop after the current frame.
    pub fn request_exit(&mut self) {
        log::info!("Exit requested");
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ── Actors ───────────────────────────────────────────────────────

    /// Create an actor with the given behavior.
    ///
    /// During an update or input pass the actor is parked in the pending
    /// list and first visited by the next pass.
    pub fn spawn_actor(&mut self, transform: Transform2d, behavior: impl ActorBehavior) -> ActorId {
        let id = self
            .slots
            .insert_with(|id| Actor::new(ActorCore::new(id, transform), Box::new(behavior)));
        if self.updating_actors {
            self.pending_actors.push(id);
            log::trace!("Spawned actor {id} (pending)");
        } else {
            self.actors.push(id);
            log::trace!("Spawned actor {id}");
        }
        #[cfg(feature = "diagnostics")]
        {
            self.spawned_this_frame += 1;
        }
        id
    }

    /// Create an actor with no behavior of its own, such as scenery that is
    /// only a carrier for components.
    pub fn spawn_empty(&mut self, transform: Transform2d) -> ActorId {
        self.spawn_actor(transform, ())
    }

    /// Destroy an actor and every component it owns.
    ///
    /// Returns `false` if the id does not resolve. Destroying the actor that
    /// is currently being updated is deferred until its update returns.
    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        if self.slots.is_checked_out(id) {
            if !self.doomed.contains(&id) {
                self.doomed.push(id);
            }
            log::trace!("Deferring destruction of actor {id} until check-in");
            return true;
        }

        let Some(actor) = self.slots.remove(id) else {
            log::debug!("destroy_actor: {id} does not exist");
            return false;
        };
        self.remove_actor(id);
        for attached in actor.into_components() {
            self.owners.remove(&attached.id);
            self.remove_sprite(attached.id);
        }
        log::debug!("Destroyed actor {id}");
        #[cfg(feature = "diagnostics")]
        {
            self.destroyed_this_frame += 1;
        }
        true
    }

    /// Drop the id from whichever of pending/live holds it (swap with last,
    /// then pop).
    fn remove_actor(&mut self, id: ActorId) {
        if let Some(i) = self.pending_actors.iter().position(|&a| a == id) {
            self.pending_actors.swap_remove(i);
        } else if let Some(i) = self.actors.iter().position(|&a| a == id) {
            self.actors.swap_remove(i);
        }
    }

    /// The actor, unless the id is stale or the actor is mid-update.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots.get_mut(id)
    }

    /// `true` while the id refers to a live or pending actor.
    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.slots.contains(id)
    }

    /// Live plus pending actors.
    pub fn actor_count(&self) -> usize {
        self.slots.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_actors.len()
    }

    /// Ids visited by the next pass, in visiting order.
    pub fn live_actors(&self) -> &[ActorId] {
        &self.actors
    }

    /// `true` while an update or input pass is running.
    pub fn is_updating(&self) -> bool {
        self.updating_actors
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach a component to an actor, registering it as a sprite if it
    /// draws. Returns `None` if the actor does not exist.
    pub fn add_component<C: Component>(&mut self, actor: ActorId, component: C) -> Option<ComponentId> {
        if !self.slots.contains(actor) {
            log::warn!("add_component: actor {actor} does not exist");
            return None;
        }

        let id = ComponentId(self.next_component);
        self.next_component += 1;
        let draw_order = component.as_sprite().map(|s| s.draw_order());
        let component: Box<dyn Component> = Box::new(component);

        if self.slots.is_checked_out(actor) {
            self.staged_components.push((actor, id, component));
        } else if let Some(a) = self.slots.get_mut(actor) {
            a.add_component(id, component);
        }
        self.owners.insert(id, actor);
        if let Some(order) = draw_order {
            self.add_sprite(order, actor, id);
        }
        log::trace!("Attached component {id} to actor {actor}");
        Some(id)
    }

    /// Detach and drop a component. Returns `false` if `actor` does not own
    /// `id`.
    pub fn remove_component(&mut self, actor: ActorId, id: ComponentId) -> bool {
        if self.owners.get(&id) != Some(&actor) {
            log::debug!("remove_component: {id} is not attached to actor {actor}");
            return false;
        }
        self.owners.remove(&id);
        self.remove_sprite(id);

        if let Some(i) = self.staged_components.iter().position(|(_, c, _)| *c == id) {
            self.staged_components.remove(i);
            return true;
        }
        if self.slots.is_checked_out(actor) {
            self.staged_removals.push((actor, id));
            return true;
        }
        self.slots
            .get_mut(actor)
            .and_then(|a| a.remove_component(id))
            .is_some()
    }

    /// Downcast a component for inspection.
    pub fn component<T: Component>(&self, actor: ActorId, id: ComponentId) -> Option<&T> {
        if let Some(a) = self.slots.get(actor) {
            return a.component(id).and_then(|c| c.downcast_ref::<T>());
        }
        self.staged_components
            .iter()
            .find(|(a, c, _)| *a == actor && *c == id)
            .and_then(|(_, _, c)| (**c).downcast_ref::<T>())
    }

    /// Downcast a component for configuration.
    pub fn component_mut<T: Component>(&mut self, actor: ActorId, id: ComponentId) -> Option<&mut T> {
        if self.slots.get(actor).is_some() {
            return self
                .slots
                .get_mut(actor)
                .and_then(|a| a.component_mut(id))
                .and_then(|c| c.downcast_mut::<T>());
        }
        self.staged_components
            .iter_mut()
            .find(|(a, c, _)| *a == actor && *c == id)
            .and_then(|(_, _, c)| (**c).downcast_mut::<T>())
    }

    /// The actor owning a component.
    pub fn owner_of(&self, id: ComponentId) -> Option<ActorId> {
        self.owners.get(&id).copied()
    }

    // ── Sprites ──────────────────────────────────────────────────────

    fn add_sprite(&mut self, draw_order: i32, actor: ActorId, component: ComponentId) {
        let at = self.sprites.partition_point(|s| s.draw_order <= draw_order);
        self.sprites.insert(
            at,
            SpriteEntry {
                draw_order,
                actor,
                component,
            },
        );
    }

    fn remove_sprite(&mut self, component: ComponentId) {
        if let Some(i) = self.sprites.iter().position(|s| s.component == component) {
            self.sprites.remove(i);
        }
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Registered sprites as `(draw_order, component)`, back to front.
    pub fn sprite_order(&self) -> impl Iterator<Item = (i32, ComponentId)> + '_ {
        self.sprites.iter().map(|s| (s.draw_order, s.component))
    }

    // ── Textures ─────────────────────────────────────────────────────

    /// Look up a texture by name, loading it on first use. `None` if the
    /// load failed; the failure is logged.
    pub fn get_texture(&mut self, name: &str) -> Option<TextureRef> {
        self.textures.get_or_load(name)
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    // ── Frame Passes ─────────────────────────────────────────────────

    /// Run one update pass over the live actors, then commit pending actors
    /// and destroy the dead.
    pub fn update_actors(&mut self, dt: f32) {
        if !self.begin_pass("update_actors") {
            return;
        }
        let snapshot = self.actors.clone();
        for id in snapshot {
            self.with_checked_out(id, |actor, world| actor.update(world, dt));
        }
        self.end_pass();

        let dead: Vec<ActorId> = self
            .actors
            .iter()
            .copied()
            .filter(|&id| {
                self.slots
                    .get(id)
                    .is_some_and(|a| a.state() == ActorState::Dead)
            })
            .collect();
        for id in dead {
            self.destroy_actor(id);
        }
    }

    /// Dispatch this frame's input to the live actors.
    pub fn process_input(&mut self, input: &InputState) {
        if !self.begin_pass("process_input") {
            return;
        }
        let snapshot = self.actors.clone();
        for id in snapshot {
            self.with_checked_out(id, |actor, world| actor.process_input(world, input));
        }
        self.end_pass();
    }

    fn begin_pass(&mut self, pass: &str) -> bool {
        if self.updating_actors {
            log::warn!("{pass} called from inside another actor pass; ignoring");
            return false;
        }
        self.updating_actors = true;
        true
    }

    fn end_pass(&mut self) {
        self.updating_actors = false;
        if !self.pending_actors.is_empty() {
            log::trace!("Committing {} pending actors", self.pending_actors.len());
            let pending = std::mem::take(&mut self.pending_actors);
            self.actors.extend(pending);
        }
    }

    /// Move an actor out of its slot for the duration of `f`, then put it
    /// back and apply whatever was staged against it. Ids that no longer
    /// resolve are skipped.
    fn with_checked_out(&mut self, id: ActorId, f: impl FnOnce(&mut Actor, &mut World)) {
        let Some(mut actor) = self.slots.check_out(id) else {
            log::trace!("Skipping actor {id}: destroyed earlier in the pass");
            return;
        };
        // Paused and dead actors are visited but not updated.
        #[cfg(feature = "diagnostics")]
        let active = actor.core().is_active();
        f(&mut actor, self);
        #[cfg(feature = "diagnostics")]
        if active {
            self.updated_this_frame += 1;
        }

        for (_, component) in std::mem::take(&mut self.staged_removals) {
            actor.remove_component(component);
        }
        for (_, component_id, component) in std::mem::take(&mut self.staged_components) {
            actor.add_component(component_id, component);
        }
        if self.slots.check_in(id, actor).is_err() {
            log::error!("Actor {id} was not checked out; dropping it");
            return;
        }

        if let Some(i) = self.doomed.iter().position(|&d| d == id) {
            self.doomed.swap_remove(i);
            self.destroy_actor(id);
        }
    }

    /// Draw every sprite back to front. Returns the number of sprites visited.
    pub fn render(&self, renderer: &mut dyn Renderer) -> usize {
        renderer.clear();
        let mut drawn = 0;
        for entry in &self.sprites {
            let Some(actor) = self.slots.get(entry.actor) else {
                continue;
            };
            let Some(sprite) = actor.component(entry.component).and_then(|c| c.as_sprite()) else {
                continue;
            };
            sprite.draw(actor.core(), &self.textures, renderer);
            drawn += 1;
        }
        renderer.present();
        drawn
    }

    /// Destroy every actor, live and pending, then release all textures.
    pub fn shutdown(&mut self) {
        if self.updating_actors {
            log::warn!("shutdown called during an actor pass");
        }
        let ids: Vec<ActorId> = self
            .actors
            .iter()
            .chain(self.pending_actors.iter())
            .copied()
            .collect();
        let count = ids.len();
        for id in ids {
            self.destroy_actor(id);
        }
        self.textures.clear();
        log::info!("World shut down ({count} actors destroyed)");
    }

    /// Per-frame counters, reset on every call.
    #[cfg(feature = "diagnostics")]
    pub(crate) fn take_frame_stats(&mut self, sprites_drawn: usize) -> crate::diag::FrameStats {
        let stats = crate::diag::FrameStats {
            actors_updated: self.updated_this_frame,
            actors_spawned: self.spawned_this_frame,
            actors_destroyed: self.destroyed_this_frame,
            sprites_drawn,
            live_actors: self.actors.len(),
            sprites: self.sprites.len(),
            textures: self.textures.len(),
        };
        self.updated_this_frame = 0;
        self.spawned_this_frame = 0;
        self.destroyed_this_frame = 0;
        stats
    }
}
