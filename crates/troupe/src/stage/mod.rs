//! Actors, components and the world that owns them.
//!
//! ```text
//! World
//!  ├─ actor slots   ActorId ─► Actor ─► [Component; ordered by update_order]
//!  ├─ live list     visited by each pass
//!  ├─ pending list  spawned mid-pass, committed when the pass ends
//!  ├─ sprite list   (draw_order, ActorId, ComponentId), sorted
//!  └─ texture cache
//! ```

pub mod actor;
pub mod component;
mod id;
pub mod world;

pub use actor::{Actor, ActorBehavior, ActorCore, ActorState};
pub use component::{AsAny, Component, DEFAULT_UPDATE_ORDER};
pub use id::{ActorId, ComponentId};
pub use world::World;
