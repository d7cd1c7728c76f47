//! Common imports for games built on troupe.
//!
//! ```ignore
//! use troupe::prelude::*;
//! ```

pub use crate::asset::{ImageLoader, PlaceholderLoader, TextureLoader, TextureRef};
pub use crate::config::GameConfig;
pub use crate::game::{Backend, Game, InitError};
pub use crate::input::{InputEvent, InputSource, InputState, KeyCode, ScriptedInput};
pub use crate::math::{Transform2d, Vec2};
pub use crate::render::{HeadlessRenderer, Renderer};
pub use crate::sprite::{AnimatedSprite, ScrollingBackground, Sprite, SpriteComponent};
pub use crate::stage::{
    ActorBehavior, ActorCore, ActorId, ActorState, Component, ComponentId, World,
};
pub use crate::time::{Clock, ManualClock, SystemClock};
