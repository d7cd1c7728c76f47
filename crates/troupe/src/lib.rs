//! # Troupe — Actor/Component Scene Engine
//!
//! A small engine for 2D games built around *actors* (entities with a
//! transform and a lifecycle) that own ordered *components* (behaviors).
//! Sprite components register in a draw-ordered list owned by the
//! [`World`](stage::World), which also handles deferred actor creation and
//! destruction so actors can spawn and kill each other mid-frame.
//!
//! Rendering, texture decoding, input and timing are consumed through small
//! traits ([`Renderer`](render::Renderer), [`TextureLoader`](asset::TextureLoader),
//! [`InputSource`](input::InputSource), [`Clock`](time::Clock)), so the engine
//! runs the same against a window backend or headless in tests.
//!
//! Start with `use troupe::prelude::*` and drive a [`Game`](game::Game).

pub mod asset;
pub mod config;
pub mod game;
pub mod input;
pub mod math;
pub mod prelude;
pub mod render;
pub mod sprite;
pub mod stage;
pub mod time;

#[cfg(feature = "diagnostics")]
pub mod diag;
