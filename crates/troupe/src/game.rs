//! # Game — The Outer Loop
//!
//! [`Game`] owns the [`World`] and the backend objects, and runs the frame
//! loop:
//!
//! ```text
//! initialize(config, backend)      renderer.init, world, pacer
//!   │
//!   ├─ setup(|world| ...)          spawn the scene
//!   │
//!   ├─ run_loop()  while running:
//!   │     1. input    poll events, quit / Escape, world.process_input
//!   │     2. update   pacer.tick (≥ min frame, delta ≤ max), world.update_actors
//!   │     3. output   world.render
//!   │
//!   └─ shutdown()                  destroy actors, release textures
//! ```
//!
//! The loop stops at the end of the frame in which a quit event arrives,
//! Escape is held, or game code calls [`World::request_exit`].

use std::fmt;

use crate::asset::TextureLoader;
use crate::config::{ConfigError, GameConfig};
use crate::input::{InputSource, InputState, KeyCode};
use crate::math::Vec2;
use crate::render::Renderer;
use crate::stage::World;
use crate::time::{Clock, FramePacer, Time};

/// Fatal startup errors.
#[derive(Debug)]
pub enum InitError {
    /// The renderer could not create its output.
    Renderer(String),
    /// The configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Renderer(msg) => write!(f, "renderer initialization failed: {msg}"),
            InitError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Renderer(_) => None,
            InitError::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::Config(e)
    }
}

/// The platform pieces a game runs against.
pub struct Backend {
    pub renderer: Box<dyn Renderer>,
    pub loader: Box<dyn TextureLoader>,
    pub input: Box<dyn InputSource>,
    pub clock: Box<dyn Clock>,
}

pub struct Game {
    config: GameConfig,
    world: World,
    renderer: Box<dyn Renderer>,
    input_source: Box<dyn InputSource>,
    input: InputState,
    pacer: FramePacer,
    time: Time,
    running: bool,
    #[cfg(feature = "diagnostics")]
    stats_log: crate::diag::StatsLog,
    #[cfg(feature = "diagnostics")]
    last_stats: crate::diag::FrameStats,
}

impl Game {
    /// Initialize the renderer and create an empty world.
    pub fn initialize(config: GameConfig, backend: Backend) -> Result<Self, InitError> {
        let Backend {
            mut renderer,
            loader,
            input,
            clock,
        } = backend;

        renderer.init(&config)?;

        let mut world = World::new(loader);
        world.set_screen_size(Vec2::new(
            config.screen_width as f32,
            config.screen_height as f32,
        ));
        let pacer = FramePacer::new(clock, config.min_frame(), config.max_delta_secs);

        log::info!(
            "Initialized '{}' ({}x{}, min frame {}ms)",
            config.title,
            config.screen_width,
            config.screen_height,
            config.min_frame_ms
        );

        Ok(Self {
            config,
            world,
            renderer,
            input_source: input,
            input: InputState::new(),
            pacer,
            time: Time::new(),
            running: true,
            #[cfg(feature = "diagnostics")]
            stats_log: crate::diag::StatsLog::new(1.0),
            #[cfg(feature = "diagnostics")]
            last_stats: crate::diag::FrameStats::default(),
        })
    }

    /// Build the scene. Frame timing restarts afterwards so load time is not
    /// counted as the first frame's delta.
    pub fn setup(&mut self, build: impl FnOnce(&mut World)) {
        build(&mut self.world);
        self.pacer.reset();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Counters from the most recent frame.
    #[cfg(feature = "diagnostics")]
    pub fn frame_stats(&self) -> &crate::diag::FrameStats {
        &self.last_stats
    }

    /// Run frames until something stops the game.
    pub fn run_loop(&mut self) {
        self.pacer.reset();
        while self.running {
            self.run_frame();
        }
        log::info!("Game loop stopped after {} frames", self.time.frame_count());
    }

    /// Run exactly one frame: input, update, output.
    pub fn run_frame(&mut self) {
        self.process_input();
        self.update_game();
        self.generate_output();
    }

    fn process_input(&mut self) {
        let events = self.input_source.poll_events();
        self.input.apply(&events);
        if self.input.quit_requested() || self.input.pressed(KeyCode::Escape) {
            self.running = false;
        }
        self.world.process_input(&self.input);
    }

    fn update_game(&mut self) {
        let dt = self.pacer.tick();
        self.time.advance(dt);
        self.world.update_actors(dt);
        if self.world.exit_requested() {
            self.running = false;
        }
    }

    fn generate_output(&mut self) {
        let _drawn = self.world.render(self.renderer.as_mut());

        #[cfg(feature = "diagnostics")]
        {
            self.last_stats = self.world.take_frame_stats(_drawn);
            self.stats_log
                .record(self.time.frame_count(), self.time.delta_secs(), &self.last_stats);
        }
    }

    /// Destroy every actor and release all textures.
    pub fn shutdown(mut self) {
        self.world.shutdown();
        log::info!(
            "Shut down '{}' after {:.2}s",
            self.config.title,
            self.time.elapsed_secs()
        );
    }
}
