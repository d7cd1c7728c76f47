//! Side-scrolling rocket demo.
//!
//! A ship flies over two parallax star fields and fires lasers. The demo
//! runs headless: input comes from a short autopilot script and the run
//! ends after `--frames` frames.
//!
//! ```text
//! cargo run --bin rocket -- --assets assets --frames 300
//! RUST_LOG=troupe=debug cargo run --bin rocket
//! ```

mod laser;
mod ship;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use troupe::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "rocket")]
#[command(about = "Side-scrolling rocket demo on the troupe engine")]
struct Cli {
    /// JSON game config; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the PNG assets. Blank placeholders are drawn if it
    /// does not exist
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Quit after this many frames
    #[arg(long, default_value_t = 600)]
    frames: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), InitError> {
    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig {
            title: String::from("Rocket"),
            ..GameConfig::default()
        },
    };

    let loader: Box<dyn TextureLoader> = if cli.assets.is_dir() {
        Box::new(ImageLoader::new(&cli.assets))
    } else {
        log::warn!(
            "Asset directory '{}' not found, using placeholder textures",
            cli.assets.display()
        );
        Box::new(PlaceholderLoader::new(64, 64))
    };

    let backend = Backend {
        renderer: Box::new(HeadlessRenderer::new()),
        loader,
        input: Box::new(autopilot(cli.frames)),
        clock: Box::new(SystemClock::new()),
    };

    let mut game = Game::initialize(config, backend)?;
    game.setup(load_scene);
    game.run_loop();
    game.shutdown();
    Ok(())
}

/// Fly right, then up, firing every 45 frames; quit on the last frame.
fn autopilot(frames: usize) -> ScriptedInput {
    let mut input = ScriptedInput::new();
    for frame in 0..frames.saturating_sub(1) {
        let mut events = Vec::new();
        if frame == 0 {
            events.push(InputEvent::KeyDown(KeyCode::KeyD));
        }
        if frame == 120 {
            events.push(InputEvent::KeyUp(KeyCode::KeyD));
            events.push(InputEvent::KeyDown(KeyCode::KeyW));
        }
        match frame % 45 {
            0 => events.push(InputEvent::KeyDown(KeyCode::Space)),
            1 => events.push(InputEvent::KeyUp(KeyCode::Space)),
            _ => {}
        }
        input.push_frame(events);
    }
    input.push_frame(vec![InputEvent::Quit]);
    input
}

fn load_scene(world: &mut World) {
    let screen = world.screen_size();
    ship::spawn(world, Vec2::new(150.0, screen.y / 2.0));

    // Both background layers hang off one actor at the screen center.
    let center = world.spawn_empty(Transform2d::from_xy(screen.x / 2.0, screen.y / 2.0));

    let mut far = ScrollingBackground::new(10);
    far.set_screen_size(screen);
    far.set_textures(textures(world, &["background1.png", "background2.png"]));
    far.set_scroll_speed(-100.0);
    world.add_component(center, far);

    let mut near = ScrollingBackground::new(50);
    near.set_screen_size(screen);
    near.set_textures(textures(world, &["stars1.png", "stars1.png"]));
    near.set_scroll_speed(-200.0);
    world.add_component(center, near);

    log::info!(
        "Scene loaded: {} actors, {} sprites",
        world.actor_count(),
        world.sprite_count()
    );
}

/// Load every texture that exists; missing ones were already logged.
pub(crate) fn textures(world: &mut World, names: &[&str]) -> Vec<TextureRef> {
    names.iter().filter_map(|name| world.get_texture(name)).collect()
}
