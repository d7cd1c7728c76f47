//! Rendering interface.
//!
//! The engine never talks to a graphics API directly. Each frame the
//! [`World`](crate::stage::World) walks its draw-ordered sprite list and
//! issues `clear`, one `draw_texture` per visible sprite tile, then `present`
//! against a [`Renderer`]. Back-to-front order is the order of the calls;
//! there is no depth buffer.

use crate::asset::{Texture, TextureHandle};
use crate::config::GameConfig;
use crate::game::InitError;
use crate::math::DrawRect;

/// A 2D texture blitter.
pub trait Renderer {
    /// Create whatever the backend needs (window surface, device). Called
    /// once before the first frame; an error aborts startup.
    fn init(&mut self, _config: &GameConfig) -> Result<(), InitError> {
        Ok(())
    }

    /// Start a frame.
    fn clear(&mut self);

    /// Draw `texture` stretched into `dest`, rotated by `rotation` radians
    /// around the rectangle's center.
    fn draw_texture(&mut self, handle: TextureHandle, texture: &Texture, dest: DrawRect, rotation: f32);

    /// Finish the frame and show it.
    fn present(&mut self);
}

/// One recorded `draw_texture` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub handle: TextureHandle,
    pub texture: String,
    pub dest: DrawRect,
    pub rotation: f32,
}

/// A renderer with no output. Records the draw calls of the most recently
/// presented frame so tests and headless runs can inspect them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    current: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the last presented frame, in submission order.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, config: &GameConfig) -> Result<(), InitError> {
        if config.screen_width == 0 || config.screen_height == 0 {
            return Err(InitError::Renderer(format!(
                "invalid screen size {}x{}",
                config.screen_width, config.screen_height
            )));
        }
        log::info!(
            "Headless renderer ready ({}x{})",
            config.screen_width,
            config.screen_height
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.current.clear();
    }

    fn draw_texture(&mut self, handle: TextureHandle, texture: &Texture, dest: DrawRect, rotation: f32) {
        self.current.push(DrawCommand {
            handle,
            texture: texture.name.clone(),
            dest,
            rotation,
        });
    }

    fn present(&mut self) {
        log::trace!("Presenting frame with {} draw calls", self.current.len());
        self.last_frame = std::mem::take(&mut self.current);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(name: &str) -> Texture {
        Texture {
            name: name.to_string(),
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        }
    }

    #[test]
    fn present_swaps_frames() {
        let mut r = HeadlessRenderer::new();
        r.clear();
        r.draw_texture(TextureHandle(0), &texture("a"), DrawRect::default(), 0.0);
        assert!(r.last_frame().is_empty());
        r.present();
        assert_eq!(r.last_frame().len(), 1);
        assert_eq!(r.last_frame()[0].texture, "a");

        r.clear();
        r.present();
        assert!(r.last_frame().is_empty());
        assert_eq!(r.frames_presented(), 2);
    }

    #[test]
    fn init_rejects_empty_screen() {
        let config = GameConfig {
            screen_width: 0,
            ..GameConfig::default()
        };
        assert!(HeadlessRenderer::new().init(&config).is_err());
        assert!(HeadlessRenderer::new().init(&GameConfig::default()).is_ok());
    }
}
