//! Flipbook animation.
//!
//! An [`AnimatedSprite`] cycles through a list of textures at a fixed rate.
//! The frame counter is fractional; each update adds `fps * dt` and wraps it
//! into `[0, frame_count)`, so a rate much larger than the frame count wraps
//! several times in one step without special handling.

use super::{DEFAULT_DRAW_ORDER, Sprite, SpriteComponent};
use crate::asset::{TextureRef, TextureStore};
use crate::render::Renderer;
use crate::stage::{ActorCore, Component, World};

/// Frames per second used when none is set.
pub const DEFAULT_ANIM_FPS: f32 = 24.0;

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    sprite: SpriteComponent,
    frames: Vec<TextureRef>,
    current_frame: f32,
    fps: f32,
}

impl AnimatedSprite {
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            frames: Vec::new(),
            current_frame: 0.0,
            fps: DEFAULT_ANIM_FPS,
        }
    }

    /// Replace the frame list. Restarts at frame 0 and shows it immediately.
    pub fn set_textures(&mut self, frames: Vec<TextureRef>) {
        self.frames = frames;
        self.current_frame = 0.0;
        self.sprite.set_texture(self.frames.first().copied());
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: f32) {
        self.fps = fps;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the frame currently shown.
    pub fn current_frame_index(&self) -> usize {
        self.current_frame as usize
    }

    /// The texture currently shown.
    pub fn texture(&self) -> Option<TextureRef> {
        self.sprite.texture()
    }

    /// Advance the animation by `dt` seconds. No-op without frames.
    pub fn advance(&mut self, dt: f32) {
        if self.frames.is_empty() {
            return;
        }
        let len = self.frames.len();
        self.current_frame = (self.current_frame + self.fps * dt).rem_euclid(len as f32);
        // rem_euclid can round up to exactly `len` for tiny negative inputs.
        let index = (self.current_frame as usize).min(len - 1);
        self.sprite.set_texture(Some(self.frames[index]));
    }
}

impl Default for AnimatedSprite {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl Component for AnimatedSprite {
    fn update(&mut self, _owner: &mut ActorCore, _world: &mut World, dt: f32) {
        self.advance(dt);
    }

    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }
}

impl Sprite for AnimatedSprite {
    fn draw_order(&self) -> i32 {
        self.sprite.draw_order()
    }

    fn draw(&self, owner: &ActorCore, textures: &TextureStore, renderer: &mut dyn Renderer) {
        self.sprite.draw(owner, textures, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::TextureHandle;

    fn frames(n: u32) -> Vec<TextureRef> {
        (0..n)
            .map(|i| TextureRef {
                handle: TextureHandle(i),
                width: 8,
                height: 8,
            })
            .collect()
    }

    #[test]
    fn index_is_floor_of_rate_times_time_mod_len() {
        let mut anim = AnimatedSprite::default();
        anim.set_textures(frames(3));
        anim.set_fps(2.0);

        // 0.25s steps at 2 fps: the counter stays exact in binary.
        for step in 1..=20u32 {
            anim.advance(0.25);
            let expected = (step / 2) as usize % 3;
            assert_eq!(anim.current_frame_index(), expected, "step {step}");
            assert_eq!(anim.texture().map(|t| t.handle), Some(TextureHandle(expected as u32)));
        }
    }

    #[test]
    fn large_rate_wraps_in_one_step() {
        let mut anim = AnimatedSprite::default();
        anim.set_textures(frames(3));
        anim.set_fps(10.0);
        anim.advance(1.0);
        assert_eq!(anim.current_frame_index(), 1);
    }

    #[test]
    fn empty_animation_is_inert() {
        let mut anim = AnimatedSprite::default();
        anim.advance(1.0);
        assert_eq!(anim.current_frame_index(), 0);
        assert!(anim.texture().is_none());
    }

    #[test]
    fn new_frames_restart_at_zero() {
        let mut anim = AnimatedSprite::default();
        anim.set_textures(frames(4));
        anim.advance(0.1);
        assert_eq!(anim.current_frame_index(), 2);

        let replacement = frames(2);
        anim.set_textures(replacement.clone());
        assert_eq!(anim.current_frame_index(), 0);
        assert_eq!(anim.texture(), Some(replacement[0]));
        assert_eq!(anim.frame_count(), 2);
    }

    #[test]
    fn defaults() {
        let anim = AnimatedSprite::default();
        assert_eq!(anim.fps(), DEFAULT_ANIM_FPS);
        assert_eq!(anim.draw_order(), DEFAULT_DRAW_ORDER);
    }
}
