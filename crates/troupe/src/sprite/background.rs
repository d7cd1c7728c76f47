//! Side-scrolling tiled background.
//!
//! Each texture fills one screen. Tiles sit side by side, tile `i` starting
//! at `i * screen_width`, and all move left (or right) at the scroll speed.
//! A tile that scrolls fully off the left edge jumps back to the end of the
//! strip:
//!
//! ```text
//! offset < -W   ──►   offset = (N - 1) * W - 1
//! ```
//!
//! Offsets are relative to the owner's position, which is the screen center
//! for a full-screen background.

use super::{Sprite, blit};
use crate::asset::{TextureRef, TextureStore};
use crate::math::{DrawRect, Vec2};
use crate::render::Renderer;
use crate::stage::{ActorCore, Component, World};

/// Backgrounds draw behind regular sprites unless told otherwise.
pub const DEFAULT_BACKGROUND_DRAW_ORDER: i32 = 10;

#[derive(Debug, Clone, Copy)]
struct Tile {
    texture: TextureRef,
    offset: Vec2,
}

#[derive(Debug, Clone)]
pub struct ScrollingBackground {
    draw_order: i32,
    tiles: Vec<Tile>,
    screen_size: Vec2,
    /// Horizontal pixels per second. Negative scrolls left.
    scroll_speed: f32,
}

impl ScrollingBackground {
    pub fn new(draw_order: i32) -> Self {
        Self {
            draw_order,
            tiles: Vec::new(),
            screen_size: Vec2::ZERO,
            scroll_speed: 0.0,
        }
    }

    /// Set the tile size. Call before [`set_textures`](Self::set_textures),
    /// which lays the tiles out by it.
    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Replace the tiles, laid out left to right from offset 0.
    pub fn set_textures(&mut self, textures: Vec<TextureRef>) {
        self.tiles = textures
            .into_iter()
            .enumerate()
            .map(|(i, texture)| Tile {
                texture,
                offset: Vec2::new(i as f32 * self.screen_size.x, 0.0),
            })
            .collect();
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
    }

    /// Current tile offsets, left to right in attachment order.
    pub fn offsets(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.tiles.iter().map(|t| t.offset)
    }

    /// Move every tile by `scroll_speed * dt`, recycling the ones that left
    /// the screen.
    pub fn scroll(&mut self, dt: f32) {
        let width = self.screen_size.x;
        let wrap_to = self.tiles.len().saturating_sub(1) as f32 * width - 1.0;
        for tile in &mut self.tiles {
            tile.offset.x += self.scroll_speed * dt;
            if tile.offset.x < -width {
                tile.offset.x = wrap_to;
            }
        }
    }
}

impl Default for ScrollingBackground {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND_DRAW_ORDER)
    }
}

impl Component for ScrollingBackground {
    fn update(&mut self, _owner: &mut ActorCore, _world: &mut World, dt: f32) {
        self.scroll(dt);
    }

    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }
}

impl Sprite for ScrollingBackground {
    fn draw_order(&self) -> i32 {
        self.draw_order
    }

    fn draw(&self, owner: &ActorCore, textures: &TextureStore, renderer: &mut dyn Renderer) {
        for tile in &self.tiles {
            let dest = DrawRect::centered(owner.position() + tile.offset, self.screen_size);
            blit(tile.texture, dest, 0.0, textures, renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::PlaceholderLoader;
    use crate::math::Transform2d;
    use crate::render::HeadlessRenderer;
    use crate::sprite::tests::owner_at;

    fn background(store: &mut TextureStore) -> ScrollingBackground {
        let mut bg = ScrollingBackground::default();
        bg.set_screen_size(Vec2::new(100.0, 50.0));
        bg.set_textures(vec![
            store.get_or_load("bg1.png").unwrap(),
            store.get_or_load("bg2.png").unwrap(),
        ]);
        bg.set_scroll_speed(-100.0);
        bg
    }

    fn xs(bg: &ScrollingBackground) -> Vec<f32> {
        bg.offsets().map(|o| o.x).collect()
    }

    #[test]
    fn tiles_start_side_by_side() {
        let mut store = TextureStore::new(Box::new(PlaceholderLoader::new(4, 4)));
        let bg = background(&mut store);
        assert_eq!(xs(&bg), vec![0.0, 100.0]);
        assert_eq!(bg.draw_order(), DEFAULT_BACKGROUND_DRAW_ORDER);
    }

    #[test]
    fn tile_past_left_edge_wraps_to_end() {
        let mut store = TextureStore::new(Box::new(PlaceholderLoader::new(4, 4)));
        let mut bg = background(&mut store);

        bg.scroll(0.5);
        assert_eq!(xs(&bg), vec![-50.0, 50.0]);
        bg.scroll(0.5);
        // Exactly -W is still on the strip.
        assert_eq!(xs(&bg), vec![-100.0, 0.0]);
        bg.scroll(0.5);
        assert_eq!(xs(&bg), vec![99.0, -50.0]);
    }

    #[test]
    fn draws_every_tile_screen_sized() {
        let mut store = TextureStore::new(Box::new(PlaceholderLoader::new(4, 4)));
        let bg = background(&mut store);
        let owner = owner_at(Transform2d::from_xy(50.0, 25.0));

        let mut renderer = HeadlessRenderer::new();
        bg.draw(&owner, &store, &mut renderer);
        renderer.present();

        let rects: Vec<_> = renderer.last_frame().iter().map(|c| c.dest).collect();
        assert_eq!(
            rects,
            vec![
                DrawRect { x: 0, y: 0, w: 100, h: 50 },
                DrawRect { x: 100, y: 0, w: 100, h: 50 },
            ]
        );
    }
}
