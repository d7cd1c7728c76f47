//! # Sprites — Components That Draw
//!
//! A sprite is a [`Component`] that also implements [`Sprite`] and exposes
//! it through [`Component::as_sprite`]. When attached, the
//! [`World`](crate::stage::World) registers it in its draw-ordered list;
//! each frame the world calls [`Sprite::draw`] from back (low draw order) to
//! front (high draw order).
//!
//! | Type                    | Default draw order | Draws                         |
//! |-------------------------|--------------------|-------------------------------|
//! | [`SpriteComponent`]     | 100                | one texture at the owner      |
//! | [`AnimatedSprite`]      | 100                | the current animation frame   |
//! | [`ScrollingBackground`] | 10                 | screen-sized tiles, scrolling |
//!
//! Draw order is read once, when the component is attached.

pub mod animated;
pub mod background;

pub use animated::AnimatedSprite;
pub use background::ScrollingBackground;

use crate::asset::{TextureRef, TextureStore};
use crate::math::{DrawRect, Vec2};
use crate::render::Renderer;
use crate::stage::{ActorCore, Component};

/// Draw order used when a sprite does not specify one.
pub const DEFAULT_DRAW_ORDER: i32 = 100;

/// The draw capability of a component.
pub trait Sprite {
    /// Back-to-front position. Lower draws first.
    fn draw_order(&self) -> i32;

    /// Issue draw calls for this sprite, placed relative to its owner.
    fn draw(&self, owner: &ActorCore, textures: &TextureStore, renderer: &mut dyn Renderer);
}

/// Blit one texture, skipping handles the store no longer resolves.
pub(crate) fn blit(
    texture: TextureRef,
    dest: DrawRect,
    rotation: f32,
    textures: &TextureStore,
    renderer: &mut dyn Renderer,
) {
    match textures.get(texture.handle) {
        Some(data) => renderer.draw_texture(texture.handle, data, dest, rotation),
        None => log::trace!("Skipping draw of released texture {:?}", texture.handle),
    }
}

/// A single texture drawn centered on its owner, scaled and rotated with it.
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    draw_order: i32,
    texture: Option<TextureRef>,
}

impl SpriteComponent {
    pub fn new(draw_order: i32) -> Self {
        Self {
            draw_order,
            texture: None,
        }
    }

    /// Set or clear the texture. Width and height follow the texture.
    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.texture = texture;
    }

    pub fn texture(&self) -> Option<TextureRef> {
        self.texture
    }

    /// Texture width in pixels, 0 without a texture.
    pub fn tex_width(&self) -> u32 {
        self.texture.map_or(0, |t| t.width)
    }

    /// Texture height in pixels, 0 without a texture.
    pub fn tex_height(&self) -> u32 {
        self.texture.map_or(0, |t| t.height)
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl Component for SpriteComponent {
    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }
}

impl Sprite for SpriteComponent {
    fn draw_order(&self) -> i32 {
        self.draw_order
    }

    fn draw(&self, owner: &ActorCore, textures: &TextureStore, renderer: &mut dyn Renderer) {
        let Some(texture) = self.texture else {
            return;
        };
        let size = Vec2::new(texture.width as f32, texture.height as f32) * owner.scale();
        let dest = DrawRect::centered(owner.position(), size);
        blit(texture, dest, owner.rotation(), textures, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::PlaceholderLoader;
    use crate::math::Transform2d;
    use crate::render::HeadlessRenderer;
    use crate::stage::ActorId;

    pub(crate) fn owner_at(transform: Transform2d) -> ActorCore {
        ActorCore::new(
            ActorId {
                index: 0,
                generation: 0,
            },
            transform,
        )
    }

    #[test]
    fn draws_centered_and_scaled() {
        let mut store = TextureStore::new(Box::new(PlaceholderLoader::new(64, 32)));
        let mut sprite = SpriteComponent::default();
        sprite.set_texture(store.get_or_load("ship.png"));
        assert_eq!((sprite.tex_width(), sprite.tex_height()), (64, 32));

        let owner = owner_at(Transform2d::from_xy(100.0, 100.0).with_scale(0.5).with_rotation(1.5));
        let mut renderer = HeadlessRenderer::new();
        renderer.clear();
        sprite.draw(&owner, &store, &mut renderer);
        renderer.present();

        let cmd = &renderer.last_frame()[0];
        assert_eq!(cmd.dest, DrawRect { x: 84, y: 92, w: 32, h: 16 });
        assert_eq!(cmd.rotation, 1.5);
    }

    #[test]
    fn no_texture_draws_nothing() {
        let store = TextureStore::new(Box::new(PlaceholderLoader::new(8, 8)));
        let sprite = SpriteComponent::new(3);
        let mut renderer = HeadlessRenderer::new();
        sprite.draw(&owner_at(Transform2d::IDENTITY), &store, &mut renderer);
        renderer.present();
        assert!(renderer.last_frame().is_empty());
        assert_eq!(sprite.draw_order(), 3);
        assert_eq!(sprite.tex_width(), 0);
    }

    #[test]
    fn released_texture_is_skipped() {
        let mut store = TextureStore::new(Box::new(PlaceholderLoader::new(8, 8)));
        let mut sprite = SpriteComponent::default();
        sprite.set_texture(store.get_or_load("a.png"));
        store.clear();

        let mut renderer = HeadlessRenderer::new();
        sprite.draw(&owner_at(Transform2d::IDENTITY), &store, &mut renderer);
        renderer.present();
        assert!(renderer.last_frame().is_empty());
    }

    #[test]
    fn exposes_sprite_capability() {
        let sprite = SpriteComponent::new(42);
        let component: &dyn Component = &sprite;
        assert_eq!(component.as_sprite().map(|s| s.draw_order()), Some(42));
    }
}
