//! Laser bolts fired by the ship.

use troupe::prelude::*;

const SPEED: f32 = 900.0;
const LIFETIME: f32 = 1.5;
/// Draw above the ship.
const DRAW_ORDER: i32 = 120;

#[derive(Debug)]
pub struct Laser {
    remaining: f32,
}

pub fn spawn(world: &mut World, position: Vec2) -> ActorId {
    let id = world.spawn_actor(
        Transform2d::from_xy(position.x, position.y),
        Laser { remaining: LIFETIME },
    );
    let mut sprite = SpriteComponent::new(DRAW_ORDER);
    sprite.set_texture(world.get_texture("laser.png"));
    world.add_component(id, sprite);
    log::debug!("Laser {id} fired from ({:.0}, {:.0})", position.x, position.y);
    id
}

impl ActorBehavior for Laser {
    fn update_actor(&mut self, actor: &mut ActorCore, world: &mut World, dt: f32) {
        actor.transform.position.x += SPEED * dt;
        self.remaining -= dt;
        if self.remaining <= 0.0 || actor.position().x > world.screen_size().x {
            actor.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_screen_and_dies() {
        let mut world = World::new(Box::new(PlaceholderLoader::new(8, 8)));
        world.set_screen_size(Vec2::new(1280.0, 720.0));
        let id = spawn(&mut world, Vec2::new(100.0, 360.0));
        assert_eq!(world.sprite_count(), 1);

        world.update_actors(0.05);
        assert_eq!(world.actor(id).unwrap().core().position().x, 145.0);

        for _ in 0..40 {
            world.update_actors(0.05);
        }
        assert!(!world.contains_actor(id));
        assert_eq!(world.sprite_count(), 0);
    }

    #[test]
    fn expires_even_on_a_wide_screen() {
        let mut world = World::new(Box::new(PlaceholderLoader::new(8, 8)));
        world.set_screen_size(Vec2::new(1.0e6, 720.0));
        let id = spawn(&mut world, Vec2::ZERO);
        for _ in 0..31 {
            world.update_actors(0.05);
        }
        assert!(!world.contains_actor(id));
    }
}
