//! The player ship.

use troupe::prelude::*;

use crate::laser;

const HORIZONTAL_SPEED: f32 = 250.0;
const VERTICAL_SPEED: f32 = 300.0;
/// Half the rocket artwork's extent at scale 1, used to keep it on screen.
const HALF_EXTENT: Vec2 = Vec2::new(262.0, 150.0);
const SHIP_SCALE: f32 = 0.5;
const FIRE_COOLDOWN: f32 = 0.25;

#[derive(Debug, Default)]
pub struct Ship {
    velocity: Vec2,
    fire_requested: bool,
    cooldown: f32,
}

/// Spawn the ship with its three-frame exhaust animation.
pub fn spawn(world: &mut World, position: Vec2) -> ActorId {
    let transform = Transform2d::from_xy(position.x, position.y).with_scale(SHIP_SCALE);
    let id = world.spawn_actor(transform, Ship::default());

    let mut anim = AnimatedSprite::default();
    anim.set_textures(crate::textures(
        world,
        &["rocket1.png", "rocket2.png", "rocket3.png"],
    ));
    world.add_component(id, anim);
    id
}

/// Pull `value` back inside `[min, max]`, preferring `min` if they cross.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

impl ActorBehavior for Ship {
    fn process_input(&mut self, _actor: &mut ActorCore, _world: &mut World, input: &InputState) {
        self.velocity = Vec2::ZERO;
        if input.pressed(KeyCode::KeyD) {
            self.velocity.x += HORIZONTAL_SPEED;
        }
        if input.pressed(KeyCode::KeyA) {
            self.velocity.x -= HORIZONTAL_SPEED;
        }
        if input.pressed(KeyCode::KeyS) {
            self.velocity.y += VERTICAL_SPEED;
        }
        if input.pressed(KeyCode::KeyW) {
            self.velocity.y -= VERTICAL_SPEED;
        }
        if input.just_pressed(KeyCode::Space) {
            self.fire_requested = true;
        }
    }

    fn update_actor(&mut self, actor: &mut ActorCore, world: &mut World, dt: f32) {
        let margin = HALF_EXTENT * actor.scale();
        let screen = world.screen_size();
        let pos = actor.position() + self.velocity * dt;
        let pos = Vec2::new(
            clamp_axis(pos.x, margin.x, screen.x - margin.x),
            clamp_axis(pos.y, margin.y, screen.y - margin.y),
        );
        actor.set_position(pos);

        self.cooldown = (self.cooldown - dt).max(0.0);
        if std::mem::take(&mut self.fire_requested) && self.cooldown == 0.0 {
            laser::spawn(world, pos + Vec2::new(margin.x, 0.0));
            self.cooldown = FIRE_COOLDOWN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let mut world = World::new(Box::new(PlaceholderLoader::new(32, 32)));
        world.set_screen_size(Vec2::new(1280.0, 720.0));
        world
    }

    fn input(events: &[InputEvent]) -> InputState {
        let mut input = InputState::new();
        input.apply(events);
        input
    }

    #[test]
    fn stays_on_screen() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::ZERO);
        world.update_actors(0.016);
        let pos = world.actor(id).unwrap().core().position();
        assert_eq!(pos, Vec2::new(131.0, 75.0));

        world.actor_mut(id).unwrap().core_mut().set_position(Vec2::new(5000.0, 5000.0));
        world.update_actors(0.016);
        let pos = world.actor(id).unwrap().core().position();
        assert_eq!(pos, Vec2::new(1280.0 - 131.0, 720.0 - 75.0));
    }

    #[test]
    fn wasd_moves() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::new(640.0, 360.0));
        world.process_input(&input(&[
            InputEvent::KeyDown(KeyCode::KeyD),
            InputEvent::KeyDown(KeyCode::KeyW),
        ]));
        world.update_actors(0.5);
        let pos = world.actor(id).unwrap().core().position();
        assert_eq!(pos, Vec2::new(765.0, 210.0));
    }

    #[test]
    fn space_fires_one_laser() {
        let mut world = world();
        spawn(&mut world, Vec2::new(640.0, 360.0));
        world.process_input(&input(&[InputEvent::KeyDown(KeyCode::Space)]));
        world.update_actors(0.016);
        assert_eq!(world.actor_count(), 2);
        assert_eq!(world.live_actors().len(), 2);

        // Holding the key does not fire again.
        world.process_input(&input(&[]));
        world.update_actors(0.016);
        assert_eq!(world.actor_count(), 2);
    }

    #[test]
    fn animation_has_three_frames() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::ZERO);
        let cid = world.actor(id).unwrap().component_ids().next().unwrap();
        let anim = world.component::<AnimatedSprite>(id, cid).unwrap();
        assert_eq!(anim.frame_count(), 3);
    }
}
