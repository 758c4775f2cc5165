//! Bonus pickups drifting down the field

use std::rc::Rc;

use glam::{IVec2, Vec2};
use rand::Rng;

use super::entity::Entity;
use super::rect::Rect;
use crate::assets::Animation;

/// A collectible that grants one life
#[derive(Debug, Clone)]
pub struct Pickup {
    pub entity: Entity,
    sprite: Rc<Animation>,
}

impl Pickup {
    pub fn new(pos: Vec2, vel: IVec2, sprite: Rc<Animation>) -> Self {
        let entity = Entity::new(pos, vel, sprite.frame(0));
        Self { entity, sprite }
    }

    /// Random column just above the field, random drift
    pub fn spawn(rng: &mut impl Rng, field_width: f32, sprite: Rc<Animation>) -> Self {
        let frame = sprite.frame(0);
        let max_left = (field_width - frame.width).max(0.0) as i32;
        let pos = Vec2::new(rng.random_range(0..=max_left) as f32, -frame.height);
        let vel = IVec2::new(rng.random_range(-1..=1), rng.random_range(1..=3));
        Self::new(pos, vel, sprite)
    }

    pub fn advance(&mut self, field_width: f32) {
        self.entity.advance();
        self.entity.bounce_x(field_width);
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }

    pub fn sprite(&self) -> &Animation {
        &self.sprite
    }

    /// Top edge has passed the bottom of the field
    pub fn has_exited(&self, field_height: f32) -> bool {
        self.bounds().top() >= field_height
    }
}
