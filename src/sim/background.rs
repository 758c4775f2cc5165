//! Endless vertical scrolling backdrop

use std::rc::Rc;

use glam::{IVec2, Vec2};

use super::entity::Entity;
use crate::assets::Animation;
use crate::consts::BACKGROUND_SPEED;

/// Two stacked copies of the backdrop; whichever scrolls past the bottom
/// edge is moved back above the top.
#[derive(Debug, Clone)]
pub struct Background {
    pub layers: [Entity; 2],
    sprite: Rc<Animation>,
}

impl Background {
    pub fn new(sprite: Rc<Animation>) -> Self {
        let frame = sprite.frame(0);
        let vel = IVec2::new(0, BACKGROUND_SPEED);
        let layers = [
            Entity::new(Vec2::ZERO, vel, frame),
            Entity::new(Vec2::new(0.0, -frame.height), vel, frame),
        ];
        Self { layers, sprite }
    }

    pub fn advance(&mut self, field_height: f32) {
        for layer in &mut self.layers {
            layer.advance();
            if layer.pos.y >= field_height {
                layer.pos.y = -layer.frame.height;
            }
        }
    }

    pub fn sprite(&self) -> &Animation {
        &self.sprite
    }
}
