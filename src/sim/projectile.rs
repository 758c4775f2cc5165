//! Projectiles fired by either side

use std::rc::Rc;

use glam::{IVec2, Vec2};

use super::entity::Entity;
use super::rect::Rect;
use crate::assets::Animation;

/// Which side fired a projectile; decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// A short-lived straight-line projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub side: Side,
    pub entity: Entity,
    sprite: Rc<Animation>,
}

impl Projectile {
    pub fn new(side: Side, pos: Vec2, vel: IVec2, sprite: Rc<Animation>) -> Self {
        let entity = Entity::new(pos, vel, sprite.frame(0));
        Self {
            side,
            entity,
            sprite,
        }
    }

    /// Projectile whose bottom edge sits at `bottom`, horizontally centered on `center_x`
    pub fn above(side: Side, center_x: f32, bottom: f32, vel: IVec2, sprite: Rc<Animation>) -> Self {
        let frame = sprite.frame(0);
        let pos = Vec2::new(center_x - frame.width / 2.0, bottom - frame.height);
        Self::new(side, pos, vel, sprite)
    }

    /// Projectile whose top edge sits at `top`, horizontally centered on `center_x`
    pub fn below(side: Side, center_x: f32, top: f32, vel: IVec2, sprite: Rc<Animation>) -> Self {
        let frame = sprite.frame(0);
        let pos = Vec2::new(center_x - frame.width / 2.0, top);
        Self::new(side, pos, vel, sprite)
    }

    pub fn advance(&mut self) {
        self.entity.advance();
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }

    pub fn sprite(&self) -> &Animation {
        &self.sprite
    }

    /// True once the projectile has left the visible vertical range at either edge
    pub fn is_off_field(&self, field_height: f32) -> bool {
        let bounds = self.bounds();
        bounds.bottom() < 0.0 || bounds.top() > field_height
    }
}
