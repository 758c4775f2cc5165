//! Base moving entity

use glam::{IVec2, Vec2};

use super::rect::Rect;
use crate::assets::Frame;

/// Position, integer velocity and the size of the frame currently shown.
///
/// The bounding box is never stored; it is derived from `pos` and `frame`
/// whenever it is asked for, so it always matches the latest state.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: IVec2,
    /// Active frame size
    pub frame: Frame,
}

impl Entity {
    pub fn new(pos: Vec2, vel: IVec2, frame: Frame) -> Self {
        Self { pos, vel, frame }
    }

    /// Apply velocity to position
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel.as_vec2();
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.frame.width, self.frame.height)
    }

    /// Horizontal bounce: if the entity reaches a side edge while moving
    /// toward it, `vx` is flipped and the entity is pushed back inside.
    pub fn bounce_x(&mut self, field_width: f32) {
        let right_limit = field_width - self.frame.width;
        if self.pos.x <= 0.0 && self.vel.x <= 0 {
            self.vel.x = -self.vel.x;
            self.pos.x = 0.0;
        } else if self.pos.x >= right_limit && self.vel.x >= 0 {
            self.vel.x = -self.vel.x;
            self.pos.x = right_limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(x: f32, vx: i32) -> Entity {
        Entity::new(Vec2::new(x, 0.0), IVec2::new(vx, 1), Frame::new(20.0, 10.0))
    }

    #[test]
    fn test_advance_applies_velocity() {
        let mut e = Entity::new(Vec2::new(5.0, 5.0), IVec2::new(-1, 3), Frame::new(1.0, 1.0));
        e.advance();
        assert_eq!(e.pos, Vec2::new(4.0, 8.0));
        assert_eq!(e.bounds(), Rect::new(4.0, 8.0, 1.0, 1.0));
    }

    #[test]
    fn test_bounce_left_edge() {
        let mut e = entity(-1.0, -1);
        e.bounce_x(100.0);
        assert_eq!(e.vel.x, 1);
        assert_eq!(e.pos.x, 0.0);
    }

    #[test]
    fn test_bounce_right_edge() {
        let mut e = entity(81.0, 1);
        e.bounce_x(100.0);
        assert_eq!(e.vel.x, -1);
        assert_eq!(e.pos.x, 80.0);
    }

    #[test]
    fn test_no_bounce_when_leaving_edge() {
        let mut e = entity(0.0, 1);
        e.bounce_x(100.0);
        assert_eq!(e.vel.x, 1);
    }
}
