//! Hit points and the Alive/Destroying animation state machine
//!
//! A craft that loses its last hit point does not vanish: it switches to its
//! destruction sequence, keeps moving, and only becomes removable once that
//! sequence has played out.

use std::rc::Rc;

use glam::{IVec2, Vec2};

use super::entity::Entity;
use super::rect::Rect;
use crate::assets::Animation;

/// Lifecycle phase of an animated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    /// Looping the alive sequence, takes damage
    Alive,
    /// Playing the destruction sequence once; terminal
    Destroying,
}

/// An entity with hit points and two frame sequences
#[derive(Debug, Clone)]
pub struct AnimatedBody {
    pub entity: Entity,
    hit_points: i32,
    state: LifeState,
    /// Real-valued frame accumulator
    frame_index: f32,
    /// Truncated index of the frame currently shown
    shown_frame: usize,
    step: f32,
    ready_to_remove: bool,
    frames_alive: Rc<Animation>,
    frames_destroy: Rc<Animation>,
}

impl AnimatedBody {
    /// Create a body at `pos`. A non-positive `hit_points` starts the body
    /// directly in its destruction sequence.
    pub fn new(
        pos: Vec2,
        vel: IVec2,
        hit_points: i32,
        frames_alive: Rc<Animation>,
        frames_destroy: Rc<Animation>,
        step: f32,
    ) -> Self {
        let entity = Entity::new(pos, vel, frames_alive.frame(0));
        let mut body = Self {
            entity,
            hit_points,
            state: LifeState::Alive,
            frame_index: 0.0,
            shown_frame: 0,
            step,
            ready_to_remove: false,
            frames_alive,
            frames_destroy,
        };
        if hit_points <= 0 {
            body.begin_destruction();
        }
        body
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    /// Remaining hit points; always 0 once destroying
    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    pub fn is_destruction_complete(&self) -> bool {
        self.ready_to_remove
    }

    pub fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// Index of the frame the renderer should show
    pub fn shown_frame(&self) -> usize {
        self.shown_frame
    }

    /// Sequence currently playing
    pub fn active_animation(&self) -> &Animation {
        match self.state {
            LifeState::Alive => &self.frames_alive,
            LifeState::Destroying => &self.frames_destroy,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }

    pub fn apply_damage(&mut self, amount: u32) {
        if self.state != LifeState::Alive {
            return;
        }
        self.hit_points = self.hit_points.saturating_sub_unsigned(amount);
        if self.hit_points <= 0 {
            self.begin_destruction();
        }
    }

    /// No upper cap; callers own any cap policy
    pub fn heal(&mut self, amount: u32) {
        if self.state == LifeState::Alive {
            self.hit_points = self.hit_points.saturating_add_unsigned(amount);
        }
    }

    pub fn kill(&mut self) {
        if self.state == LifeState::Alive {
            let remaining = self.hit_points.max(0) as u32;
            self.apply_damage(remaining);
        }
    }

    /// Motion first, then animation
    pub fn advance(&mut self) {
        self.entity.advance();
        self.animate();
    }

    /// Step the frame accumulator: loop while alive, play once and clamp
    /// while destroying.
    pub fn animate(&mut self) {
        let previous = self.frame_index as usize;
        self.frame_index += self.step;

        let count = self.active_animation().frame_count();
        match self.state {
            LifeState::Alive => {
                self.frame_index %= count as f32;
            }
            LifeState::Destroying => {
                let last = (count - 1) as f32;
                if self.frame_index > last {
                    self.frame_index = last;
                    self.ready_to_remove = true;
                }
            }
        }

        let current = self.frame_index as usize;
        if current != previous {
            self.show_frame(current);
        }
    }

    fn begin_destruction(&mut self) {
        self.hit_points = 0;
        self.state = LifeState::Destroying;
        self.frame_index = 0.0;
        self.show_frame(0);
    }

    fn show_frame(&mut self, index: usize) {
        self.shown_frame = index;
        self.entity.frame = self.active_animation().frame(index);
    }
}

/// Capability shared by every animated craft
pub trait Lifecycle {
    fn body(&self) -> &AnimatedBody;
    fn body_mut(&mut self) -> &mut AnimatedBody;

    /// Per-tick motion and animation update
    fn advance(&mut self);

    fn apply_damage(&mut self, amount: u32) {
        self.body_mut().apply_damage(amount);
    }

    fn kill(&mut self) {
        self.body_mut().kill();
    }

    fn is_alive(&self) -> bool {
        self.body().is_alive()
    }

    fn is_destruction_complete(&self) -> bool {
        self.body().is_destruction_complete()
    }

    fn hit_points(&self) -> i32 {
        self.body().hit_points()
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }
}
