//! Input collaborators
//!
//! Raw device polling lives outside the crate; anything that can produce a
//! `TickInput` once per tick plugs in here. `Autopilot` is the demo-mode
//! player used by the headless binary.

use std::cmp::Ordering;

use glam::IVec2;

use crate::sim::{Lifecycle, Rect, SimulationWorld, TickInput};

/// Supplies input once per tick
pub trait InputSource {
    fn sample(&mut self, world: &SimulationWorld) -> TickInput;
}

/// How far above the player a threat is still worth dodging
const DODGE_RANGE: f32 = 140.0;
/// Horizontal slack when deciding whether a threat is on our column
const DODGE_MARGIN: f32 = 12.0;
/// Ignore target offsets smaller than this to avoid jitter
const DEADZONE: f32 = 4.0;

/// Demo-mode AI: dodges incoming fire, otherwise lines up under the
/// lowest enemy and holds the lower part of the field.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Request quit once the world reaches this tick
    pub quit_after: Option<u64>,
}

impl Autopilot {
    pub fn new(quit_after: Option<u64>) -> Self {
        Self { quit_after }
    }

    fn steer(&self, world: &SimulationWorld, me: Rect) -> IVec2 {
        let field = world.settings.field;

        let in_lane = |r: &Rect| {
            r.right() > me.left() - DODGE_MARGIN
                && r.left() < me.right() + DODGE_MARGIN
                && r.bottom() <= me.bottom()
                && me.top() - r.bottom() < DODGE_RANGE
        };
        let threat = world
            .enemy_bullets
            .iter()
            .map(|b| b.bounds())
            .chain(world.enemies.iter().map(|e| e.bounds()))
            .filter(in_lane)
            .max_by(|a, b| a.bottom().partial_cmp(&b.bottom()).unwrap_or(Ordering::Equal));

        let dx = if let Some(threat) = threat {
            // Sidestep toward the roomier side when pinned against a wall
            let away = if threat.center_x() < me.center_x() { 1 } else { -1 };
            let blocked = (away < 0 && me.left() <= 0.0) || (away > 0 && me.right() >= field.width);
            if blocked { -away } else { away }
        } else {
            let target = world
                .enemies
                .iter()
                .map(|e| e.bounds())
                .max_by(|a, b| a.bottom().partial_cmp(&b.bottom()).unwrap_or(Ordering::Equal));
            match target {
                Some(t) if t.center_x() > me.center_x() + DEADZONE => 1,
                Some(t) if t.center_x() < me.center_x() - DEADZONE => -1,
                _ => 0,
            }
        };

        let dy = if me.top() < field.height * 0.6 {
            1
        } else if me.bottom() > field.height - 10.0 {
            -1
        } else {
            0
        };

        IVec2::new(dx, dy)
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, world: &SimulationWorld) -> TickInput {
        let quit = self.quit_after.is_some_and(|n| world.time_ticks >= n);
        let direction = match &world.player {
            Some(player) => self.steer(world, player.bounds()),
            None => IVec2::ZERO,
        };
        TickInput {
            quit,
            self_destruct: false,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use crate::settings::Settings;
    use crate::sim::{EnemyCraft, Projectile, Side};
    use glam::Vec2;

    fn world() -> SimulationWorld {
        SimulationWorld::new(Settings::default(), &SpriteCatalog::default()).unwrap()
    }

    #[test]
    fn test_tracks_lowest_enemy() {
        let mut w = world();
        let enemy = EnemyCraft::new(Vec2::new(10.0, 50.0), IVec2::ZERO, &w.settings, w.sprites());
        w.enemies.push(enemy);
        let input = Autopilot::default().sample(&w);
        assert_eq!(input.direction.x, -1);
        assert!(!input.quit);
    }

    #[test]
    fn test_dodges_incoming_bullet() {
        let mut w = world();
        let me = w.player.as_ref().unwrap().bounds();
        let sprite = w.sprites().enemy_bullet.clone();
        // Slightly left of center, just above the craft
        let bullet = Projectile::new(
            Side::Enemy,
            Vec2::new(me.center_x() - 10.0, me.top() - 40.0),
            IVec2::new(0, 3),
            sprite,
        );
        w.enemy_bullets.push(bullet);
        let input = Autopilot::default().sample(&w);
        assert_eq!(input.direction.x, 1);
    }

    #[test]
    fn test_quit_after_limit() {
        let mut w = world();
        w.time_ticks = 100;
        let mut pilot = Autopilot::new(Some(100));
        assert!(pilot.sample(&w).quit);
    }

    #[test]
    fn test_idle_without_player() {
        let mut w = world();
        w.self_destruct();
        assert_eq!(Autopilot::default().sample(&w).direction, IVec2::ZERO);
    }
}
