//! Fixed timestep simulation tick
//!
//! Order within a tick: input, motion and animation for every group,
//! collision resolution, then timer-driven spawns. Anything spawned here is
//! first moved and first collided on the next tick.

use std::time::Duration;

use glam::IVec2;

use super::clock::Signal;
use super::collision::{self, CollisionReport};
use super::world::{AdvanceReport, GamePhase, SimulationWorld};

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Quit requested
    pub quit: bool,
    /// Self-destruct key pressed this tick (edge, not level)
    pub self_destruct: bool,
    /// Movement direction, each component in {-1, 0, 1}
    pub direction: IVec2,
}

/// Everything a tick did, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub phase: GamePhase,
    pub advance: AdvanceReport,
    pub collisions: CollisionReport,
    pub enemies_spawned: usize,
    pub pickups_spawned: usize,
    pub player_shots: usize,
    pub enemy_shots: usize,
}

impl TickReport {
    fn idle(phase: GamePhase) -> Self {
        Self {
            phase,
            advance: AdvanceReport::default(),
            collisions: CollisionReport::default(),
            enemies_spawned: 0,
            pickups_spawned: 0,
            player_shots: 0,
            enemy_shots: 0,
        }
    }
}

/// Advance the world by one tick. `now` is the clock time used for
/// per-enemy fire cooldowns.
pub fn tick(
    world: &mut SimulationWorld,
    input: &TickInput,
    signals: &[Signal],
    now: Duration,
) -> TickReport {
    if input.quit && !world.phase.is_finished() {
        log::info!("Quit requested at tick {}", world.time_ticks);
        world.phase = GamePhase::Quit;
    }
    if world.phase.is_finished() {
        return TickReport::idle(world.phase);
    }

    world.time_ticks += 1;
    let mut report = TickReport::idle(world.phase);

    // Input
    let speed = world.settings.rules.move_speed;
    if let Some(player) = world.player.as_mut() {
        player.steer(input.direction, speed);
    }
    if input.self_destruct {
        world.self_destruct();
    }

    // Motion and animation
    report.advance = world.advance_groups();

    // Collisions
    report.collisions = collision::resolve(world);

    // Timer-driven spawns
    for signal in signals {
        match signal {
            Signal::SpawnEnemy => {
                world.spawn_enemy();
                report.enemies_spawned += 1;
            }
            Signal::PlayerFire => {
                report.player_shots += world.player_fire();
            }
            Signal::EnemyFire => {
                report.enemy_shots += world.enemy_fire_sweep(now.as_secs_f64());
            }
            Signal::SpawnPickup => {
                world.spawn_pickup();
                report.pickups_spawned += 1;
            }
        }
    }

    if report.advance.player_released {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with score {}",
            world.time_ticks,
            world.score
        );
    }

    report.phase = world.phase;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use crate::settings::Settings;
    use crate::sim::craft::EnemyCraft;
    use crate::sim::lifecycle::Lifecycle;
    use glam::Vec2;

    fn world() -> SimulationWorld {
        SimulationWorld::new(Settings::default(), &SpriteCatalog::default()).unwrap()
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_direction_moves_player() {
        let mut w = world();
        let start = w.player.as_ref().unwrap().body().entity.pos;
        let input = TickInput {
            direction: IVec2::new(1, -1),
            ..Default::default()
        };
        tick(&mut w, &input, &[], secs(0.0));
        let pos = w.player.as_ref().unwrap().body().entity.pos;
        assert_eq!(pos, start + Vec2::new(2.0, -2.0));
        assert_eq!(w.time_ticks, 1);
    }

    #[test]
    fn test_spawned_enemy_not_advanced_in_spawn_tick() {
        let mut w = world();
        let report = tick(&mut w, &TickInput::default(), &[Signal::SpawnEnemy], secs(1.0));
        assert_eq!(report.enemies_spawned, 1);
        let enemy = &w.enemies[0];
        assert_eq!(enemy.bounds().bottom(), 0.0);

        let vy = enemy.body().entity.vel.y as f32;
        tick(&mut w, &TickInput::default(), &[], secs(1.1));
        assert_eq!(w.enemies[0].bounds().bottom(), vy);
    }

    #[test]
    fn test_player_fire_signal_adds_fan() {
        let mut w = world();
        let report = tick(&mut w, &TickInput::default(), &[Signal::PlayerFire], secs(0.5));
        assert_eq!(report.player_shots, 3);
        assert_eq!(w.player_bullets.len(), 3);
    }

    #[test]
    fn test_enemy_fire_sweep_uses_clock_time() {
        let mut w = world();
        let enemy = EnemyCraft::new(Vec2::new(10.0, 100.0), IVec2::new(0, 1), &w.settings, w.sprites());
        w.enemies.push(enemy);

        let fire = [Signal::EnemyFire];
        assert_eq!(tick(&mut w, &TickInput::default(), &fire, secs(1.0)).enemy_shots, 1);
        assert_eq!(tick(&mut w, &TickInput::default(), &fire, secs(3.0)).enemy_shots, 0);
        assert_eq!(tick(&mut w, &TickInput::default(), &fire, secs(6.0)).enemy_shots, 1);
    }

    #[test]
    fn test_self_destruct_runs_to_game_over() {
        let mut w = world();
        w.spawn_enemy();
        let input = TickInput {
            self_destruct: true,
            ..Default::default()
        };
        let report = tick(&mut w, &input, &[], secs(0.0));
        assert_eq!(report.phase, GamePhase::PlayerDown);
        assert!(w.player.is_none());
        assert!(w.enemies.is_empty());

        let mut ticks = 1;
        while w.phase != GamePhase::GameOver {
            tick(&mut w, &TickInput::default(), &[], secs(0.0));
            ticks += 1;
            assert!(ticks < 200, "player wreck never released");
        }
        assert!(w.destroying.is_empty());

        // Finished sessions no longer advance
        let frozen = w.time_ticks;
        tick(&mut w, &TickInput::default(), &[Signal::SpawnEnemy], secs(0.0));
        assert_eq!(w.time_ticks, frozen);
        assert!(w.enemies.is_empty());
    }

    #[test]
    fn test_quit_stops_session() {
        let mut w = world();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        let report = tick(&mut w, &input, &[Signal::SpawnEnemy], secs(0.0));
        assert_eq!(report.phase, GamePhase::Quit);
        assert!(w.enemies.is_empty());
        assert_eq!(w.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut a = world();
        let mut b = world();
        let schedule: [&[Signal]; 4] = [
            &[Signal::SpawnEnemy],
            &[Signal::PlayerFire, Signal::EnemyFire],
            &[Signal::SpawnPickup],
            &[],
        ];
        for i in 0..240u64 {
            let input = TickInput {
                direction: IVec2::new((i % 3) as i32 - 1, 0),
                ..Default::default()
            };
            let signals = schedule[(i % 4) as usize];
            let now = secs(i as f64 / 60.0);
            let ra = tick(&mut a, &input, signals, now);
            let rb = tick(&mut b, &input, signals, now);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.score, b.score);
        assert_eq!(a.player_lives(), b.player_lives());
    }
}
