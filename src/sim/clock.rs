//! Fixed-rate tick governor and wall-clock spawn timers
//!
//! Timers run on elapsed wall-clock time, not on the tick counter, so a slow
//! frame does not stretch the spawn cadence.

use std::thread;
use std::time::{Duration, Instant};

use crate::settings::TimingSettings;

/// Periodic signals raised by the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    SpawnEnemy,
    PlayerFire,
    /// Every live enemy gets a chance to fire
    EnemyFire,
    SpawnPickup,
}

/// A repeating timer. Fires at most once per poll; missed periods are
/// skipped rather than queued.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub signal: Signal,
    period: Duration,
    next_due: Duration,
}

impl SpawnTimer {
    /// First fire one full period after the clock starts
    pub fn new(signal: Signal, period: Duration) -> Self {
        Self {
            signal,
            period,
            next_due: period,
        }
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due || self.period.is_zero() {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }
}

/// Drives the tick rate and owns the spawn timers
#[derive(Debug, Clone)]
pub struct SimulationClock {
    timers: Vec<SpawnTimer>,
    tick_duration: Duration,
    started: Instant,
    next_tick: Instant,
}

impl SimulationClock {
    pub fn new(timing: &TimingSettings) -> Self {
        let ms = Duration::from_millis;
        let timers = vec![
            SpawnTimer::new(Signal::SpawnEnemy, ms(timing.enemy_spawn_ms)),
            SpawnTimer::new(Signal::PlayerFire, ms(timing.player_fire_ms)),
            SpawnTimer::new(Signal::EnemyFire, ms(timing.enemy_fire_ms)),
            SpawnTimer::new(Signal::SpawnPickup, ms(timing.pickup_spawn_ms)),
        ];
        let tick_duration = timing.tick_duration();
        let started = Instant::now();
        Self {
            timers,
            tick_duration,
            started,
            next_tick: started + tick_duration,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Wall-clock time since the clock started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Signals due at `now` (time since start), in fixed timer order
    pub fn poll(&mut self, now: Duration) -> Vec<Signal> {
        self.timers
            .iter_mut()
            .filter_map(|t| t.poll(now).then_some(t.signal))
            .collect()
    }

    /// Block until the next tick boundary. A governor that has fallen more
    /// than a tick behind resynchronizes instead of bursting.
    pub fn wait_for_tick(&mut self) {
        let now = Instant::now();
        if self.next_tick > now {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.tick_duration;
        } else {
            self.next_tick = now + self.tick_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut timer = SpawnTimer::new(Signal::SpawnEnemy, ms(1000));
        assert!(!timer.poll(ms(999)));
        assert!(timer.poll(ms(1000)));
        assert!(!timer.poll(ms(1500)));
        assert!(timer.poll(ms(2001)));
    }

    #[test]
    fn test_timer_skips_missed_periods() {
        let mut timer = SpawnTimer::new(Signal::PlayerFire, ms(500));
        assert!(timer.poll(ms(2600)));
        assert!(!timer.poll(ms(2900)));
        assert!(timer.poll(ms(3000)));
    }

    #[test]
    fn test_clock_signal_schedule() {
        let mut clock = SimulationClock::new(&TimingSettings::default());
        assert!(clock.poll(ms(100)).is_empty());
        assert_eq!(clock.poll(ms(500)), vec![Signal::PlayerFire, Signal::EnemyFire]);
        assert_eq!(
            clock.poll(ms(1000)),
            vec![Signal::SpawnEnemy, Signal::PlayerFire, Signal::EnemyFire]
        );

        let mut pickups = 0;
        let mut enemies = 0;
        for t in (1100..=60_000).step_by(100) {
            for signal in clock.poll(ms(t)) {
                match signal {
                    Signal::SpawnPickup => pickups += 1,
                    Signal::SpawnEnemy => enemies += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(pickups, 1);
        assert_eq!(enemies, 59);
    }

    #[test]
    fn test_tick_duration_matches_rate() {
        let clock = SimulationClock::new(&TimingSettings::default());
        assert_eq!(clock.tick_duration(), Duration::from_secs(1) / 60);
    }
}
