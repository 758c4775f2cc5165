//! Simulation world: every entity group, owned in one place
//!
//! Groups are disjoint. A craft leaves its gameplay group the moment it
//! starts its destruction sequence and lives in `destroying` until released.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::Background;
use super::craft::{EnemyCraft, PlayerCraft, Wreck};
use super::lifecycle::Lifecycle;
use super::pickup::Pickup;
use super::projectile::Projectile;
use crate::assets::{AssetSource, SpriteSet, names};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player craft in play
    Playing,
    /// Player craft destroyed, its destruction sequence still running
    PlayerDown,
    /// Player wreck released; the session is over
    GameOver,
    /// Quit requested by the input collaborator
    Quit,
}

impl GamePhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Quit)
    }
}

/// What happened while advancing all groups for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub escaped_enemies: usize,
    pub culled_projectiles: usize,
    pub exited_pickups: usize,
    pub released_wrecks: usize,
    pub player_released: bool,
}

/// Owns every group and the session-wide counters
#[derive(Debug, Clone)]
pub struct SimulationWorld {
    pub settings: Settings,
    sprites: SpriteSet,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub background: Background,
    /// PlayerGroup: holds the craft only while it is alive
    pub player: Option<PlayerCraft>,
    pub enemies: Vec<EnemyCraft>,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// DestroyingGroup: drawn and advanced, never collided
    pub destroying: Vec<Wreck>,
}

impl SimulationWorld {
    /// Validate settings, resolve every sprite sequence and place the player
    pub fn new(settings: Settings, assets: &impl AssetSource) -> Result<Self, ConfigError> {
        settings.validate()?;
        let sprites = SpriteSet::resolve(assets)?;

        let field_width = settings.field.width;
        for (name, animation) in [
            (names::PLAYER_ALIVE, &sprites.player_alive),
            (names::ENEMY_ALIVE, &sprites.enemy_alive),
            (names::PICKUP, &sprites.pickup),
        ] {
            let sprite_width = animation.frame(0).width;
            if sprite_width > field_width {
                return Err(ConfigError::SpawnBounds {
                    name: name.to_string(),
                    field_width,
                    sprite_width,
                });
            }
        }

        let player = PlayerCraft::new(&settings, &sprites);
        let background = Background::new(sprites.background.clone());
        log::info!(
            "World ready: field {}x{}, seed {}",
            settings.field.width,
            settings.field.height,
            settings.seed
        );

        Ok(Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            sprites,
            phase: GamePhase::Playing,
            time_ticks: 0,
            score: 0,
            background,
            player: Some(player),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            pickups: Vec::new(),
            destroying: Vec::new(),
        })
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    /// Life total for the HUD; 0 once the player craft is destroyed
    pub fn player_lives(&self) -> i32 {
        self.player.as_ref().map_or(0, |p| p.lives())
    }

    pub fn spawn_enemy(&mut self) {
        let enemy = EnemyCraft::spawn(&mut self.rng, &self.settings, &self.sprites);
        log::debug!("Enemy spawned at x={}", enemy.bounds().left());
        self.enemies.push(enemy);
    }

    pub fn spawn_pickup(&mut self) {
        let pickup = Pickup::spawn(&mut self.rng, self.settings.field.width, self.sprites.pickup.clone());
        log::debug!("Pickup spawned at x={}", pickup.bounds().left());
        self.pickups.push(pickup);
    }

    /// Player fan; returns the number of projectiles added
    pub fn player_fire(&mut self) -> usize {
        let Some(player) = &self.player else {
            return 0;
        };
        let shots = player.fire();
        let count = shots.len();
        self.player_bullets.extend(shots);
        count
    }

    /// Offer every live enemy a shot; each decides by its own cooldown
    pub fn enemy_fire_sweep(&mut self, now: f64) -> usize {
        let before = self.enemy_bullets.len();
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy.fire(now) {
                self.enemy_bullets.push(shot);
            }
        }
        self.enemy_bullets.len() - before
    }

    /// Kill the player craft and every enemy craft at once
    pub fn self_destruct(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.kill();
            log::info!("Self-destruct triggered, taking {} enemies along", self.enemies.len());
        }
        for enemy in &mut self.enemies {
            enemy.kill();
        }
        self.retire_dead_enemies();
        self.retire_player_if_dead();
    }

    /// Move enemies that are no longer alive into the destroying group,
    /// preserving relative order. Returns how many moved.
    pub fn retire_dead_enemies(&mut self) -> usize {
        let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.enemies)
            .into_iter()
            .partition(|e| e.is_alive());
        self.enemies = alive;
        let count = dead.len();
        self.destroying.extend(dead.into_iter().map(Wreck::Enemy));
        count
    }

    /// Move the player into the destroying group if it is no longer alive
    pub fn retire_player_if_dead(&mut self) -> bool {
        if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
            if let Some(player) = self.player.take() {
                self.destroying.push(Wreck::Player(player));
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::PlayerDown;
                }
                log::info!("Player craft destroyed at tick {}", self.time_ticks);
                return true;
            }
        }
        false
    }

    /// Motion and animation for every group, then cull whatever left the
    /// field or finished its destruction sequence
    pub fn advance_groups(&mut self) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let field = self.settings.field;

        self.background.advance(field.height);

        if let Some(player) = self.player.as_mut() {
            player.advance();
        }

        for enemy in &mut self.enemies {
            enemy.advance();
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.has_escaped());
        report.escaped_enemies = before - self.enemies.len();

        for bullets in [&mut self.player_bullets, &mut self.enemy_bullets] {
            for bullet in bullets.iter_mut() {
                bullet.advance();
            }
            let before = bullets.len();
            bullets.retain(|b| !b.is_off_field(field.height));
            report.culled_projectiles += before - bullets.len();
        }

        for pickup in &mut self.pickups {
            pickup.advance(field.width);
        }
        let before = self.pickups.len();
        self.pickups.retain(|p| !p.has_exited(field.height));
        report.exited_pickups = before - self.pickups.len();

        for wreck in &mut self.destroying {
            wreck.advance();
        }
        let before = self.destroying.len();
        self.destroying.retain(|w| {
            if w.is_released() {
                report.player_released |= w.is_player();
                false
            } else {
                true
            }
        });
        report.released_wrecks = before - self.destroying.len();

        report
    }
}
