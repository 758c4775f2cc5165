//! Player and enemy craft
//!
//! Both wrap an `AnimatedBody` and differ only in how they move and fire.
//! `Wreck` holds either kind once it has left gameplay and is only playing
//! out its destruction sequence.

use std::rc::Rc;

use glam::{IVec2, Vec2};
use rand::Rng;

use super::lifecycle::{AnimatedBody, Lifecycle};
use super::projectile::{Projectile, Side};
use crate::assets::{Animation, SpriteSet};
use crate::consts::*;
use crate::settings::{FieldSettings, Settings};

/// The player-controlled craft
#[derive(Debug, Clone)]
pub struct PlayerCraft {
    body: AnimatedBody,
    field: FieldSettings,
    bullet: Rc<Animation>,
}

impl PlayerCraft {
    /// Centered horizontally, resting a fixed margin above the bottom edge
    pub fn new(settings: &Settings, sprites: &SpriteSet) -> Self {
        let field = settings.field;
        let frame = sprites.player_alive.frame(0);
        let pos = Vec2::new(
            field.width / 2.0 - frame.width / 2.0,
            field.height - PLAYER_BOTTOM_MARGIN - frame.height,
        );
        let body = AnimatedBody::new(
            pos,
            IVec2::ZERO,
            settings.rules.player_lives,
            sprites.player_alive.clone(),
            sprites.player_destroy.clone(),
            settings.rules.animation_step,
        );
        Self {
            body,
            field,
            bullet: sprites.player_bullet.clone(),
        }
    }

    /// Set velocity from a direction in {-1, 0, 1}^2
    pub fn steer(&mut self, direction: IVec2, speed: i32) {
        self.body.entity.vel = direction.clamp(IVec2::NEG_ONE, IVec2::ONE) * speed;
    }

    /// Fan of projectiles stacked above the craft; empty once destroyed
    pub fn fire(&self) -> Vec<Projectile> {
        if !self.is_alive() {
            return Vec::new();
        }
        let bounds = self.bounds();
        (0..BULLET_FAN_COUNT)
            .map(|i| {
                Projectile::above(
                    Side::Player,
                    bounds.center_x(),
                    bounds.top() - i as f32 * BULLET_FAN_SPACING,
                    IVec2::new(0, PLAYER_BULLET_SPEED),
                    self.bullet.clone(),
                )
            })
            .collect()
    }

    /// Current life total
    pub fn lives(&self) -> i32 {
        self.hit_points()
    }

    pub fn gain_life(&mut self, n: u32) {
        self.body.heal(n);
    }

    pub fn lose_life(&mut self, n: u32) {
        self.body.apply_damage(n);
    }

    fn clamp_to_field(&mut self) {
        let entity = &mut self.body.entity;
        let max = Vec2::new(
            self.field.width - entity.frame.width,
            self.field.height - entity.frame.height,
        );
        entity.pos = entity.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
    }
}

impl Lifecycle for PlayerCraft {
    fn body(&self) -> &AnimatedBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut AnimatedBody {
        &mut self.body
    }

    fn advance(&mut self) {
        if !self.body.is_alive() {
            self.body.entity.vel = IVec2::ZERO;
        }
        self.body.advance();
        self.clamp_to_field();
    }
}

/// An enemy craft drifting down the field
#[derive(Debug, Clone)]
pub struct EnemyCraft {
    body: AnimatedBody,
    field: FieldSettings,
    bullet: Rc<Animation>,
    fire_interval: f64,
    /// Clock time (seconds) of the last shot
    last_fire: Option<f64>,
    escaped: bool,
}

impl EnemyCraft {
    pub fn new(pos: Vec2, vel: IVec2, settings: &Settings, sprites: &SpriteSet) -> Self {
        let body = AnimatedBody::new(
            pos,
            vel,
            settings.rules.enemy_hit_points,
            sprites.enemy_alive.clone(),
            sprites.enemy_destroy.clone(),
            settings.rules.animation_step,
        );
        Self {
            body,
            field: settings.field,
            bullet: sprites.enemy_bullet.clone(),
            fire_interval: settings.rules.enemy_fire_interval,
            last_fire: None,
            escaped: false,
        }
    }

    /// Random column with the bottom edge on the top of the field, random drift
    pub fn spawn(rng: &mut impl Rng, settings: &Settings, sprites: &SpriteSet) -> Self {
        let frame = sprites.enemy_alive.frame(0);
        let max_left = (settings.field.width - frame.width).max(0.0) as i32;
        let pos = Vec2::new(rng.random_range(0..=max_left) as f32, -frame.height);
        let vel = IVec2::new(rng.random_range(-1..=1), rng.random_range(1..=3));
        Self::new(pos, vel, settings, sprites)
    }

    /// Shoot downward if alive and this craft's own cooldown has elapsed
    pub fn fire(&mut self, now: f64) -> Option<Projectile> {
        if !self.is_alive() {
            return None;
        }
        if let Some(last) = self.last_fire {
            if now - last < self.fire_interval {
                return None;
            }
        }
        self.last_fire = Some(now);

        let bounds = self.bounds();
        Some(Projectile::below(
            Side::Enemy,
            bounds.center_x(),
            bounds.bottom(),
            IVec2::new(0, self.body.entity.vel.y + 1),
            self.bullet.clone(),
        ))
    }

    /// Left the bottom of the field; removed whether alive or not
    pub fn has_escaped(&self) -> bool {
        self.escaped
    }
}

impl Lifecycle for EnemyCraft {
    fn body(&self) -> &AnimatedBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut AnimatedBody {
        &mut self.body
    }

    fn advance(&mut self) {
        self.body.advance();
        self.body.entity.bounce_x(self.field.width);
        if self.body.bounds().top() >= self.field.height {
            self.escaped = true;
        }
    }
}

/// A craft playing its destruction sequence outside gameplay
#[derive(Debug, Clone)]
pub enum Wreck {
    Player(PlayerCraft),
    Enemy(EnemyCraft),
}

impl Wreck {
    pub fn is_player(&self) -> bool {
        matches!(self, Wreck::Player(_))
    }

    /// Finished animating, or an enemy wreck drifted off the field
    pub fn is_released(&self) -> bool {
        match self {
            Wreck::Player(p) => p.is_destruction_complete(),
            Wreck::Enemy(e) => e.is_destruction_complete() || e.has_escaped(),
        }
    }
}

impl Lifecycle for Wreck {
    fn body(&self) -> &AnimatedBody {
        match self {
            Wreck::Player(p) => p.body(),
            Wreck::Enemy(e) => e.body(),
        }
    }

    fn body_mut(&mut self) -> &mut AnimatedBody {
        match self {
            Wreck::Player(p) => p.body_mut(),
            Wreck::Enemy(e) => e.body_mut(),
        }
    }

    fn advance(&mut self) {
        match self {
            Wreck::Player(p) => p.advance(),
            Wreck::Enemy(e) => e.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Settings, SpriteSet) {
        let sprites = SpriteSet::resolve(&SpriteCatalog::default()).unwrap();
        (Settings::default(), sprites)
    }

    #[test]
    fn test_player_start_position() {
        let (settings, sprites) = setup();
        let player = PlayerCraft::new(&settings, &sprites);
        let bounds = player.bounds();
        assert_eq!(bounds.center_x(), 240.0);
        assert_eq!(bounds.bottom(), 700.0 - 120.0);
        assert_eq!(player.lives(), 3);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let (settings, sprites) = setup();
        let mut player = PlayerCraft::new(&settings, &sprites);
        player.steer(IVec2::new(-1, 1), 2);
        for _ in 0..500 {
            player.advance();
        }
        let bounds = player.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.bottom(), 700.0);

        player.steer(IVec2::new(5, -7), 2);
        assert_eq!(player.body().entity.vel, IVec2::new(2, -2));
        for _ in 0..500 {
            player.advance();
        }
        assert_eq!(player.bounds().right(), 480.0);
        assert_eq!(player.bounds().top(), 0.0);
    }

    #[test]
    fn test_destroyed_player_stops() {
        let (settings, sprites) = setup();
        let mut player = PlayerCraft::new(&settings, &sprites);
        player.steer(IVec2::new(1, 0), 2);
        player.kill();
        let before = player.body().entity.pos;
        player.advance();
        assert_eq!(player.body().entity.pos, before);
        assert_eq!(player.body().entity.vel, IVec2::ZERO);
    }

    #[test]
    fn test_player_fire_fan() {
        let (settings, sprites) = setup();
        let player = PlayerCraft::new(&settings, &sprites);
        let shots = player.fire();
        assert_eq!(shots.len(), 3);
        let top = player.bounds().top();
        for (i, shot) in shots.iter().enumerate() {
            assert_eq!(shot.side, Side::Player);
            assert_eq!(shot.bounds().bottom(), top - i as f32 * 20.0);
            assert_eq!(shot.bounds().center_x(), player.bounds().center_x());
            assert_eq!(shot.entity.vel, IVec2::new(0, -3));
        }
    }

    #[test]
    fn test_player_fire_has_no_cooldown_but_needs_life() {
        let (settings, sprites) = setup();
        let mut player = PlayerCraft::new(&settings, &sprites);
        assert_eq!(player.fire().len(), 3);
        assert_eq!(player.fire().len(), 3);
        player.lose_life(3);
        assert!(player.fire().is_empty());
    }

    #[test]
    fn test_player_life_api() {
        let (settings, sprites) = setup();
        let mut player = PlayerCraft::new(&settings, &sprites);
        player.gain_life(2);
        assert_eq!(player.lives(), 5);
        player.lose_life(4);
        assert_eq!(player.lives(), 1);
        assert!(player.is_alive());
        player.lose_life(1);
        assert!(!player.is_alive());
        assert_eq!(player.lives(), 0);
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let (settings, sprites) = setup();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let enemy = EnemyCraft::spawn(&mut rng, &settings, &sprites);
            let bounds = enemy.bounds();
            assert!(bounds.left() >= 0.0 && bounds.right() <= 480.0);
            assert_eq!(bounds.bottom(), 0.0);
            let vel = enemy.body().entity.vel;
            assert!((-1..=1).contains(&vel.x));
            assert!((1..=3).contains(&vel.y));
            assert_eq!(enemy.hit_points(), 2);
        }
    }

    #[test]
    fn test_enemy_bounces_off_left_edge() {
        let (settings, sprites) = setup();
        let mut enemy = EnemyCraft::new(Vec2::new(0.0, 100.0), IVec2::new(-1, 1), &settings, &sprites);
        enemy.advance();
        assert_eq!(enemy.body().entity.vel.x, 1);
        assert!(enemy.bounds().left() >= 0.0);
        enemy.advance();
        assert_eq!(enemy.bounds().left(), 1.0);
    }

    #[test]
    fn test_enemy_escapes_bottom_even_when_alive() {
        let (settings, sprites) = setup();
        let mut enemy = EnemyCraft::new(Vec2::new(10.0, 697.0), IVec2::new(0, 3), &settings, &sprites);
        assert!(!enemy.has_escaped());
        enemy.advance();
        assert!(enemy.is_alive());
        assert!(enemy.has_escaped());
    }

    #[test]
    fn test_enemy_fire_cooldown() {
        let (settings, sprites) = setup();
        let mut enemy = EnemyCraft::new(Vec2::new(100.0, 100.0), IVec2::new(0, 2), &settings, &sprites);
        let shot = enemy.fire(10.0).expect("first shot");
        assert_eq!(shot.side, Side::Enemy);
        assert_eq!(shot.entity.vel, IVec2::new(0, 3));
        assert_eq!(shot.bounds().top(), enemy.bounds().bottom());
        assert_eq!(shot.bounds().center_x(), enemy.bounds().center_x());

        assert!(enemy.fire(12.0).is_none());
        assert!(enemy.fire(15.0).is_some());
        assert!(enemy.fire(19.9).is_none());
    }

    #[test]
    fn test_destroyed_enemy_does_not_fire() {
        let (settings, sprites) = setup();
        let mut enemy = EnemyCraft::new(Vec2::new(100.0, 100.0), IVec2::new(0, 2), &settings, &sprites);
        enemy.kill();
        assert!(enemy.fire(0.0).is_none());
    }

    #[test]
    fn test_wreck_release() {
        let (settings, sprites) = setup();
        let mut enemy = EnemyCraft::new(Vec2::new(100.0, 100.0), IVec2::new(0, 1), &settings, &sprites);
        enemy.kill();
        let mut wreck = Wreck::Enemy(enemy);
        assert!(!wreck.is_player());
        let mut ticks = 0;
        while !wreck.is_released() {
            wreck.advance();
            ticks += 1;
            assert!(ticks <= 80);
        }
        assert!(wreck.is_destruction_complete());
    }
}
