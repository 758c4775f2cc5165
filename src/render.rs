//! Draw-list hand-off
//!
//! Once per tick the world is flattened into a `Scene`: layers in fixed
//! back-to-front order, each sprite reduced to sequence name, frame index and
//! position. An external renderer turns that into pixels.

use glam::Vec2;

use crate::sim::{Lifecycle, SimulationWorld};

/// Layers in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Player,
    PlayerProjectiles,
    Enemies,
    EnemyProjectiles,
    Destroying,
    Pickups,
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    pub sequence: &'a str,
    pub frame: usize,
    /// Top-left corner
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawLayer<'a> {
    pub kind: LayerKind,
    pub sprites: Vec<Sprite<'a>>,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub lives: i32,
    pub score: u64,
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub layers: Vec<DrawLayer<'a>>,
    pub hud: Hud,
}

impl<'a> Scene<'a> {
    pub fn capture(world: &'a SimulationWorld) -> Self {
        let background: Vec<Sprite<'a>> = world
            .background
            .layers
            .iter()
            .map(|layer| Sprite {
                sequence: world.background.sprite().name(),
                frame: 0,
                pos: layer.pos,
            })
            .collect();
        let player: Vec<Sprite<'a>> = world.player.iter().map(craft_sprite).collect();
        let player_bullets: Vec<Sprite<'a>> = world
            .player_bullets
            .iter()
            .map(|b| Sprite {
                sequence: b.sprite().name(),
                frame: 0,
                pos: b.entity.pos,
            })
            .collect();
        let enemies: Vec<Sprite<'a>> = world.enemies.iter().map(craft_sprite).collect();
        let enemy_bullets: Vec<Sprite<'a>> = world
            .enemy_bullets
            .iter()
            .map(|b| Sprite {
                sequence: b.sprite().name(),
                frame: 0,
                pos: b.entity.pos,
            })
            .collect();
        let destroying: Vec<Sprite<'a>> = world.destroying.iter().map(craft_sprite).collect();
        let pickups: Vec<Sprite<'a>> = world
            .pickups
            .iter()
            .map(|p| Sprite {
                sequence: p.sprite().name(),
                frame: 0,
                pos: p.entity.pos,
            })
            .collect();

        let layers = [
            (LayerKind::Background, background),
            (LayerKind::Player, player),
            (LayerKind::PlayerProjectiles, player_bullets),
            (LayerKind::Enemies, enemies),
            (LayerKind::EnemyProjectiles, enemy_bullets),
            (LayerKind::Destroying, destroying),
            (LayerKind::Pickups, pickups),
        ]
        .into_iter()
        .map(|(kind, sprites)| DrawLayer { kind, sprites })
        .collect();

        Self {
            layers,
            hud: Hud {
                lives: world.player_lives(),
                score: world.score,
            },
        }
    }

    pub fn sprite_count(&self) -> usize {
        self.layers.iter().map(|l| l.sprites.len()).sum()
    }
}

/// Craft show whichever sequence their lifecycle is playing
fn craft_sprite<C: Lifecycle>(craft: &C) -> Sprite<'_> {
    let body = craft.body();
    Sprite {
        sequence: body.active_animation().name(),
        frame: body.shown_frame(),
        pos: body.entity.pos,
    }
}

/// Consumes one scene per tick
pub trait Renderer {
    fn draw(&mut self, scene: &Scene<'_>);
}

/// Headless renderer: logs a scene summary every `interval` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, scene: &Scene<'_>) {
        self.frames += 1;
        if self.frames % self.interval != 0 {
            return;
        }
        let counts: Vec<String> = scene
            .layers
            .iter()
            .map(|l| format!("{:?}={}", l.kind, l.sprites.len()))
            .collect();
        log::info!(
            "frame {}: lives {} score {} [{}]",
            self.frames,
            scene.hud.lives,
            scene.hud.score,
            counts.join(" ")
        );
    }
}
