//! Sky Raid - a fixed-tick vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Entity lifecycle, collision resolution and the per-tick driver
//! - `settings`: Data-driven rules, field size and timer periods
//! - `assets`: Logical sprite-sequence names resolved to frame sizes
//! - `render`: Draw-list hand-off to an external renderer
//! - `input`: Per-tick input collaborators, including a demo autopilot
//!
//! Window setup, image decoding and raw input polling live outside this crate.

pub mod assets;
pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use assets::{AssetSource, SpriteCatalog};
pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Animation frames advanced per tick
    pub const ANIMATION_STEP: f32 = 0.05;

    /// Manual movement speed (units/tick per unit of input direction)
    pub const MOVE_SPEED: i32 = 2;

    /// Player starts centered, bottom edge this far above the field bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 120.0;
    pub const PLAYER_LIVES: i32 = 3;

    /// Player projectile fan
    pub const PLAYER_BULLET_SPEED: i32 = -3;
    pub const BULLET_FAN_COUNT: usize = 3;
    pub const BULLET_FAN_SPACING: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_HIT_POINTS: i32 = 2;
    /// Seconds between shots of a single enemy craft
    pub const ENEMY_FIRE_INTERVAL: f64 = 5.0;
    pub const ENEMY_SCORE: u64 = 100;

    /// Background scroll speed (units/tick)
    pub const BACKGROUND_SPEED: i32 = 1;

    /// Spawn timer periods (milliseconds)
    pub const ENEMY_SPAWN_MS: u64 = 1_000;
    pub const PLAYER_FIRE_MS: u64 = 500;
    pub const ENEMY_FIRE_MS: u64 = 500;
    pub const PICKUP_SPAWN_MS: u64 = 60_000;
}
