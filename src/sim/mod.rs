//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order within each group)
//! - No rendering or platform dependencies

pub mod background;
pub mod clock;
pub mod collision;
pub mod craft;
pub mod entity;
pub mod lifecycle;
pub mod pickup;
pub mod projectile;
pub mod rect;
pub mod tick;
pub mod world;

pub use background::Background;
pub use clock::{Signal, SimulationClock, SpawnTimer};
pub use collision::{CollisionReport, resolve};
pub use craft::{EnemyCraft, PlayerCraft, Wreck};
pub use entity::Entity;
pub use lifecycle::{AnimatedBody, LifeState, Lifecycle};
pub use pickup::Pickup;
pub use projectile::{Projectile, Side};
pub use rect::Rect;
pub use tick::{TickInput, TickReport, tick};
pub use world::{AdvanceReport, GamePhase, SimulationWorld};
