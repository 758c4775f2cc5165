//! Sprite-sequence resolution
//!
//! The simulation never touches pixels. It only needs the size of each frame
//! to derive bounding boxes, and the renderer maps `(sequence, frame)` back to
//! real images.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical sequence names
pub mod names {
    pub const PLAYER_ALIVE: &str = "player-alive";
    pub const PLAYER_DESTROY: &str = "player-destroy";
    pub const ENEMY_ALIVE: &str = "enemy-alive";
    pub const ENEMY_DESTROY: &str = "enemy-destroy";
    pub const PLAYER_BULLET: &str = "player-bullet";
    pub const ENEMY_BULLET: &str = "enemy-bullet";
    pub const PICKUP: &str = "pickup";
    pub const BACKGROUND: &str = "background";
}

/// Size of a single animation frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A named, non-empty, ordered frame sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    frames: Vec<Frame>,
}

impl Animation {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Result<Self, ConfigError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(ConfigError::EmptyAnimation { name });
        }
        for (index, frame) in frames.iter().enumerate() {
            let valid = frame.width.is_finite()
                && frame.height.is_finite()
                && frame.width > 0.0
                && frame.height > 0.0;
            if !valid {
                return Err(ConfigError::InvalidFrame {
                    name,
                    index,
                    width: frame.width,
                    height: frame.height,
                });
            }
        }
        Ok(Self { name, frames })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of frames (never zero)
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame at `index`, clamped to the last frame
    pub fn frame(&self, index: usize) -> Frame {
        self.frames[index.min(self.frames.len() - 1)]
    }
}

/// Resolves logical sequence names to frame sizes
pub trait AssetSource {
    /// Raw frames for `name`, or `None` if the sequence is unknown
    fn frames(&self, name: &str) -> Option<Vec<Frame>>;

    /// Resolve and validate a sequence
    fn animation(&self, name: &str) -> Result<Rc<Animation>, ConfigError> {
        let frames = self
            .frames(name)
            .ok_or_else(|| ConfigError::UnknownAnimation {
                name: name.to_string(),
            })?;
        Animation::new(name, frames).map(Rc::new)
    }
}

/// In-memory catalog of sequence name to frame sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteCatalog {
    pub sequences: BTreeMap<String, Vec<Frame>>,
}

impl Default for SpriteCatalog {
    /// Sizes of the stock artwork
    fn default() -> Self {
        let player = Frame::new(102.0, 126.0);
        let enemy = Frame::new(57.0, 43.0);
        let bullet = Frame::new(5.0, 11.0);

        let mut sequences = BTreeMap::new();
        sequences.insert(names::PLAYER_ALIVE.to_string(), vec![player; 2]);
        sequences.insert(names::PLAYER_DESTROY.to_string(), vec![player; 4]);
        sequences.insert(names::ENEMY_ALIVE.to_string(), vec![enemy]);
        sequences.insert(names::ENEMY_DESTROY.to_string(), vec![enemy; 4]);
        sequences.insert(names::PLAYER_BULLET.to_string(), vec![bullet]);
        sequences.insert(names::ENEMY_BULLET.to_string(), vec![bullet]);
        sequences.insert(names::PICKUP.to_string(), vec![Frame::new(58.0, 88.0)]);
        sequences.insert(names::BACKGROUND.to_string(), vec![Frame::new(480.0, 700.0)]);
        Self { sequences }
    }
}

impl SpriteCatalog {
    /// Load a catalog from JSON; sequences not listed keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let overrides: BTreeMap<String, Vec<Frame>> =
            serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;

        let mut catalog = Self::default();
        catalog.sequences.extend(overrides);
        log::info!(
            "Loaded sprite catalog from {} ({} sequences)",
            path.display(),
            catalog.sequences.len()
        );
        Ok(catalog)
    }
}

impl AssetSource for SpriteCatalog {
    fn frames(&self, name: &str) -> Option<Vec<Frame>> {
        self.sequences.get(name).cloned()
    }
}

/// Every sequence the simulation needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub player_alive: Rc<Animation>,
    pub player_destroy: Rc<Animation>,
    pub enemy_alive: Rc<Animation>,
    pub enemy_destroy: Rc<Animation>,
    pub player_bullet: Rc<Animation>,
    pub enemy_bullet: Rc<Animation>,
    pub pickup: Rc<Animation>,
    pub background: Rc<Animation>,
}

impl SpriteSet {
    pub fn resolve(source: &impl AssetSource) -> Result<Self, ConfigError> {
        Ok(Self {
            player_alive: source.animation(names::PLAYER_ALIVE)?,
            player_destroy: source.animation(names::PLAYER_DESTROY)?,
            enemy_alive: source.animation(names::ENEMY_ALIVE)?,
            enemy_destroy: source.animation(names::ENEMY_DESTROY)?,
            player_bullet: source.animation(names::PLAYER_BULLET)?,
            enemy_bullet: source.animation(names::ENEMY_BULLET)?,
            pickup: source.animation(names::PICKUP)?,
            background: source.animation(names::BACKGROUND)?,
        })
    }
}
