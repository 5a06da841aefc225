//! Level database - parsing, validation and the built-in campaign
//!
//! File format (one directive per line, `#` starts a comment). Coordinates
//! are fractions of the playfield:
//! ```text
//! level: Basic Training
//! description: Learn the controls and the shadow
//! platform: 0 0.85 1 0.15        # x y width height
//! enemy: normal 0.25 0.6         # kind x y
//! item: coin 0.2 0.6             # tier x y
//! ```

use bevy::prelude::*;
use std::fs;

use crate::body::EnemyKind;
use crate::error::LevelConfigError;
use crate::world::ItemTier;

/// Platform rectangle in normalized coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Enemy spawn in normalized coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

/// Collectible spawn in normalized coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemDef {
    pub tier: ItemTier,
    pub x: f32,
    pub y: f32,
}

/// Single level definition
#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub description: String,
    pub platforms: Vec<PlatformDef>,
    pub enemies: Vec<EnemyDef>,
    pub items: Vec<ItemDef>,
}

impl LevelData {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Every level needs geometry, something to fight and something to collect
    pub fn validate(&self) -> Result<(), LevelConfigError> {
        if self.platforms.is_empty() {
            return Err(LevelConfigError::EmptyPlatforms {
                level: self.name.clone(),
            });
        }
        if self.enemies.is_empty() {
            return Err(LevelConfigError::EmptyEnemies {
                level: self.name.clone(),
            });
        }
        if self.items.is_empty() {
            return Err(LevelConfigError::EmptyCollectibles {
                level: self.name.clone(),
            });
        }

        let out_of_range = |what: &str, value: f32| LevelConfigError::OutOfRange {
            level: self.name.clone(),
            what: what.to_string(),
            value,
        };
        let unit = |v: f32| (0.0..=1.0).contains(&v);

        for p in &self.platforms {
            for (what, v) in [("platform x", p.x), ("platform y", p.y)] {
                if !unit(v) {
                    return Err(out_of_range(what, v));
                }
            }
            for (what, v) in [("platform width", p.width), ("platform height", p.height)] {
                if !(v > 0.0 && v <= 1.0) {
                    return Err(out_of_range(what, v));
                }
            }
        }
        for e in &self.enemies {
            for (what, v) in [("enemy x", e.x), ("enemy y", e.y)] {
                if !unit(v) {
                    return Err(out_of_range(what, v));
                }
            }
        }
        for i in &self.items {
            for (what, v) in [("item x", i.x), ("item y", i.y)] {
                if !unit(v) {
                    return Err(out_of_range(what, v));
                }
            }
        }
        Ok(())
    }
}

/// Database of all loaded levels, in play order
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct LevelDatabase {
    pub levels: Vec<LevelData>,
}

impl Default for LevelDatabase {
    fn default() -> Self {
        Self::default_levels()
    }
}

impl LevelDatabase {
    /// Load levels from file. A missing file falls back to the built-in
    /// levels; a file that exists but is invalid is an error.
    pub fn load_from_file(path: &str) -> Result<Self, LevelConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let db = Self::parse(&content)?;
                info!("Loaded {} levels from {}", db.len(), path);
                Ok(db)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No level file at {}, using built-in levels", path);
                Ok(Self::default_levels())
            }
            Err(e) => Err(LevelConfigError::Io {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Parse and validate level data. Fails on the first bad line or level.
    pub fn parse(content: &str) -> Result<Self, LevelConfigError> {
        let mut levels = Vec::new();
        let mut current: Option<LevelData> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = match raw.split_once('#') {
                Some((before, _)) => before.trim(),
                None => raw.trim(),
            };

            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                return Err(LevelConfigError::Malformed {
                    line: line_no,
                    reason: format!("expected 'key: value', got '{}'", line),
                });
            };
            let value = value.trim();

            if key.trim() == "level" {
                if let Some(level) = current.take() {
                    levels.push(level);
                }
                if value.is_empty() {
                    return Err(LevelConfigError::Malformed {
                        line: line_no,
                        reason: "level name is empty".to_string(),
                    });
                }
                current = Some(LevelData::named(value));
                continue;
            }

            let Some(level) = current.as_mut() else {
                return Err(LevelConfigError::Malformed {
                    line: line_no,
                    reason: format!("'{}' before any 'level:' line", key.trim()),
                });
            };

            match key.trim() {
                "description" => level.description = value.to_string(),
                "platform" => {
                    let [x, y, width, height] = parse_numbers::<4>(value, line_no)?;
                    level.platforms.push(PlatformDef {
                        x,
                        y,
                        width,
                        height,
                    });
                }
                "enemy" => {
                    let (name, rest) = split_tag(value, line_no)?;
                    let kind = EnemyKind::from_name(name).ok_or_else(|| {
                        LevelConfigError::UnknownEnemyKind {
                            line: line_no,
                            kind: name.to_string(),
                        }
                    })?;
                    let [x, y] = parse_numbers::<2>(rest, line_no)?;
                    level.enemies.push(EnemyDef { kind, x, y });
                }
                "item" => {
                    let (name, rest) = split_tag(value, line_no)?;
                    let tier = ItemTier::from_name(name).ok_or_else(|| {
                        LevelConfigError::UnknownItemTier {
                            line: line_no,
                            tier: name.to_string(),
                        }
                    })?;
                    let [x, y] = parse_numbers::<2>(rest, line_no)?;
                    level.items.push(ItemDef { tier, x, y });
                }
                other => {
                    return Err(LevelConfigError::Malformed {
                        line: line_no,
                        reason: format!("unknown directive '{}'", other),
                    });
                }
            }
        }

        if let Some(level) = current {
            levels.push(level);
        }

        let db = Self { levels };
        db.validate()?;
        Ok(db)
    }

    pub fn validate(&self) -> Result<(), LevelConfigError> {
        if self.levels.is_empty() {
            return Err(LevelConfigError::NoLevels);
        }
        self.levels.iter().try_for_each(LevelData::validate)
    }

    /// The five-level campaign
    pub fn default_levels() -> Self {
        Self {
            levels: vec![
                level(
                    "Basic Training",
                    "Learn the controls and the shadow",
                    &[
                        (0.0, 0.85, 1.0, 0.15),
                        (0.15, 0.65, 0.15, 0.03),
                        (0.4, 0.5, 0.15, 0.03),
                        (0.7, 0.6, 0.15, 0.03),
                    ],
                    &[
                        (EnemyKind::Normal, 0.25, 0.6),
                        (EnemyKind::ShadowKind, 0.55, 0.45),
                    ],
                    &[(ItemTier::Coin, 0.2, 0.6), (ItemTier::Coin, 0.45, 0.45)],
                ),
                level(
                    "Cooperation",
                    "Player and shadow have to work together",
                    &[
                        (0.0, 0.85, 0.3, 0.15),
                        (0.4, 0.85, 0.3, 0.15),
                        (0.8, 0.85, 0.2, 0.15),
                        (0.15, 0.65, 0.1, 0.03),
                        (0.35, 0.45, 0.1, 0.03),
                        (0.55, 0.65, 0.1, 0.03),
                        (0.75, 0.45, 0.1, 0.03),
                    ],
                    &[
                        (EnemyKind::Normal, 0.2, 0.8),
                        (EnemyKind::ShadowKind, 0.45, 0.8),
                        (EnemyKind::Normal, 0.6, 0.6),
                        (EnemyKind::ShadowKind, 0.8, 0.4),
                    ],
                    &[
                        (ItemTier::Coin, 0.18, 0.6),
                        (ItemTier::Coin, 0.38, 0.4),
                        (ItemTier::Coin, 0.58, 0.6),
                        (ItemTier::Coin, 0.78, 0.4),
                    ],
                ),
                level(
                    "Vertical Challenge",
                    "Jumping and shooting under pressure",
                    &[
                        (0.0, 0.9, 0.2, 0.1),
                        (0.8, 0.9, 0.2, 0.1),
                        (0.1, 0.75, 0.1, 0.03),
                        (0.3, 0.6, 0.1, 0.03),
                        (0.5, 0.45, 0.1, 0.03),
                        (0.7, 0.3, 0.1, 0.03),
                        (0.4, 0.15, 0.2, 0.03),
                    ],
                    &[
                        (EnemyKind::Normal, 0.85, 0.85),
                        (EnemyKind::ShadowKind, 0.32, 0.55),
                        (EnemyKind::Normal, 0.52, 0.4),
                        (EnemyKind::ShadowKind, 0.72, 0.25),
                        (EnemyKind::Normal, 0.45, 0.1),
                    ],
                    &[
                        (ItemTier::Coin, 0.12, 0.7),
                        (ItemTier::Coin, 0.32, 0.55),
                        (ItemTier::Coin, 0.52, 0.4),
                        (ItemTier::Coin, 0.72, 0.25),
                        (ItemTier::Key, 0.45, 0.1),
                    ],
                ),
                level(
                    "Shadow Maze",
                    "Close quarters across tangled ledges",
                    &[
                        (0.0, 0.9, 1.0, 0.1),
                        (0.1, 0.75, 0.15, 0.03),
                        (0.35, 0.75, 0.15, 0.03),
                        (0.6, 0.75, 0.15, 0.03),
                        (0.85, 0.75, 0.15, 0.03),
                        (0.2, 0.6, 0.1, 0.03),
                        (0.45, 0.6, 0.1, 0.03),
                        (0.7, 0.6, 0.1, 0.03),
                        (0.1, 0.45, 0.1, 0.03),
                        (0.35, 0.45, 0.1, 0.03),
                        (0.6, 0.45, 0.1, 0.03),
                        (0.85, 0.45, 0.1, 0.03),
                        (0.25, 0.3, 0.5, 0.03),
                    ],
                    &[
                        (EnemyKind::Normal, 0.15, 0.85),
                        (EnemyKind::ShadowKind, 0.4, 0.7),
                        (EnemyKind::Normal, 0.65, 0.7),
                        (EnemyKind::ShadowKind, 0.9, 0.7),
                        (EnemyKind::Normal, 0.22, 0.55),
                        (EnemyKind::ShadowKind, 0.47, 0.55),
                        (EnemyKind::Normal, 0.72, 0.55),
                        (EnemyKind::ShadowKind, 0.5, 0.25),
                    ],
                    &[
                        (ItemTier::Coin, 0.12, 0.7),
                        (ItemTier::Coin, 0.37, 0.7),
                        (ItemTier::Coin, 0.62, 0.7),
                        (ItemTier::Coin, 0.87, 0.7),
                        (ItemTier::Coin, 0.22, 0.55),
                        (ItemTier::Coin, 0.47, 0.55),
                        (ItemTier::Key, 0.5, 0.25),
                    ],
                ),
                level(
                    "Final Showdown",
                    "Take down the boss",
                    &[
                        (0.0, 0.9, 1.0, 0.1),
                        (0.1, 0.7, 0.2, 0.03),
                        (0.7, 0.7, 0.2, 0.03),
                        (0.35, 0.5, 0.3, 0.03),
                        (0.2, 0.3, 0.1, 0.03),
                        (0.7, 0.3, 0.1, 0.03),
                    ],
                    &[
                        (EnemyKind::Normal, 0.15, 0.85),
                        (EnemyKind::ShadowKind, 0.75, 0.85),
                        (EnemyKind::Normal, 0.12, 0.65),
                        (EnemyKind::ShadowKind, 0.72, 0.65),
                        (EnemyKind::Boss, 0.45, 0.45),
                        (EnemyKind::Normal, 0.22, 0.25),
                        (EnemyKind::ShadowKind, 0.72, 0.25),
                    ],
                    &[
                        (ItemTier::Coin, 0.15, 0.65),
                        (ItemTier::Coin, 0.75, 0.65),
                        (ItemTier::Coin, 0.22, 0.25),
                        (ItemTier::Coin, 0.72, 0.25),
                        (ItemTier::Key, 0.4, 0.45),
                        (ItemTier::Key, 0.6, 0.45),
                    ],
                ),
            ],
        }
    }

    /// Get level by index
    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    /// Get number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn level(
    name: &str,
    description: &str,
    platforms: &[(f32, f32, f32, f32)],
    enemies: &[(EnemyKind, f32, f32)],
    items: &[(ItemTier, f32, f32)],
) -> LevelData {
    LevelData {
        name: name.to_string(),
        description: description.to_string(),
        platforms: platforms
            .iter()
            .map(|&(x, y, width, height)| PlatformDef {
                x,
                y,
                width,
                height,
            })
            .collect(),
        enemies: enemies
            .iter()
            .map(|&(kind, x, y)| EnemyDef { kind, x, y })
            .collect(),
        items: items.iter().map(|&(tier, x, y)| ItemDef { tier, x, y }).collect(),
    }
}

/// Split `tag rest...` into the leading word and the remainder
fn split_tag(value: &str, line: usize) -> Result<(&str, &str), LevelConfigError> {
    value
        .split_once(char::is_whitespace)
        .map(|(tag, rest)| (tag, rest.trim()))
        .ok_or_else(|| LevelConfigError::Malformed {
            line,
            reason: format!("expected '<kind> x y', got '{}'", value),
        })
}

/// Parse exactly N whitespace-separated numbers
fn parse_numbers<const N: usize>(value: &str, line: usize) -> Result<[f32; N], LevelConfigError> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != N {
        return Err(LevelConfigError::Malformed {
            line,
            reason: format!("expected {} numbers, got {}", N, parts.len()),
        });
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse::<f32>().map_err(|_| LevelConfigError::Malformed {
            line,
            reason: format!("'{}' is not a number", part),
        })?;
    }
    Ok(out)
}
