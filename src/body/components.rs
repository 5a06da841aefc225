//! Faction tags shared by every simulated body

use serde::{Deserialize, Serialize};

/// Enemy subtype; decides which shooters can damage it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    ShadowKind,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::ShadowKind, EnemyKind::Boss];

    /// Faction table: normal takes player fire, shadow-kind takes shadow fire,
    /// the boss takes both. Enemy fire never damages enemies.
    pub fn vulnerable_to(self, shooter: Shooter) -> bool {
        matches!(
            (self, shooter),
            (EnemyKind::Normal, Shooter::Player)
                | (EnemyKind::ShadowKind, Shooter::Shadow)
                | (EnemyKind::Boss, Shooter::Player | Shooter::Shadow)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::ShadowKind => "shadowkind",
            EnemyKind::Boss => "boss",
        }
    }

    /// Parse a level-file name. `shadow` is accepted as shorthand for shadow-kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(EnemyKind::Normal),
            "shadow" | "shadowkind" | "shadow-kind" => Some(EnemyKind::ShadowKind),
            "boss" => Some(EnemyKind::Boss),
            _ => None,
        }
    }
}

/// Who fired a bullet. Fixed when the bullet is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Shadow,
    Enemy(EnemyKind),
}

impl Shooter {
    pub fn is_avatar(self) -> bool {
        matches!(self, Shooter::Player | Shooter::Shadow)
    }

    pub fn code(self) -> &'static str {
        match self {
            Shooter::Player => "P",
            Shooter::Shadow => "S",
            Shooter::Enemy(EnemyKind::Normal) => "EN",
            Shooter::Enemy(EnemyKind::ShadowKind) => "ES",
            Shooter::Enemy(EnemyKind::Boss) => "EB",
        }
    }
}

/// Faction discriminant of a [`Body`](super::Body)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Shadow,
    Enemy(EnemyKind),
    Bullet(Shooter),
}

impl Faction {
    /// Player or shadow
    pub fn is_avatar(self) -> bool {
        matches!(self, Faction::Player | Faction::Shadow)
    }

    pub fn is_bullet(self) -> bool {
        matches!(self, Faction::Bullet(_))
    }

    /// Shooter tag carried by bullets this faction fires (bullets cannot fire)
    pub fn as_shooter(self) -> Option<Shooter> {
        match self {
            Faction::Player => Some(Shooter::Player),
            Faction::Shadow => Some(Shooter::Shadow),
            Faction::Enemy(kind) => Some(Shooter::Enemy(kind)),
            Faction::Bullet(_) => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Faction::Player => "player".to_string(),
            Faction::Shadow => "shadow".to_string(),
            Faction::Enemy(kind) => format!("enemy:{}", kind.label()),
            Faction::Bullet(_) => "bullet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_table() {
        assert!(EnemyKind::Normal.vulnerable_to(Shooter::Player));
        assert!(!EnemyKind::Normal.vulnerable_to(Shooter::Shadow));
        assert!(EnemyKind::ShadowKind.vulnerable_to(Shooter::Shadow));
        assert!(!EnemyKind::ShadowKind.vulnerable_to(Shooter::Player));
        assert!(EnemyKind::Boss.vulnerable_to(Shooter::Player));
        assert!(EnemyKind::Boss.vulnerable_to(Shooter::Shadow));
    }

    #[test]
    fn test_enemy_fire_never_damages_enemies() {
        for target in EnemyKind::ALL {
            for source in EnemyKind::ALL {
                assert!(!target.vulnerable_to(Shooter::Enemy(source)));
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Faction::Enemy(EnemyKind::ShadowKind).label(), "enemy:shadowkind");
        assert_eq!(Faction::Bullet(Shooter::Shadow).label(), "bullet");
        assert_eq!(EnemyKind::from_name("Shadow"), Some(EnemyKind::ShadowKind));
        assert_eq!(EnemyKind::from_name("dragon"), None);
    }
}
