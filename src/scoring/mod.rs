//! Scoring module - run score and tallies

use serde::Serialize;

/// Score for the current run. Reset only by a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: u32,
    pub enemies_defeated: u32,
    pub items_collected: u32,
    pub levels_completed: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.total = self.total.saturating_add(points);
    }

    pub fn enemy_defeated(&mut self, points: u32) {
        self.enemies_defeated += 1;
        self.add(points);
    }

    pub fn item_collected(&mut self, points: u32) {
        self.items_collected += 1;
        self.add(points);
    }

    pub fn level_completed(&mut self, bonus: u32) {
        self.levels_completed += 1;
        self.add(bonus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallies_follow_awards() {
        let mut score = Score::default();
        score.enemy_defeated(100);
        score.enemy_defeated(500);
        score.item_collected(50);
        score.level_completed(1000);
        assert_eq!(score.total, 1650);
        assert_eq!(score.enemies_defeated, 2);
        assert_eq!(score.items_collected, 1);
        assert_eq!(score.levels_completed, 1);
    }
}
