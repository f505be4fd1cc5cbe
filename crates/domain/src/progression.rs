//! Progression math: relationship health to level/happiness, and the
//! evolution token economy.
//!
//! Pure functions only. The canonical happiness formula is
//! `clamp(health, 20, 100)` with no jitter, applied identically in every
//! flow; the level formula is `max(1, health / 25)`.

use serde::{Deserialize, Serialize};

/// The four 0-100 relationship sub-scores supplied by the surrounding
/// product. Averaged into an overall health value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipStats {
    pub communication: u8,
    pub trust: u8,
    pub engagement: u8,
    pub consistency: u8,
}

impl RelationshipStats {
    /// Average of the four sub-scores, 0-100.
    pub fn overall_health(&self) -> u8 {
        let sum = self.communication as u32
            + self.trust as u32
            + self.engagement as u32
            + self.consistency as u32;
        (sum / 4) as u8
    }
}

/// Result of a progression recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionOutcome {
    pub health: u8,
    pub level: u32,
    pub happiness: u8,
    pub leveled_up: bool,
    pub tokens_awarded: u32,
}

/// `level = max(1, floor(health / 25))`
pub fn level_for_health(health: u8) -> u32 {
    (health as u32 / 25).max(1)
}

/// `happiness = clamp(health, 20, 100)`
pub fn happiness_for_health(health: u8) -> u8 {
    health.clamp(20, 100)
}

/// Tokens minted when the level increases: `floor(new_level / 2)`.
pub fn tokens_for_level_up(new_level: u32) -> u32 {
    new_level / 2
}

/// Recompute level/happiness from stats and detect a level-up against the
/// previous level. Token awards are reported, not applied; the caller
/// mutates the pet.
pub fn recompute(stats: RelationshipStats, previous_level: u32) -> ProgressionOutcome {
    let health = stats.overall_health();
    let level = level_for_health(health);
    let happiness = happiness_for_health(health);
    let leveled_up = level > previous_level;
    let tokens_awarded = if leveled_up {
        tokens_for_level_up(level)
    } else {
        0
    };
    ProgressionOutcome {
        health,
        level,
        happiness,
        leveled_up,
        tokens_awarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> RelationshipStats {
        RelationshipStats {
            communication: score,
            trust: score,
            engagement: score,
            consistency: score,
        }
    }

    #[test]
    fn health_88_gives_level_3_happiness_88() {
        assert_eq!(level_for_health(88), 3);
        assert_eq!(happiness_for_health(88), 88);
    }

    #[test]
    fn health_10_floors_at_level_1_happiness_20() {
        assert_eq!(level_for_health(10), 1);
        assert_eq!(happiness_for_health(10), 20);
    }

    #[test]
    fn health_100_caps_at_level_4() {
        assert_eq!(level_for_health(100), 4);
        assert_eq!(happiness_for_health(100), 100);
    }

    #[test]
    fn level_up_from_2_to_4_awards_2_tokens() {
        let outcome = recompute(uniform(100), 2);
        assert_eq!(outcome.level, 4);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.tokens_awarded, 2);
    }

    #[test]
    fn no_level_change_awards_nothing() {
        let outcome = recompute(uniform(88), 3);
        assert_eq!(outcome.level, 3);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.tokens_awarded, 0);
    }

    #[test]
    fn level_drop_awards_nothing() {
        let outcome = recompute(uniform(30), 4);
        assert_eq!(outcome.level, 1);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.tokens_awarded, 0);
    }

    #[test]
    fn overall_health_averages_sub_scores() {
        let stats = RelationshipStats {
            communication: 80,
            trust: 90,
            engagement: 70,
            consistency: 100,
        };
        assert_eq!(stats.overall_health(), 85);
    }
}
