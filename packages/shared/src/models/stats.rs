use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::progress::Progress;
use crate::models::score::Score;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: String,
    pub total_plays: usize,
    pub total_score: i64,
    pub average_score: f64,
    pub best_score: Option<i64>,
    pub best_by_game: BTreeMap<String, i64>,
    pub games_played: usize,
    pub highest_level: u32,
    pub challenges_completed: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Aggregates one user's score history and progress records.
    pub fn compute(user_id: &str, scores: &[Score], progress: &[Progress]) -> Self {
        let total_plays = scores.len();
        let total_score = scores
            .iter()
            .fold(0i64, |total, s| total.saturating_add(s.score));
        let average_score = if total_plays == 0 {
            0.0
        } else {
            scores.iter().map(|s| s.score as f64).sum::<f64>() / total_plays as f64
        };

        let mut best_by_game = BTreeMap::new();
        for score in scores {
            best_by_game
                .entry(score.game.clone())
                .and_modify(|best: &mut i64| *best = (*best).max(score.score))
                .or_insert(score.score);
        }

        let games: BTreeSet<&str> = scores
            .iter()
            .map(|s| s.game.as_str())
            .chain(progress.iter().map(|p| p.game.as_str()))
            .collect();

        let last_activity = scores
            .iter()
            .map(|s| s.achieved_at)
            .chain(progress.iter().map(|p| p.last_played))
            .max();

        UserStats {
            user_id: user_id.to_string(),
            total_plays,
            total_score,
            average_score,
            best_score: scores.iter().map(|s| s.score).max(),
            best_by_game,
            games_played: games.len(),
            highest_level: progress.iter().map(|p| p.level).max().unwrap_or(0),
            challenges_completed: progress.iter().map(|p| p.completed_challenges.len()).sum(),
            last_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::CompletedChallenge;
    use crate::models::score::ScoreDetails;
    use chrono::{Duration, TimeZone};

    fn score(game: &str, points: i64, minutes: i64) -> Score {
        let mut score = Score::new(
            "user-1".to_string(),
            "rockfan".to_string(),
            game.to_string(),
            points,
            ScoreDetails::default(),
        );
        score.achieved_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            + Duration::minutes(minutes);
        score
    }

    #[test]
    fn test_empty_history() {
        let stats = UserStats::compute("user-1", &[], &[]);

        assert_eq!(stats.total_plays, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.best_score, None);
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.highest_level, 0);
        assert_eq!(stats.last_activity, None);
    }

    #[test]
    fn test_aggregates_scores_and_progress() {
        let scores = vec![
            score("quiz", 100, 0),
            score("quiz", 300, 5),
            score("memory", 200, 10),
        ];
        let mut progress = Progress::new("user-1".to_string(), "timeline".to_string());
        progress.level = 4;
        progress.last_played = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        progress.completed_challenges = vec![
            CompletedChallenge {
                id: "c1".to_string(),
                completed_at: progress.last_played,
                score: None,
            },
            CompletedChallenge {
                id: "c2".to_string(),
                completed_at: progress.last_played,
                score: Some(10),
            },
        ];

        let stats = UserStats::compute("user-1", &scores, &[progress.clone()]);

        assert_eq!(stats.total_plays, 3);
        assert_eq!(stats.total_score, 600);
        assert!((stats.average_score - 200.0).abs() < f64::EPSILON);
        assert_eq!(stats.best_score, Some(300));
        assert_eq!(stats.best_by_game.get("quiz"), Some(&300));
        assert_eq!(stats.best_by_game.get("memory"), Some(&200));
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.highest_level, 4);
        assert_eq!(stats.challenges_completed, 2);
        assert_eq!(stats.last_activity, Some(progress.last_played));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let scores = vec![score("quiz", i64::MAX, 0), score("quiz", i64::MAX, 1)];

        let stats = UserStats::compute("user-1", &scores, &[]);

        assert_eq!(stats.total_score, i64::MAX);
        assert_eq!(stats.average_score, i64::MAX as f64);
        assert_eq!(stats.best_score, Some(i64::MAX));
    }
}
