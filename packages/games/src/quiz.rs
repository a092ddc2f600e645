use serde::{Deserialize, Serialize};

use crate::errors::session_errors::QuizError;

/// Point rules for a timed multiple-choice quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizScoring {
    pub base_points: u32,
    pub time_bonus_divisor: u32,
    pub streak_bonus: u32,
}

impl Default for QuizScoring {
    fn default() -> Self {
        QuizScoring {
            base_points: 100,
            time_bonus_divisor: 2,
            streak_bonus: 50,
        }
    }
}

impl QuizScoring {
    /// `base + floor(time_left / divisor) + streak * streak_bonus`.
    pub fn points_for(&self, time_left: u32, streak: u32) -> u32 {
        let time_bonus = time_left.checked_div(self.time_bonus_divisor).unwrap_or(0);
        self.base_points
            .saturating_add(time_bonus)
            .saturating_add(streak.saturating_mul(self.streak_bonus))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub points: u32,
    /// Streak after this answer.
    pub streak: u32,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub best_streak: u32,
    pub accuracy: f64,
}

/// A single run through a list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    scoring: QuizScoring,
    current: usize,
    score: u32,
    streak: u32,
    best_streak: u32,
    correct_answers: u32,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, scoring: QuizScoring) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(QuizSession {
            questions,
            scoring,
            current: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            correct_answers: 0,
        })
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answer(&mut self, choice: usize, time_left: u32) -> Result<AnswerOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::Finished)?;
        if choice >= question.options.len() {
            return Err(QuizError::InvalidOption {
                choice,
                options: question.options.len(),
            });
        }
        let correct = choice == question.correct;
        Ok(self.resolve(correct, time_left))
    }

    /// The timer ran out before the player picked an option.
    pub fn time_out(&mut self) -> Result<AnswerOutcome, QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        Ok(self.resolve(false, 0))
    }

    fn resolve(&mut self, correct: bool, time_left: u32) -> AnswerOutcome {
        let explanation = self.questions[self.current].explanation.clone();
        let points = if correct {
            let points = self.scoring.points_for(time_left, self.streak);
            self.score = self.score.saturating_add(points);
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.correct_answers += 1;
            points
        } else {
            self.streak = 0;
            0
        };
        self.current += 1;
        AnswerOutcome {
            correct,
            points,
            streak: self.streak,
            explanation,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn accuracy(&self) -> f64 {
        if self.current == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) / self.current as f64
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score,
            correct_answers: self.correct_answers,
            total_questions: self.questions.len() as u32,
            best_streak: self.best_streak,
            accuracy: self.accuracy(),
        }
    }
}
