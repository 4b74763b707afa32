use rand::Rng;

use super::content::ResultContent;
use super::error::SessionError;
use super::pool::QuestionPool;
use super::{sampler, scoring};
use super::{Gender, QuizResult, ShuffledQuestion, UserAnswers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Next,
    Complete,
}

/// One player's run through the quiz. Lives in the dialogue state between
/// messages and is dropped once the result is produced.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    pub gender: Gender,
    questions: Vec<ShuffledQuestion>,
    answers: UserAnswers,
    current: usize,
}

impl QuizSession {
    pub fn start<R: Rng + ?Sized>(
        pool: &QuestionPool,
        count: usize,
        gender: Gender,
        rng: &mut R,
    ) -> Self {
        let selected = sampler::select_questions(pool.questions(), count, &mut *rng);
        Self::from_questions(sampler::shuffle_all(&selected, rng), gender)
    }

    pub fn from_questions(questions: Vec<ShuffledQuestion>, gender: Gender) -> Self {
        Self {
            gender,
            questions,
            answers: UserAnswers::new(),
            current: 0,
        }
    }

    pub fn current(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.current)
    }

    /// 1-based number of the current question and the total.
    pub fn progress(&self) -> (usize, usize) {
        ((self.current + 1).min(self.questions.len()), self.questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    /// Records the option shown at `position` of the current question.
    pub fn answer(&mut self, position: usize) -> Result<Progress, SessionError> {
        let question = self.current().ok_or(SessionError::Finished)?;
        let id = question.id;
        let original_index =
            question
                .original_index(position)
                .ok_or(SessionError::InvalidChoice {
                    choice: position,
                    available: question.options.len(),
                })?;

        self.answers.record(id, original_index);
        self.current += 1;

        if self.is_complete() {
            Ok(Progress::Complete)
        } else {
            Ok(Progress::Next)
        }
    }

    pub fn finish<R: Rng + ?Sized>(
        &self,
        pool: &QuestionPool,
        content: &ResultContent,
        rng: &mut R,
    ) -> QuizResult {
        scoring::score(pool, content, &self.answers, self.gender, rng)
    }
}
