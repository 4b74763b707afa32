use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::error::ContentError;
use super::{Gender, Question, QuestionId};

const BUNDLED_QUESTIONS: &str = include_str!("../../content/questions.ron");

/// The canonical, read-only set of questions every quiz is drawn from.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::EmptyQuestionPool);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(ContentError::DuplicateQuestionId(question.id));
            }
            if question.options.is_empty() {
                return Err(ContentError::NoOptions(question.id));
            }
            check_option_labels(question)?;
        }

        Ok(Self { questions })
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ContentError> {
        let questions: Vec<Question> = ron::from_str(content)?;
        Self::new(questions)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_ron_str(BUNDLED_QUESTIONS)
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

/// Answers are matched back by button label, so every label a player of
/// either gender sees must be unique within its question.
fn check_option_labels(question: &Question) -> Result<(), ContentError> {
    for gender in [Gender::Male, Gender::Female] {
        let mut labels = HashSet::new();
        for option in &question.options {
            let label = option.text_for(gender).trim();
            if !labels.insert(label) {
                return Err(ContentError::DuplicateOptionLabel {
                    question: question.id,
                    gender,
                    label: label.to_string(),
                });
            }
        }
    }
    Ok(())
}
