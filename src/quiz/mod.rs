pub mod card;
pub mod content;
pub mod error;
pub mod pool;
pub mod roast;
pub mod sampler;
pub mod scoring;
pub mod session;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Accepts "male"/"female" in any case, with or without the button emoji.
    pub fn parse(input: &str) -> Option<Self> {
        let word = input
            .trim()
            .trim_start_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        match word.as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn gendered<'a>(
    gender: Gender,
    neutral: &'a str,
    male: &'a Option<String>,
    female: &'a Option<String>,
) -> &'a str {
    let variant = match gender {
        Gender::Male => male,
        Gender::Female => female,
    };
    variant.as_deref().unwrap_or(neutral)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub male_question: Option<String>,
    #[serde(default)]
    pub female_question: Option<String>,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn text_for(&self, gender: Gender) -> &str {
        gendered(
            gender,
            &self.question,
            &self.male_question,
            &self.female_question,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizOption {
    pub text: String,
    #[serde(default)]
    pub male_text: Option<String>,
    #[serde(default)]
    pub female_text: Option<String>,
    #[serde(default)]
    pub red_flags: u32,
    #[serde(default)]
    pub yellow_flags: u32,
    #[serde(default)]
    pub green_flags: u32,
}

impl QuizOption {
    pub fn text_for(&self, gender: Gender) -> &str {
        gendered(gender, &self.text, &self.male_text, &self.female_text)
    }
}

/// A question as presented to one player: options in random order, each
/// remembering where it sits in the canonical question.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShuffledQuestion {
    pub id: QuestionId,
    pub question: String,
    pub male_question: Option<String>,
    pub female_question: Option<String>,
    pub options: Vec<ShuffledOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShuffledOption {
    pub option: QuizOption,
    pub original_index: usize,
}

impl ShuffledQuestion {
    pub fn text_for(&self, gender: Gender) -> &str {
        gendered(
            gender,
            &self.question,
            &self.male_question,
            &self.female_question,
        )
    }

    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.options.get(position).map(|o| o.original_index)
    }

    /// Displayed position of the option whose label matches `text`.
    pub fn position_of_text(&self, text: &str, gender: Gender) -> Option<usize> {
        let text = text.trim();
        self.options
            .iter()
            .position(|o| o.option.text_for(gender) == text)
    }
}

/// Question id -> original index of the chosen option, in the order the
/// questions were answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserAnswers {
    entries: Vec<(QuestionId, usize)>,
}

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answering the same question again replaces the earlier choice but
    /// keeps its place in the order.
    pub fn record(&mut self, id: QuestionId, original_index: usize) {
        match self.entries.iter_mut().find(|(q, _)| *q == id) {
            Some(entry) => entry.1 = original_index,
            None => self.entries.push((id, original_index)),
        }
    }

    pub fn get(&self, id: QuestionId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(q, _)| *q == id)
            .map(|(_, index)| *index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(QuestionId, usize)> for UserAnswers {
    fn from_iter<I: IntoIterator<Item = (QuestionId, usize)>>(iter: I) -> Self {
        let mut answers = UserAnswers::new();
        for (id, index) in iter {
            answers.record(id, index);
        }
        answers
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizResult {
    pub red_flags: u32,
    pub yellow_flags: u32,
    pub green_flags: u32,
    pub title: String,
    pub description: String,
    pub gender: Gender,
    #[serde(default)]
    pub roast: Option<String>,
}

impl QuizResult {
    pub fn attach_roast(&mut self, roast: String) {
        self.roast = Some(roast);
    }
}
