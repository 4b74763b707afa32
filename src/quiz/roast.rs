use crate::quiz::{Gender, QuizResult};
use chatgpt::prelude::*;
use chatgpt::types::CompletionResponse;

pub const FALLBACK_ROAST: &str = "Even our AI is speechless... and that's saying something 💀";

pub struct RoastWriter {
    chat_gpt: ChatGPT,
}

impl RoastWriter {
    pub fn new(chat_gpt: ChatGPT) -> Self {
        Self { chat_gpt }
    }

    pub async fn write_roast(&self, result: &QuizResult) -> Result<String> {
        log::debug!("Generating roast for result: {:?}", result.title);
        let prompt = roast_prompt(result);

        let response: CompletionResponse = self.chat_gpt.send_message(&prompt).await?;
        let content = response.message().clone().content;

        log::debug!("Completion: {:?}", content);

        Ok(content.trim().to_string())
    }
}

fn gender_terms(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "guy/man/king/bro",
        Gender::Female => "girl/woman/queen/bestie",
    }
}

pub fn roast_prompt(result: &QuizResult) -> String {
    let gender = result.gender;
    format!(
        "Generate a funny, savage but playful roast for a {} who got \"{}\" on a relationship red flag quiz.
    Their scores: {} red flags, {} yellow flags, {} green flags.

    Style: Gen-Z slang, 2-3 sentences max, use emojis, be funny but not mean-spirited. Think TikTok comment energy.
    Use appropriate terms for {} ({}).
    Examples for males: \"Bro really said 'I'm not like other guys' then proceeded to be exactly like other guys 💀\",
    Examples for females: \"Bestie really said 'I'm not like other girls' then proceeded to be exactly like other girls 💀\"",
        gender,
        result.title,
        result.red_flags,
        result.yellow_flags,
        result.green_flags,
        gender,
        gender_terms(gender)
    )
}
