use rand::seq::SliceRandom;
use rand::Rng;

use super::content::{Bucket, ResultContent};
use super::pool::QuestionPool;
use super::{Gender, QuizResult, UserAnswers};

const HIGH_RED_PERCENT: u64 = 70;
const MID_RED_PERCENT: u64 = 50;
const BEIGE_PERCENT: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagTally {
    pub red: u32,
    pub yellow: u32,
    pub green: u32,
}

/// Sums the flags of every answered option. Answers pointing at an unknown
/// question or a missing option are skipped.
pub fn tally(pool: &QuestionPool, answers: &UserAnswers) -> FlagTally {
    answers
        .iter()
        .filter_map(|(id, index)| pool.get(id)?.options.get(index))
        .fold(FlagTally::default(), |acc, option| FlagTally {
            red: acc.red + option.red_flags,
            yellow: acc.yellow + option.yellow_flags,
            green: acc.green + option.green_flags,
        })
}

/// First matching rule wins. With no flags at all `green >= 2 * red`
/// holds (0 >= 0), so an empty tally lands in `HighGreen`.
pub fn select_bucket(tally: FlagTally) -> Bucket {
    let red = u64::from(tally.red);
    let green = u64::from(tally.green);
    let total = (red + u64::from(tally.yellow) + green).max(1);

    // pctRed >= p  <=>  100 * red >= p * total
    let red_at_least = |percent: u64| red * 100 >= percent * total;

    if red_at_least(HIGH_RED_PERCENT) {
        Bucket::HighRed
    } else if red_at_least(MID_RED_PERCENT) {
        Bucket::MidRed
    } else if red_at_least(BEIGE_PERCENT) {
        Bucket::Beige
    } else if green >= red * 2 {
        Bucket::HighGreen
    } else {
        Bucket::Yellow
    }
}

pub fn score<R: Rng + ?Sized>(
    pool: &QuestionPool,
    content: &ResultContent,
    answers: &UserAnswers,
    gender: Gender,
    rng: &mut R,
) -> QuizResult {
    let tally = tally(pool, answers);
    let bucket = content.bucket(select_bucket(tally));

    // Title and description are drawn independently
    let title = bucket
        .titles
        .for_gender(gender)
        .choose(&mut *rng)
        .cloned()
        .unwrap_or_default();
    let description = bucket
        .descriptions
        .for_gender(gender)
        .choose(rng)
        .cloned()
        .unwrap_or_default();

    QuizResult {
        red_flags: tally.red,
        yellow_flags: tally.yellow,
        green_flags: tally.green,
        title,
        description,
        gender,
        roast: None,
    }
}
