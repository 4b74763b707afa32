use rand::seq::SliceRandom;
use rand::Rng;

use super::{Question, ShuffledOption, ShuffledQuestion};

/// Draws `count` distinct questions uniformly at random. Asking for more
/// than the pool holds returns the whole pool in random order.
pub fn select_questions<R: Rng + ?Sized>(
    pool: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut shuffled = pool.to_vec();
    // Fisher-Yates over the full pool, then keep the prefix
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Shuffles the options of `question`, tagging each with its position in
/// the canonical question so answers can be scored against it.
pub fn shuffle_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ShuffledQuestion {
    let mut options = question
        .options
        .iter()
        .cloned()
        .enumerate()
        .map(|(original_index, option)| ShuffledOption {
            option,
            original_index,
        })
        .collect::<Vec<_>>();
    options.shuffle(rng);

    ShuffledQuestion {
        id: question.id,
        question: question.question.clone(),
        male_question: question.male_question.clone(),
        female_question: question.female_question.clone(),
        options,
    }
}

pub fn shuffle_all<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<ShuffledQuestion> {
    questions
        .iter()
        .map(|q| shuffle_options(q, &mut *rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{QuestionId, QuizOption};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn question(id: u32, options: usize) -> Question {
        Question {
            id: QuestionId(id),
            question: format!("Question {}", id),
            male_question: None,
            female_question: None,
            options: (0..options)
                .map(|i| QuizOption {
                    text: format!("Option {}", i),
                    red_flags: i as u32,
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn pool(size: u32) -> Vec<Question> {
        (1..=size).map(|id| question(id, 4)).collect()
    }

    #[test]
    fn test_select_returns_distinct_members() {
        let pool = pool(20);
        let mut rng = StdRng::seed_from_u64(7);

        for count in [0, 1, 5, 10, 20] {
            let selected = select_questions(&pool, count, &mut rng);
            assert_eq!(selected.len(), count);

            let ids: HashSet<_> = selected.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), count);
            assert!(selected.iter().all(|q| pool.contains(q)));
        }
    }

    #[test]
    fn test_select_more_than_pool_returns_everything() {
        let pool = pool(6);
        let mut rng = StdRng::seed_from_u64(11);

        let selected = select_questions(&pool, 10, &mut rng);
        assert_eq!(selected.len(), 6);

        let mut ids: Vec<_> = selected.iter().map(|q| q.id.0).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_select_is_reproducible_with_seed() {
        let pool = pool(20);
        let a = select_questions(&pool, 10, &mut StdRng::seed_from_u64(3));
        let b = select_questions(&pool, 10, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_options_and_indices() {
        let q = question(1, 6);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let shuffled = shuffle_options(&q, &mut rng);
            assert_eq!(shuffled.id, q.id);
            assert_eq!(shuffled.options.len(), q.options.len());

            let mut indices: Vec<_> = shuffled.options.iter().map(|o| o.original_index).collect();
            indices.sort();
            assert_eq!(indices, (0..6).collect::<Vec<_>>());

            for o in &shuffled.options {
                assert_eq!(o.option, q.options[o.original_index]);
            }
        }
    }

    #[test]
    fn test_shuffle_eventually_reorders() {
        let q = question(1, 4);
        let mut rng = StdRng::seed_from_u64(1);

        let reordered = (0..50).any(|_| {
            let shuffled = shuffle_options(&q, &mut rng);
            shuffled
                .options
                .iter()
                .enumerate()
                .any(|(position, o)| o.original_index != position)
        });
        assert!(reordered);
    }

    #[test]
    fn test_shuffle_single_option() {
        let q = question(9, 1);
        let shuffled = shuffle_options(&q, &mut StdRng::seed_from_u64(0));
        assert_eq!(shuffled.original_index(0), Some(0));
    }

    #[test]
    fn test_shuffle_all_keeps_question_order() {
        let pool = pool(5);
        let mut rng = StdRng::seed_from_u64(5);

        let shuffled = shuffle_all(&pool, &mut rng);
        let ids: Vec<_> = shuffled.iter().map(|q| q.id).collect();
        let expected: Vec<_> = pool.iter().map(|q| q.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_select_picks_every_question_equally_often() {
        let pool = pool(20);
        let mut rng = StdRng::seed_from_u64(17);
        let mut counts = [0u32; 20];

        // 4000 draws of 5 from 20: each question is expected 1000 times.
        for _ in 0..4000 {
            for q in select_questions(&pool, 5, &mut rng) {
                counts[q.id.0 as usize - 1] += 1;
            }
        }
        for (index, count) in counts.iter().enumerate() {
            assert!(
                (850..=1150).contains(count),
                "question {} picked {} times",
                index + 1,
                count
            );
        }
    }

    #[test]
    fn test_shuffle_puts_every_option_everywhere_equally_often() {
        let q = question(1, 4);
        let mut rng = StdRng::seed_from_u64(23);
        let mut counts = [[0u32; 4]; 4];

        // 4800 shuffles: each (position, option) cell is expected 1200 times.
        for _ in 0..4800 {
            let shuffled = shuffle_options(&q, &mut rng);
            for (position, o) in shuffled.options.iter().enumerate() {
                counts[position][o.original_index] += 1;
            }
        }
        for (position, row) in counts.iter().enumerate() {
            for (original, count) in row.iter().enumerate() {
                assert!(
                    (1050..=1350).contains(count),
                    "option {} shown at position {} {} times",
                    original,
                    position,
                    count
                );
            }
        }
    }

    #[test]
    fn test_shuffle_all_orders_each_question_independently() {
        let pool = vec![question(1, 4), question(2, 4)];
        let mut rng = StdRng::seed_from_u64(29);
        let mut pairs = [[0u32; 4]; 4];
        let mut differed = false;

        // 4800 rounds: each pair of leading options is expected 300 times.
        for _ in 0..4800 {
            let shuffled = shuffle_all(&pool, &mut rng);
            let first: Vec<_> = shuffled[0].options.iter().map(|o| o.original_index).collect();
            let second: Vec<_> = shuffled[1].options.iter().map(|o| o.original_index).collect();
            differed |= first != second;
            pairs[first[0]][second[0]] += 1;
        }

        assert!(differed);
        for (a, row) in pairs.iter().enumerate() {
            for (b, count) in row.iter().enumerate() {
                assert!(
                    (210..=390).contains(count),
                    "leading options ({}, {}) seen {} times",
                    a,
                    b,
                    count
                );
            }
        }
    }
}
