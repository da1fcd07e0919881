use super::text::TextStats;

pub const BASE_EXPECTED_WORDS: f64 = 100.0;
pub const EXPECTED_WORDS_PER_COMPLEXITY: f64 = 150.0;

const MIN_PROMPT_COMPLEXITY: f64 = 0.3;
const MAX_PROMPT_COMPLEXITY: f64 = 1.0;
const LONG_PROMPT_WORDS: usize = 20;
const MULTI_QUESTION: usize = 1;
const LONG_WORD_CHARS: usize = 8;
const MANY_LONG_WORDS: usize = 3;

/// How well the response length fits what the prompt asks for.
pub fn length_appropriateness_score(response: &TextStats, prompt: Option<&TextStats>) -> f64 {
    match prompt {
        Some(prompt) if prompt.word_count > 0 => {
            let expected = expected_length(prompt);
            match response.word_count as f64 / expected {
                r if (0.7..=1.3).contains(&r) => 1.0,
                r if (0.5..=1.8).contains(&r) => 0.7,
                _ => 0.4,
            }
        }
        _ => match response.word_count {
            0..=19 => 0.3,
            501.. => 0.6,
            _ => 0.8,
        },
    }
}

pub fn expected_length(prompt: &TextStats) -> f64 {
    BASE_EXPECTED_WORDS + prompt_complexity(prompt) * EXPECTED_WORDS_PER_COMPLEXITY
}

pub fn prompt_complexity(prompt: &TextStats) -> f64 {
    let mut complexity = 0.0;

    if prompt.word_count > LONG_PROMPT_WORDS {
        complexity += 0.3;
    }

    let questions = prompt.text.matches('?').count();
    if questions > MULTI_QUESTION {
        complexity += 0.3;
    }

    let long_words = prompt
        .words
        .iter()
        .filter(|w| w.chars().count() >= LONG_WORD_CHARS)
        .count();
    if long_words > MANY_LONG_WORDS {
        complexity += 0.4;
    }

    f64::clamp(complexity, MIN_PROMPT_COMPLEXITY, MAX_PROMPT_COMPLEXITY)
}
