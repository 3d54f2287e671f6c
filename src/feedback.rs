use crate::error::GameError;

/// Classification of a single guessed letter against the target word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterFeedback {
    /// Right letter, right position.
    Correct,
    /// Letter occurs elsewhere in the target.
    Present,
    /// Letter does not occur (or all occurrences are already accounted for).
    Absent,
}

impl LetterFeedback {
    pub const fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Per-position feedback for one guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback(Vec<LetterFeedback>);

impl Feedback {
    pub fn letters(&self) -> &[LetterFeedback] {
        &self.0
    }

    /// True when every position is `Correct`.
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|f| *f == LetterFeedback::Correct)
    }

    /// Compact `G`/`Y`/`X` pattern, e.g. `GYXXG`.
    pub fn pattern(&self) -> String {
        self.0.iter().map(|f| f.to_char()).collect()
    }
}

/// Classify every letter of `guess` against `target`.
///
/// Exact matches are resolved first and consume their target letter, then the
/// remaining positions claim unconsumed occurrences left to right. A letter is
/// therefore never reported `Correct` or `Present` more times than it occurs
/// in the target.
///
/// # Errors
///
/// Returns [`GameError::InvalidGuessLength`] when the two words differ in
/// length.
pub fn evaluate(guess: &str, target: &str) -> Result<Feedback, GameError> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut remaining: Vec<Option<char>> = target.chars().map(Some).collect();

    if guess_chars.len() != remaining.len() {
        return Err(GameError::InvalidGuessLength {
            expected: remaining.len(),
            actual: guess_chars.len(),
        });
    }

    let mut feedback = vec![LetterFeedback::Absent; guess_chars.len()];

    // First pass: exact matches
    for (i, &g) in guess_chars.iter().enumerate() {
        if remaining[i] == Some(g) {
            feedback[i] = LetterFeedback::Correct;
            remaining[i] = None;
        }
    }

    // Second pass: letters present elsewhere
    for (i, &g) in guess_chars.iter().enumerate() {
        if feedback[i] == LetterFeedback::Correct {
            continue;
        }
        if let Some(pos) = remaining.iter().position(|&c| c == Some(g)) {
            feedback[i] = LetterFeedback::Present;
            remaining[pos] = None;
        }
    }

    Ok(Feedback(feedback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LetterFeedback::{Absent, Correct, Present};

    fn letters(guess: &str, target: &str) -> Vec<LetterFeedback> {
        evaluate(guess, target).unwrap().letters().to_vec()
    }

    #[test]
    fn test_exact_guess_is_all_correct() {
        let feedback = evaluate("chart", "chart").unwrap();
        assert!(feedback.is_solved());
        assert_eq!(feedback.pattern(), "GGGGG");
    }

    #[test]
    fn test_no_shared_letters_is_all_absent() {
        assert_eq!(letters("quiz", "play"), vec![Absent; 4]);
    }

    #[test]
    fn test_present_letters_in_wrong_positions() {
        // "game" vs "mega": no exact matches, every letter present
        assert_eq!(letters("game", "mega"), vec![Present; 4]);
    }

    #[test]
    fn test_repeated_guess_letter_against_single_occurrence() {
        // Target "blood", guess "bobby": only the first b is matched, the single
        // o in the guess claims one of the two o's in the target
        assert_eq!(
            letters("bobby", "blood"),
            vec![Correct, Present, Absent, Absent, Absent]
        );
    }

    #[test]
    fn test_repeated_target_letter_claimed_once() {
        // Target "bobby" has a single o: the first o in "blood" is present,
        // the second one is absent
        assert_eq!(
            letters("blood", "bobby"),
            vec![Correct, Absent, Present, Absent, Absent]
        );
    }

    #[test]
    fn test_exact_match_takes_priority_over_earlier_present() {
        // The trailing 'e' is exact and claims the last 'e' of "there"; only one
        // 'e' is left for the three leading candidates
        assert_eq!(
            letters("eerie", "there"),
            vec![Present, Absent, Present, Absent, Correct]
        );
    }

    #[test]
    fn test_letter_counts_never_exceed_target() {
        let cases = [
            ("eerie", "there"),
            ("bobby", "blood"),
            ("llama", "ladle"),
            ("aaaaa", "abaca"),
            ("speed", "abide"),
        ];
        for (guess, target) in cases {
            let feedback = evaluate(guess, target).unwrap();
            for letter in guess.chars() {
                let credited = guess
                    .chars()
                    .zip(feedback.letters())
                    .filter(|(c, f)| *c == letter && **f != Absent)
                    .count();
                let available = target.chars().filter(|c| *c == letter).count();
                assert!(
                    credited <= available,
                    "{guess} vs {target}: '{letter}' credited {credited} times, occurs {available}"
                );
            }
        }
    }

    #[test]
    fn test_sentinel_like_characters_are_ordinary_letters() {
        assert_eq!(letters("a_c", "abc"), vec![Correct, Absent, Correct]);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert_eq!(
            evaluate("test", "react"),
            Err(GameError::InvalidGuessLength {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_pattern_uses_one_char_per_letter() {
        assert_eq!(evaluate("blood", "bobby").unwrap().pattern(), "GXYXX");
        assert_eq!(Correct.to_char(), 'G');
        assert_eq!(Present.to_char(), 'Y');
        assert_eq!(Absent.to_char(), 'X');
    }
}
