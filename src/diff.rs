/// How one typed character compares against the reference at its position.
#[derive(Clone, Debug, Copy, PartialEq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Positional classification of everything typed so far, plus the untyped
/// remainder of the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Diff {
    pub outcomes: Vec<Outcome>,
    pub pending: String,
}

impl Diff {
    pub fn correct_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Outcome::Correct)
            .count()
    }

    pub fn mistake_count(&self) -> usize {
        self.outcomes.len() - self.correct_count()
    }
}

/// Compares `typed` against `target` position by position. A typed character
/// past the end of the target has nothing to match and classifies Incorrect.
/// No re-alignment: an inserted character marks every later position
/// Incorrect until it is deleted or overwritten.
pub fn classify(target: &str, typed: &str) -> Diff {
    let target_chars: Vec<char> = target.chars().collect();

    let outcomes = typed
        .chars()
        .enumerate()
        .map(|(idx, c)| match target_chars.get(idx) {
            Some(expected) if *expected == c => Outcome::Correct,
            _ => Outcome::Incorrect,
        })
        .collect::<Vec<Outcome>>();

    let pending = if outcomes.len() < target_chars.len() {
        target_chars[outcomes.len()..].iter().collect()
    } else {
        String::new()
    };

    Diff { outcomes, pending }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_typed_is_all_pending() {
        let diff = classify("hello", "");

        assert!(diff.outcomes.is_empty());
        assert_eq!(diff.pending, "hello");
        assert_eq!(diff.correct_count(), 0);
        assert_eq!(diff.mistake_count(), 0);
    }

    #[test]
    fn test_cat_cap_scenario() {
        let diff = classify("cat", "cap");

        assert_eq!(
            diff.outcomes,
            vec![Outcome::Correct, Outcome::Correct, Outcome::Incorrect]
        );
        assert_eq!(diff.correct_count(), 2);
        assert_eq!(diff.mistake_count(), 1);
        assert_eq!(diff.pending, "");
    }

    #[test]
    fn test_pending_is_target_suffix() {
        let diff = classify("hello world", "hellx");

        assert_eq!(diff.outcomes.len(), 5);
        assert_eq!(diff.pending, " world");
    }

    #[test]
    fn test_typed_past_target_is_incorrect() {
        let diff = classify("hi", "hiya");

        assert_eq!(
            diff.outcomes,
            vec![
                Outcome::Correct,
                Outcome::Correct,
                Outcome::Incorrect,
                Outcome::Incorrect
            ]
        );
        assert_eq!(diff.pending, "");
    }

    #[test]
    fn test_insertion_shifts_everything_after() {
        // "xhello" against "hello": the insertion at 0 misaligns every
        // later position, by design.
        let diff = classify("hello", "xhello");

        assert_eq!(diff.correct_count(), 0);
        assert_eq!(diff.mistake_count(), 6);
    }

    #[test]
    fn test_prefix_stability() {
        let target = "the quick brown fox";
        let typed = "the quxck brown";
        let full = classify(target, typed);

        for k in 0..=typed.len() {
            let partial = classify(target, &typed[..k]);
            assert_eq!(partial.outcomes[..], full.outcomes[..k]);
        }
    }

    #[test]
    fn test_multibyte_characters_compare_per_char() {
        let diff = classify("O(n²)", "O(n²)");
        assert_eq!(diff.mistake_count(), 0);
        assert_eq!(diff.outcomes.len(), 5);

        let diff = classify("O(n²)", "O(n2)");
        assert_eq!(diff.mistake_count(), 1);
    }

    #[test]
    fn test_counts_partition_typed_length() {
        let target = "abcdef";
        for typed in ["", "a", "ax", "abcdef", "abcdefgh", "zzzzzz"] {
            let diff = classify(target, typed);
            assert_eq!(
                diff.correct_count() + diff.mistake_count(),
                typed.chars().count()
            );
        }
    }
}
