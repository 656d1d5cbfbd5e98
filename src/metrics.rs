use crate::diff::Diff;

/// Performance figures derived from the comparator tally and elapsed time.
/// `Default` carries the values shown before any measurement exists.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub correct: usize,
    pub mistakes: usize,
    pub accuracy_percent: u32,
    pub gross_wpm: u32,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            correct: 0,
            mistakes: 0,
            accuracy_percent: 100,
            gross_wpm: 0,
        }
    }
}

/// Computes the snapshot for a classified diff at `elapsed_secs`.
///
/// Accuracy is 100 for an empty buffer, otherwise correct over typed length,
/// rounded. Gross WPM uses the 5-characters-per-word convention; elapsed time
/// is floored at one second so the figure stays finite right after start.
pub fn compute(diff: &Diff, elapsed_secs: u64) -> MetricsSnapshot {
    let correct = diff.correct_count();
    let mistakes = diff.mistake_count();
    let total_typed = correct + mistakes;

    let accuracy_percent = if total_typed == 0 {
        100
    } else {
        ((correct as f64 / total_typed as f64) * 100.0).round() as u32
    };

    let elapsed = elapsed_secs.max(1) as f64;
    let gross_wpm = ((total_typed as f64 / 5.0) / (elapsed / 60.0)).round() as u32;

    MetricsSnapshot {
        correct,
        mistakes,
        accuracy_percent,
        gross_wpm,
    }
}
