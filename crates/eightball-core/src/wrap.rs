//! Greedy word-wrap for the prompt card.

use crate::constants::{ELLIPSIS, PROMPT_PLACEHOLDER};
use smallvec::SmallVec;

/// Width of a string in the same units as the wrap width (pixels for the
/// canvas painter).
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

impl<F: Fn(&str) -> f32> TextMeasure for F {
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

pub type WrappedLines = SmallVec<[String; 4]>;

/// Wraps `text` into at most `max_lines` lines no wider than `max_width`.
///
/// Words are appended while the candidate line fits; a word that does not
/// fit starts a new line. When the text needs more lines than allowed, the
/// last kept line loses characters from its end until it fits together with
/// a trailing ellipsis. Blank input yields the placeholder line.
pub fn wrap_prompt<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    max_lines: usize,
    measure: &M,
) -> WrappedLines {
    let max_lines = max_lines.max(1);
    let mut lines = WrappedLines::new();
    let mut current = String::new();
    let mut overflowed = false;

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_len = current.len();
        current.push(' ');
        current.push_str(word);
        if measure.measure(&current) <= max_width {
            continue;
        }
        current.truncate(candidate_len);
        lines.push(std::mem::replace(&mut current, word.to_string()));
        if lines.len() == max_lines {
            overflowed = true;
            break;
        }
    }

    if !overflowed && !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(PROMPT_PLACEHOLDER.to_string());
        return lines;
    }
    if overflowed {
        if let Some(last) = lines.last_mut() {
            *last = fit_with_ellipsis(last, max_width, measure);
        }
    }
    lines
}

fn fit_with_ellipsis<M: TextMeasure + ?Sized>(line: &str, max_width: f32, measure: &M) -> String {
    let mut head = line.trim_end().to_string();
    loop {
        let candidate = format!("{head}{ELLIPSIS}");
        if head.is_empty() || measure.measure(&candidate) <= max_width {
            return candidate;
        }
        head.pop();
        let trimmed = head.trim_end().len();
        head.truncate(trimmed);
    }
}

/// Vertical centers for `count` lines stacked around `center_y`.
pub fn line_centers(count: usize, center_y: f32, line_height: f32) -> impl Iterator<Item = f32> {
    let first = center_y - (count.saturating_sub(1) as f32) * line_height * 0.5;
    (0..count).map(move |i| first + i as f32 * line_height)
}
