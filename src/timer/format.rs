//! Pattern formatting for elapsed time.
//!
//! Upper-case tokens are absolute totals, lower-case tokens are the
//! remainder within the parent unit:
//!
//! | token | meaning                    |
//! |-------|----------------------------|
//! | `D`/`d` | whole days               |
//! | `H`   | total hours                |
//! | `h`   | hours within the day       |
//! | `M`   | total minutes              |
//! | `m`   | minutes within the hour    |
//! | `S`   | total seconds              |
//! | `s`   | seconds within the minute  |
//! | `R`   | total milliseconds         |
//! | `r`   | milliseconds within the second |
//!
//! Every other character is copied through. A token written `n` times in a
//! row is zero-padded to at least `n` digits, and `pad` zero-pads every token.

use crate::core::Millis;

/// Pattern used when none is given.
pub const DEFAULT_PATTERN: &str = "D:H:M:S:R";

/// An elapsed duration split into the units the formatter understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    millis: Millis,
}

impl TimeParts {
    /// Split a millisecond count.
    #[must_use]
    pub const fn new(millis: Millis) -> Self {
        Self { millis }
    }

    /// Value of a single token, or `None` if `token` is not one.
    #[must_use]
    pub const fn token(&self, token: char) -> Option<u64> {
        let total_seconds = self.millis / 1000;
        let total_minutes = total_seconds / 60;
        let total_hours = total_minutes / 60;

        let value = match token {
            'R' => self.millis,
            'r' => self.millis % 1000,
            'S' => total_seconds,
            's' => total_seconds % 60,
            'M' => total_minutes,
            'm' => total_minutes % 60,
            'H' => total_hours,
            'h' => total_hours % 24,
            'D' | 'd' => total_hours / 24,
            _ => return None,
        };
        Some(value)
    }
}

/// Format `millis` with `pattern`, zero-padding every token to `pad` digits.
///
/// ```
/// use memo_grid::timer::format_millis;
///
/// assert_eq!(format_millis(75_000, "M:ss", 0), "1:15");
/// assert_eq!(format_millis(75_000, "M:s", 2), "01:15");
/// ```
#[must_use]
pub fn format_millis(millis: Millis, pattern: &str, pad: usize) -> String {
    let parts = TimeParts::new(millis);
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let Some(value) = parts.token(c) else {
            out.push(c);
            continue;
        };

        let mut repeat = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            repeat += 1;
        }

        let width = if repeat > 1 { repeat.max(pad) } else { pad };
        out.push_str(&format!("{value:0width$}"));
    }

    out
}
