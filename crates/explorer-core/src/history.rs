//! Synthetic reading generation.
//!
//! Both history seeding and tick advancement draw values the same way: a
//! uniform sample from `[min, max)` rounded to one decimal place. The random
//! source is always passed in so callers can seed it.

use rand::Rng;
use time::{Duration, OffsetDateTime};

use explorer_types::{HISTORY_CAPACITY, Reading};

/// Round to one decimal place, halves away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Draw a value uniformly from `[min, max)` rounded to one decimal.
///
/// The draw never panics: an empty or inverted range simply scales the
/// unit sample by a zero or negative span.
pub fn draw_value<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    let unit: f64 = rng.random();
    round_to_tenth(min + unit * (max - min))
}

/// Generate `count` hourly readings ending at `now`, oldest first.
///
/// Reading `i` (0-based) is stamped `now - (count - 1 - i)` hours, so the
/// last reading carries `now` itself.
///
/// # Example
///
/// ```
/// use explorer_core::history::generate_history;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use time::OffsetDateTime;
///
/// let now = OffsetDateTime::now_utc();
/// let mut rng = StdRng::seed_from_u64(7);
/// let history = generate_history(0.0, 50.0, 24, now, &mut rng);
///
/// assert_eq!(history.len(), 24);
/// assert_eq!(history.last().unwrap().timestamp, now);
/// ```
pub fn generate_history<R: Rng + ?Sized>(
    min: f64,
    max: f64,
    count: usize,
    now: OffsetDateTime,
    rng: &mut R,
) -> Vec<Reading> {
    (0..count)
        .rev()
        .map(|hours_ago| {
            let timestamp = now - Duration::hours(hours_ago as i64);
            Reading::new(timestamp, draw_value(min, max, rng))
        })
        .collect()
}

/// Generate a full-capacity history window.
pub fn generate_window<R: Rng + ?Sized>(
    min: f64,
    max: f64,
    now: OffsetDateTime,
    rng: &mut R,
) -> Vec<Reading> {
    generate_history(min, max, HISTORY_CAPACITY, now, rng)
}

/// Append `reading` to `history`, evicting the oldest entry when the window
/// is already full. Returns a new vector; `history` is left untouched.
#[must_use]
pub fn push_window(history: &[Reading], reading: Reading) -> Vec<Reading> {
    let skip = (history.len() + 1).saturating_sub(HISTORY_CAPACITY);
    let mut next = Vec::with_capacity(HISTORY_CAPACITY);
    next.extend_from_slice(&history[skip..]);
    next.push(reading);
    next
}
