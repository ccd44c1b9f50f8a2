//! Scoring and speed progression.
//!
//! Pure functions over the per-lock line batch and the running line total.

use duotris_types::{BASE_DROP_MS, MIN_DROP_MS, SPEED_STEP_MS, SPEED_THRESHOLDS};

/// Points for a batch of `rows` cleared by a single lock.
///
/// The first row is worth 10, and each further row in the same batch is
/// worth 10 more than the one before it: a triple scores 10 + 20 + 30.
pub fn batch_score(rows: u32) -> u32 {
    (1..=rows).map(|k| 10 * k).sum()
}

/// Garbage lines a batch entitles the clearer to send: the batch size minus
/// one, floored at zero. Singles send nothing.
pub fn garbage_signal(rows: u32) -> u32 {
    rows.saturating_sub(1)
}

/// Drop interval for a running line total.
///
/// Each threshold strictly exceeded by `total_lines` shaves
/// [`SPEED_STEP_MS`] off the base interval; once all nine are passed the
/// interval sits at [`MIN_DROP_MS`] forever.
pub fn drop_interval_ms(total_lines: u32) -> u32 {
    let passed = SPEED_THRESHOLDS
        .iter()
        .filter(|&&threshold| total_lines > threshold)
        .count() as u32;
    (BASE_DROP_MS - SPEED_STEP_MS * passed).max(MIN_DROP_MS)
}
