use crate::dates::{self, Instant};

pub const DEFAULT_DDL_GAP_DAYS: i64 = 30;

/// Anything positioned on the timeline by a single date.
pub trait Dated {
    fn date(&self) -> Instant;
}

impl Dated for Instant {
    fn date(&self) -> Instant {
        *self
    }
}

/// Resolves the effective deadline of a program.
///
/// An explicit deadline always wins. Otherwise the deadline falls `gap_days`
/// calendar days after the *last* event in the order supplied, which is not
/// necessarily the latest date: config documents keep their declared order.
pub fn derive_deadline<T: Dated>(
    events: &[T],
    explicit: Option<Instant>,
    gap_days: i64,
) -> Option<Instant> {
    if explicit.is_some() {
        return explicit;
    }
    let last = events.last()?;
    let derived = dates::add_days(last.date(), gap_days);
    if derived.is_none() {
        tracing::debug!(gap_days, "derived deadline is out of the calendar range");
    }
    derived
}
