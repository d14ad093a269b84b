use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use tally_types::DateColumn;

/// Date axis of one loaded guide window.
///
/// One column per calendar day in `[anchor - back_days, anchor + forward_days]`
/// inclusive, strictly ordered, no gaps, no duplicates. Columns are stepped by
/// calendar day, never by fixed 24h durations, so daylight-saving transitions
/// cannot skip or double a day.
///
/// Cheap to rebuild (O(window size)); rebuilt wholesale on every load.
#[derive(Debug, Clone)]
pub struct DateAxis {
    anchor: NaiveDate,
    columns: Vec<DateColumn>,
    ordinals: HashMap<NaiveDate, usize>,
}

impl DateAxis {
    /// Build the window around `anchor`. Windows touching the representable
    /// date boundary are truncated rather than wrapped.
    pub fn build(anchor: NaiveDate, back_days: u32, forward_days: u32) -> Self {
        let len = (back_days as usize) + (forward_days as usize) + 1;
        let start = anchor
            .checked_sub_days(Days::new(u64::from(back_days)))
            .unwrap_or(NaiveDate::MIN);

        let mut columns = Vec::with_capacity(len);
        let mut ordinals = HashMap::with_capacity(len);
        let mut day = start;
        for ordinal in 0..len {
            columns.push(DateColumn { date: day, ordinal });
            ordinals.insert(day, ordinal);
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Self {
            anchor,
            columns,
            ordinals,
        }
    }

    /// Zero-based column position of `date`, if it falls inside the window.
    pub fn ordinal_of(&self, date: NaiveDate) -> Option<usize> {
        self.ordinals.get(&date).copied()
    }

    /// Date at column `ordinal`, if in range.
    pub fn date_at(&self, ordinal: usize) -> Option<NaiveDate> {
        self.columns.get(ordinal).map(|c| c.date)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Ordinal of the anchor date itself (present unless truncated away).
    pub fn anchor_ordinal(&self) -> Option<usize> {
        self.ordinal_of(self.anchor)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.columns.first().map(|c| c.date).unwrap_or(self.anchor)
    }

    pub fn end_date(&self) -> NaiveDate {
        self.columns.last().map(|c| c.date).unwrap_or(self.anchor)
    }

    pub fn columns(&self) -> &[DateColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
