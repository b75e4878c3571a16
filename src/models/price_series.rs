use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day as reported by the market data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Exchange-local trading date
    pub date: NaiveDate,

    /// Closing price, `None` when the provider had no usable value for the day
    pub close: Option<f64>,
}

impl PricePoint {
    /// Create a new price point with a known close
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    /// Create a price point whose close is missing
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// Daily closes ordered by strictly increasing date
///
/// The only way to build a series is [`PriceSeries::from_rows`], which sorts
/// and de-duplicates, so consumers can rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    rows: Vec<PricePoint>,
}

impl PriceSeries {
    /// Normalize provider rows: sort by date, keep the last row for a repeated date
    pub fn from_rows(mut rows: Vec<PricePoint>) -> Self {
        // Stable sort keeps provider order among equal dates, so the last one wins below
        rows.sort_by_key(|row| row.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(last) if last.date == row.date => *last = row,
                _ => deduped.push(row),
            }
        }

        Self { rows: deduped }
    }

    /// Keep only rows with `start <= date < end`
    pub fn within(self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            rows: self
                .rows
                .into_iter()
                .filter(|row| row.date >= start && row.date < end)
                .collect(),
        }
    }

    pub fn rows(&self) -> &[PricePoint] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }
}
