//! In-memory provider for pipeline and router tests

use crate::error::{AppError, Result};
use crate::models::PricePoint;
use crate::services::PriceProvider;
use chrono::{Duration, NaiveDate};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct StaticProvider {
    rows: Vec<PricePoint>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(rows: Vec<PricePoint>) -> Self {
        Self {
            rows,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails with an upstream error
    pub fn failing(message: &str) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Consecutive calendar days starting at `start`, one per close
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        Self::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, close)| PricePoint::new(start + Duration::days(i as i64), *close))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn daily_closes(
        &self,
        _symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(AppError::Upstream(message.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}

/// A year of closes that oscillate quietly, with two bursts of large moves
pub fn volatile_year_closes() -> Vec<f64> {
    let mut closes = Vec::with_capacity(250);
    let mut price = 100.0;
    for i in 0..250 {
        let step = if (120..126).contains(&i) || (200..204).contains(&i) {
            if i % 2 == 0 { 0.08 } else { -0.07 }
        } else if i % 2 == 0 {
            0.004
        } else {
            -0.003
        };
        price *= 1.0 + step;
        closes.push(price);
    }
    closes
}
