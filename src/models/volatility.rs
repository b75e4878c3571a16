use chrono::NaiveDate;
use serde::Serialize;

/// Daily return and trailing volatility for one trading date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityPoint {
    pub date: NaiveDate,

    /// Simple return against the previous valid close
    pub daily_return: f64,

    /// Sample standard deviation of the trailing window of returns (always >= 0)
    pub volatility: f64,
}

/// Chronological series in which every row has both return and volatility defined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnVolatilitySeries {
    points: Vec<VolatilityPoint>,
}

impl ReturnVolatilitySeries {
    pub(crate) fn new(points: Vec<VolatilityPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[VolatilityPoint] {
        &self.points
    }

    /// Volatility column in date order
    pub fn volatilities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.volatility).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
