//! Sampled (period, balance) series for charting

use serde::{Deserialize, Serialize};

/// One chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: u32,
    pub balance: f64,
}

/// Which periods are kept in the returned series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesSampling {
    /// Every period
    #[default]
    Full,
    /// Every period up to `dense_until`, then every `stride`-th period
    Thinned { dense_until: u32, stride: u32 },
}

impl SeriesSampling {
    /// Five years monthly, then twice a year
    pub fn thinned() -> Self {
        SeriesSampling::Thinned {
            dense_until: 60,
            stride: 6,
        }
    }

    pub fn keeps(&self, period: u32) -> bool {
        match *self {
            SeriesSampling::Full => true,
            SeriesSampling::Thinned { dense_until, stride } => {
                period <= dense_until || period % stride.max(1) == 0
            }
        }
    }
}

/// Collects series points as a trajectory advances.
/// The opening point and the final point are always kept.
#[derive(Debug, Clone)]
pub struct SeriesSampler {
    sampling: SeriesSampling,
    points: Vec<SeriesPoint>,
}

impl SeriesSampler {
    pub fn new(sampling: SeriesSampling, opening_balance: f64) -> Self {
        Self {
            sampling,
            points: vec![SeriesPoint {
                period: 0,
                balance: opening_balance,
            }],
        }
    }

    pub fn record(&mut self, period: u32, balance: f64) {
        if self.sampling.keeps(period) {
            self.points.push(SeriesPoint { period, balance });
        }
    }

    pub fn finish(mut self, final_period: u32, final_balance: f64) -> Vec<SeriesPoint> {
        let has_final = self.points.last().map(|p| p.period == final_period).unwrap_or(false);
        if !has_final {
            self.points.push(SeriesPoint {
                period: final_period,
                balance: final_balance,
            });
        }
        self.points
    }
}
