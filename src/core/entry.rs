use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// Open/high/low/close values of a candle entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One segment of a stacked bar in value space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRange {
    pub from: f64,
    pub to: f64,
}

impl StackRange {
    /// Lower bound exclusive, upper bound inclusive.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value > self.from && value <= self.to
    }

    #[must_use]
    pub fn is_larger(self, value: f64) -> bool {
        value > self.to
    }
}

/// Chart-kind specific extras carried by an entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum EntryPayload {
    #[default]
    Plain,
    Candle(Ohlc),
    Bubble {
        size: f64,
    },
    Stacked {
        values: SmallVec<[f64; 4]>,
    },
}

/// A single data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub payload: EntryPayload,
}

impl Entry {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            payload: EntryPayload::Plain,
        }
    }

    /// Candle entry; its y is the midpoint of high and low.
    pub fn candle(x: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        Ok(Self {
            x,
            y: (high + low) / 2.0,
            payload: EntryPayload::Candle(Ohlc {
                open,
                high,
                low,
                close,
            }),
        })
    }

    #[must_use]
    pub fn bubble(x: f64, y: f64, size: f64) -> Self {
        Self {
            x,
            y,
            payload: EntryPayload::Bubble { size },
        }
    }

    /// Stacked bar entry; its y is the sum of all stack values.
    #[must_use]
    pub fn stacked(x: f64, values: &[f64]) -> Self {
        Self {
            x,
            y: values.iter().sum(),
            payload: EntryPayload::Stacked {
                values: SmallVec::from_slice(values),
            },
        }
    }

    /// Builds an entry from a timestamp x and a decimal value.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(value, "value")?,
        ))
    }

    #[must_use]
    pub fn ohlc(&self) -> Option<Ohlc> {
        match self.payload {
            EntryPayload::Candle(ohlc) => Some(ohlc),
            _ => None,
        }
    }

    #[must_use]
    pub fn stack_values(&self) -> Option<&[f64]> {
        match &self.payload {
            EntryPayload::Stacked { values } => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Lowest and highest y this entry occupies.
    #[must_use]
    pub fn y_extent(&self) -> (f64, f64) {
        match &self.payload {
            EntryPayload::Candle(ohlc) => (ohlc.low, ohlc.high),
            EntryPayload::Stacked { values } => {
                let negative: f64 = values.iter().filter(|v| **v < 0.0).sum();
                let positive: f64 = values.iter().filter(|v| **v >= 0.0).sum();
                (negative.min(self.y), positive.max(self.y))
            }
            _ => (self.y, self.y),
        }
    }

    /// Value-space segments of a stacked entry. Negative values stack
    /// downward from zero, positive values upward.
    #[must_use]
    pub fn stack_ranges(&self) -> SmallVec<[StackRange; 4]> {
        let Some(values) = self.stack_values() else {
            return SmallVec::new();
        };

        let negative_sum: f64 = values.iter().filter(|v| **v < 0.0).map(|v| v.abs()).sum();
        let mut neg_remain = -negative_sum;
        let mut pos_remain = 0.0;

        values
            .iter()
            .map(|&value| {
                if value < 0.0 {
                    let range = StackRange {
                        from: neg_remain,
                        to: neg_remain - value,
                    };
                    neg_remain -= value;
                    range
                } else {
                    let range = StackRange {
                        from: pos_remain,
                        to: pos_remain + value,
                    };
                    pos_remain += value;
                    range
                }
            })
            .collect()
    }
}
