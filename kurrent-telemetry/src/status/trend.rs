//! Bounded, deduplicated, insertion-ordered trend window.

use std::collections::VecDeque;

use kurrent_core::TrendPoint;

/// Rolling window of the most recent N distinct time buckets.
///
/// At most one point per bucket: re-observing a bucket replaces the prior
/// point at the newest position. When the window is full the oldest bucket
/// by insertion order is evicted.
#[derive(Debug)]
pub struct TrendBuffer {
    points: VecDeque<TrendPoint>,
    window: usize,
}

impl TrendBuffer {
    pub fn new(window: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Insert or replace the point for `point.bucket`, then truncate to the
    /// newest `window` points.
    pub fn upsert(&mut self, point: TrendPoint) {
        self.points.retain(|p| p.bucket != point.bucket);
        self.points.push_back(point);
        while self.points.len() > self.window {
            self.points.pop_front();
        }
    }

    /// Points oldest-first.
    pub fn points(&self) -> Vec<TrendPoint> {
        self.points.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
