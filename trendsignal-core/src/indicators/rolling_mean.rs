//! Trailing rolling mean with min-periods = 1.
//!
//! Value at index `i` is the mean of `values[max(0, i-window+1)..=i]`.
//! The first `window-1` entries use the shorter history that exists instead of
//! being left empty. NaN observations are skipped; a window with no valid
//! observation yields NaN.
//!
//! Windows up to `EXACT_WINDOW_LIMIT` are summed left to right from their own
//! start at every index, so a constant run averages to exactly its value.
//! Longer windows slide a compensated sum across blocks of at least `window`
//! rows, each block seeded by a fresh sum, which keeps the cost linear in the
//! row count. Both paths split the work the same way sequentially and on the
//! rayon pool, so the two agree bit for bit.

use std::num::NonZeroUsize;
use std::ops::Range;

use rayon::prelude::*;

/// Inputs at least this long are computed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Largest window that is re-summed exactly at every index.
pub const EXACT_WINDOW_LIMIT: usize = 512;

/// Minimum rows per sliding block.
const BLOCK_ROWS: usize = 4096;

#[derive(Debug, Clone)]
pub struct RollingMean {
    window: NonZeroUsize,
    name: String,
}

impl RollingMean {
    pub fn new(window: NonZeroUsize) -> Self {
        Self {
            window,
            name: format!("rolling_mean_{window}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> usize {
        self.window.get()
    }

    pub fn compute(&self, values: &[f64]) -> Vec<f64> {
        if values.len() >= PARALLEL_THRESHOLD {
            self.compute_parallel(values)
        } else {
            self.compute_sequential(values)
        }
    }

    pub fn compute_sequential(&self, values: &[f64]) -> Vec<f64> {
        if self.is_exact() {
            (0..values.len()).map(|i| self.value_at(values, i)).collect()
        } else {
            self.blocks(values.len())
                .flat_map(|block| self.slide(values, block))
                .collect()
        }
    }

    pub fn compute_parallel(&self, values: &[f64]) -> Vec<f64> {
        if self.is_exact() {
            (0..values.len())
                .into_par_iter()
                .map(|i| self.value_at(values, i))
                .collect()
        } else {
            let blocks: Vec<Range<usize>> = self.blocks(values.len()).collect();
            blocks
                .into_par_iter()
                .map(|block| self.slide(values, block))
                .collect::<Vec<_>>()
                .concat()
        }
    }

    fn is_exact(&self) -> bool {
        self.window.get() <= EXACT_WINDOW_LIMIT
    }

    fn value_at(&self, values: &[f64], i: usize) -> f64 {
        let start = (i + 1).saturating_sub(self.window.get());
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[start..=i] {
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    /// Row ranges of the sliding path. A block is never shorter than the
    /// window, so seeding every block costs O(rows) in total.
    fn blocks(&self, len: usize) -> impl Iterator<Item = Range<usize>> {
        let step = self.window.get().max(BLOCK_ROWS);
        (0..len).step_by(step).map(move |start| start..(start + step).min(len))
    }

    fn slide(&self, values: &[f64], block: Range<usize>) -> Vec<f64> {
        let w = self.window.get();
        let mut acc = WindowSum::default();
        // Everything before the block that is still in, or about to leave,
        // the window of its first row.
        for &v in &values[block.start.saturating_sub(w)..block.start] {
            acc.add(v);
        }

        let mut out = Vec::with_capacity(block.len());
        for i in block {
            acc.add(values[i]);
            if i >= w {
                acc.remove(values[i - w]);
            }
            out.push(acc.mean());
        }
        out
    }
}

/// Neumaier-compensated running sum over the non-NaN observations.
#[derive(Debug, Default)]
struct WindowSum {
    sum: f64,
    compensation: f64,
    count: usize,
}

impl WindowSum {
    fn add(&mut self, v: f64) {
        if !v.is_nan() {
            self.accumulate(v);
            self.count += 1;
        }
    }

    fn remove(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count -= 1;
        if self.count == 0 {
            self.sum = 0.0;
            self.compensation = 0.0;
        } else {
            self.accumulate(-v);
        }
    }

    fn accumulate(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            (self.sum + self.compensation) / self.count as f64
        }
    }
}
