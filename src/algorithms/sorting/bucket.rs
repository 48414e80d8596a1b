//! Bucket sort over `[0, 1]`.

use serde::Serialize;

use super::{check_array, SortStep};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::trace::{TraceBuilder, TraceGenerator};

/// Bucket sort snapshot state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketState {
    /// Input values (never modified).
    pub input: Vec<f64>,
    /// Bucket contents at capture time.
    pub buckets: Vec<Vec<f64>>,
    /// Concatenated output so far.
    pub output: Vec<f64>,
    /// Bucket being worked on.
    pub active_bucket: Option<usize>,
    /// Input index being distributed.
    pub input_index: Option<usize>,
}

/// Bucket sort with `n` buckets and insertion sort inside each bucket.
///
/// Value `x` goes to bucket `min(floor(x * n), n - 1)`, so `1.0` lands in the
/// last bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketSort;

struct Buckets<'a> {
    input: &'a [f64],
    buckets: Vec<Vec<f64>>,
    output: Vec<f64>,
}

impl Buckets<'_> {
    fn state(&self, bucket: Option<usize>, input: Option<usize>) -> BucketState {
        BucketState {
            input: self.input.to_vec(),
            buckets: self.buckets.clone(),
            output: self.output.clone(),
            active_bucket: bucket,
            input_index: input,
        }
    }
}

fn bucket_of(x: f64, n: usize) -> usize {
    ((x * n as f64).floor() as usize).min(n - 1)
}

impl TraceGenerator for BucketSort {
    type Input = [f64];
    type Kind = SortStep;
    type State = BucketState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::BucketSort
    }

    fn record(&self, values: &[f64], out: &mut TraceBuilder<SortStep, BucketState>) -> VizResult<()> {
        check_array(values)?;
        if let Some(bad) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(VizError::input(
                "values",
                format!("{bad} is outside [0, 1]"),
            ));
        }
        let n = values.len();
        let mut work = Buckets {
            input: values,
            buckets: vec![Vec::new(); n],
            output: Vec::with_capacity(n),
        };
        out.emit(
            SortStep::Initialize,
            format!("Bucket sort on {n} values with {n} buckets"),
            work.state(None, None),
        )?;

        for (i, &x) in values.iter().enumerate() {
            let b = bucket_of(x, n);
            work.buckets[b].push(x);
            out.emit(
                SortStep::Distribute,
                format!("{x} goes to bucket {b}"),
                work.state(Some(b), Some(i)),
            )?;
        }

        for b in 0..n {
            if work.buckets[b].len() < 2 {
                continue;
            }
            for i in 1..work.buckets[b].len() {
                let mut j = i;
                while j > 0 {
                    let (left, right) = (work.buckets[b][j - 1], work.buckets[b][j]);
                    let greater = left > right;
                    out.emit(
                        SortStep::Compare,
                        format!(
                            "Bucket {b}: compare {left} with {right}{}",
                            if greater { ", out of order" } else { "" }
                        ),
                        work.state(Some(b), None),
                    )?;
                    if !greater {
                        break;
                    }
                    work.buckets[b].swap(j - 1, j);
                    out.emit(
                        SortStep::Swap,
                        format!("Bucket {b}: swap {left} and {right}"),
                        work.state(Some(b), None),
                    )?;
                    j -= 1;
                }
            }
            out.emit(
                SortStep::Sorted,
                format!("Bucket {b} is sorted"),
                work.state(Some(b), None),
            )?;
        }

        for b in 0..n {
            if work.buckets[b].is_empty() {
                continue;
            }
            let drained = std::mem::take(&mut work.buckets[b]);
            let count = drained.len();
            work.output.extend(drained);
            out.emit(
                SortStep::Write,
                format!("Append {count} value(s) from bucket {b}"),
                work.state(Some(b), None),
            )?;
        }

        out.emit(
            SortStep::Complete,
            format!("Sorted: {:?}", work.output),
            work.state(None, None),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_sorts() {
        let input = [0.78, 0.17, 0.39, 0.26, 0.72, 0.94, 0.21, 0.12, 0.23, 0.68];
        let trace = BucketSort.generate(&input).expect("generate");
        let last = trace.last().expect("non-empty").state();
        let mut expected = input.to_vec();
        expected.sort_by(f64::total_cmp);
        assert_eq!(last.output, expected);
        assert!(last.buckets.iter().all(Vec::is_empty));
        assert_eq!(trace.count(SortStep::Distribute), input.len());
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(bucket_of(0.0, 4), 0);
        assert_eq!(bucket_of(0.26, 4), 1);
        assert_eq!(bucket_of(1.0, 4), 3);
    }

    #[test]
    fn test_bucket_rejects_out_of_range() {
        assert!(BucketSort.generate(&[0.5, 1.5]).is_err());
        assert!(BucketSort.generate(&[-0.1]).is_err());
        assert!(BucketSort.generate(&[f64::NAN]).is_err());
    }
}
