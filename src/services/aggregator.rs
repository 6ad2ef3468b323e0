//! Aggregator service for bucketing issue counts over a time range

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::types::{AggregationResult, Bucket, ReportError, Result, TimeRange};

/// Aggregator for computing per-interval issue counts
pub struct Aggregator;

impl Aggregator {
    /// Split `range` into consecutive buckets of `interval_days` and count each one.
    ///
    /// The final bucket is truncated to `range.end`. The cursor always advances
    /// by the full interval, so the loop runs `ceil((end - start) / interval)`
    /// times. The first `count_fn` error aborts the whole aggregation.
    pub fn compute_buckets<F>(
        range: TimeRange,
        interval_days: u64,
        mut count_fn: F,
    ) -> Result<AggregationResult>
    where
        F: FnMut(DateTime<Utc>, DateTime<Utc>) -> Result<u64>,
    {
        if interval_days == 0 {
            return Err(ReportError::InvalidInterval(interval_days));
        }
        let interval = i64::try_from(interval_days)
            .ok()
            .and_then(TimeDelta::try_days)
            .ok_or(ReportError::InvalidInterval(interval_days))?;

        let mut result = AggregationResult::default();
        let mut cursor = range.start;

        while cursor < range.end {
            // Overflow past the representable range behaves like "past end"
            let next = cursor.checked_add_signed(interval);
            let bucket_end = match next {
                Some(n) if n < range.end => n,
                _ => range.end,
            };

            let count = count_fn(cursor, bucket_end)?;
            debug!(from = %cursor, to = %bucket_end, count, "bucket counted");

            result.max_count = result.max_count.max(count);
            result.buckets.push(Bucket {
                range_start: cursor,
                range_end: bucket_end,
                count,
            });

            match next {
                Some(n) => cursor = n,
                None => break,
            }
        }

        Ok(result)
    }
}
