use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Contiguous slice of term indices owned by one worker.
///
/// Ranges are derived, never transmitted: every worker evaluates the same
/// formula locally from `(rank, workers, term_count)`, which keeps the
/// partition consistent without communication. Any divergence between
/// workers is a protocol bug, not a runtime condition to guard against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRange {
    start: usize,
    end: usize,
}

impl TermRange {
    /// Range owned by `rank` out of `workers` for `term_count` terms.
    ///
    /// Chunks are `ceil(term_count / workers)` wide; workers whose chunk
    /// starts past the last term own an empty range and contribute zero.
    pub fn for_rank(rank: usize, workers: usize, term_count: usize) -> Self {
        debug_assert!(rank < workers, "rank {rank} out of {workers}");
        let per_worker = term_count.div_ceil(workers);
        let start = (rank * per_worker).min(term_count);
        let end = (start + per_worker).min(term_count);
        TermRange { start, end }
    }

    /// First owned index.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last owned index.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of owned terms.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this worker owns no terms.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Iterate the owned indices in ascending order.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for TermRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use crate::params::MAX_WORKERS;

    use super::*;

    fn ranges(workers: usize, term_count: usize) -> Vec<TermRange> {
        (0..workers)
            .map(|rank| TermRange::for_rank(rank, workers, term_count))
            .collect()
    }

    #[test]
    fn test_single_worker_owns_everything() {
        let range = TermRange::for_rank(0, 1, 4);
        assert_eq!(range.indices(), 0..4);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_exact_split_one_term_each() {
        let split = ranges(4, 4);
        for (rank, range) in split.iter().enumerate() {
            assert_eq!(range.indices(), rank..rank + 1);
        }
    }

    #[test]
    fn test_uneven_split_last_chunk_is_short() {
        let split = ranges(2, 5);
        assert_eq!(split[0].indices(), 0..3);
        assert_eq!(split[1].indices(), 3..5);
    }

    #[test]
    fn test_more_workers_than_terms_leaves_empty_ranges() {
        let split = ranges(5, 2);
        assert_eq!(split[0].indices(), 0..1);
        assert_eq!(split[1].indices(), 1..2);
        for range in &split[2..] {
            assert!(range.is_empty());
            assert_eq!(range.len(), 0);
        }
    }

    #[test]
    fn test_display() {
        let range = TermRange::for_rank(1, 2, 5);
        assert_eq!(range.to_string(), "[3, 5)");
    }

    #[quickcheck]
    fn prop_ranges_partition_every_index_exactly_once(
        workers: usize,
        term_count: usize,
    ) -> bool {
        let workers = workers % MAX_WORKERS + 1;
        let term_count = term_count % 10_000;
        let split = ranges(workers, term_count);

        // contiguous and non-overlapping: each range starts where the
        // previous one ended, and the last ends at term_count
        let mut expected_start = 0;
        for range in &split {
            if range.start() != expected_start {
                return false;
            }
            if range.end() < range.start() || range.end() > term_count {
                return false;
            }
            expected_start = range.end();
        }
        expected_start == term_count
    }
}
