use crate::error::Result;
use crate::sorting_algorithms::SortTracer;

pub struct MergeSort<'a, T> {
    values: &'a mut [u32],
    tracer: &'a mut T,
}

impl<'a, T: SortTracer> MergeSort<'a, T> {
    pub fn new(values: &'a mut [u32], tracer: &'a mut T) -> Self {
        MergeSort { values, tracer }
    }

    pub fn sort(&mut self) -> Result<()> {
        let len = self.values.len();
        if len > 1 {
            self.top_down_split_merge(0, len - 1)?;
        }
        Ok(())
    }

    /// Sorts the inclusive range `begin..=end`.
    fn top_down_split_merge(&mut self, begin: usize, end: usize) -> Result<()> {
        if begin >= end {
            return Ok(()); // Run size == 1, consider it sorted
        }

        let middle = (begin + end) / 2;
        self.top_down_split_merge(begin, middle)?;
        self.top_down_split_merge(middle + 1, end)?;
        self.top_down_merge(begin, middle, end)
    }

    /// Merges `begin..=middle` with `middle+1..=end`. Ties go to the left run,
    /// which keeps the sort stable.
    fn top_down_merge(&mut self, begin: usize, middle: usize, end: usize) -> Result<()> {
        let left = self.values[begin..=middle].to_vec();
        let right = self.values[middle + 1..=end].to_vec();

        let (mut i, mut j) = (0, 0);
        let mut k = begin;
        while i < left.len() && j < right.len() {
            self.tracer.compare(self.values, begin + i, middle + 1 + j)?;
            let next = if left[i] <= right[j] {
                i += 1;
                left[i - 1]
            } else {
                j += 1;
                right[j - 1]
            };
            self.tracer.write(self.values, k, next)?;
            k += 1;
        }

        // whatever is left over is already in order
        for &value in left[i..].iter().chain(&right[j..]) {
            self.tracer.write_quiet(self.values, k, value)?;
            k += 1;
        }

        let done = (end + 1) as f64 / self.values.len() as f64;
        self.tracer.progress(done.min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{OpCounter, TraceEvent, TraceLog};

    #[test]
    fn merge_writes_one_step_per_comparison() {
        let mut values = vec![2, 4, 1, 3];
        let mut log = TraceLog::new();
        MergeSort::new(&mut values, &mut log).sort().unwrap();

        assert_eq!(values, vec![1, 2, 3, 4]);
        let writes = log
            .events
            .iter()
            .filter(|event| matches!(event, TraceEvent::Write(..)))
            .count();
        assert_eq!(writes, log.comparisons());
        assert_eq!(log.swaps(), 0);
    }

    #[test]
    fn final_merge_compares_run_heads() {
        let mut values = vec![2, 4, 1, 3];
        let mut log = TraceLog::new();
        MergeSort::new(&mut values, &mut log).sort().unwrap();

        // [2] [4] and [1] [3] are each merged with one comparison, then
        // [2, 4] meets [1, 3]
        let compares: Vec<TraceEvent> = log
            .events
            .iter()
            .copied()
            .filter(|event| matches!(event, TraceEvent::Compare(..)))
            .collect();
        assert_eq!(
            compares,
            vec![
                TraceEvent::Compare(0, 1),
                TraceEvent::Compare(2, 3),
                TraceEvent::Compare(0, 2),
                TraceEvent::Compare(0, 3),
                TraceEvent::Compare(1, 3),
            ]
        );
        assert_eq!(log.progress_history(), vec![0.5, 1.0, 1.0]);
    }

    #[test]
    fn tie_across_runs_takes_the_left_head_first() {
        let mut values = vec![5, 6, 5, 7];
        let mut log = TraceLog::new();
        MergeSort::new(&mut values, &mut log).sort().unwrap();

        // [5, 6] meets [5, 7]: the left 5 is written first, so the next
        // comparison pits the left 6 against the right 5
        let compares: Vec<TraceEvent> = log
            .events
            .iter()
            .copied()
            .filter(|event| matches!(event, TraceEvent::Compare(..)))
            .skip(2)
            .collect();
        assert_eq!(
            compares,
            vec![
                TraceEvent::Compare(0, 2),
                TraceEvent::Compare(1, 2),
                TraceEvent::Compare(1, 3),
            ]
        );
        assert_eq!(values, vec![5, 5, 6, 7]);
    }

    #[test]
    fn tail_copy_costs_no_steps() {
        let mut values = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut counter = OpCounter::default();
        MergeSort::new(&mut values, &mut counter).sort().unwrap();
        // on sorted input every merge drains the left run first
        assert_eq!(counter.comparisons, 4 + 4 + 4);
        assert_eq!(counter.writes, counter.comparisons);
    }
}
