use crate::error::Result;
use crate::sorting_algorithms::SortTracer;

pub struct BubbleSort<'a, T> {
    values: &'a mut [u32],
    tracer: &'a mut T,
}

impl<'a, T: SortTracer> BubbleSort<'a, T> {
    pub fn new(values: &'a mut [u32], tracer: &'a mut T) -> Self {
        BubbleSort { values, tracer }
    }

    /// Full adjacent passes with no early exit, so an already sorted input
    /// still costs n(n-1)/2 comparisons.
    pub fn sort(&mut self) -> Result<()> {
        let n = self.values.len();
        let total = n * n.saturating_sub(1) / 2;
        let mut completed = 0;

        for i in 0..n.saturating_sub(1) {
            for j in 0..n - i - 1 {
                self.tracer.compare(self.values, j, j + 1)?;
                if self.values[j] > self.values[j + 1] {
                    self.tracer.swap(self.values, j, j + 1)?;
                }
                completed += 1;
                self.tracer.progress(completed as f64 / total as f64)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{TraceEvent, TraceLog};

    #[test]
    fn first_pass_of_the_textbook_example() {
        let mut values = vec![5, 3, 8, 1];
        let mut log = TraceLog::new();
        BubbleSort::new(&mut values, &mut log).sort().unwrap();

        let first_pass: Vec<TraceEvent> = log
            .events
            .iter()
            .copied()
            .filter(|event| !matches!(event, TraceEvent::Progress(_)))
            .take(5)
            .collect();
        assert_eq!(
            first_pass,
            vec![
                TraceEvent::Compare(0, 1),
                TraceEvent::Swap(0, 1),
                TraceEvent::Compare(1, 2),
                TraceEvent::Compare(2, 3),
                TraceEvent::Swap(2, 3),
            ]
        );

        let mut after_pass = vec![5, 3, 8, 1];
        for event in &first_pass {
            if let TraceEvent::Swap(i, j) = event {
                after_pass.swap(*i, *j);
            }
        }
        assert_eq!(after_pass, vec![3, 5, 1, 8]);

        assert_eq!(values, vec![1, 3, 5, 8]);
        assert_eq!(log.comparisons(), 6);
        assert_eq!(log.swaps(), 4);
    }

    #[test]
    fn sorted_input_still_compares_every_pair() {
        let mut values: Vec<u32> = (1..=10).collect();
        let mut log = TraceLog::new();
        BubbleSort::new(&mut values, &mut log).sort().unwrap();
        assert_eq!(log.comparisons(), 45);
        assert_eq!(log.swaps(), 0);
    }
}
