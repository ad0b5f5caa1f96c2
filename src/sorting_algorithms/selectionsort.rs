use crate::error::Result;
use crate::sorting_algorithms::SortTracer;

pub struct SelectionSort<'a, T> {
    values: &'a mut [u32],
    tracer: &'a mut T,
}

impl<'a, T: SortTracer> SelectionSort<'a, T> {
    pub fn new(values: &'a mut [u32], tracer: &'a mut T) -> Self {
        SelectionSort { values, tracer }
    }

    pub fn sort(&mut self) -> Result<()> {
        let n = self.values.len();

        for i in 0..n.saturating_sub(1) {
            let min_idx = self.find_min(i)?;
            if min_idx != i {
                self.tracer.swap(self.values, i, min_idx)?;
            }
            self.tracer.progress((i + 1) as f64 / n as f64)?;
        }
        Ok(())
    }

    /// Index of the smallest value in `from..`, earliest one on ties.
    fn find_min(&mut self, from: usize) -> Result<usize> {
        let mut min_idx = from;
        for j in from + 1..self.values.len() {
            self.tracer.compare(self.values, min_idx, j)?;
            if self.values[j] < self.values[min_idx] {
                min_idx = j;
            }
        }
        Ok(min_idx)
    }
}
