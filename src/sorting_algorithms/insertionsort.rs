use crate::error::Result;
use crate::sorting_algorithms::SortTracer;

pub struct InsertionSort<'a, T> {
    values: &'a mut [u32],
    tracer: &'a mut T,
}

impl<'a, T: SortTracer> InsertionSort<'a, T> {
    pub fn new(values: &'a mut [u32], tracer: &'a mut T) -> Self {
        InsertionSort { values, tracer }
    }

    pub fn sort(&mut self) -> Result<()> {
        let n = self.values.len();

        for i in 1..n {
            let mut j = i;
            while j > 0 {
                self.tracer.compare(self.values, j - 1, j)?;
                if self.values[j - 1] <= self.values[j] {
                    break;
                }
                self.tracer.swap(self.values, j - 1, j)?;
                j -= 1;
            }
            self.tracer.progress(i as f64 / (n - 1) as f64)?;
        }
        Ok(())
    }
}
