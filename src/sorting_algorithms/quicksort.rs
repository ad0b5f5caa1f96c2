use crate::error::Result;
use crate::sorting_algorithms::SortTracer;

pub struct QuickSort<'a, T> {
    values: &'a mut [u32],
    tracer: &'a mut T,
    settled: usize,
}

impl<'a, T: SortTracer> QuickSort<'a, T> {
    pub fn new(values: &'a mut [u32], tracer: &'a mut T) -> Self {
        QuickSort {
            values,
            tracer,
            settled: 0,
        }
    }

    pub fn sort(&mut self) -> Result<()> {
        self.quick_sort_helper(0, self.values.len() as isize - 1)
    }

    pub fn values(&self) -> &[u32] {
        &*self.values
    }

    fn quick_sort_helper(&mut self, low: isize, high: isize) -> Result<()> {
        if low < high {
            let pi = self.partition(low as usize, high as usize)? as isize;
            self.settle()?;
            self.quick_sort_helper(low, pi - 1)?;
            self.quick_sort_helper(pi + 1, high)?;
        } else if low == high {
            self.settle()?;
        }
        Ok(())
    }

    /// Lomuto partition around `values[high]`. Returns the pivot's final index.
    pub fn partition(&mut self, low: usize, high: usize) -> Result<usize> {
        let pivot = self.values[high];
        self.tracer.pivot(self.values, high)?;

        // next slot for a value smaller than the pivot
        let mut store = low;
        for j in low..high {
            self.tracer.compare(self.values, j, high)?;
            if self.values[j] < pivot {
                if store != j {
                    self.tracer.swap(self.values, store, j)?;
                }
                store += 1;
            }
        }

        if store != high {
            self.tracer.swap(self.values, store, high)?;
        }
        Ok(store)
    }

    /// A position is settled once it holds a pivot or is a range of one.
    fn settle(&mut self) -> Result<()> {
        self.settled += 1;
        self.tracer
            .progress(self.settled as f64 / self.values.len() as f64)
    }
}
