pub mod bubblesort;
pub mod insertionsort;
pub mod mergesort;
pub mod quicksort;
pub mod selectionsort;

pub use bubblesort::BubbleSort;
pub use insertionsort::InsertionSort;
pub use mergesort::MergeSort;
pub use quicksort::QuickSort;
pub use selectionsort::SelectionSort;

use crate::algorithm::AlgorithmId;
use crate::error::Result;

/// Everything an engine may do besides reading `values`. Each call that
/// returns `Err` ends the sort; engines propagate it with `?` and never
/// touch the array afterwards.
pub trait SortTracer {
    /// Two bars are about to be compared.
    fn compare(&mut self, values: &[u32], i: usize, j: usize) -> Result<()>;
    /// `index` holds the partition pivot.
    fn pivot(&mut self, values: &[u32], index: usize) -> Result<()>;
    /// Exchanges `values[i]` and `values[j]`.
    fn swap(&mut self, values: &mut [u32], i: usize, j: usize) -> Result<()>;
    /// Stores a merged value as a visible step.
    fn write(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()>;
    /// Stores a value without a step of its own.
    fn write_quiet(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()>;
    fn progress(&mut self, fraction: f64) -> Result<()>;
}

pub fn run<T: SortTracer>(algorithm: AlgorithmId, values: &mut [u32], tracer: &mut T) -> Result<()> {
    match algorithm {
        AlgorithmId::Bubble => BubbleSort::new(values, tracer).sort(),
        AlgorithmId::Selection => SelectionSort::new(values, tracer).sort(),
        AlgorithmId::Insertion => InsertionSort::new(values, tracer).sort(),
        AlgorithmId::Merge => MergeSort::new(values, tracer).sort(),
        AlgorithmId::Quick => QuickSort::new(values, tracer).sort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{OpCounter, TraceLog};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted_copy(values: &[u32]) -> Vec<u32> {
        let mut expected = values.to_vec();
        expected.sort();
        expected
    }

    #[test]
    fn every_engine_sorts_random_input() {
        let mut rng = StdRng::seed_from_u64(2024);
        for algorithm in AlgorithmId::ALL {
            for len in [0, 1, 2, 3, 7, 16, 33, 64] {
                let input: Vec<u32> = (0..len).map(|_| rng.gen_range(10..40)).collect();
                let mut values = input.clone();
                run(algorithm, &mut values, &mut OpCounter::default()).unwrap();
                assert_eq!(values, sorted_copy(&input), "{} on {:?}", algorithm, input);
            }
        }
    }

    #[test]
    fn every_engine_handles_sorted_reversed_and_flat_input() {
        let ascending: Vec<u32> = (10..40).collect();
        let descending: Vec<u32> = ascending.iter().rev().copied().collect();
        let flat = vec![42; 20];
        for algorithm in AlgorithmId::ALL {
            for input in [&ascending, &descending, &flat] {
                let mut values = input.clone();
                run(algorithm, &mut values, &mut OpCounter::default()).unwrap();
                assert_eq!(values, sorted_copy(input), "{}", algorithm);
            }
        }
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let input: Vec<u32> = (0..40).map(|_| rng.gen_range(10..360)).collect();
        for algorithm in AlgorithmId::ALL {
            let mut log = TraceLog::new();
            let mut values = input.clone();
            run(algorithm, &mut values, &mut log).unwrap();
            let progress = log.progress_history();
            assert!(!progress.is_empty(), "{}", algorithm);
            assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{}", algorithm);
            assert!(progress.iter().all(|p| (0.0..=1.0).contains(p)), "{}", algorithm);
            // selection sort leaves its last position to the sorted sweep
            let last = progress[progress.len() - 1];
            let expected = match algorithm {
                AlgorithmId::Selection => (input.len() - 1) as f64 / input.len() as f64,
                _ => 1.0,
            };
            assert!((last - expected).abs() < 1e-9, "{} ended at {}", algorithm, last);
        }
    }
}
