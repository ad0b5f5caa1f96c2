use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::VALUE_RANGE;

/// The bar heights being sorted. Indices double as bar identifiers.
#[derive(Debug)]
pub struct ArrayModel {
    values: Vec<u32>,
    rng: StdRng,
}

impl ArrayModel {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            values: Vec::new(),
            rng,
        }
    }

    /// Refills the array with `size` independent values from [`VALUE_RANGE`].
    pub fn regenerate(&mut self, size: usize) {
        let rng = &mut self.rng;
        self.values = (0..size).map(|_| rng.gen_range(VALUE_RANGE)).collect();
    }

    pub fn replace(&mut self, values: Vec<u32>) {
        self.values = values;
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [u32] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerate_fills_within_range() {
        let mut model = ArrayModel::new(Some(7));
        model.regenerate(100);
        assert_eq!(model.len(), 100);
        assert!(model.values().iter().all(|v| VALUE_RANGE.contains(v)));
    }

    #[test]
    fn seeded_models_repeat() {
        let mut a = ArrayModel::new(Some(99));
        let mut b = ArrayModel::new(Some(99));
        a.regenerate(30);
        b.regenerate(30);
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn replace_keeps_given_values() {
        let mut model = ArrayModel::new(Some(1));
        model.replace(vec![20, 10, 10]);
        assert_eq!(model.values(), &[20, 10, 10]);
        model.values_mut().swap(0, 2);
        assert_eq!(model.values(), &[10, 10, 20]);
        model.replace(Vec::new());
        assert!(model.is_empty());
    }
}
