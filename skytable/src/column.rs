//! Masked columns: values paired with a per-row validity mask.
//!
//! The mask follows the usual catalogue convention: `true` means the entry
//! is missing (a blank cell in the service response, or the result of
//! arithmetic on a missing entry). Arithmetic between columns propagates
//! masks, so a derived magnitude is missing whenever any input was.

/// A column of values with a parallel missing-entry mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedColumn<T> {
    values: Vec<T>,
    mask: Vec<bool>,
}

impl<T: Clone + Default> MaskedColumn<T> {
    /// Build a column where every entry is present.
    pub fn from_values(values: Vec<T>) -> Self {
        let mask = vec![false; values.len()];
        Self { values, mask }
    }

    /// Build a column from values and an explicit mask.
    ///
    /// The two vectors must have the same length.
    pub fn from_parts(values: Vec<T>, mask: Vec<bool>) -> Self {
        assert_eq!(
            values.len(),
            mask.len(),
            "mask length must match value length"
        );
        Self { values, mask }
    }

    /// Build a fully-masked column of the given length.
    pub fn masked(len: usize) -> Self {
        Self {
            values: vec![T::default(); len],
            mask: vec![true; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, or `None` if masked.
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.mask[index] {
            None
        } else {
            Some(&self.values[index])
        }
    }

    pub fn is_masked(&self, index: usize) -> bool {
        self.mask[index]
    }

    /// Set the value at `index` and mark it present.
    pub fn set(&mut self, index: usize, value: T) {
        self.values[index] = value;
        self.mask[index] = false;
    }

    /// Mark the entry at `index` missing.
    pub fn set_masked(&mut self, index: usize) {
        self.mask[index] = true;
    }

    /// Append a present value.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
        self.mask.push(false);
    }

    /// Append a missing entry.
    pub fn push_masked(&mut self) {
        self.values.push(T::default());
        self.mask.push(true);
    }

    /// Append every entry of `other`, preserving its mask.
    pub fn extend_from(&mut self, other: &Self) {
        self.values.extend_from_slice(&other.values);
        self.mask.extend_from_slice(&other.mask);
    }

    /// Raw values, including entries hidden by the mask.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Iterate entries as `Some(&value)` / `None` for masked rows.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.values
            .iter()
            .zip(self.mask.iter())
            .map(|(v, &m)| if m { None } else { Some(v) })
    }
}

impl MaskedColumn<f64> {
    /// Apply `f` to every present value; masked entries stay masked.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        let values = self.values.iter().map(|&v| f(v)).collect();
        Self {
            values,
            mask: self.mask.clone(),
        }
    }

    /// Combine two columns element-wise; a row is masked when either input is.
    pub fn zip_map<F: Fn(f64, f64) -> f64>(&self, other: &Self, f: F) -> Self {
        assert_eq!(
            self.len(),
            other.len(),
            "columns must have the same length"
        );
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        let mask = self
            .mask
            .iter()
            .zip(other.mask.iter())
            .map(|(&a, &b)| a || b)
            .collect();
        Self { values, mask }
    }

    pub fn add(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a - b)
    }

    /// True when the entry at `index` is present and lies strictly inside
    /// the open interval `(lo, hi)`. Masked entries never qualify.
    pub fn in_open_range(&self, index: usize, lo: f64, hi: f64) -> bool {
        match self.get(index) {
            Some(&v) => v > lo && v < hi,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_get_and_mask() {
        let mut col = MaskedColumn::from_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.get(1), Some(&2.0));

        col.set_masked(1);
        assert!(col.is_masked(1));
        assert_eq!(col.get(1), None);

        col.set(1, 5.0);
        assert_eq!(col.get(1), Some(&5.0));
    }

    #[test]
    fn test_fully_masked() {
        let col: MaskedColumn<f64> = MaskedColumn::masked(4);
        assert_eq!(col.len(), 4);
        assert!((0..4).all(|i| col.is_masked(i)));
    }

    #[test]
    fn test_arithmetic_propagates_masks() {
        let a = MaskedColumn::from_parts(vec![1.0, 2.0, 3.0], vec![false, true, false]);
        let b = MaskedColumn::from_parts(vec![10.0, 20.0, 30.0], vec![false, false, true]);

        let sum = a.add(&b);
        assert_relative_eq!(*sum.get(0).unwrap(), 11.0);
        assert!(sum.is_masked(1));
        assert!(sum.is_masked(2));

        let diff = b.sub(&a);
        assert_relative_eq!(*diff.get(0).unwrap(), 9.0);
        assert!(diff.is_masked(1));
    }

    #[test]
    fn test_map_keeps_mask() {
        let a = MaskedColumn::from_parts(vec![1.0, 4.0], vec![true, false]);
        let doubled = a.map(|v| v * 2.0);
        assert!(doubled.is_masked(0));
        assert_relative_eq!(*doubled.get(1).unwrap(), 8.0);
    }

    #[test]
    fn test_in_open_range() {
        let col = MaskedColumn::from_parts(vec![0.5, -0.5, 2.5, 1.0], vec![false, false, false, true]);

        assert!(col.in_open_range(0, -0.5, 2.5));
        // Interval endpoints are excluded
        assert!(!col.in_open_range(1, -0.5, 2.5));
        assert!(!col.in_open_range(2, -0.5, 2.5));
        // Masked entries never qualify
        assert!(!col.in_open_range(3, -0.5, 2.5));
    }

    #[test]
    fn test_push_and_extend() {
        let mut col = MaskedColumn::from_values(vec!["a".to_string()]);
        col.push_masked();
        col.push("b".to_string());

        let mut other = MaskedColumn::from_values(vec!["c".to_string()]);
        other.extend_from(&col);
        assert_eq!(other.len(), 4);
        assert_eq!(other.get(0), Some(&"c".to_string()));
        assert!(other.is_masked(2));
        assert_eq!(other.get(3), Some(&"b".to_string()));
    }

    #[test]
    fn test_iter() {
        let col = MaskedColumn::from_parts(vec![1.0, 2.0], vec![false, true]);
        let entries: Vec<_> = col.iter().collect();
        assert_eq!(entries, vec![Some(&1.0), None]);
    }
}
