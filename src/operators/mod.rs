//! Sparse one- and two-body operator coefficient tables.
//!
//! Both tables map orbital-index tuples to real coefficients. A tuple that has never been set
//! reads back as zero, and no permutational symmetry is imposed: the caller supplies every
//! nonzero permutation that the intended operator requires.

use indexmap::IndexMap;


/// A one-body operator $`\sum_{ab} o_{ab} \hat{a}^{\dagger}_a \hat{a}_b`$ stored as its nonzero
/// coefficients $`o_{ab}`$.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OneBodyOperator {
    values: IndexMap<(usize, usize), f64>,
}

impl OneBodyOperator {
    /// Creates an operator with no nonzero coefficients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coefficient $`o_{ab}`$. Setting a coefficient to zero removes it from the table.
    pub fn set(&mut self, a: usize, b: usize, value: f64) {
        if value == 0.0 {
            self.values.shift_remove(&(a, b));
        } else {
            self.values.insert((a, b), value);
        }
    }

    /// Returns the coefficient $`o_{ab}`$, which is zero if it has never been set.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values.get(&(a, b)).copied().unwrap_or(0.0)
    }

    /// Iterates over the stored nonzero coefficients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }

    /// Returns the number of stored nonzero coefficients.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no nonzero coefficient is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the largest orbital index appearing in any stored coefficient.
    pub fn max_index(&self) -> Option<usize> {
        self.values.keys().map(|&(a, b)| a.max(b)).max()
    }
}

impl FromIterator<((usize, usize), f64)> for OneBodyOperator {
    fn from_iter<I: IntoIterator<Item = ((usize, usize), f64)>>(iter: I) -> Self {
        let mut op = Self::new();
        iter.into_iter()
            .for_each(|((a, b), value)| op.set(a, b, value));
        op
    }
}

/// A two-body operator
/// $`\frac{1}{4} \sum_{abcd} v_{abcd} \hat{a}^{\dagger}_a \hat{a}^{\dagger}_b \hat{a}_c \hat{a}_d`$
/// stored as its nonzero coefficients $`v_{abcd}`$.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TwoBodyOperator {
    values: IndexMap<(usize, usize, usize, usize), f64>,
}

impl TwoBodyOperator {
    /// Creates an operator with no nonzero coefficients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coefficient $`v_{abcd}`$. Setting a coefficient to zero removes it from the
    /// table.
    pub fn set(&mut self, a: usize, b: usize, c: usize, d: usize, value: f64) {
        if value == 0.0 {
            self.values.shift_remove(&(a, b, c, d));
        } else {
            self.values.insert((a, b, c, d), value);
        }
    }

    /// Returns the coefficient $`v_{abcd}`$, which is zero if it has never been set.
    pub fn get(&self, a: usize, b: usize, c: usize, d: usize) -> f64 {
        self.values.get(&(a, b, c, d)).copied().unwrap_or(0.0)
    }

    /// Iterates over the stored nonzero coefficients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize, usize), f64)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }

    /// Returns the number of stored nonzero coefficients.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no nonzero coefficient is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the largest orbital index appearing in any stored coefficient.
    pub fn max_index(&self) -> Option<usize> {
        self.values
            .keys()
            .map(|&(a, b, c, d)| a.max(b).max(c).max(d))
            .max()
    }
}

impl FromIterator<((usize, usize, usize, usize), f64)> for TwoBodyOperator {
    fn from_iter<I: IntoIterator<Item = ((usize, usize, usize, usize), f64)>>(iter: I) -> Self {
        let mut op = Self::new();
        iter.into_iter()
            .for_each(|((a, b, c, d), value)| op.set(a, b, c, d, value));
        op
    }
}
