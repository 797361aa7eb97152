//! Problem definitions for [`super::DpCache`].

/// A dynamic programming problem over indices `I` producing values `K`.
pub trait DpProblem<I, K> {
    /// Indices this index depends on; empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value of `index`, given the values of [`DpProblem::deps`] in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}
