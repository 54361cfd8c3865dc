//! Disjoint-set forest for connectivity tracking.

/// A union-find structure over the elements `0..n`, with union by size and
/// path halving.
///
/// Connectivity puzzles rebuild one of these on every validation pass to
/// detect groups of cells that have become isolated.
///
/// # Examples
///
/// ```
/// use gridlace_core::DisjointSet;
///
/// let mut dsf = DisjointSet::new(5);
/// dsf.merge(0, 1);
/// dsf.merge(3, 4);
/// dsf.merge(1, 4);
///
/// assert_eq!(dsf.canonify(0), dsf.canonify(3));
/// assert_eq!(dsf.size(4), 4);
/// assert_eq!(dsf.size(2), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// Creates a forest where every element is its own set.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the forest has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Splits every set back into singletons.
    pub fn reset(&mut self) {
        for (i, p) in self.parent.iter_mut().enumerate() {
            *p = i;
        }
        self.size.fill(1);
    }

    /// Returns the canonical element of the set containing `i`.
    pub fn canonify(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            let grandparent = self.parent[self.parent[i]];
            self.parent[i] = grandparent;
            i = grandparent;
        }
        i
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` if they were already in the same set.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let mut a = self.canonify(a);
        let mut b = self.canonify(b);
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }

    /// Returns the size of the set containing `i`.
    pub fn size(&mut self, i: usize) -> usize {
        let root = self.canonify(i);
        self.size[root]
    }

    /// Returns `true` if `a` and `b` are in the same set.
    pub fn equivalent(&mut self, a: usize, b: usize) -> bool {
        self.canonify(a) == self.canonify(b)
    }
}
