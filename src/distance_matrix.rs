use std::collections::HashMap;

/// Symmetric distances between active clusters, keyed by cluster id. Self pairs are never
/// stored.
#[derive(Debug, Clone, Default)]
pub(crate) struct DistanceMatrix<T> {
    distances: HashMap<(usize, usize), T>,
}

impl<T: Copy> DistanceMatrix<T> {
    pub(crate) fn with_capacity(n_clusters: usize) -> Self {
        let n_pairs = n_clusters * n_clusters.saturating_sub(1) / 2;
        DistanceMatrix { distances: HashMap::with_capacity(n_pairs) }
    }

    pub(crate) fn insert(&mut self, a: usize, b: usize, distance: T) {
        debug_assert_ne!(a, b, "no self distances");
        self.distances.insert(Self::key(a, b), distance);
    }

    pub(crate) fn get(&self, a: usize, b: usize) -> Option<T> {
        self.distances.get(&Self::key(a, b)).copied()
    }

    /// Drops every entry between `id` and the given clusters.
    pub(crate) fn remove_cluster(&mut self, id: usize, others: &[usize]) {
        for &other in others {
            if other != id {
                self.distances.remove(&Self::key(id, other));
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.distances.len()
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
