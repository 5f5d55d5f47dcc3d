/// A data point and the label of the group it was assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledPoint<T> {
    /// The coordinates of the point, exactly as passed in.
    pub coords: Vec<T>,
    /// The group label, in `0..n_groups`.
    pub label: usize,
}

/// The output of a clustering run that partitions the data into a fixed number of groups.
/// The points keep the order of the input data, so they can be matched back to the
/// original records by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    points: Vec<LabelledPoint<T>>,
    centers: Vec<Vec<T>>,
}

impl<T: Clone> Partition<T> {
    pub(crate) fn new(data: &[Vec<T>], labels: Vec<usize>, centers: Vec<Vec<T>>) -> Self {
        let points = data
            .iter()
            .zip(labels)
            .map(|(datapoint, label)| LabelledPoint { coords: datapoint.clone(), label })
            .collect();
        Partition { points, centers }
    }

    /// The labelled data points, in input order.
    pub fn points(&self) -> &[LabelledPoint<T>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LabelledPoint<T>> {
        self.points
    }

    /// The center of every group, indexed by label. For K-Means and K-Medoids these are the
    /// centers after the final update; for hierarchical clustering they are the centroids of
    /// the final clusters.
    pub fn centers(&self) -> &[Vec<T>] {
        &self.centers
    }

    /// The group labels, in input order.
    pub fn labels(&self) -> Vec<usize> {
        self.points.iter().map(|point| point.label).collect()
    }

    pub fn n_groups(&self) -> usize {
        self.centers.len()
    }

    /// Indices of the data points assigned to a group.
    pub fn members(&self, group: usize) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| point.label == group)
            .map(|(n, _)| n)
            .collect()
    }

    /// The number of points in every group, indexed by label. Orphaned groups have size 0.
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_groups()];
        for point in &self.points {
            sizes[point.label] += 1;
        }
        sizes
    }
}

/// A single merge of hierarchical clustering. Clusters are identified by stable ids: the
/// singleton cluster of the nth data point has id `n`, and the cluster made by the mth
/// merge has id `n_samples + m`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent<T> {
    pub left_id: usize,
    pub right_id: usize,
    pub merged_id: usize,
    /// Indices of the data points in the left cluster.
    pub left_members: Vec<usize>,
    /// Indices of the data points in the right cluster.
    pub right_members: Vec<usize>,
    /// The average linkage distance between the two clusters when they were merged.
    pub distance: T,
}

impl<T> MergeEvent<T> {
    /// The number of data points in the merged cluster.
    pub fn size(&self) -> usize {
        self.left_members.len() + self.right_members.len()
    }
}
