use crate::data_wrappers::{MergeEvent, Partition};
use crate::distance::euclidean_distance;
use crate::distance_matrix::DistanceMatrix;
use crate::validation::DataValidator;
use crate::{Center, ClusterError, ClusterHyperParams};
use log::{debug, info};
use num_traits::Float;

/// Agglomerative hierarchical clustering with average linkage. Every data point starts as
/// its own cluster and the closest pair of clusters is merged repeatedly. When two clusters
/// merge, the distance of the new cluster to any other is the mean of the two old distances.
/// Generic over floating point numeric types.
///
/// Every merge scans all pairs of active clusters, so a full agglomeration is O(n³). This
/// is suited to datasets of up to a few hundred points.
#[derive(Debug, Clone, PartialEq)]
pub struct Hca<'a, T> {
    data: &'a [Vec<T>],
    hp: ClusterHyperParams,
}

impl<'a, T: Float> Hca<'a, T> {
    /// Creates a hierarchical clustering model using a custom hyper parameter configuration.
    /// Only the number of groups is used.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors of floating
    ///            point numbers. The vectors must all be of the same dimensionality and
    ///            contain only finite values.
    /// * `hyper_params` - the hyper parameter configuration.
    pub fn new(data: &'a [Vec<T>], hyper_params: ClusterHyperParams) -> Self {
        Hca { data, hp: hyper_params }
    }

    /// Creates a hierarchical clustering model using the default hyper parameters.
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Self {
        Hca::new(data, ClusterHyperParams::default())
    }

    /// Merges clusters until the configured number of groups remain.
    ///
    /// # Returns
    /// * A result that, if successful, contains the data points in input order, each labelled
    ///   with its final cluster, along with the centroid of every cluster. Labels are numbered
    ///   in order of first appearance in the data. An error is returned if the data is
    ///   invalid or if more groups are requested than there are data points.
    ///
    /// # Examples
    /// ```
    ///use kclust::{ClusterHyperParams, Hca};
    ///
    ///let data = vec![vec![0.0], vec![1.0], vec![10.0]];
    ///let hp = ClusterHyperParams::builder().groups(2).build();
    ///let partition = Hca::new(&data, hp).cluster_until_k().unwrap();
    ///assert_eq!(vec![0, 0, 1], partition.labels());
    ///assert_eq!(vec![vec![0.5], vec![10.0]], partition.centers());
    /// ```
    pub fn cluster_until_k(&self) -> Result<Partition<T>, ClusterError> {
        let validator = DataValidator::new(self.data);
        validator.validate_input_data()?;
        validator.validate_groups_partition(self.hp.groups)?;
        info!(
            "Agglomerating {} points down to {} clusters",
            self.data.len(),
            self.hp.groups
        );

        let mut agglomerator = Agglomerator::new(self.data);
        while agglomerator.n_active() > self.hp.groups {
            if agglomerator.merge_closest().is_none() {
                break;
            }
        }
        let labels = agglomerator.labels();
        let centers = Center::Centroid
            .calc_centers(self.data, &labels, self.hp.groups)?
            .into_iter()
            .flatten()
            .collect();
        Ok(Partition::new(self.data, labels, centers))
    }

    /// Merges clusters until a single cluster remains, recording every merge.
    ///
    /// # Returns
    /// * A result that, if successful, contains the dendrogram: the `n - 1` merges in the
    ///   order they happened. An error is returned if the data is invalid.
    ///
    /// # Examples
    /// ```
    ///use kclust::Hca;
    ///
    ///let data = vec![vec![0.0], vec![1.0], vec![10.0]];
    ///let dendrogram = Hca::default_hyper_params(&data).cluster_full_tree().unwrap();
    ///let first = &dendrogram.merges()[0];
    ///assert_eq!((vec![0], vec![1]), (first.left_members.clone(), first.right_members.clone()));
    ///assert_eq!(vec![2, 3], dendrogram.sizes());
    /// ```
    pub fn cluster_full_tree(&self) -> Result<Dendrogram<T>, ClusterError> {
        DataValidator::new(self.data).validate_input_data()?;
        info!("Building full dendrogram of {} points", self.data.len());

        let mut agglomerator = Agglomerator::new(self.data);
        let mut merges = Vec::with_capacity(self.data.len().saturating_sub(1));
        while let Some(merge) = agglomerator.merge_closest() {
            merges.push(merge);
        }
        Ok(Dendrogram { n_samples: self.data.len(), merges })
    }
}

/// The full merge history of hierarchical clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram<T> {
    n_samples: usize,
    merges: Vec<MergeEvent<T>>,
}

impl<T: Float> Dendrogram<T> {
    /// The merges, in the order they happened. Merge distances are reported as recorded;
    /// callers should not rely on them being sorted.
    pub fn merges(&self) -> &[MergeEvent<T>] {
        &self.merges
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// The size of the merged cluster at every step.
    pub fn sizes(&self) -> Vec<usize> {
        self.merges.iter().map(MergeEvent::size).collect()
    }

    /// Line coordinates for drawing the dendrogram. Every merge becomes a bracket of four
    /// points, from the left cluster up to the merged height and down to the right cluster.
    /// The x coordinate of a cluster is the mean index of its members, and the y coordinate
    /// is its size minus one.
    pub fn segments(&self) -> Vec<[(f64, f64); 4]> {
        self.merges
            .iter()
            .map(|merge| {
                let left_x = mean_index(&merge.left_members);
                let right_x = mean_index(&merge.right_members);
                let left_y = (merge.left_members.len() - 1) as f64;
                let right_y = (merge.right_members.len() - 1) as f64;
                let top = (merge.size() - 1) as f64;
                [(left_x, left_y), (left_x, top), (right_x, top), (right_x, right_y)]
            })
            .collect()
    }

    /// Labels the data by replaying merges until `groups` clusters remain. Gives the same
    /// labels as `Hca::cluster_until_k` with the same number of groups.
    ///
    /// # Examples
    /// ```
    ///use kclust::Hca;
    ///
    ///let data = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
    ///let dendrogram = Hca::default_hyper_params(&data).cluster_full_tree().unwrap();
    ///assert_eq!(vec![0, 0, 1, 1], dendrogram.cut(2).unwrap());
    ///assert_eq!(vec![0, 0, 0, 0], dendrogram.cut(1).unwrap());
    /// ```
    pub fn cut(&self, groups: usize) -> Result<Vec<usize>, ClusterError> {
        if groups == 0 || groups > self.n_samples {
            return Err(ClusterError::InvalidGroups(format!(
                "cannot cut a dendrogram of {} points into {groups} groups",
                self.n_samples
            )));
        }
        let mut active: Vec<(usize, Vec<usize>)> =
            (0..self.n_samples).map(|n| (n, vec![n])).collect();
        for merge in self.merges.iter().take(self.n_samples - groups) {
            active.retain(|(id, _)| *id != merge.left_id && *id != merge.right_id);
            let mut members = merge.left_members.clone();
            members.extend_from_slice(&merge.right_members);
            active.push((merge.merged_id, members));
        }
        Ok(labels_from_clusters(
            self.n_samples,
            active.iter().map(|(_, members)| members.as_slice()),
        ))
    }
}

/// Runs hierarchical clustering until `groups` clusters remain.
pub fn hca<T: Float>(data: &[Vec<T>], groups: usize) -> Result<Partition<T>, ClusterError> {
    DataValidator::new(data).validate_groups(groups)?;
    let hp = ClusterHyperParams::builder().groups(groups).build();
    Hca::new(data, hp).cluster_until_k()
}

/// Runs hierarchical clustering to a single cluster and returns the merge history.
pub fn hca_dendrogram<T: Float>(data: &[Vec<T>]) -> Result<Dendrogram<T>, ClusterError> {
    Hca::default_hyper_params(data).cluster_full_tree()
}

/// The working state of agglomeration: an arena of clusters indexed by id, the ids of the
/// clusters still active, and the distances between active clusters.
pub(crate) struct Agglomerator<T> {
    n_samples: usize,
    members: Vec<Vec<usize>>,
    active: Vec<usize>,
    matrix: DistanceMatrix<T>,
}

impl<T: Float> Agglomerator<T> {
    pub(crate) fn new(data: &[Vec<T>]) -> Self {
        let n_samples = data.len();
        let mut matrix = DistanceMatrix::with_capacity(n_samples);
        for (a, point_a) in data.iter().enumerate() {
            for (b, point_b) in data.iter().enumerate().skip(a + 1) {
                matrix.insert(a, b, euclidean_distance(point_a, point_b));
            }
        }
        Agglomerator {
            n_samples,
            members: (0..n_samples).map(|n| vec![n]).collect(),
            active: (0..n_samples).collect(),
            matrix,
        }
    }

    pub(crate) fn n_active(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn active_clusters(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.active.iter().map(|&id| self.members[id].as_slice())
    }

    /// Scans active pairs in order of activation. Only a strictly smaller distance replaces
    /// the current best, so the first pair found wins ties.
    fn closest_pair(&self) -> Option<(usize, usize, T)> {
        let mut closest: Option<(usize, usize, T)> = None;
        for (i, &a) in self.active.iter().enumerate() {
            for &b in &self.active[i + 1..] {
                let Some(dist) = self.matrix.get(a, b) else {
                    continue;
                };
                match closest {
                    Some((_, _, closest_dist)) if dist >= closest_dist => {}
                    _ => closest = Some((a, b, dist)),
                }
            }
        }
        closest
    }

    /// Merges the closest pair of active clusters. Returns `None` once one cluster remains.
    pub(crate) fn merge_closest(&mut self) -> Option<MergeEvent<T>> {
        let (left_id, right_id, distance) = self.closest_pair()?;
        let merged_id = self.members.len();
        let two = T::one() + T::one();

        let others: Vec<usize> = self
            .active
            .iter()
            .copied()
            .filter(|&id| id != left_id && id != right_id)
            .collect();
        for &other in &others {
            if let (Some(left_dist), Some(right_dist)) =
                (self.matrix.get(left_id, other), self.matrix.get(right_id, other))
            {
                self.matrix.insert(merged_id, other, (left_dist + right_dist) / two);
            }
        }
        self.matrix.remove_cluster(left_id, &self.active);
        self.matrix.remove_cluster(right_id, &self.active);

        let left_members = self.members[left_id].clone();
        let right_members = self.members[right_id].clone();
        let mut merged_members = left_members.clone();
        merged_members.extend_from_slice(&right_members);
        self.members.push(merged_members);

        self.active = others;
        self.active.push(merged_id);
        debug!(
            "Merged clusters {left_id} and {right_id} into {merged_id}, {} clusters remain",
            self.active.len()
        );

        Some(MergeEvent {
            left_id,
            right_id,
            merged_id,
            left_members,
            right_members,
            distance,
        })
    }

    pub(crate) fn labels(&self) -> Vec<usize> {
        labels_from_clusters(self.n_samples, self.active_clusters())
    }
}

/// Labels every point with its cluster, numbering clusters by first appearance in the data.
fn labels_from_clusters<'c>(
    n_samples: usize,
    clusters: impl Iterator<Item = &'c [usize]>,
) -> Vec<usize> {
    let mut cluster_of = vec![0; n_samples];
    for (cluster, members) in clusters.enumerate() {
        for &member in members {
            cluster_of[member] = cluster;
        }
    }
    let mut relabel: Vec<Option<usize>> = vec![None; n_samples];
    let mut next_label = 0;
    cluster_of
        .into_iter()
        .map(|cluster| {
            *relabel[cluster].get_or_insert_with(|| {
                next_label += 1;
                next_label - 1
            })
        })
        .collect()
}

fn mean_index(members: &[usize]) -> f64 {
    members.iter().sum::<usize>() as f64 / members.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![1.5, 2.2],
            vec![1.0, 1.1],
            vec![1.2, 1.4],
            vec![0.8, 1.0],
            vec![3.7, 4.0],
            vec![3.9, 3.9],
            vec![3.6, 4.1],
            vec![10.0, 10.0],
        ]
    }

    fn assert_partition(agglomerator: &Agglomerator<f64>, n_samples: usize) {
        let mut seen = vec![false; n_samples];
        for members in agglomerator.active_clusters() {
            for &member in members {
                assert!(!seen[member], "point {member} is in two clusters");
                seen[member] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "a point is in no cluster");
    }

    #[test]
    fn active_clusters_partition_the_data_after_every_merge() {
        let data = blobs();
        let mut agglomerator = Agglomerator::new(&data);
        assert_partition(&agglomerator, data.len());
        while agglomerator.merge_closest().is_some() {
            assert_partition(&agglomerator, data.len());
            let n = agglomerator.n_active();
            assert_eq!(n * (n - 1) / 2, agglomerator.matrix.len());
        }
        assert_eq!(1, agglomerator.n_active());
    }

    #[test]
    fn merges_the_globally_closest_pair() {
        let data = blobs();
        let mut agglomerator = Agglomerator::new(&data);
        while agglomerator.n_active() > 1 {
            let mut min_dist = f64::INFINITY;
            for (i, &a) in agglomerator.active.iter().enumerate() {
                for &b in &agglomerator.active[i + 1..] {
                    min_dist = min_dist.min(agglomerator.matrix.get(a, b).unwrap());
                }
            }
            let merge = agglomerator.merge_closest().unwrap();
            assert_eq!(min_dist, merge.distance);
        }
    }

    #[test]
    fn average_linkage_distance() {
        let data = vec![vec![0.0], vec![1.0], vec![10.0]];
        let mut agglomerator = Agglomerator::new(&data);
        let first = agglomerator.merge_closest().unwrap();
        assert_eq!((0, 1, 3), (first.left_id, first.right_id, first.merged_id));
        // (10 + 9) / 2
        assert_relative_eq!(9.5, agglomerator.matrix.get(3, 2).unwrap());
        let second = agglomerator.merge_closest().unwrap();
        assert_relative_eq!(9.5, second.distance);
        assert!(agglomerator.merge_closest().is_none());
    }

    #[test]
    fn tie_goes_to_first_scanned_pair() {
        let data = vec![vec![0.0], vec![2.0], vec![4.0]];
        let mut agglomerator = Agglomerator::new(&data);
        let first = agglomerator.merge_closest().unwrap();
        assert_eq!((0, 1), (first.left_id, first.right_id));
    }

    #[test]
    fn labels_by_first_appearance() {
        let clusters: Vec<Vec<usize>> = vec![vec![3, 4], vec![1], vec![0, 2]];
        let labels = labels_from_clusters(5, clusters.iter().map(|c| c.as_slice()));
        assert_eq!(vec![0, 1, 0, 2, 2], labels);
    }

    #[test]
    fn cut_matches_truncated_clustering() {
        let data = blobs();
        let dendrogram = hca_dendrogram(&data).unwrap();
        assert_eq!(data.len() - 1, dendrogram.merges().len());
        for groups in 1..=data.len() {
            let partition = hca(&data, groups).unwrap();
            assert_eq!(partition.labels(), dendrogram.cut(groups).unwrap());
        }
    }

    #[test]
    fn segments_follow_cluster_sizes() {
        let data = vec![vec![0.0], vec![1.0], vec![10.0]];
        let dendrogram = hca_dendrogram(&data).unwrap();
        let segments = dendrogram.segments();
        assert_eq!([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)], segments[0]);
        assert_eq!([(2.0, 0.0), (2.0, 2.0), (0.5, 2.0), (0.5, 1.0)], segments[1]);
    }

    #[test]
    fn too_many_groups_rejected() {
        let data = vec![vec![0.0], vec![1.0]];
        assert!(matches!(hca(&data, 3), Err(ClusterError::InvalidGroups(..))));
        assert!(matches!(hca(&data, 0), Err(ClusterError::InvalidGroups(..))));
        let dendrogram = hca_dendrogram(&data).unwrap();
        assert!(matches!(dendrogram.cut(3), Err(ClusterError::InvalidGroups(..))));
    }

    #[test]
    fn single_point() {
        let data = vec![vec![4.2, 1.0]];
        assert!(hca_dendrogram(&data).unwrap().merges().is_empty());
        assert_eq!(vec![0], hca(&data, 1).unwrap().labels());
    }
}
