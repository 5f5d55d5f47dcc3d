use crate::data_wrappers::Partition;
use crate::distance::nearest_center;
use crate::validation::DataValidator;
use crate::{Center, ClusterError, ClusterHyperParams};
use log::{debug, info, warn};
use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The part of a partitional clustering algorithm that differs between K-Means and
/// K-Medoids. The driver alternates the two operations for a fixed number of rounds.
pub trait UpdateStrategy<T: Float> {
    /// Picks the index of the center a point belongs to. Defaults to the nearest center by
    /// Euclidean distance, with ties going to the lowest index.
    fn assign(&self, point: &[T], centers: &[Vec<T>]) -> usize {
        nearest_center(point, centers)
    }

    /// Recalculates the centers from the current labelling.
    ///
    /// # Parameters
    /// * `data` - the data being clustered.
    /// * `labels` - the current group label of every data point.
    /// * `centers` - the centers of the previous round, one per group.
    ///
    /// # Returns
    /// * The new centers, one per group.
    fn update(
        &self,
        data: &[Vec<T>],
        labels: &[usize],
        centers: &[Vec<T>],
    ) -> Result<Vec<Vec<T>>, ClusterError>;
}

/// Moves every center to the mean of its group. A center with no points keeps its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KMeans;

/// Moves every center to the medoid of its group, so centers are always observed points
/// after the first update. A center with no points moves to the data point nearest to it,
/// which leaves a center that is already a data point where it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KMedoids;

impl<T: Float> UpdateStrategy<T> for KMeans {
    fn update(
        &self,
        data: &[Vec<T>],
        labels: &[usize],
        centers: &[Vec<T>],
    ) -> Result<Vec<Vec<T>>, ClusterError> {
        let new_centers = Center::Centroid.calc_centers(data, labels, centers.len())?;
        Ok(new_centers
            .into_iter()
            .zip(centers)
            .enumerate()
            .map(|(group, (new_center, old_center))| match new_center {
                Some(center) => center,
                None => {
                    debug!("Center {group} is orphaned, keeping its position");
                    old_center.clone()
                }
            })
            .collect())
    }
}

impl<T: Float> UpdateStrategy<T> for KMedoids {
    fn update(
        &self,
        data: &[Vec<T>],
        labels: &[usize],
        centers: &[Vec<T>],
    ) -> Result<Vec<Vec<T>>, ClusterError> {
        let new_centers = Center::Medoid.calc_centers(data, labels, centers.len())?;
        Ok(new_centers
            .into_iter()
            .zip(centers)
            .enumerate()
            .map(|(group, (new_center, old_center))| match new_center {
                Some(center) => center,
                None => {
                    debug!("Medoid {group} is orphaned, snapping it to the nearest data point");
                    data[nearest_center(old_center, data)].clone()
                }
            })
            .collect())
    }
}

/// A partitional clustering model: K centers are placed at random within the bounding box
/// of the data, then every round each point is assigned to a center and the centers are
/// recalculated by the update strategy. Generic over floating point numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitional<'a, T, S> {
    data: &'a [Vec<T>],
    hp: ClusterHyperParams,
    strategy: S,
}

impl<'a, T: Float, S: UpdateStrategy<T>> Partitional<'a, T, S> {
    /// Creates a partitional clustering model using a custom hyper parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors of floating
    ///            point numbers. The vectors must all be of the same dimensionality and
    ///            contain only finite values.
    /// * `hyper_params` - the hyper parameter configuration.
    /// * `strategy` - the update strategy, `KMeans` or `KMedoids`.
    ///
    /// # Examples
    /// ```
    ///use kclust::{ClusterHyperParams, KMedoids, Partitional};
    ///
    ///let data: Vec<Vec<f32>> = vec![vec![1.0, 1.1], vec![1.2, 1.0], vec![5.0, 5.1]];
    ///let config = ClusterHyperParams::builder().groups(2).rounds(20).seed(7).build();
    ///let model = Partitional::new(&data, config, KMedoids);
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: ClusterHyperParams, strategy: S) -> Self {
        Partitional { data, hp: hyper_params, strategy }
    }

    /// Creates a partitional clustering model using the default hyper parameters.
    pub fn default_hyper_params(data: &'a [Vec<T>], strategy: S) -> Self {
        Partitional::new(data, ClusterHyperParams::default(), strategy)
    }

    /// Performs clustering on the data passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the data points in input order, each labelled
    ///   with a group in `0..groups`, along with the final centers. An error is returned if
    ///   the data is empty, has mismatched dimensions or non-finite coordinates.
    ///
    /// # Examples
    /// ```
    ///use kclust::{KMeans, Partitional, ClusterHyperParams};
    ///
    ///let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
    ///let hp = ClusterHyperParams::builder().groups(2).build();
    ///let partition = Partitional::new(&data, hp, KMeans).cluster().unwrap();
    ///let labels = partition.labels();
    ///assert_eq!(labels[0], labels[1]);
    ///assert_eq!(labels[2], labels[3]);
    ///assert_ne!(labels[0], labels[2]);
    /// ```
    pub fn cluster(&self) -> Result<Partition<T>, ClusterError> {
        let validator = DataValidator::new(self.data);
        validator.validate_input_data()?;
        validator.validate_groups(self.hp.groups)?;
        if self.hp.groups > self.data.len() {
            warn!(
                "{} groups requested for {} data points, some centers will be orphaned",
                self.hp.groups,
                self.data.len()
            );
        }
        info!(
            "Clustering {} points into {} groups over {} rounds",
            self.data.len(),
            self.hp.groups,
            self.hp.rounds
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.hp.seed);
        let mut centers = init_centers(self.data, self.hp.groups, &mut rng)?;
        let mut labels = vec![0; self.data.len()];

        for round in 0..self.hp.rounds {
            self.assign_all(&centers, &mut labels);
            centers = self.strategy.update(self.data, &labels, &centers)?;
            debug!("Round {round} complete");
        }
        Ok(Partition::new(self.data, labels, centers))
    }

    fn assign_all(&self, centers: &[Vec<T>], labels: &mut [usize]) {
        for (datapoint, label) in self.data.iter().zip(labels.iter_mut()) {
            *label = self.strategy.assign(datapoint, centers);
        }
    }
}

/// Places initial centers uniformly at random within the bounding box of the data. Each
/// coordinate of each center is drawn independently from `[min_j, max_j]` of that dimension.
///
/// # Parameters
/// * `data` - the data to be clustered.
/// * `groups` - the number of centers.
/// * `rng` - the random generator.
///
/// # Returns
/// * A result that, if successful, contains `groups` centers of the data's dimensionality.
///
/// # Examples
/// ```
///use kclust::init_centers;
///use rand::SeedableRng;
///use rand_chacha::ChaCha8Rng;
///
///let data = vec![vec![0.0, 10.0], vec![1.0, 20.0]];
///let mut rng = ChaCha8Rng::seed_from_u64(500);
///let centers = init_centers(&data, 3, &mut rng).unwrap();
///assert_eq!(3, centers.len());
///assert!(centers.iter().all(|c| c[0] >= 0.0 && c[0] <= 1.0 && c[1] >= 10.0 && c[1] <= 20.0));
/// ```
pub fn init_centers<T: Float, R: Rng>(
    data: &[Vec<T>],
    groups: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>, ClusterError> {
    let n_dims = DataValidator::new(data).validate_input_data()?;
    let (minimums, maximums) = bounds(data, n_dims);
    let centers = (0..groups)
        .map(|_| {
            minimums
                .iter()
                .zip(&maximums)
                .map(|(&min, &max)| {
                    let unit = T::from(rng.gen::<f64>()).unwrap_or_else(T::zero);
                    unit * (max - min) + min
                })
                .collect()
        })
        .collect();
    Ok(centers)
}

fn bounds<T: Float>(data: &[Vec<T>], n_dims: usize) -> (Vec<T>, Vec<T>) {
    let mut minimums = vec![T::infinity(); n_dims];
    let mut maximums = vec![T::neg_infinity(); n_dims];
    for datapoint in data {
        for (j, &element) in datapoint.iter().enumerate() {
            minimums[j] = minimums[j].min(element);
            maximums[j] = maximums[j].max(element);
        }
    }
    (minimums, maximums)
}

/// Runs K-Means with default hyper parameters and the given number of groups.
///
/// # Examples
/// ```
///use kclust::kmeans;
///
///let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
///let partition = kmeans(&data, 2).unwrap();
///assert_eq!(2, partition.n_groups());
/// ```
pub fn kmeans<T: Float>(data: &[Vec<T>], groups: usize) -> Result<Partition<T>, ClusterError> {
    DataValidator::new(data).validate_groups(groups)?;
    let hp = ClusterHyperParams::builder().groups(groups).build();
    Partitional::new(data, hp, KMeans).cluster()
}

/// Runs K-Medoids with default hyper parameters and the given number of groups.
pub fn kmedoids<T: Float>(data: &[Vec<T>], groups: usize) -> Result<Partition<T>, ClusterError> {
    DataValidator::new(data).validate_groups(groups)?;
    let hp = ClusterHyperParams::builder().groups(groups).build();
    Partitional::new(data, hp, KMedoids).cluster()
}
