use crate::distance::euclidean_distance;
use crate::validation::DataValidator;
use crate::{Center, ClusterError, ClusterHyperParams, Method};
use log::debug;
use num_traits::Float;

/// How spread out a clustering is, used to pick the number of groups by looking for the knee
/// of the curve over a range of K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread<T> {
    /// Sum of the pairwise distances between the centroids of the non-empty groups.
    pub inter: T,
    /// Sum of the distances from every point to the centroid of its group.
    pub intra: T,
    /// `inter / intra`, or zero when `intra` is zero.
    pub ratio: T,
}

/// Calculates the spread of a labelling.
///
/// # Parameters
/// * `data` - the clustered data.
/// * `labels` - the group label of every data point.
///
/// # Examples
/// ```
///use kclust::spread;
///
///let data = vec![vec![0.0], vec![2.0], vec![10.0], vec![12.0]];
///let result = spread(&data, &[0, 0, 1, 1]).unwrap();
///assert_eq!(10.0, result.inter);
///assert_eq!(4.0, result.intra);
///assert_eq!(2.5, result.ratio);
/// ```
pub fn spread<T: Float>(data: &[Vec<T>], labels: &[usize]) -> Result<Spread<T>, ClusterError> {
    DataValidator::new(data).validate_input_data()?;
    let n_groups = labels.iter().max().map_or(0, |&max| max + 1);
    let centroids = Center::Centroid.calc_centers(data, labels, n_groups)?;

    let intra = data
        .iter()
        .zip(labels)
        .filter_map(|(datapoint, &label)| {
            centroids[label]
                .as_ref()
                .map(|centroid| euclidean_distance(datapoint, centroid))
        })
        .fold(T::zero(), std::ops::Add::add);

    let present: Vec<&Vec<T>> = centroids.iter().flatten().collect();
    let mut inter = T::zero();
    for (i, a) in present.iter().enumerate() {
        for b in &present[i + 1..] {
            inter = inter + euclidean_distance(a, b);
        }
    }

    let ratio = if intra > T::zero() { inter / intra } else { T::zero() };
    Ok(Spread { inter, intra, ratio })
}

/// Clusters the data once for every K and measures the spread of each result.
///
/// # Parameters
/// * `data` - the data to cluster.
/// * `ks` - the numbers of groups to try.
/// * `method` - the clustering method.
/// * `hyper_params` - hyper parameters for every run; the number of groups is replaced by
///                    each K in turn.
///
/// # Returns
/// * A result that, if successful, contains every K paired with its spread, in the order
///   given.
pub fn knee_sweep<T: Float>(
    data: &[Vec<T>],
    ks: impl IntoIterator<Item = usize>,
    method: Method,
    hyper_params: &ClusterHyperParams,
) -> Result<Vec<(usize, Spread<T>)>, ClusterError> {
    ks.into_iter()
        .map(|k| {
            DataValidator::new(data).validate_groups(k)?;
            let hp = ClusterHyperParams { groups: k, ..hyper_params.clone() };
            let partition = method.cluster(data, hp)?;
            let result = spread(data, &partition.labels())?;
            debug!("{method} with k = {k}: ratio {:?}", result.ratio.to_f64());
            Ok((k, result))
        })
        .collect()
}
