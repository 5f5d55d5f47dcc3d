use crate::distance::euclidean_distance;
use crate::ClusterError;
use num_traits::Float;

/// Possible methodologies for calculating the center of clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// The elementwise mean of all data points in a cluster.
    /// The output is not guaranteed to be an observed data point.
    Centroid,
    /// The data point in a cluster with the minimum total distance to all other points in
    /// that cluster. The output is always an observed data point.
    Medoid,
}

impl Center {
    /// Calculates the center of every group of a labelling.
    ///
    /// # Parameters
    /// * `data` - the clustered data points.
    /// * `labels` - the group label of each data point, in `0..n_groups`.
    /// * `n_groups` - the number of groups.
    ///
    /// # Returns
    /// * A result that, if successful, contains one entry per group label. Groups without any
    ///   member points are `None`. An error is returned if the number of labels does not
    ///   match the number of data points, or if the points have mismatched dimensions.
    ///
    /// # Examples
    /// ```
    ///use kclust::Center;
    ///
    ///let data = vec![vec![1.0, 1.0], vec![3.0, 3.0], vec![10.0, 10.0]];
    ///let centers = Center::Centroid.calc_centers(&data, &[0, 0, 2], 3).unwrap();
    ///assert_eq!(Some(vec![2.0, 2.0]), centers[0]);
    ///assert_eq!(None, centers[1]);
    /// ```
    pub fn calc_centers<T: Float>(
        &self,
        data: &[Vec<T>],
        labels: &[usize],
        n_groups: usize,
    ) -> Result<Vec<Option<Vec<T>>>, ClusterError> {
        if data.len() != labels.len() {
            return Err(ClusterError::WrongDimension(String::from(
                "The length of the labels must equal the length of the clustered data.",
            )));
        }
        (0..n_groups)
            .map(|group| {
                let members: Vec<&[T]> = data
                    .iter()
                    .zip(labels)
                    .filter(|(_, &label)| label == group)
                    .map(|(datapoint, _)| datapoint.as_slice())
                    .collect();
                if members.is_empty() {
                    return Ok(None);
                }
                let center = match self {
                    Center::Centroid => centroid::<T, _>(&members)?,
                    Center::Medoid => medoid::<T, _>(&members)?,
                };
                Ok(Some(center))
            })
            .collect()
    }
}

/// Calculates the coordinate-wise arithmetic mean of a set of points.
///
/// # Examples
/// ```
///use kclust::centroid;
///
///let center: Vec<f64> = centroid(&[vec![0.0, 2.0], vec![4.0, 4.0]]).unwrap();
///assert_eq!(vec![2.0, 3.0], center);
/// ```
pub fn centroid<T: Float, P: AsRef<[T]>>(points: &[P]) -> Result<Vec<T>, ClusterError> {
    let n_dims = check_uniform::<T, P>(points)?;
    let mut element_wise_sum = vec![T::zero(); n_dims];
    for point in points {
        for (sum, &element) in element_wise_sum.iter_mut().zip(point.as_ref()) {
            *sum = *sum + element;
        }
    }
    let count = T::from(points.len()).unwrap_or(T::one());
    Ok(element_wise_sum.into_iter().map(|sum| sum / count).collect())
}

/// Selects the point of a set with the minimum sum of distances to every point in the set.
/// Ties are won by the point that occurs first.
///
/// # Examples
/// ```
///use kclust::medoid;
///
///let center: Vec<f64> = medoid(&[vec![0.0], vec![1.0], vec![2.0], vec![10.0]]).unwrap();
///assert_eq!(vec![1.0], center);
/// ```
pub fn medoid<T: Float, P: AsRef<[T]>>(points: &[P]) -> Result<Vec<T>, ClusterError> {
    check_uniform::<T, P>(points)?;
    let idx = medoid_index::<T, P>(points);
    Ok(points[idx].as_ref().to_vec())
}

pub(crate) fn medoid_index<T: Float, P: AsRef<[T]>>(points: &[P]) -> usize {
    let mut best_idx = 0;
    let mut best_sum = T::infinity();
    for (i, candidate) in points.iter().enumerate() {
        let sum = points
            .iter()
            .map(|other| euclidean_distance(candidate.as_ref(), other.as_ref()))
            .fold(T::zero(), std::ops::Add::add);
        if sum < best_sum {
            best_sum = sum;
            best_idx = i;
        }
    }
    best_idx
}

fn check_uniform<T, P: AsRef<[T]>>(points: &[P]) -> Result<usize, ClusterError> {
    let first = points.first().ok_or(ClusterError::EmptyGroup)?;
    let n_dims = first.as_ref().len();
    for (n, point) in points.iter().enumerate() {
        let dims_nth = point.as_ref().len();
        if dims_nth != n_dims {
            return Err(ClusterError::WrongDimension(format!(
                "0th point has {n_dims} dimensions, but {n}th has {dims_nth}"
            )));
        }
    }
    Ok(n_dims)
}
