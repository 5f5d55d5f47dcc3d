use crate::ClusterError;
use num_traits::Float;

/// Calculates the Euclidean distance between two points.
///
/// # Parameters
/// * `a` - the first point.
/// * `b` - the second point, which must have the same dimensionality as `a`.
///
/// # Returns
/// * A result that, if successful, contains the distance `sqrt(Σ (b_i - a_i)^2)`. An error is
///   returned if the points have a different number of coordinates.
///
/// # Examples
/// ```
///use kclust::distance;
///
///let dist = distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
///assert_eq!(5.0, dist);
/// ```
pub fn distance<T: Float>(a: &[T], b: &[T]) -> Result<T, ClusterError> {
    if a.len() != b.len() {
        return Err(ClusterError::WrongDimension(format!(
            "Cannot compare a point of {} dimensions with one of {}",
            a.len(),
            b.len()
        )));
    }
    Ok(euclidean_distance(a, b))
}

/// Unchecked variant for use once the whole dataset has been validated.
pub(crate) fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*y) - (*x)) * ((*y) - (*x)))
        .fold(T::zero(), std::ops::Add::add)
        .sqrt()
}

/// Index of the closest center to a point. Ties go to the lowest center index as only a
/// strictly smaller distance replaces the current best.
pub(crate) fn nearest_center<T: Float>(point: &[T], centers: &[Vec<T>]) -> usize {
    let mut closest_dist = T::infinity();
    let mut closest = 0;
    for (i, center) in centers.iter().enumerate() {
        let dist = euclidean_distance(point, center);
        if dist < closest_dist {
            closest_dist = dist;
            closest = i;
        }
    }
    closest
}
