use crate::ClusterError;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>]) -> Self {
        Self { data }
    }

    /// Checks the dataset is non-empty, rectangular and finite. Returns the dimensionality.
    pub(crate) fn validate_input_data(&self) -> Result<usize, ClusterError> {
        if self.data.is_empty() {
            return Err(ClusterError::EmptyDataset);
        }
        let dims_0th = self.data[0].len();
        for (n, datapoint) in self.data.iter().enumerate() {
            if datapoint.iter().any(|element| !element.is_finite()) {
                return Err(ClusterError::NonFiniteCoordinate(format!(
                    "{n}th vector contains non-finite element(s)"
                )));
            }
            let dims_nth = datapoint.len();
            if dims_nth != dims_0th {
                return Err(ClusterError::WrongDimension(format!(
                    "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
        }
        Ok(dims_0th)
    }

    pub(crate) fn validate_groups(&self, groups: usize) -> Result<(), ClusterError> {
        if groups == 0 {
            return Err(ClusterError::InvalidGroups(String::from(
                "at least one group is required",
            )));
        }
        Ok(())
    }

    /// A partition can not have more non-empty groups than there are points.
    pub(crate) fn validate_groups_partition(&self, groups: usize) -> Result<(), ClusterError> {
        self.validate_groups(groups)?;
        let n_samples = self.data.len();
        if groups > n_samples {
            return Err(ClusterError::InvalidGroups(format!(
                "{groups} groups requested for only {n_samples} data points"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_dimensionality() {
        let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert_eq!(Ok(3), DataValidator::new(&data).validate_input_data());
    }

    #[test]
    fn rejects_nan() {
        let data = vec![vec![1.0, f64::NAN]];
        let result = DataValidator::new(&data).validate_input_data();
        assert!(matches!(result, Err(ClusterError::NonFiniteCoordinate(..))));
    }

    #[test]
    fn partition_groups_bounds() {
        let data = vec![vec![1.0], vec![2.0]];
        let validator = DataValidator::new(&data);
        assert!(validator.validate_groups_partition(2).is_ok());
        assert!(matches!(
            validator.validate_groups_partition(3),
            Err(ClusterError::InvalidGroups(..))
        ));
        assert!(matches!(
            validator.validate_groups_partition(0),
            Err(ClusterError::InvalidGroups(..))
        ));
    }
}
