use thiserror::Error;

/// Possible errors that arise due to issues with clustering input data or parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    #[error("The dataset provided is empty")]
    EmptyDataset,
    #[error("Input vectors have mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    #[error("Invalid number of groups: {0}")]
    InvalidGroups(String),
    #[error("Cannot calculate the center of an empty group of points")]
    EmptyGroup,
}
