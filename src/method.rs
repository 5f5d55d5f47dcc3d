use crate::data_wrappers::Partition;
use crate::{ClusterError, ClusterHyperParams, Hca, KMeans, KMedoids, Partitional};
use num_traits::Float;
use std::fmt::{Display, Formatter};

/// The clustering algorithms that partition data into a fixed number of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    KMeans,
    KMedoids,
    Hca,
}

impl Method {
    /// Clusters the data with this method.
    ///
    /// # Examples
    /// ```
    ///use kclust::{ClusterHyperParams, Method};
    ///
    ///let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
    ///let hp = ClusterHyperParams::builder().groups(2).build();
    ///for method in [Method::KMeans, Method::KMedoids, Method::Hca] {
    ///    let labels = method.cluster(&data, hp.clone()).unwrap().labels();
    ///    assert_eq!(labels[0], labels[1]);
    ///    assert_ne!(labels[1], labels[2]);
    ///}
    /// ```
    pub fn cluster<T: Float>(
        &self,
        data: &[Vec<T>],
        hyper_params: ClusterHyperParams,
    ) -> Result<Partition<T>, ClusterError> {
        match self {
            Method::KMeans => Partitional::new(data, hyper_params, KMeans).cluster(),
            Method::KMedoids => Partitional::new(data, hyper_params, KMedoids).cluster(),
            Method::Hca => Hca::new(data, hyper_params).cluster_until_k(),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::KMeans => "kmeans",
            Method::KMedoids => "kmedoids",
            Method::Hca => "hca",
        };
        write!(f, "{name}")
    }
}
