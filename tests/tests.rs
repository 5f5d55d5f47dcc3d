use kclust::{
    hca, hca_dendrogram, init_centers, kmeans, kmedoids, Center, ClusterError,
    ClusterHyperParams, GroupStatistics, Hca, KMeans, KMedoids, Method, Partitional,
};
use num_traits::Float;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[test]
fn kmeans_separates_near_pairs() {
    let data = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ];
    let partition = kmeans(&data, 2).unwrap();
    let labels = partition.labels();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[2], labels[3]);
    assert_ne!(labels[0], labels[2]);

    let centers = partition.centers();
    assert!(centers.contains(&vec![0.0, 0.5]));
    assert!(centers.contains(&vec![10.0, 10.5]));
}

#[test]
fn kmeans_two_blobs() {
    let data = cluster_test_data()[..10].to_vec();
    let hp = ClusterHyperParams::builder().groups(2).build();
    let labels = Partitional::new(&data, hp, KMeans).cluster().unwrap().labels();
    // First five points form one cluster
    assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
    // Next five points are a second cluster
    assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
    assert_ne!(labels[0], labels[5]);
}

#[test]
fn kmeans_outlier_takes_a_center() {
    let data = cluster_test_data();
    let labels = kmeans(&data, 2).unwrap().labels();
    assert_eq!(1, labels[..10].iter().collect::<HashSet<_>>().len());
    assert_ne!(labels[0], labels[10]);
}

#[test]
fn partitional_runs_are_reproducible() {
    let data = cluster_test_data();
    let hp = ClusterHyperParams::builder().groups(3).seed(42).build();
    for method in [Method::KMeans, Method::KMedoids] {
        let first = method.cluster(&data, hp.clone()).unwrap();
        let second = method.cluster(&data, hp.clone()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn labels_are_within_group_range() {
    let data = cluster_test_data();
    for groups in 1..=6 {
        for partition in [kmeans(&data, groups).unwrap(), kmedoids(&data, groups).unwrap()] {
            assert_eq!(data.len(), partition.points().len());
            assert!(partition.labels().iter().all(|&label| label < groups));
        }
    }
}

#[test]
fn output_keeps_input_rows_and_order() {
    let data = cluster_test_data();
    let partition = kmedoids(&data, 3).unwrap();
    let coords: Vec<Vec<f32>> = partition.into_points().into_iter().map(|p| p.coords).collect();
    assert_eq!(data, coords);
}

#[test]
fn kmedoids_centers_are_data_points() {
    let data = cluster_test_data();
    for groups in 1..=5 {
        let partition = kmedoids(&data, groups).unwrap();
        assert!(partition.centers().iter().all(|center| data.contains(center)));
    }
}

#[test]
fn kmedoids_orphaned_center_is_a_data_point() {
    let data = orphan_test_data();
    let hp = ClusterHyperParams::builder().groups(4).build();
    let partition = Partitional::new(&data, hp, KMedoids).cluster().unwrap();
    assert!(partition.centers().iter().all(|center| data.contains(center)));
}

#[test]
fn orphaned_kmeans_center_keeps_its_position() {
    let data = orphan_test_data();
    let hp = ClusterHyperParams::builder().groups(4).rounds(1).build();
    let initial = init_centers(&data, 4, &mut ChaCha8Rng::seed_from_u64(hp.seed())).unwrap();
    let partition = Partitional::new(&data, hp, KMeans).cluster().unwrap();

    let orphans: Vec<usize> = partition
        .group_sizes()
        .iter()
        .enumerate()
        .filter(|(_, &size)| size == 0)
        .map(|(group, _)| group)
        .collect();
    assert!(!orphans.is_empty());
    for group in orphans {
        assert_eq!(initial[group], partition.centers()[group]);
        assert!(partition.centers()[group].iter().all(|c| c.is_finite()));
    }
}

#[test]
fn more_centers_than_points_leaves_orphans() {
    let data = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
    let hp = ClusterHyperParams::builder().groups(3).rounds(1).build();
    let initial = init_centers(&data, 3, &mut ChaCha8Rng::seed_from_u64(hp.seed())).unwrap();
    let partition = Partitional::new(&data, hp, KMeans).cluster().unwrap();
    let sizes = partition.group_sizes();
    assert!(sizes.iter().any(|&size| size == 0));
    for (group, size) in sizes.into_iter().enumerate() {
        if size == 0 {
            assert_eq!(initial[group], partition.centers()[group]);
        }
    }
}

#[test]
fn hca_first_merge_is_global_minimum() {
    let data = vec![vec![0.0], vec![1.0], vec![10.0]];
    let dendrogram = hca_dendrogram(&data).unwrap();
    let first = &dendrogram.merges()[0];
    let merged: HashSet<usize> =
        first.left_members.iter().chain(&first.right_members).copied().collect();
    assert_eq!(HashSet::from([0, 1]), merged);
    assert_eq!(1.0, first.distance);
}

#[test]
fn hca_truncates_at_k() {
    let data = cluster_test_data();
    let partition = hca(&data, 3).unwrap();
    let labels = partition.labels();
    assert_eq!(3, partition.n_groups());
    assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
    assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
    // The outlier is a cluster of its own
    assert_eq!(vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2], labels);
    assert_eq!(vec![5, 5, 1], partition.group_sizes());
}

#[test]
fn hca_dendrogram_is_complete() {
    let data = cluster_test_data();
    let dendrogram = Hca::default_hyper_params(&data).cluster_full_tree().unwrap();
    assert_eq!(data.len() - 1, dendrogram.merges().len());
    assert_eq!(data.len(), *dendrogram.sizes().last().unwrap());
    // Every merge joins two disjoint clusters
    for merge in dendrogram.merges() {
        let left: HashSet<_> = merge.left_members.iter().collect();
        assert!(merge.right_members.iter().all(|member| !left.contains(member)));
    }
}

#[test]
fn hca_centers_are_centroids() {
    let data = cluster_test_data();
    let partition = hca(&data, 2).unwrap();
    let centroids = Center::Centroid
        .calc_centers(&data, &partition.labels(), 2)
        .unwrap();
    let expected: Vec<Vec<f32>> = centroids.into_iter().flatten().collect();
    assert_eq!(expected, partition.centers());
}

#[test]
fn empty_data() {
    let data: Vec<Vec<f32>> = Vec::new();
    assert!(matches!(kmeans(&data, 2), Err(ClusterError::EmptyDataset)));
    assert!(matches!(kmedoids(&data, 2), Err(ClusterError::EmptyDataset)));
    assert!(matches!(hca(&data, 1), Err(ClusterError::EmptyDataset)));
    assert!(matches!(hca_dendrogram(&data), Err(ClusterError::EmptyDataset)));
}

#[test]
fn non_finite_coordinate() {
    let data = vec![vec![1.5, f32::infinity()]];
    let result = kmeans(&data, 1);
    assert!(matches!(result, Err(ClusterError::NonFiniteCoordinate(..))));
}

#[test]
fn mismatched_dimensions() {
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    assert!(matches!(kmeans(&data, 2), Err(ClusterError::WrongDimension(..))));
    assert!(matches!(hca(&data, 2), Err(ClusterError::WrongDimension(..))));
}

#[test]
fn statistics_from_clustering() {
    let data = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ];
    let categories = vec![
        vec!["CL0".to_string()],
        vec!["CL0".to_string()],
        vec!["CL5".to_string()],
        vec!["CL6".to_string()],
    ];
    let partition = hca(&data, 2).unwrap();
    let stats =
        GroupStatistics::new(&partition.labels(), 2, &["Nicotine"], &categories).unwrap();
    assert_eq!(Some(1.0), stats.fraction(0, 0, "CL0"));
    assert_eq!(Some(0.5), stats.fraction(1, 0, "CL6"));
}

fn cluster_test_data() -> Vec<Vec<f32>> {
    vec![
        vec![1.5, 2.2],
        vec![1.0, 1.1],
        vec![1.2, 1.4],
        vec![0.8, 1.0],
        vec![1.1, 1.0],
        vec![3.7, 4.0],
        vec![3.9, 3.9],
        vec![3.6, 4.1],
        vec![3.8, 3.9],
        vec![4.0, 4.1],
        vec![10.0, 10.0],
    ]
}

fn orphan_test_data() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.5, 0.2],
        vec![0.3, 0.9],
        vec![9.0, 9.5],
        vec![9.4, 9.1],
        vec![0.1, 9.8],
    ]
}
