use crate::ClusterError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Per group frequencies of categorical values that were left out of clustering. For every
/// group, every categorical column and every value seen in that column, holds the fraction
/// of the group's points carrying that value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatistics {
    column_names: Vec<String>,
    groups: Vec<Option<GroupFrequencies>>,
}

#[derive(Debug, Clone, PartialEq)]
struct GroupFrequencies {
    size: usize,
    columns: Vec<BTreeMap<String, f64>>,
}

impl GroupStatistics {
    /// Tabulates the categorical values of every group.
    ///
    /// # Parameters
    /// * `labels` - the group label of every data point, as output by clustering.
    /// * `n_groups` - the number of groups.
    /// * `column_names` - the names of the categorical columns.
    /// * `categories` - the categorical values of every data point, in the same order as the
    ///                  labels, one value per column.
    ///
    /// # Returns
    /// * A result that, if successful, contains the statistics. An error is returned if the
    ///   number of rows does not match the number of labels, a row does not have one value
    ///   per column, or a label is not below `n_groups`.
    ///
    /// # Examples
    /// ```
    ///use kclust::GroupStatistics;
    ///
    ///let categories = vec![vec!["CL0"], vec!["CL1"], vec!["CL1"], vec!["CL2"]];
    ///let stats = GroupStatistics::new(&[0, 0, 0, 1], 2, &["Alcohol"], &categories).unwrap();
    ///assert_eq!(Some(2.0 / 3.0), stats.fraction(0, 0, "CL1"));
    ///assert_eq!(Some(0.0), stats.fraction(0, 0, "CL2"));
    ///assert_eq!(Some(1.0), stats.fraction(1, 0, "CL2"));
    /// ```
    pub fn new<S: AsRef<str>, C: AsRef<str>>(
        labels: &[usize],
        n_groups: usize,
        column_names: &[S],
        categories: &[Vec<C>],
    ) -> Result<Self, ClusterError> {
        if labels.len() != categories.len() {
            return Err(ClusterError::WrongDimension(format!(
                "{} labels for {} rows of categories",
                labels.len(),
                categories.len()
            )));
        }
        let n_columns = column_names.len();
        if let Some((n, row)) = categories
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_columns)
        {
            return Err(ClusterError::WrongDimension(format!(
                "{n}th row has {} categories, but there are {n_columns} columns",
                row.len()
            )));
        }
        if let Some(label) = labels.iter().find(|&&label| label >= n_groups) {
            return Err(ClusterError::InvalidGroups(format!(
                "label {label} is out of range for {n_groups} groups"
            )));
        }

        let values: Vec<BTreeSet<&str>> = (0..n_columns)
            .map(|column| categories.iter().map(|row| row[column].as_ref()).collect())
            .collect();

        let mut counts = vec![vec![BTreeMap::<&str, usize>::new(); n_columns]; n_groups];
        let mut sizes = vec![0_usize; n_groups];
        for (&label, row) in labels.iter().zip(categories) {
            sizes[label] += 1;
            for (column, value) in row.iter().enumerate() {
                *counts[label][column].entry(value.as_ref()).or_insert(0) += 1;
            }
        }

        let groups = counts
            .into_iter()
            .zip(sizes)
            .map(|(group_counts, size)| {
                if size == 0 {
                    return None;
                }
                let columns = group_counts
                    .iter()
                    .zip(&values)
                    .map(|(column_counts, column_values)| {
                        column_values
                            .iter()
                            .map(|&value| {
                                let count = column_counts.get(value).copied().unwrap_or(0);
                                (value.to_string(), count as f64 / size as f64)
                            })
                            .collect()
                    })
                    .collect();
                Some(GroupFrequencies { size, columns })
            })
            .collect();

        Ok(GroupStatistics {
            column_names: column_names.iter().map(|name| name.as_ref().to_string()).collect(),
            groups,
        })
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// The number of points in a group.
    pub fn group_size(&self, group: usize) -> usize {
        self.groups
            .get(group)
            .and_then(Option::as_ref)
            .map_or(0, |frequencies| frequencies.size)
    }

    /// The fraction of a group's points with the given value in a column. `None` if the group
    /// is empty or the column or value were never seen.
    pub fn fraction(&self, group: usize, column: usize, value: &str) -> Option<f64> {
        self.groups
            .get(group)?
            .as_ref()?
            .columns
            .get(column)?
            .get(value)
            .copied()
    }
}

impl Display for GroupStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (group, frequencies) in self.groups.iter().enumerate() {
            writeln!(f, "Group {}:", group + 1)?;
            let Some(frequencies) = frequencies else {
                writeln!(f, "\t(empty)")?;
                continue;
            };
            for (name, column) in self.column_names.iter().zip(&frequencies.columns) {
                write!(f, "\t{:<11}", format!("{name}:"))?;
                for (value, fraction) in column {
                    write!(f, "\t{value}: {fraction:.5}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
