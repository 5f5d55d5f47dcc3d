use log::warn;

// Defaults for parameters
const GROUPS_DEFAULT: usize = 2;
const ROUNDS_DEFAULT: usize = 13;
const SEED_DEFAULT: u64 = 500;

// Valid minimums/left bounds of parameters
const GROUPS_MINIMUM: usize = 1;
const ROUNDS_MINIMUM: usize = 1;

/// A wrapper around the hyper parameters shared by the clustering models.
/// Only use if you want to tune hyper parameters. Otherwise use the
/// `default_hyper_params` constructors of the models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterHyperParams {
    pub(crate) groups: usize,
    pub(crate) rounds: usize,
    pub(crate) seed: u64,
}

/// Builder object to set custom hyper parameters.
#[derive(Debug, Clone, Default)]
pub struct HyperParamBuilder {
    groups: Option<usize>,
    rounds: Option<usize>,
    seed: Option<u64>,
}

impl Default for ClusterHyperParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClusterHyperParams {
    /// Enters the builder pattern, allowing custom hyper parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder() -> HyperParamBuilder {
        HyperParamBuilder::default()
    }

    /// The number of groups to partition the data into.
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// The number of assignment and update rounds of the partitional models.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The seed of the random generator that places the initial centers.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl HyperParamBuilder {
    /// Sets the number of groups, K. For the partitional models this is the number of
    /// centers; for hierarchical clustering it is the number of clusters left once merging
    /// stops. Defaults to 2.
    ///
    /// # Parameters
    /// * groups - the number of groups
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn groups(mut self, groups: usize) -> HyperParamBuilder {
        let valid_groups =
            HyperParamBuilder::validate_input_left_bound(groups, GROUPS_MINIMUM, "groups");
        self.groups = Some(valid_groups);
        self
    }

    /// Sets the number of rounds the partitional models run. Each round assigns every
    /// point to its nearest center and then recalculates the centers. There is no early
    /// stopping. Defaults to 13.
    ///
    /// # Parameters
    /// * rounds - the number of assignment and update rounds
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn rounds(mut self, rounds: usize) -> HyperParamBuilder {
        let valid_rounds =
            HyperParamBuilder::validate_input_left_bound(rounds, ROUNDS_MINIMUM, "rounds");
        self.rounds = Some(valid_rounds);
        self
    }

    /// Sets the seed of the random generator used to place the initial centers. A fresh
    /// generator is created from this seed on every clustering call, so repeated calls on
    /// the same data give the same result. Defaults to 500.
    ///
    /// # Parameters
    /// * seed - the random seed
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn seed(mut self, seed: u64) -> HyperParamBuilder {
        self.seed = Some(seed);
        self
    }

    /// Finishes the building of the hyper parameter configuration. A call to this method is
    /// required to exit the builder pattern and complete the construction of the hyper
    /// parameters.
    ///
    /// # Returns
    /// * The completed hyper parameter configuration.
    pub fn build(self) -> ClusterHyperParams {
        ClusterHyperParams {
            groups: self.groups.unwrap_or(GROUPS_DEFAULT),
            rounds: self.rounds.unwrap_or(ROUNDS_DEFAULT),
            seed: self.seed.unwrap_or(SEED_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: usize, left_bound: usize, param: &str) -> usize {
        if input_param < left_bound {
            warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
