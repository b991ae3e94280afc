//! Builder utilities for configuring tomography runs.
//!
//! Exposes the largest-cluster policy and the validation performed before a
//! [`Tomography`] instance is constructed.

use std::fmt;

use crate::{
    bonds::BondRule,
    error::{LatticeError, TomographyError},
    gap_stats::GapDirections,
    lattice::Boundary,
    tomography::Tomography,
};

/// Linear lattice size used when none is configured.
pub const DEFAULT_SIZE: usize = 64;

/// Boundary conditions used when none are configured.
pub const DEFAULT_BOUNDARIES: &str = "pp";

/// How the largest cluster is treated by the gap statistics.
///
/// # Examples
/// ```
/// use tomography_core::LargestClusterPolicy;
///
/// assert_eq!("exclude".parse::<LargestClusterPolicy>(), Ok(LargestClusterPolicy::Exclude));
/// assert_eq!(LargestClusterPolicy::Include.to_string(), "include");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LargestClusterPolicy {
    /// Keep the largest cluster in the label grid.
    Include,
    /// Give each site of the largest cluster a unique label so it only
    /// contributes zero-size gaps.
    #[default]
    Exclude,
}

impl fmt::Display for LargestClusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

impl std::str::FromStr for LargestClusterPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!(
                "unknown largest-cluster policy `{other}`; expected `include` or `exclude`"
            )),
        }
    }
}

/// Configures and constructs [`Tomography`] instances.
///
/// # Examples
/// ```
/// use tomography_core::{LargestClusterPolicy, TomographyBuilder};
///
/// let tomography = TomographyBuilder::new()
///     .with_size(16)
///     .with_largest_cluster(LargestClusterPolicy::Include)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(tomography.size(), 16);
/// assert_eq!(tomography.largest_cluster_policy(), LargestClusterPolicy::Include);
/// ```
#[derive(Debug, Clone)]
pub struct TomographyBuilder {
    size: usize,
    largest_cluster: LargestClusterPolicy,
    bond_rule: BondRule,
    boundaries: String,
    gap_directions: GapDirections,
}

impl Default for TomographyBuilder {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            largest_cluster: LargestClusterPolicy::default(),
            bond_rule: BondRule::default(),
            boundaries: DEFAULT_BOUNDARIES.to_owned(),
            gap_directions: GapDirections::default(),
        }
    }
}

impl TomographyBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::{LargestClusterPolicy, TomographyBuilder};
    ///
    /// let builder = TomographyBuilder::new();
    /// assert_eq!(builder.size(), 64);
    /// assert_eq!(builder.largest_cluster(), LargestClusterPolicy::Exclude);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the linear lattice size.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Returns the configured linear lattice size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sets how the largest cluster is treated.
    #[must_use]
    pub fn with_largest_cluster(mut self, policy: LargestClusterPolicy) -> Self {
        self.largest_cluster = policy;
        self
    }

    /// Returns the configured largest-cluster policy.
    #[must_use]
    pub fn largest_cluster(&self) -> LargestClusterPolicy {
        self.largest_cluster
    }

    /// Sets the rule used to derive bonds from the occupancy grid.
    #[must_use]
    pub fn with_bond_rule(mut self, rule: BondRule) -> Self {
        self.bond_rule = rule;
        self
    }

    /// Sets the boundary conditions as one `o`/`p` character per axis.
    ///
    /// The string is validated by [`TomographyBuilder::build`].
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: impl Into<String>) -> Self {
        self.boundaries = boundaries.into();
        self
    }

    /// Returns the configured boundary string.
    #[must_use]
    pub fn boundaries(&self) -> &str {
        &self.boundaries
    }

    /// Sets which grid lines the gap statistics scan.
    #[must_use]
    pub fn with_gap_directions(mut self, directions: GapDirections) -> Self {
        self.gap_directions = directions;
        self
    }

    /// Validates the configuration and constructs a [`Tomography`] instance.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroSize`] for a zero size,
    /// [`LatticeError::BoundaryCountMismatch`] unless exactly two boundary
    /// characters are given, and [`LatticeError::InvalidBoundary`] for a
    /// character other than `o` or `p`.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::{LatticeErrorCode, TomographyBuilder};
    ///
    /// let err = TomographyBuilder::new().with_boundaries("px").build().unwrap_err();
    /// assert_eq!(err.lattice_code(), Some(LatticeErrorCode::InvalidBoundary));
    /// ```
    pub fn build(self) -> Result<Tomography, TomographyError> {
        if self.size == 0 {
            return Err(LatticeError::ZeroSize.into());
        }
        let parsed = Boundary::parse_all(&self.boundaries)?;
        let boundaries: [Boundary; 2] = parsed.try_into().map_err(|rejected: Vec<Boundary>| {
            LatticeError::BoundaryCountMismatch {
                expected: 2,
                got: rejected.len(),
            }
        })?;

        Ok(Tomography::new(
            self.size,
            self.largest_cluster,
            self.bond_rule,
            boundaries,
            self.gap_directions,
        ))
    }
}
