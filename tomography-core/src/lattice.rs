//! Hypercubic lattice geometry.
//!
//! A [`Lattice`] fixes the per-axis sizes (slowest axis first), the boundary
//! condition of every axis, and the row-major strides used to flatten
//! coordinates. [`Odometer`] walks every coordinate tuple in lexicographic
//! order without recursion.

use std::fmt;

use crate::error::{LatticeError, Result};

/// Boundary condition applied along one lattice axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The last site along the axis does not connect to the first.
    Open,
    /// The last site along the axis connects back to the first.
    Periodic,
}

impl Boundary {
    /// Parses one boundary condition per character (`o` or `p`), slowest
    /// axis first.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidBoundary`] for any other character.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::Boundary;
    ///
    /// let parsed = Boundary::parse_all("po").expect("valid boundary string");
    /// assert_eq!(parsed, vec![Boundary::Periodic, Boundary::Open]);
    /// ```
    pub fn parse_all(raw: &str) -> Result<Vec<Self>> {
        raw.chars()
            .enumerate()
            .map(|(axis, found)| Self::from_char(axis, found))
            .collect()
    }

    const fn from_char(axis: usize, found: char) -> Result<Self> {
        match found {
            'o' => Ok(Self::Open),
            'p' => Ok(Self::Periodic),
            _ => Err(LatticeError::InvalidBoundary { axis, found }),
        }
    }

    /// Returns the single-character code used in boundary strings.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Open => 'o',
            Self::Periodic => 'p',
        }
    }

    /// Whether the axis wraps around.
    #[must_use]
    pub const fn is_periodic(self) -> bool {
        matches!(self, Self::Periodic)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Shape, strides, and boundary conditions of an n-dimensional hypercubic
/// lattice.
///
/// # Examples
/// ```
/// use tomography_core::{Boundary, Lattice};
///
/// let lattice = Lattice::new(vec![2, 3], vec![Boundary::Periodic, Boundary::Open])?;
/// assert_eq!(lattice.sites(), 6);
/// assert_eq!(lattice.strides(), &[3, 1]);
/// assert_eq!(lattice.flat_index(&[1, 2]), 5);
/// # Ok::<(), tomography_core::LatticeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    shape: Vec<usize>,
    strides: Vec<usize>,
    boundaries: Vec<Boundary>,
    sites: usize,
}

impl Lattice {
    /// Validates `shape` against `boundaries` and precomputes strides.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroDimensions`] for an empty shape,
    /// [`LatticeError::EmptyAxis`] for a zero-length axis,
    /// [`LatticeError::BoundaryCountMismatch`] when the boundary list does not
    /// cover exactly the axes, and [`LatticeError::SiteCountOverflow`] when
    /// the site count does not fit in `usize`.
    pub fn new(shape: Vec<usize>, boundaries: Vec<Boundary>) -> Result<Self> {
        if shape.is_empty() {
            return Err(LatticeError::ZeroDimensions);
        }
        if let Some(axis) = shape.iter().position(|&len| len == 0) {
            return Err(LatticeError::EmptyAxis { axis });
        }
        if boundaries.len() != shape.len() {
            return Err(LatticeError::BoundaryCountMismatch {
                expected: shape.len(),
                got: boundaries.len(),
            });
        }

        let mut strides = vec![1; shape.len()];
        let mut sites = 1_usize;
        for (stride, &len) in strides.iter_mut().zip(&shape).rev() {
            *stride = sites;
            sites = sites
                .checked_mul(len)
                .ok_or_else(|| LatticeError::SiteCountOverflow {
                    shape: shape.clone(),
                })?;
        }

        Ok(Self {
            shape,
            strides,
            boundaries,
            sites,
        })
    }

    /// Builds a lattice from a boundary string such as `"ppo"`.
    ///
    /// # Errors
    /// Propagates parse failures from [`Boundary::parse_all`] and validation
    /// failures from [`Lattice::new`].
    ///
    /// # Examples
    /// ```
    /// use tomography_core::Lattice;
    ///
    /// let lattice = Lattice::with_boundary_str(vec![4, 4], "pp")?;
    /// assert!(lattice.boundaries().iter().all(|bc| bc.is_periodic()));
    /// # Ok::<(), tomography_core::LatticeError>(())
    /// ```
    pub fn with_boundary_str(shape: Vec<usize>, boundaries: &str) -> Result<Self> {
        Self::new(shape, Boundary::parse_all(boundaries)?)
    }

    /// Builds a `size × size` lattice with the given boundary per axis.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroSize`] when `size` is zero.
    pub fn square(size: usize, boundaries: [Boundary; 2]) -> Result<Self> {
        if size == 0 {
            return Err(LatticeError::ZeroSize);
        }
        Self::new(vec![size, size], boundaries.to_vec())
    }

    /// Per-axis sizes, slowest axis first.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat-index step for a unit move along each axis.
    #[must_use]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Boundary condition of each axis.
    #[must_use]
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Number of axes.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.shape.len()
    }

    /// Total number of sites.
    #[must_use]
    pub const fn sites(&self) -> usize {
        self.sites
    }

    /// Flattens a coordinate tuple into a site index.
    ///
    /// Coordinates beyond the lattice dimension are ignored; the caller is
    /// responsible for keeping each component within its axis.
    #[must_use]
    pub fn flat_index(&self, coords: &[usize]) -> usize {
        coords
            .iter()
            .zip(&self.strides)
            .map(|(coord, stride)| coord * stride)
            .sum()
    }

    /// Flat index of the axis-`axis` predecessor of `index`, wrapping from
    /// coordinate 0 to the far end of the axis.
    pub(crate) fn wrapped_predecessor(&self, index: usize, coord: usize, axis: usize) -> usize {
        let stride = self.strides.get(axis).copied().unwrap_or(1);
        if coord == 0 {
            let len = self.shape.get(axis).copied().unwrap_or(1);
            index + stride * (len - 1)
        } else {
            index - stride
        }
    }

    /// Iterates every coordinate tuple in lexicographic order.
    #[must_use]
    pub fn coordinates(&self) -> Odometer {
        Odometer::new(self.shape.clone())
    }

    /// Iterates every coordinate tuple whose component along `axis` is zero,
    /// in lexicographic order over the remaining axes.
    #[must_use]
    pub fn face(&self, axis: usize) -> Odometer {
        let mut limits = self.shape.clone();
        if let Some(len) = limits.get_mut(axis) {
            *len = 1;
        }
        Odometer::new(limits)
    }
}

/// Multi-index counter over `[0, l_0) × … × [0, l_{d-1})` in lexicographic
/// order, last axis varying fastest.
///
/// Yields the coordinate tuple together with its flat index.
///
/// # Examples
/// ```
/// use tomography_core::Odometer;
///
/// let visited: Vec<Vec<usize>> = Odometer::new(vec![2, 2])
///     .map(|(coords, _)| coords)
///     .collect();
/// assert_eq!(visited, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Odometer {
    limits: Vec<usize>,
    strides: Vec<usize>,
    current: Vec<usize>,
    index: usize,
    done: bool,
}

impl Odometer {
    /// Starts a counter at the origin of the box described by `limits`.
    ///
    /// Strides are derived from `limits`, so the flat index reported for a
    /// face iterator is relative to the face. Use [`Lattice::flat_index`] to
    /// address sites of the full lattice.
    #[must_use]
    pub fn new(limits: Vec<usize>) -> Self {
        let mut strides = vec![1; limits.len()];
        let mut span = 1_usize;
        for (stride, &len) in strides.iter_mut().zip(&limits).rev() {
            *stride = span;
            span = span.saturating_mul(len);
        }
        let done = limits.contains(&0);
        Self {
            current: vec![0; limits.len()],
            limits,
            strides,
            index: 0,
            done,
        }
    }

    /// Advances the counter in place, returning `false` once exhausted.
    fn advance(&mut self) -> bool {
        for axis in (0..self.limits.len()).rev() {
            let (Some(coord), Some(&limit), Some(&stride)) = (
                self.current.get_mut(axis),
                self.limits.get(axis),
                self.strides.get(axis),
            ) else {
                return false;
            };
            *coord += 1;
            self.index += stride;
            if *coord < limit {
                return true;
            }
            self.index -= stride * *coord;
            *coord = 0;
        }
        false
    }
}

impl Iterator for Odometer {
    type Item = (Vec<usize>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = (self.current.clone(), self.index);
        self.done = !self.advance();
        Some(item)
    }
}
