//! Error types for the tomography core library.
//!
//! Defines error enums exposed by the public API, their stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised while validating lattice geometry or running the labeling
/// and reduction passes over it.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LatticeError {
    /// A lattice needs at least one axis.
    #[error("lattice must have at least one axis")]
    ZeroDimensions,
    /// Every axis must hold at least one site.
    #[error("axis {axis} has zero length")]
    EmptyAxis {
        /// Index of the empty axis, slowest first.
        axis: usize,
    },
    /// The linear size of a square lattice must be positive.
    #[error("lattice size must be at least 1 (got 0)")]
    ZeroSize,
    /// Boundary conditions must be given for every axis and nothing else.
    #[error("expected {expected} boundary conditions but got {got}")]
    BoundaryCountMismatch {
        /// Number of lattice axes.
        expected: usize,
        /// Number of boundary conditions supplied.
        got: usize,
    },
    /// A boundary-condition character was neither `o` nor `p`.
    #[error("boundary condition `{found}` on axis {axis} is not `o` or `p`")]
    InvalidBoundary {
        /// Axis whose boundary failed to parse.
        axis: usize,
        /// Offending character.
        found: char,
    },
    /// The bond arrays do not describe one array per lattice axis.
    #[error("expected bonds for {expected} axes but got {got}")]
    BondAxisMismatch {
        /// Number of lattice axes.
        expected: usize,
        /// Number of bond arrays supplied.
        got: usize,
    },
    /// The product of the axis lengths does not fit in `usize`.
    #[error("lattice shape {shape:?} overflows the addressable site count")]
    SiteCountOverflow {
        /// Requested shape.
        shape: Vec<usize>,
    },
    /// An array did not match the number of sites or shape it was paired with.
    #[error("{what} has {got} entries but the lattice has {expected} sites")]
    ShapeMismatch {
        /// Name of the mismatched input.
        what: &'static str,
        /// Site count implied by the lattice.
        expected: usize,
        /// Entry count actually supplied.
        got: usize,
    },
    /// The label array reached an impossible state during root resolution.
    #[error("label invariant violated: {invariant} (index {index}, sites {sites})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// Index being resolved when the violation was detected.
        index: usize,
        /// Length of the label array.
        sites: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LatticeError`] variants.
    enum LatticeErrorCode for LatticeError {
        /// A lattice needs at least one axis.
        ZeroDimensions => ZeroDimensions => "LATTICE_ZERO_DIMENSIONS",
        /// Every axis must hold at least one site.
        EmptyAxis => EmptyAxis { .. } => "LATTICE_EMPTY_AXIS",
        /// The linear size of a square lattice must be positive.
        ZeroSize => ZeroSize => "LATTICE_ZERO_SIZE",
        /// Boundary conditions did not match the axis count.
        BoundaryCountMismatch => BoundaryCountMismatch { .. } => "LATTICE_BOUNDARY_COUNT_MISMATCH",
        /// A boundary-condition character was neither `o` nor `p`.
        InvalidBoundary => InvalidBoundary { .. } => "LATTICE_INVALID_BOUNDARY",
        /// Bond arrays did not match the axis count.
        BondAxisMismatch => BondAxisMismatch { .. } => "LATTICE_BOND_AXIS_MISMATCH",
        /// The site count overflowed `usize`.
        SiteCountOverflow => SiteCountOverflow { .. } => "LATTICE_SITE_COUNT_OVERFLOW",
        /// An array did not match the lattice shape.
        ShapeMismatch => ShapeMismatch { .. } => "LATTICE_SHAPE_MISMATCH",
        /// The label array reached an impossible state.
        InvariantViolation => InvariantViolation { .. } => "LATTICE_INVARIANT_VIOLATION",
    }
}

impl LatticeError {
    /// Returns `true` for errors caused by caller configuration rather than
    /// array shapes or internal invariants.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::LatticeError;
    ///
    /// assert!(LatticeError::ZeroDimensions.is_configuration());
    /// assert!(!LatticeError::ShapeMismatch { what: "state", expected: 4, got: 3 }.is_configuration());
    /// ```
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::ShapeMismatch { .. } | Self::InvariantViolation { .. }
        )
    }
}

/// Error type produced when configuring or running [`crate::Tomography`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TomographyError {
    /// Lattice construction, labeling, or gap reduction failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    /// A particle position could not be binned.
    #[error("particle {particle} has non-finite coordinate {value}")]
    NonFinitePosition {
        /// Index of the offending particle.
        particle: usize,
        /// The non-finite coordinate value.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`TomographyError`] variants.
    enum TomographyErrorCode for TomographyError {
        /// Lattice construction, labeling, or gap reduction failed.
        Lattice => Lattice { .. } => "TOMOGRAPHY_LATTICE_FAILURE",
        /// A particle position could not be binned.
        NonFinitePosition => NonFinitePosition { .. } => "TOMOGRAPHY_NON_FINITE_POSITION",
    }
}

impl TomographyError {
    /// Retrieve the inner [`LatticeErrorCode`] when the error originated in
    /// the lattice layer.
    #[must_use]
    pub const fn lattice_code(&self) -> Option<LatticeErrorCode> {
        match self {
            Self::Lattice(error) => Some(error.code()),
            Self::NonFinitePosition { .. } => None,
        }
    }
}

/// Convenient alias for results returned by the lattice layer.
pub type Result<T> = core::result::Result<T, LatticeError>;
