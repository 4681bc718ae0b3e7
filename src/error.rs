use std::error::Error;
use std::fmt;

pub type QuatResult<T> = Result<T, QuatError>;

/// Failures surfaced by the quaternion core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuatError {
    /// Inversion of a quaternion whose squared norm is exactly zero.
    DegenerateQuaternion,
    /// A rotation matrix that is not 3 x 3. `cols` is the length of the
    /// first row that is not 3 wide, or 0 when there are no rows.
    InvalidMatrixShape { rows: usize, cols: usize },
}
impl fmt::Display for QuatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuatError::DegenerateQuaternion => {
                write!(f, "Cannot invert a quaternion with zero norm")
            }
            QuatError::InvalidMatrixShape { rows, cols } => {
                write!(f,
                    "Invalid matrix dimensions for rotation matrix: expected 3 x 3, got {rows} x {cols}",
                )
            }
        }
    }
}
impl Error for QuatError {}


#[derive(Debug)]
pub enum ConfigError {
    InvalidComponent(String),
    InvalidSeed(String),
    MissingComponents(String, usize),
    UnknownFlag(String),
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidComponent(arg) => {
                write!(f, "
                    \rInvalid quaternion component: {arg}",
                )
            }
            ConfigError::InvalidSeed(arg) if arg.is_empty() => {
                write!(f, "
                    \r-seed expects a value",
                )
            }
            ConfigError::InvalidSeed(arg) => {
                write!(f, "
                    \rInvalid seed: {arg}",
                )
            }
            ConfigError::MissingComponents(flag, found) => {
                write!(f, "
                    \r{flag} expects 4 components, found {found}",
                )
            }
            ConfigError::UnknownFlag(arg) => {
                write!(f, "
                    \rUnknown argument: {arg}",
                )
            }
        }
    }
}
impl Error for ConfigError {}

#[test]
fn shape_error_reports_dimensions() {
    let err = QuatError::InvalidMatrixShape { rows: 2, cols: 2 };
    assert!(err.to_string().ends_with("got 2 x 2"));
}
