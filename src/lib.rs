//! Quaternion algebra with conversion to and from 3 x 3 rotation matrices.
//!
//! Every operation is pure and works on `Copy` values, so all of it can be
//! called from any number of threads without synchronization.

mod equality;
mod interop;
pub mod config;
pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod random;

pub use crate::error::{QuatError, QuatResult};
pub use crate::matrix::Mat3x3;
pub use crate::quaternion::Quaternion;
