//! Turning and solving cubes of any size.
//!
//! ```
//! use nxcube::prelude::*;
//!
//! let mut cube = Cube::new(3).unwrap();
//! let scramble = parse_moves("r u r' u' x f' m e").unwrap();
//!
//! cube.apply_moves(&scramble);
//! assert!(!cube.is_solved().unwrap());
//!
//! let solution = solver_for(&cube).unwrap().solve().unwrap();
//! cube.apply_moves(&solution);
//! assert!(cube.is_solved().unwrap());
//! ```
//!
//! Lowercase letters are used for every move. m, e and s turn the middle
//! slices and x, y and z rotate the whole cube.

pub mod control;
pub mod cube;
pub mod solve;

pub mod prelude {
	pub use crate::control::{ControlError, Controller, Reply};
	pub use crate::cube::{engine::*, state::*, turn::*, *};
	pub use crate::solve::{layer::LayerSolver, pair::PairSolver, solver_for, Solver, Trace};
}
