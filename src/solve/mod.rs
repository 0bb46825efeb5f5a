use crate::cube::{engine::Cube, state::CubeState, turn::*, *};
use std::io::Write;

pub mod algs;
pub mod layer;
pub mod pair;

use layer::LayerSolver;
use pair::PairSolver;

/// Finds a move sequence which solves a cube.
pub trait Solver {
	/// Returns the moves which solve the cube the solver was built for.
	fn solve(&mut self) -> Result<Vec<Move>, CubeError>;
}

/// Returns the solver for the size of the given cube.
pub fn solver_for(cube: &Cube) -> Result<Box<dyn Solver>, CubeError> {
	match cube.size() {
		2 => Ok(Box::new(PairSolver::new(cube)?)),
		3 => Ok(Box::new(LayerSolver::new(cube)?)),
		n => Err(CubeError::UnsupportedSize(n)),
	}
}

/// A solution replayed on the scrambled cube, one state per move.
#[derive(Clone, Debug)]
pub struct Trace {
	pub initial: CubeState,
	pub steps: Vec<(Move, CubeState)>,
	pub quarter_turns: usize,
}

impl Trace {
	pub fn replay(cube: &Cube, moves: &[Move]) -> Self {
		let mut cube = cube.clone();
		cube.reset_count();

		let initial = cube.stickers().clone();
		let steps = moves
			.iter()
			.map(|mv| {
				cube.apply_move(*mv);
				(*mv, cube.stickers().clone())
			})
			.collect();

		Self {
			initial,
			steps,
			quarter_turns: cube.count(),
		}
	}

	pub fn moves(&self) -> Vec<Move> {
		self.steps.iter().map(|(mv, _)| *mv).collect()
	}

	/// The state after the last move
	pub fn last(&self) -> &CubeState {
		self.steps.last().map(|(_, s)| s).unwrap_or(&self.initial)
	}

	pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
		writeln!(out, "Initial state:")?;
		write!(out, "{}", self.initial)?;
		for (mv, state) in &self.steps {
			writeln!(out, "{}", mv)?;
			write!(out, "{}", state)?;
		}
		writeln!(out, "Solution length (qt): {}", self.quarter_turns)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn solver_by_size() -> Result<(), Box<dyn Error>> {
		assert!(solver_for(&Cube::new(2)?).is_ok());
		assert!(solver_for(&Cube::new(3)?).is_ok());
		assert!(matches!(
			solver_for(&Cube::new(4)?).err(),
			Some(CubeError::UnsupportedSize(4))
		));
		Ok(())
	}

	#[test]
	/// The boxed solver solves a 2x2
	fn boxed_solver() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		cube.apply_moves(&parse_moves("r u f'")?);

		let moves = solver_for(&cube)?.solve()?;
		let trace = Trace::replay(&cube, &moves);
		assert!(Cube::from_state(trace.last().clone()).is_solved()?);
		assert_eq!(trace.moves(), moves);
		Ok(())
	}

	#[test]
	/// Rotations show up in the trace but not in the count
	fn trace_counts_quarter_turns() -> Result<(), Box<dyn Error>> {
		let cube = Cube::new(3)?;
		let trace = Trace::replay(&cube, &parse_moves("r x r'")?);
		assert_eq!(trace.steps.len(), 3);
		assert_eq!(trace.quarter_turns, 2);
		Ok(())
	}

	#[test]
	fn trace_format() -> Result<(), Box<dyn Error>> {
		let cube = Cube::new(2)?;
		let trace = Trace::replay(&cube, &parse_moves("y")?);

		let mut out = Vec::new();
		trace.write_to(&mut out)?;
		let text = String::from_utf8(out)?;

		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines[0], "Initial state:");
		assert_eq!(lines[7], "y");
		assert_eq!(*lines.last().unwrap(), "Solution length (qt): 0");
		// Initial net, one net per move, header and footer lines
		assert_eq!(lines.len(), 1 + 6 + 1 + 6 + 1);
		Ok(())
	}
}
