//! Optimal solver for the 2x2x2 cube.
//!
//! A breadth-first search runs from the scrambled cube and from the solved
//! cube at the same time until both frontiers share a sticker arrangement.
//! Only the left, down and back faces are turned, so the up-front-right
//! corner never moves and the solved cube is the one matching that corner.

use crate::cube::{engine::Cube, state::CubeState, turn::*, *};
use crate::solve::Solver;
use rayon::prelude::*;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::OnceLock;
use tracing::debug;

const NUM_STICKERS: usize = 24;

/// The stickers of a 2x2 in the order U, D, L, R, F, B.
pub type Fingerprint = [Color; NUM_STICKERS];

/// All states of one search side, with the cheapest way to reach them.
type Frontier = HashMap<Fingerprint, Vec<Move>>;

/// The transformation-"matrix" of a move.
/// Let t be the transformation, s the old state and n the new state:
/// n[i] = s[ t[i] ] holds true
type Transform = [usize; NUM_STICKERS];

const MOVES: [Move; 6] = [
	Move::Turn(Face::Left, TurnWise::Clockwise),
	Move::Turn(Face::Left, TurnWise::CounterClockwise),
	Move::Turn(Face::Down, TurnWise::Clockwise),
	Move::Turn(Face::Down, TurnWise::CounterClockwise),
	Move::Turn(Face::Back, TurnWise::Clockwise),
	Move::Turn(Face::Back, TurnWise::CounterClockwise),
];

/// Find the transformation of a move by following single stickers.
fn probe(mv: Move) -> Transform {
	let mut out = [0; NUM_STICKERS];

	for from in 0..NUM_STICKERS {
		let mut marked = [Color::White; NUM_STICKERS];
		marked[from] = Color::Red;

		let mut cube = Cube::from_state(CubeState::from_fingerprint(2, &marked));
		cube.apply_move(mv);

		let moved = fingerprint(cube.stickers());
		if let Some(to) = moved.iter().position(|c| *c == Color::Red) {
			out[to] = from;
		}
	}

	out
}

fn transforms() -> &'static [Transform; 6] {
	static TABLE: OnceLock<[Transform; 6]> = OnceLock::new();
	TABLE.get_or_init(|| MOVES.map(probe))
}

fn apply_transform(state: &Fingerprint, t: &Transform) -> Fingerprint {
	let mut out = *state;
	for i in 0..NUM_STICKERS {
		out[i] = state[t[i]];
	}
	out
}

fn fingerprint(state: &CubeState) -> Fingerprint {
	let mut out = [Color::White; NUM_STICKERS];
	for (dst, src) in out.iter_mut().zip(state.fingerprint()) {
		*dst = src;
	}
	out
}

/// Keep the path if there is no cheaper one for the same state.
/// Among equally long paths the smallest one wins, which keeps the search deterministic.
fn insert_min(frontier: &mut Frontier, state: Fingerprint, path: Vec<Move>) {
	match frontier.entry(state) {
		Entry::Occupied(mut e) => {
			if (path.len(), &path) < (e.get().len(), e.get()) {
				e.insert(path);
			}
		}
		Entry::Vacant(e) => {
			e.insert(path);
		}
	}
}

/// Replace the frontier with every state one move further away.
/// A move never directly follows its inverse.
fn expand(frontier: &Frontier) -> Frontier {
	let table = transforms();

	frontier
		.par_iter()
		.flat_map_iter(|(state, path)| {
			MOVES.iter().zip(table.iter()).filter_map(move |(mv, t)| {
				if path.last() == Some(&mv.inverse()) {
					return None;
				}
				let mut next = path.clone();
				next.push(*mv);
				Some((apply_transform(state, t), next))
			})
		})
		.fold(Frontier::new, |mut acc, (state, path)| {
			insert_min(&mut acc, state, path);
			acc
		})
		.reduce(Frontier::new, |mut a, b| {
			for (state, path) in b {
				insert_min(&mut a, state, path);
			}
			a
		})
}

/// The shortest solution through any state both frontiers share.
fn meet(scrambled: &Frontier, solved: &Frontier) -> Option<Vec<Move>> {
	scrambled
		.iter()
		.filter_map(|(state, path)| {
			let back = solved.get(state)?;
			let mut out = path.clone();
			out.extend(invert_moves(back));
			Some(out)
		})
		.min_by(|a, b| (a.len(), a).cmp(&(b.len(), b)))
}

pub struct PairSolver {
	cube: Cube,
}

impl PairSolver {
	/// Every 2x2 can be solved in at most 14 quarter turns.
	pub const MAX_DEPTH: usize = 14;

	pub fn new(cube: &Cube) -> Result<Self, CubeError> {
		if cube.size() != 2 {
			return Err(CubeError::WrongSize {
				expected: 2,
				got: cube.size(),
			});
		}
		Ok(Self { cube: cube.clone() })
	}

	pub fn fingerprint(cube: &Cube) -> Fingerprint {
		fingerprint(cube.stickers())
	}

	/// The solved cube which agrees with the up-front-right corner of the scramble.
	fn reference(&self) -> Result<Fingerprint, CubeError> {
		let corner = |cube: &Cube| -> [Color; 3] {
			let s = cube.stickers();
			[s.at(Face::Front, 0, 1), s.at(Face::Up, 1, 1), s.at(Face::Right, 0, 0)]
		};
		let target = corner(&self.cube);

		for rotation in Cube::orientations() {
			let mut solved = Cube::new(2)?;
			solved.apply_moves(&rotation);
			if corner(&solved) == target {
				return Ok(Self::fingerprint(&solved));
			}
		}

		Err(InvalidCube::Unreachable.into())
	}

	/// Returns an optimal sequence of l, d and b turns which solves the cube.
	pub fn solve(&self) -> Result<Vec<Move>, CubeError> {
		let goal = self.reference()?;

		let mut scrambled = Frontier::from([(Self::fingerprint(&self.cube), vec![])]);
		let mut solved = Frontier::from([(goal, vec![])]);
		let mut depth = 0;

		loop {
			for forward in [true, false] {
				if let Some(path) = meet(&scrambled, &solved) {
					debug!(moves = path.len(), "2x2 frontiers met");
					return Ok(path);
				}
				if depth == Self::MAX_DEPTH {
					return Err(InvalidCube::Unreachable.into());
				}

				if forward {
					scrambled = expand(&scrambled);
				} else {
					solved = expand(&solved);
				}
				depth += 1;
				debug!(depth, scrambled = scrambled.len(), solved = solved.len(), "expanded frontier");
			}
		}
	}
}

impl Solver for PairSolver {
	fn solve(&mut self) -> Result<Vec<Move>, CubeError> {
		PairSolver::solve(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};
	use std::{error::Error, str::FromStr};

	fn solves(cube: &Cube, path: &[Move]) -> bool {
		let mut c = cube.clone();
		c.apply_moves(path);
		c.is_solved().unwrap()
	}

	#[test]
	/// The transformations agree with the move engine
	fn transforms_match_engine() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		cube.scramble_with(&mut StdRng::seed_from_u64(1), 3, 10);

		for (mv, t) in MOVES.iter().zip(transforms().iter()) {
			let mut turned = cube.clone();
			turned.apply_move(*mv);
			assert_eq!(apply_transform(&PairSolver::fingerprint(&cube), t), PairSolver::fingerprint(&turned));
		}
		Ok(())
	}

	#[test]
	/// One turn of the right face is undone with a single left turn
	fn single_turn() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		cube.apply_move(Move::from_str("r")?);

		let path = PairSolver::new(&cube)?.solve()?;
		assert_eq!(path, parse_moves("l'")?);
		assert!(solves(&cube, &path));
		Ok(())
	}

	#[test]
	fn already_solved() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		cube.apply_move(Move::from_str("y")?);
		assert!(PairSolver::new(&cube)?.solve()?.is_empty());
		Ok(())
	}

	#[test]
	/// Short scrambles come back with a solution no longer than the scramble
	fn optimal_for_short_scrambles() -> Result<(), Box<dyn Error>> {
		for scramble in ["l d", "b' l' d", "u f r", "l d b l' d' b'"] {
			let mut cube = Cube::new(2)?;
			let moves = parse_moves(scramble)?;
			cube.apply_moves(&moves);

			let path = PairSolver::new(&cube)?.solve()?;
			assert!(path.len() <= moves.len(), "{} took {}", scramble, format_moves(&path));
			assert!(solves(&cube, &path));
		}
		Ok(())
	}

	#[test]
	fn random_scrambles() -> Result<(), Box<dyn Error>> {
		let mut rng = StdRng::seed_from_u64(2024);
		for _ in 0..5 {
			let mut cube = Cube::new(2)?;
			cube.scramble_with(&mut rng, 10, 50);

			let path = PairSolver::new(&cube)?.solve()?;
			assert!(path.len() <= PairSolver::MAX_DEPTH);
			assert!(solves(&cube, &path));
		}
		Ok(())
	}

	#[test]
	/// A twisted corner can't be solved
	fn twisted_corner_is_unreachable() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		let s = cube.stickers_mut();
		// Rotate the colors of the down-front-left corner
		s.set(Face::Down, 0, 0, Color::Red)?;
		s.set(Face::Front, 1, 0, Color::Green)?;
		s.set(Face::Left, 1, 1, Color::Yellow)?;

		match PairSolver::new(&cube)?.solve() {
			Err(CubeError::Invalid(InvalidCube::Unreachable)) => Ok(()),
			other => panic!("expected an unreachable cube, got {:?}", other),
		}
	}

	#[test]
	fn only_for_small_cubes() -> Result<(), Box<dyn Error>> {
		assert!(matches!(
			PairSolver::new(&Cube::new(3)?),
			Err(CubeError::WrongSize { expected: 2, got: 3 })
		));
		Ok(())
	}
}
