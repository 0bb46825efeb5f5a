use crate::cube::{Axis, CubeError, Face, TurnWise};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The three middle slices of a cube.
/// Each one follows the face it is named after.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
	strum::EnumIter,
)]
pub enum Slice {
	M, // between left and right, follows L
	E, // between up and down, follows D
	S, // between front and back, follows F
}

impl Slice {
	/// The face the slice is measured from and its depth.
	pub const fn layer(self) -> (Face, usize) {
		match self {
			Slice::M => (Face::Left, 1),
			Slice::E => (Face::Down, 1),
			Slice::S => (Face::Front, 1),
		}
	}
}

/// A single move token.
///
/// Face turns and slice turns count as one quarter turn each,
/// rotations of the entire cube don't count at all.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Move {
	Turn(Face, TurnWise),
	Slice(Slice, TurnWise),
	Rotate(Axis, TurnWise),
}

impl Move {
	pub const fn wise(self) -> TurnWise {
		match self {
			Move::Turn(_, wise) | Move::Slice(_, wise) | Move::Rotate(_, wise) => wise,
		}
	}

	/// The move which negates this one.
	pub const fn inverse(self) -> Self {
		match self {
			Move::Turn(face, wise) => Move::Turn(face, wise.inverse()),
			Move::Slice(slice, wise) => Move::Slice(slice, wise.inverse()),
			Move::Rotate(axis, wise) => Move::Rotate(axis, wise.inverse()),
		}
	}

	/// Turn itself into its inverse.
	pub fn invert(&mut self) {
		*self = self.inverse();
	}

	pub const fn is_rotation(self) -> bool {
		matches!(self, Move::Rotate(..))
	}
}

impl std::fmt::Display for Move {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Move::Turn(face, _) => match face {
				Face::Up => write!(f, "u"),
				Face::Down => write!(f, "d"),
				Face::Front => write!(f, "f"),
				Face::Back => write!(f, "b"),
				Face::Left => write!(f, "l"),
				Face::Right => write!(f, "r"),
			},
			Move::Slice(slice, _) => match slice {
				Slice::M => write!(f, "m"),
				Slice::E => write!(f, "e"),
				Slice::S => write!(f, "s"),
			},
			Move::Rotate(axis, _) => write!(f, "{}", axis),
		}?;
		write!(f, "{}", self.wise())
	}
}

impl FromStr for Move {
	type Err = CubeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let unknown = || CubeError::UnknownCommand(s.to_string());

		let mut chars = s.chars();
		let name = chars.next().ok_or_else(unknown)?;
		let wise = match chars.as_str() {
			"" => TurnWise::Clockwise,
			"'" => TurnWise::CounterClockwise,
			_ => return Err(unknown()),
		};

		let mv = match name.to_ascii_lowercase() {
			'u' => Move::Turn(Face::Up, wise),
			'd' => Move::Turn(Face::Down, wise),
			'f' => Move::Turn(Face::Front, wise),
			'b' => Move::Turn(Face::Back, wise),
			'l' => Move::Turn(Face::Left, wise),
			'r' => Move::Turn(Face::Right, wise),
			'm' => Move::Slice(Slice::M, wise),
			'e' => Move::Slice(Slice::E, wise),
			's' => Move::Slice(Slice::S, wise),
			'x' => Move::Rotate(Axis::X, wise),
			'y' => Move::Rotate(Axis::Y, wise),
			'z' => Move::Rotate(Axis::Z, wise),
			_ => return Err(unknown()),
		};

		Ok(mv)
	}
}

/// Parse a whitespace separated list of move tokens.
pub fn parse_moves(string: &str) -> Result<Vec<Move>, CubeError> {
	string.split_whitespace().map(Move::from_str).collect()
}

/// The sequence which undoes the given one.
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
	moves.iter().rev().map(|mv| mv.inverse()).collect()
}

/// Print moves the same way `parse_moves` reads them.
pub fn format_moves(moves: &[Move]) -> String {
	moves
		.iter()
		.map(Move::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}

/// The number of quarter turns in the sequence, rotations excluded.
pub fn quarter_turns(moves: &[Move]) -> usize {
	moves.iter().filter(|mv| !mv.is_rotation()).count()
}
