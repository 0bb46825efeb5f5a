pub mod engine;
pub mod state;
pub mod turn;

use serde::{Deserialize, Serialize};
use strum::EnumCount;
use turn::Move;

/// The smallest cube the move engine supports
pub const MIN_SIZE: usize = 2;

/// The number of sides of a cube
pub const NUM_FACES: usize = Face::COUNT;

/// The number of different sticker colors
pub const NUM_COLORS: usize = Color::COUNT;

// ===== Faces =====

#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
	strum::EnumIter, strum::EnumCount, strum::Display, strum::FromRepr,
)]
#[repr(usize)]
pub enum Face {
	Up,
	Down,
	Front,
	Back,
	Left,
	Right,
}

impl Face {
	pub const ALL: [Face; NUM_FACES] = [
		Face::Up,
		Face::Down,
		Face::Front,
		Face::Back,
		Face::Left,
		Face::Right,
	];

	/// The color this face shows on a freshly created cube.
	pub const fn solved_color(self) -> Color {
		match self {
			Face::Up => Color::White,
			Face::Down => Color::Yellow,
			Face::Front => Color::Red,
			Face::Back => Color::Orange,
			Face::Left => Color::Green,
			Face::Right => Color::Blue,
		}
	}

	pub const fn opposite(self) -> Face {
		match self {
			Face::Up => Face::Down,
			Face::Down => Face::Up,
			Face::Front => Face::Back,
			Face::Back => Face::Front,
			Face::Left => Face::Right,
			Face::Right => Face::Left,
		}
	}

	/// The four adjacent faces in clockwise order, looking at this face from outside.
	pub const fn ring(self) -> [Face; 4] {
		use Face::*;
		match self {
			Front => [Up, Right, Down, Left],
			Back => [Up, Left, Down, Right],
			Up => [Back, Right, Front, Left],
			Down => [Front, Right, Back, Left],
			Left => [Up, Front, Down, Back],
			Right => [Up, Back, Down, Front],
		}
	}
}

// ===== Colors =====

#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
	strum::EnumIter, strum::EnumCount, strum::FromRepr,
)]
#[repr(usize)]
pub enum Color {
	White,
	Yellow,
	Red,
	Orange,
	Green,
	Blue,
}

impl Color {
	/// The single letter used in nets and sticker strings
	pub const fn letter(self) -> char {
		match self {
			Color::White => 'w',
			Color::Yellow => 'y',
			Color::Red => 'r',
			Color::Orange => 'o',
			Color::Green => 'g',
			Color::Blue => 'b',
		}
	}

	pub fn from_letter(letter: char) -> Option<Self> {
		let color = match letter.to_ascii_lowercase() {
			'w' => Color::White,
			'y' => Color::Yellow,
			'r' => Color::Red,
			'o' => Color::Orange,
			'g' => Color::Green,
			'b' => Color::Blue,
			_ => return None,
		};
		Some(color)
	}

	/// Returns the ANSI-colorcode for the color.
	pub const fn ansi(self) -> &'static str {
		match self {
			Color::White => "\x1b[97m",
			Color::Yellow => "\x1b[93m",
			Color::Red => "\x1b[31m",
			Color::Orange => "\x1b[38;5;208m",
			Color::Green => "\x1b[32m",
			Color::Blue => "\x1b[34m",
		}
	}
}

impl std::fmt::Display for Color {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.letter())
	}
}

// ===== Turning =====

/// A quarter turn is either clockwise or counterclockwise,
/// seen from outside the turned face.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
	strum::EnumIter,
)]
pub enum TurnWise {
	Clockwise,
	CounterClockwise,
}

impl TurnWise {
	pub const fn inverse(self) -> Self {
		match self {
			TurnWise::Clockwise => TurnWise::CounterClockwise,
			TurnWise::CounterClockwise => TurnWise::Clockwise,
		}
	}

	/// How many clockwise quarters the turn amounts to.
	pub const fn quarters(self) -> usize {
		match self {
			TurnWise::Clockwise => 1,
			TurnWise::CounterClockwise => 3,
		}
	}
}

impl std::fmt::Display for TurnWise {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			TurnWise::Clockwise => write!(f, ""),
			TurnWise::CounterClockwise => write!(f, "'"),
		}
	}
}

/// The axes for whole-cube rotations.
/// X follows the right face, Y the up face and Z the front face.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
	strum::EnumIter, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// ===== Errors =====

/// A cube whose faces are all one color but which cannot be a real cube.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCube {
	#[error("a color is not represented on the cube")]
	MissingColor,
	#[error("the faces are arranged as a reflection of a real cube")]
	Reflection,
	#[error("the solved cube cannot be reached from this configuration")]
	Unreachable,
}

#[derive(thiserror::Error, Debug)]
pub enum CubeError {
	#[error("a cube needs at least {MIN_SIZE} layers, got {0}")]
	Size(usize),
	#[error("index {index} is out of range for a cube of size {size}")]
	Index { index: usize, size: usize },
	#[error("expected {expected} stickers, got {got}")]
	Length { expected: usize, got: usize },
	#[error("expected a cube of size {expected}, got size {got}")]
	WrongSize { expected: usize, got: usize },
	#[error("invalid cube: {0}")]
	Invalid(#[from] InvalidCube),
	#[error("unknown command \"{0}\"")]
	UnknownCommand(String),
	#[error("unknown color letter '{0}'")]
	UnknownColor(char),
	#[error("no moves found while {0}")]
	SearchExhausted(&'static str),
	#[error("there is no solver for a cube of size {0}")]
	UnsupportedSize(usize),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("could not encode the cube: {0}")]
	Encoding(#[from] bincode::Error),
}

impl CubeError {
	/// Whether the error reports an impossible cube rather than a bad argument.
	pub fn is_invalid_cube(&self) -> bool {
		matches!(self, CubeError::Invalid(_))
	}
}

/// The RubiksCube trait.
pub trait RubiksCube {
	fn apply_move(&mut self, mv: Move);

	/// Apply the given sequence of moves.
	fn apply_moves(&mut self, moves: &[Move]) {
		for mv in moves {
			self.apply_move(*mv);
		}
	}
}
