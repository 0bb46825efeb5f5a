//! Named move sequences and the sticker patterns which select them.
//!
//! Every table is written for a 3x3 held with the white layer on the left
//! and the yellow layer on the right. Only the up face and the middle slice
//! are turned by the edge algorithms, and the up face always ends where it
//! started, so corners never move.

use crate::cube::{turn::*, *};

// ===== Moves =====

pub const U: Move = Move::Turn(Face::Up, TurnWise::Clockwise);
pub const U_: Move = Move::Turn(Face::Up, TurnWise::CounterClockwise);
pub const L: Move = Move::Turn(Face::Left, TurnWise::Clockwise);
pub const L_: Move = Move::Turn(Face::Left, TurnWise::CounterClockwise);
pub const R: Move = Move::Turn(Face::Right, TurnWise::Clockwise);
pub const R_: Move = Move::Turn(Face::Right, TurnWise::CounterClockwise);
pub const M: Move = Move::Slice(Slice::M, TurnWise::Clockwise);
pub const M_: Move = Move::Slice(Slice::M, TurnWise::CounterClockwise);
pub const E: Move = Move::Slice(Slice::E, TurnWise::Clockwise);
pub const E_: Move = Move::Slice(Slice::E, TurnWise::CounterClockwise);
pub const S: Move = Move::Slice(Slice::S, TurnWise::Clockwise);
pub const S_: Move = Move::Slice(Slice::S, TurnWise::CounterClockwise);
pub const X: Move = Move::Rotate(Axis::X, TurnWise::Clockwise);
pub const X_: Move = Move::Rotate(Axis::X, TurnWise::CounterClockwise);
pub const Y: Move = Move::Rotate(Axis::Y, TurnWise::Clockwise);
pub const Y_: Move = Move::Rotate(Axis::Y, TurnWise::CounterClockwise);
pub const Z: Move = Move::Rotate(Axis::Z, TurnWise::Clockwise);
pub const Z_: Move = Move::Rotate(Axis::Z, TurnWise::CounterClockwise);

// ===== Presentations =====

pub const CORNER_TURNS: [&[Move]; 4] = [&[Y], &[Y_], &[Z], &[Z_]];
pub const CENTER_TURNS: [&[Move]; 4] = [&[E], &[E_], &[S], &[S_]];
pub const LEFT_TURNS: [&[Move]; 2] = [&[L], &[L_]];
pub const RIGHT_TURNS: [&[Move]; 2] = [&[R], &[R_]];
pub const LAYER_TURNS: [&[Move]; 4] = [&[L], &[L_], &[R], &[R_]];
pub const TILTS: [&[Move]; 2] = [&[X], &[X_]];
/// Tilt everything except the left layer
pub const TILTS_HOLDING_LEFT: [&[Move]; 2] = [&[X, L], &[X_, L_]];

// ===== Positions =====

/// A sticker: face, row and column
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos(pub Face, pub usize, pub usize);

/// An edge slot of the left or right layer.
/// It is solved when `layer` shows the layer color and `side` matches `corner`.
#[derive(Clone, Copy, Debug)]
pub struct Slot {
	pub layer: Pos,
	pub side: Pos,
	pub corner: Pos,
}

const fn slot(layer: Pos, side: Pos, corner: Pos) -> Slot {
	Slot {
		layer,
		side,
		corner,
	}
}

pub const LEFT_SLOTS: [Slot; 4] = [
	slot(Pos(Face::Left, 0, 1), Pos(Face::Up, 1, 0), Pos(Face::Up, 0, 0)),
	slot(Pos(Face::Left, 1, 0), Pos(Face::Back, 1, 0), Pos(Face::Back, 0, 0)),
	slot(Pos(Face::Left, 1, 2), Pos(Face::Front, 1, 0), Pos(Face::Front, 0, 0)),
	slot(Pos(Face::Left, 2, 1), Pos(Face::Down, 1, 0), Pos(Face::Down, 0, 0)),
];

pub const RIGHT_SLOTS: [Slot; 4] = [
	slot(Pos(Face::Right, 0, 1), Pos(Face::Up, 1, 2), Pos(Face::Up, 0, 2)),
	slot(Pos(Face::Right, 1, 2), Pos(Face::Back, 1, 2), Pos(Face::Back, 0, 2)),
	slot(Pos(Face::Right, 1, 0), Pos(Face::Front, 1, 2), Pos(Face::Front, 0, 2)),
	slot(Pos(Face::Right, 2, 1), Pos(Face::Down, 1, 2), Pos(Face::Down, 0, 2)),
];

/// The up-left slot, which every left-edge algorithm fills
pub const UP_LEFT: Slot = LEFT_SLOTS[0];
/// The up-right slot, which every right-edge algorithm fills
pub const UP_RIGHT: Slot = RIGHT_SLOTS[0];

// ===== Algorithms =====

#[derive(Debug)]
pub struct Alg {
	pub name: &'static str,
	pub moves: &'static [Move],
}

/// An edge with the layer color on `marked` and the slot color on `partner`
#[derive(Debug)]
pub struct EdgePattern {
	pub marked: Pos,
	pub partner: Pos,
	pub alg: Alg,
}

const fn pattern(marked: Pos, partner: Pos, name: &'static str, moves: &'static [Move]) -> EdgePattern {
	EdgePattern {
		marked,
		partner,
		alg: Alg { name, moves },
	}
}

/// Left edges which can go straight into the up-left slot
#[rustfmt::skip]
pub const LEFT_READY: [EdgePattern; 5] = [
	pattern(Pos(Face::Up, 1, 2), Pos(Face::Right, 0, 1), "ltr", &[U_, M, U]),
	pattern(Pos(Face::Right, 0, 1), Pos(Face::Up, 1, 2), "lrt", &[U, M, U_, U_, M_, U]),
	pattern(Pos(Face::Down, 0, 1), Pos(Face::Front, 2, 1), "lbf", &[U_, M_, U]),
	pattern(Pos(Face::Front, 2, 1), Pos(Face::Down, 0, 1), "lfb", &[U, M_, U_, U_, M, U]),
	pattern(Pos(Face::Up, 1, 0), Pos(Face::Left, 0, 1), "ltl", &[U_, M, U, U, M_, U_, U_, M, U]),
];

/// Moves the up-left edge down to the front of the middle slice
pub const LEFT_EVICT: Alg = Alg {
	name: "ledge-evict",
	moves: &[U_, M, U],
};

/// Right edges which can go straight into the up-right slot
#[rustfmt::skip]
pub const RIGHT_READY: [EdgePattern; 5] = [
	pattern(Pos(Face::Up, 1, 0), Pos(Face::Left, 0, 1), "rtl", &[U, M, U_]),
	pattern(Pos(Face::Left, 0, 1), Pos(Face::Up, 1, 0), "rlt", &[U_, M, U, U, M_, U_]),
	pattern(Pos(Face::Down, 0, 1), Pos(Face::Front, 2, 1), "rbf", &[U, M_, U_]),
	pattern(Pos(Face::Front, 2, 1), Pos(Face::Down, 0, 1), "rfb", &[U_, M_, U, U, M, U_]),
	pattern(Pos(Face::Up, 1, 2), Pos(Face::Right, 0, 1), "rtr", &[U, M, U_, U_, M_, U, U, M, U_]),
];

/// Moves the up-right edge down to the front of the middle slice
pub const RIGHT_EVICT: Alg = Alg {
	name: "redge-evict",
	moves: &[U, M, U_],
};

/// The last left edge, with the right layer already done.
/// These leave the up-right edge where it is.
#[rustfmt::skip]
pub const LAST_LEFT: [EdgePattern; 3] = [
	// Cycles up-left, front, down-front, back
	pattern(Pos(Face::Down, 0, 1), Pos(Face::Front, 2, 1), "lq", &[U_, M, U, M_, U_, M_, U]),
	pattern(Pos(Face::Down, 2, 1), Pos(Face::Back, 0, 1), "lq2", &[U, M_, U_, M, U, M, U_]),
	pattern(Pos(Face::Up, 1, 0), Pos(Face::Left, 0, 1), "lflip", &[
		U_, M, U, M, U_, M_, U,
		M,
		U, M_, U_, M, U, M, U_,
	]),
];

// ===== Middle edges =====

/// The faces around the middle slice
pub const MIDDLE_FACES: [Face; 4] = [Face::Up, Face::Front, Face::Down, Face::Back];

/// The stickers of the four middle-slice edges
pub const MIDDLE_STICKERS: [Pos; 8] = [
	Pos(Face::Up, 0, 1),
	Pos(Face::Up, 2, 1),
	Pos(Face::Front, 0, 1),
	Pos(Face::Front, 2, 1),
	Pos(Face::Down, 0, 1),
	Pos(Face::Down, 2, 1),
	Pos(Face::Back, 0, 1),
	Pos(Face::Back, 2, 1),
];

/// The up or down sticker of the edges up-front, up-back, down-front and down-back
pub const MIDDLE_TOPS: [Pos; 4] = [
	Pos(Face::Up, 2, 1),
	Pos(Face::Up, 0, 1),
	Pos(Face::Down, 0, 1),
	Pos(Face::Down, 2, 1),
];

/// Flips the up-front and up-back edges in place
#[rustfmt::skip]
pub const FLIP_ADJACENT: Alg = Alg {
	name: "flip-adjacent",
	moves: &[
		M_, U, M_, U, M_, U, M_, U,
		M,
		M_, U, M_, U, M_, U, M_, U,
		M_,
	],
};

/// Flips the up-front and down-back edges in place
#[rustfmt::skip]
pub const FLIP_OPPOSITE: Alg = Alg {
	name: "flip-opposite",
	moves: &[
		M_, U, M_, U, M_, U, M_, U,
		M, M,
		M_, U, M_, U, M_, U, M_, U,
		M, M,
	],
};

/// Permutations of the middle-slice edges which keep their orientation
#[rustfmt::skip]
pub const PLACEMENTS: [Alg; 4] = [
	Alg { name: "cycle", moves: &[M_, U, U, M, U, U] },
	Alg { name: "cycle-inverse", moves: &[U, U, M_, U, U, M] },
	Alg {
		name: "swap-adjacent",
		moves: &[M_, U, U, M, U, U, X, X, U, U, M_, U, U, M, X_, X_],
	},
	Alg {
		name: "swap-opposite",
		moves: &[M_, U, U, M, U, U, X, M_, U, U, M, U, U, X_],
	},
];
