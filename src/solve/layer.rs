//! Layer by layer solver for the 3x3x3 cube.
//!
//! The corners are solved first as a 2x2, then the cube is held with the
//! white layer on the left and the yellow layer on the right. The edges of
//! both layers are inserted through the up face and the middle slice, the
//! layers are lined up with the centers and the middle slice is finished
//! last.
//!
//! Every phase is a search over short sequences of presentations
//! (rotations or layer turns) until a sticker pattern matches a known
//! algorithm. `apply_until` does the searching and undoes failed tries.

use crate::cube::{engine::Cube, turn::*, *};
use crate::solve::{algs::*, pair::PairSolver, Solver};
use tracing::{debug, trace};

/// The number of edges in the left or right layer
const LAYER_EDGES: usize = 4;

pub struct LayerSolver {
	initial: Cube,
	cube: Cube,
	moves: Vec<Move>,
	/// Middle-slice arrangements each placement algorithm solves
	placements: Vec<([usize; 8], &'static Alg)>,
}

impl LayerSolver {
	/// How many presentations and algorithms the middle-slice placement may chain
	pub const MAX_PLACEMENT_DEPTH: usize = 4;

	pub fn new(cube: &Cube) -> Result<Self, CubeError> {
		if cube.size() != 3 {
			return Err(CubeError::WrongSize {
				expected: 3,
				got: cube.size(),
			});
		}

		// Undo each algorithm on a solved cube to see what it solves
		let mut placements = Vec::with_capacity(PLACEMENTS.len());
		for alg in &PLACEMENTS {
			let mut solved = Cube::new(3)?;
			solved.apply_moves(&invert_moves(alg.moves));
			placements.push((middle_signature(&solved), alg));
		}

		Ok(Self {
			initial: cube.clone(),
			cube: cube.clone(),
			moves: vec![],
			placements,
		})
	}

	fn at(&self, pos: Pos) -> Color {
		self.cube.stickers().at(pos.0, pos.1, pos.2)
	}

	fn play(&mut self, moves: &[Move]) {
		self.cube.apply_moves(moves);
		self.moves.extend_from_slice(moves);
	}

	fn play_alg(&mut self, alg: &Alg) {
		debug!(alg = alg.name, "applying algorithm");
		self.play(alg.moves);
	}

	/// Try every sequence of up to `depth` steps, shortest first, until `found` holds.
	///
	/// The predicate may apply moves itself. If it returns false, the cube and
	/// the emitted moves are put back to how they were before the try.
	/// Returns false once every sequence failed.
	pub fn apply_until<P>(&mut self, steps: &[&[Move]], depth: usize, mut found: P) -> Result<bool, CubeError>
	where
		P: FnMut(&mut Self) -> Result<bool, CubeError>,
	{
		for len in 0..=depth {
			if len > 0 && steps.is_empty() {
				break;
			}

			let mut digits = vec![0; len];
			loop {
				let checkpoint = self.cube.checkpoint();
				let mark = self.moves.len();

				for &d in &digits {
					self.play(steps[d]);
				}
				if found(self)? {
					trace!(presentation = %format_moves(&self.moves[mark..]), "search succeeded");
					return Ok(true);
				}

				self.cube.rollback(&checkpoint)?;
				self.moves.truncate(mark);

				if !next_sequence(&mut digits, steps.len()) {
					break;
				}
			}
		}

		Ok(false)
	}

	fn solved_edges(&self, slots: &[Slot], color: Color) -> usize {
		slots
			.iter()
			.filter(|slot| self.at(slot.layer) == color && self.at(slot.side) == self.at(slot.corner))
			.count()
	}

	/// Apply the first algorithm whose pattern shows an edge of `color`
	/// belonging next to `corner`.
	fn try_patterns(&mut self, table: &[EdgePattern], color: Color, corner: Pos) -> bool {
		let wanted = self.at(corner);
		match table
			.iter()
			.find(|p| self.at(p.marked) == color && self.at(p.partner) == wanted)
		{
			Some(p) => {
				self.play_alg(&p.alg);
				true
			}
			None => false,
		}
	}

	/// Move an edge of `color` out of `slot` if it belongs somewhere else.
	fn evict(&mut self, slot: Slot, color: Color, alg: &Alg) -> bool {
		let wanted = self.at(slot.corner);
		let (a, b) = (self.at(slot.layer), self.at(slot.side));
		if (a == color && b != wanted) || (b == color && a != wanted) {
			self.play_alg(alg);
			true
		} else {
			false
		}
	}

	// ===== Corners =====

	fn solve_corners(&mut self) -> Result<(), CubeError> {
		let corners = Cube::from_state(self.cube.stickers().corners());
		let path = PairSolver::new(&corners)?.solve()?;
		debug!(moves = path.len(), "solved corners as a 2x2");
		self.play(&path);

		if !self.apply_until(&CORNER_TURNS, 2, |s| Ok(s.at(Pos(Face::Left, 0, 0)) == Color::White))? {
			return Err(CubeError::SearchExhausted("turning the white corners to the left"));
		}
		if !self.apply_until(&CENTER_TURNS, 2, |s| Ok(s.at(Pos(Face::Left, 1, 1)) == Color::White))? {
			return Err(CubeError::SearchExhausted("moving the white center to the left"));
		}
		Ok(())
	}

	// ===== Left and right edges =====

	fn place_left_edge(&mut self) -> Result<(), CubeError> {
		for _ in 0..=LAYER_EDGES {
			let ready = |s: &mut Self| {
				s.apply_until(&TILTS, 2, |s| Ok(s.try_patterns(&LEFT_READY, Color::White, UP_LEFT.corner)))
			};
			if self.apply_until(&LEFT_TURNS, 2, ready)? {
				return Ok(());
			}

			let evicted =
				self.apply_until(&TILTS, 2, |s| Ok(s.evict(UP_LEFT, Color::White, &LEFT_EVICT)))?;
			if !evicted {
				break;
			}
		}
		Err(CubeError::SearchExhausted("placing a left edge"))
	}

	/// All but one of the left edges. The last one is left open as room to work in.
	fn solve_left_edges(&mut self) -> Result<(), CubeError> {
		while self.solved_edges(&LEFT_SLOTS, Color::White) < LAYER_EDGES - 1 {
			self.place_left_edge()?;
		}
		debug!("left edges placed");
		Ok(())
	}

	fn place_right_edge(&mut self) -> Result<(), CubeError> {
		for _ in 0..=LAYER_EDGES {
			let ready = |s: &mut Self| {
				s.apply_until(&TILTS_HOLDING_LEFT, 2, |s| {
					Ok(s.try_patterns(&RIGHT_READY, Color::Yellow, UP_RIGHT.corner))
				})
			};
			if self.apply_until(&RIGHT_TURNS, 2, ready)? {
				return Ok(());
			}

			let evicted = self.apply_until(&TILTS_HOLDING_LEFT, 2, |s| {
				Ok(s.evict(UP_RIGHT, Color::Yellow, &RIGHT_EVICT))
			})?;
			if !evicted {
				break;
			}
		}
		Err(CubeError::SearchExhausted("placing a right edge"))
	}

	fn solve_right_edges(&mut self) -> Result<(), CubeError> {
		// Park the open left slot on top, the right edges pass through it
		let parked = self.apply_until(&TILTS, 2, |s| {
			let open = s.solved_edges(&[UP_LEFT], Color::White) == 0;
			Ok(open || s.solved_edges(&LEFT_SLOTS, Color::White) == LAYER_EDGES)
		})?;
		if !parked {
			return Err(CubeError::SearchExhausted("parking the open left slot"));
		}

		while self.solved_edges(&RIGHT_SLOTS, Color::Yellow) < LAYER_EDGES {
			self.place_right_edge()?;
		}
		debug!("right edges placed");
		Ok(())
	}

	fn solve_last_left_edge(&mut self) -> Result<(), CubeError> {
		if self.solved_edges(&LEFT_SLOTS, Color::White) == LAYER_EDGES {
			return Ok(());
		}

		let placed = self.apply_until(&TILTS_HOLDING_LEFT, 2, |s| {
			Ok(s.try_patterns(&LAST_LEFT, Color::White, UP_LEFT.corner))
		})?;
		if !placed || self.solved_edges(&LEFT_SLOTS, Color::White) != LAYER_EDGES {
			return Err(CubeError::SearchExhausted("placing the last left edge"));
		}
		Ok(())
	}

	// ===== Centers =====

	/// Turn both layers until they agree with the front center.
	fn align_layers(&mut self) -> Result<(), CubeError> {
		let aligned = self.apply_until(&LAYER_TURNS, 4, |s| {
			let center = s.at(Pos(Face::Front, 1, 1));
			Ok(s.at(Pos(Face::Front, 0, 0)) == center && s.at(Pos(Face::Front, 0, 2)) == center)
		})?;
		if !aligned {
			return Err(CubeError::SearchExhausted("lining the layers up with the centers"));
		}
		Ok(())
	}

	// ===== Middle edges =====

	/// An edge is flipped if its up or down sticker has neither the up nor the down color.
	fn is_flipped(&self, top: Pos) -> bool {
		let color = self.at(top);
		color != self.at(Pos(Face::Up, 1, 1)) && color != self.at(Pos(Face::Down, 1, 1))
	}

	fn flip_pair(&mut self) -> bool {
		let [up_front, up_back, _, down_back] = MIDDLE_TOPS.map(|p| self.is_flipped(p));
		if up_front && up_back {
			self.play_alg(&FLIP_ADJACENT);
			true
		} else if up_front && down_back {
			self.play_alg(&FLIP_OPPOSITE);
			true
		} else {
			false
		}
	}

	fn flip_middle_edges(&mut self) -> Result<(), CubeError> {
		while self.apply_until(&TILTS, 2, |s| Ok(s.flip_pair()))? {}

		if MIDDLE_TOPS.iter().any(|p| self.is_flipped(*p)) {
			return Err(CubeError::SearchExhausted("flipping middle edges"));
		}
		Ok(())
	}

	fn place_by_signature(&mut self) -> bool {
		let signature = middle_signature(&self.cube);
		let alg = self
			.placements
			.iter()
			.find(|(sig, _)| *sig == signature)
			.map(|(_, alg)| *alg);
		match alg {
			Some(alg) => {
				self.play_alg(alg);
				true
			}
			None => false,
		}
	}

	fn place_middle_edges(&mut self) -> Result<(), CubeError> {
		const SOLVED: [usize; 8] = [0, 0, 1, 1, 2, 2, 3, 3];
		if middle_signature(&self.cube) == SOLVED {
			return Ok(());
		}

		let mut steps: Vec<&[Move]> = TILTS.to_vec();
		steps.extend(PLACEMENTS.iter().map(|alg| alg.moves));

		// Shortest first, so the presentation depth escalates by itself
		if !self.apply_until(&steps, Self::MAX_PLACEMENT_DEPTH, |s| Ok(s.place_by_signature()))? {
			return Err(CubeError::SearchExhausted("placing middle edges"));
		}
		Ok(())
	}

	/// Solve a copy of the cube and return every move applied to it.
	pub fn solve(&mut self) -> Result<Vec<Move>, CubeError> {
		self.cube = self.initial.clone();
		self.moves.clear();

		self.solve_corners()?;
		self.solve_left_edges()?;
		self.solve_right_edges()?;
		self.solve_last_left_edge()?;
		self.align_layers()?;
		self.flip_middle_edges()?;
		self.place_middle_edges()?;

		if !self.cube.is_solved()? {
			return Err(CubeError::SearchExhausted("verifying the solution"));
		}
		debug!(moves = self.moves.len(), quarter_turns = quarter_turns(&self.moves), "3x3 solved");
		Ok(self.moves.clone())
	}
}

impl Solver for LayerSolver {
	fn solve(&mut self) -> Result<Vec<Move>, CubeError> {
		LayerSolver::solve(self)
	}
}

/// Advance an odometer over `base` digits. Returns false after the last sequence.
fn next_sequence(digits: &mut [usize], base: usize) -> bool {
	for d in digits.iter_mut().rev() {
		*d += 1;
		if *d < base {
			return true;
		}
		*d = 0;
	}
	false
}

/// For every middle-slice sticker, which of the middle centers it matches.
fn middle_signature(cube: &Cube) -> [usize; 8] {
	let s = cube.stickers();
	let centers = MIDDLE_FACES.map(|face| s.at(face, 1, 1));
	MIDDLE_STICKERS.map(|p| {
		let color = s.at(p.0, p.1, p.2);
		centers.iter().position(|c| *c == color).unwrap_or(centers.len())
	})
}
