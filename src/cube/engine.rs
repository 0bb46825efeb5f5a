use crate::cube::{state::*, turn::*, *};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The number of whole-cube rotations `scramble` uses by default
pub const DEFAULT_ROTATIONS: usize = 10;
/// The number of slice moves `scramble` uses by default
pub const DEFAULT_MOVES: usize = 50;

/// A cube together with its quarter-turn counter.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Cube {
	state: CubeState,
	count: usize,
}

/// The state and counter of a cube, to jump back to later.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Checkpoint {
	snapshot: Snapshot,
	count: usize,
}

/// The rotation which brings `face` to the front, in clockwise quarters.
const fn to_front(face: Face) -> (Axis, usize) {
	match face {
		Face::Up => (Axis::X, 3),
		Face::Down => (Axis::X, 1),
		Face::Front => (Axis::X, 0),
		Face::Back => (Axis::Y, 2),
		Face::Left => (Axis::Y, 3),
		Face::Right => (Axis::Y, 1),
	}
}

impl Cube {
	/// Creates a *solved* cube with the given number of layers.
	pub fn new(size: usize) -> Result<Self, CubeError> {
		Ok(Self::from_state(CubeState::new(size)?))
	}

	pub fn from_state(state: CubeState) -> Self {
		Self { state, count: 0 }
	}

	pub fn size(&self) -> usize {
		self.state.size()
	}

	pub fn stickers(&self) -> &CubeState {
		&self.state
	}

	pub fn stickers_mut(&mut self) -> &mut CubeState {
		&mut self.state
	}

	/// Quarter turns applied since creation or the last scramble
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn reset_count(&mut self) {
		self.count = 0;
	}

	pub fn rotate_face_clockwise(&mut self, face: Face) {
		self.state.rotate_grid(face, TurnWise::Clockwise);
	}

	pub fn rotate_face_counterclockwise(&mut self, face: Face) {
		self.state.rotate_grid(face, TurnWise::CounterClockwise);
	}

	/// Turn the layer `depth` layers below `face` by a quarter.
	/// Depth 0 is the face itself.
	pub fn move_slice(&mut self, face: Face, depth: usize, wise: TurnWise) -> Result<(), CubeError> {
		if depth >= self.size() {
			return Err(CubeError::Index {
				index: depth,
				size: self.size(),
			});
		}
		self.turn_layer(face, depth, wise);
		Ok(())
	}

	/// `move_slice` without the depth check
	fn turn_layer(&mut self, face: Face, depth: usize, wise: TurnWise) {
		let (axis, quarters) = to_front(face);

		self.rotate_quarters(axis, quarters);
		for _ in 0..wise.quarters() {
			self.cycle_front(depth);
		}
		self.rotate_quarters(axis, 4 - quarters);

		self.count += 1;
	}

	/// Turn the layer `depth` below the front face clockwise.
	///
	/// Left column <- Down row <- Right column <- Up row <- Left column,
	/// where Left and Down are read in reverse.
	fn cycle_front(&mut self, depth: usize) {
		let n = self.size();
		let last = n - 1 - depth;
		let s = &mut self.state;

		let mut up_row = s.column_at(Face::Left, last);
		up_row.reverse();
		let mut down_row = s.column_at(Face::Right, depth);
		down_row.reverse();
		let left_col = s.row_at(Face::Down, depth);
		let right_col = s.row_at(Face::Up, last);

		s.put_column(Face::Left, last, &left_col);
		s.put_row(Face::Down, depth, &down_row);
		s.put_column(Face::Right, depth, &right_col);
		s.put_row(Face::Up, last, &up_row);

		if depth == 0 {
			s.rotate_grid(Face::Front, TurnWise::Clockwise);
		}
		if depth == n - 1 {
			s.rotate_grid(Face::Back, TurnWise::CounterClockwise);
		}
	}

	/// Rotate the entire cube. The counter doesn't change.
	pub fn rotate_cube(&mut self, axis: Axis, wise: TurnWise) {
		self.rotate_quarters(axis, wise.quarters());
	}

	fn rotate_quarters(&mut self, axis: Axis, quarters: usize) {
		for _ in 0..quarters % 4 {
			match axis {
				Axis::X => {
					self.state.cycle_faces([Face::Up, Face::Front, Face::Down, Face::Back]);
					self.state.rotate_grid(Face::Right, TurnWise::Clockwise);
					self.state.rotate_grid(Face::Left, TurnWise::CounterClockwise);
				}
				Axis::Y => {
					self.state.cycle_faces([Face::Back, Face::Left, Face::Front, Face::Right]);
					// Back is stored upside down relative to the other side faces
					for face in [Face::Right, Face::Back] {
						self.state.rotate_grid(face, TurnWise::Clockwise);
						self.state.rotate_grid(face, TurnWise::Clockwise);
					}
					self.state.rotate_grid(Face::Up, TurnWise::Clockwise);
					self.state.rotate_grid(Face::Down, TurnWise::CounterClockwise);
				}
				Axis::Z => {
					for depth in 0..self.size() {
						self.cycle_front(depth);
					}
				}
			}
		}
	}

	/// All 24 orientations of a cube, as rotations from the current one.
	pub fn orientations() -> Vec<Vec<Move>> {
		let x = Move::Rotate(Axis::X, TurnWise::Clockwise);
		let x_ = Move::Rotate(Axis::X, TurnWise::CounterClockwise);
		let y = Move::Rotate(Axis::Y, TurnWise::Clockwise);
		let z = Move::Rotate(Axis::Z, TurnWise::Clockwise);
		let z_ = Move::Rotate(Axis::Z, TurnWise::CounterClockwise);

		// Which face ends up on top, then the four turns around it
		let tops = [vec![], vec![x], vec![x, x], vec![x_], vec![z], vec![z_]];

		let mut out = Vec::with_capacity(24);
		for top in tops {
			for quarters in 0..4 {
				let mut seq = top.clone();
				seq.extend(std::iter::repeat(y).take(quarters));
				out.push(seq);
			}
		}
		out
	}

	/// Returns `Ok(false)` as long as a face has more than one color.
	///
	/// A cube with monochrome faces is checked further: every color must be
	/// present and the faces around red must read white, blue, yellow, green
	/// in clockwise order. Otherwise the cube can't exist.
	pub fn is_solved(&self) -> Result<bool, CubeError> {
		let mut colors = [Color::White; NUM_FACES];
		for face in Face::ALL {
			match self.state.uniform_color(face) {
				Some(color) => colors[face as usize] = color,
				None => return Ok(false),
			}
		}

		let mut present = [false; NUM_COLORS];
		for color in colors {
			present[color as usize] = true;
		}
		if present.contains(&false) {
			return Err(InvalidCube::MissingColor.into());
		}

		const AROUND_RED: [Color; 4] = [Color::White, Color::Blue, Color::Yellow, Color::Green];
		let red = Face::ALL
			.into_iter()
			.find(|face| colors[*face as usize] == Color::Red)
			.ok_or(InvalidCube::MissingColor)?;
		let ring = red.ring().map(|face| colors[face as usize]);

		let proper = (0..4).any(|shift| (0..4).all(|i| ring[(i + shift) % 4] == AROUND_RED[i]));
		if !proper {
			return Err(InvalidCube::Reflection.into());
		}

		Ok(true)
	}

	/// Scramble the cube with random rotations followed by random slice moves.
	/// The counter starts from zero afterwards.
	pub fn scramble(&mut self, rotations: usize, moves: usize) {
		self.scramble_with(&mut rand::thread_rng(), rotations, moves);
	}

	pub fn scramble_with<R: Rng + ?Sized>(&mut self, rng: &mut R, rotations: usize, moves: usize) {
		fn random_wise<R: Rng + ?Sized>(rng: &mut R) -> TurnWise {
			if rng.gen_bool(0.5) {
				TurnWise::Clockwise
			} else {
				TurnWise::CounterClockwise
			}
		}

		for _ in 0..rotations {
			let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
			self.rotate_cube(axis, random_wise(rng));
		}

		for _ in 0..moves {
			let face = Face::ALL[rng.gen_range(0..NUM_FACES)];
			let depth = rng.gen_range(0..self.size());
			self.turn_layer(face, depth, random_wise(rng));
		}

		debug!(size = self.size(), rotations, moves, "scrambled cube");
		self.count = 0;
	}

	pub fn checkpoint(&self) -> Checkpoint {
		Checkpoint {
			snapshot: self.state.snapshot(),
			count: self.count,
		}
	}

	pub fn rollback(&mut self, checkpoint: &Checkpoint) -> Result<(), CubeError> {
		self.state.restore(&checkpoint.snapshot)?;
		self.count = checkpoint.count;
		Ok(())
	}

	/// Write the cube (stickers and counter) to a file
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CubeError> {
		let file = std::fs::File::create(path)?;
		bincode::serialize_into(std::io::BufWriter::new(file), self)?;
		Ok(())
	}

	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CubeError> {
		let file = std::fs::File::open(path)?;
		// The stickers are checked while decoding
		Ok(bincode::deserialize_from(std::io::BufReader::new(file))?)
	}
}

impl RubiksCube for Cube {
	fn apply_move(&mut self, mv: Move) {
		match mv {
			Move::Turn(face, wise) => self.turn_layer(face, 0, wise),
			Move::Slice(slice, wise) => {
				let (face, depth) = slice.layer();
				self.turn_layer(face, depth, wise);
			}
			Move::Rotate(axis, wise) => self.rotate_cube(axis, wise),
		}
	}
}

impl std::fmt::Display for Cube {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		std::fmt::Display::fmt(&self.state, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};
	use std::{error::Error, str::FromStr};
	use strum::IntoEnumIterator;

	fn scrambled(size: usize, seed: u64) -> Cube {
		let mut cube = Cube::new(size).unwrap();
		cube.scramble_with(&mut StdRng::seed_from_u64(seed), 5, 30);
		cube
	}

	#[test]
	/// A move followed by its inverse gives the same cube, two quarter turns later
	fn move_then_inverse() {
		for size in 2..=5 {
			let mut cube = scrambled(size, 7);
			for face in Face::iter() {
				for depth in 0..size {
					for wise in TurnWise::iter() {
						let before = cube.stickers().clone();
						let count = cube.count();

						cube.move_slice(face, depth, wise).unwrap();
						cube.move_slice(face, depth, wise.inverse()).unwrap();

						assert_eq!(*cube.stickers(), before);
						assert_eq!(cube.count(), count + 2);
					}
				}
			}
		}
	}

	#[test]
	/// Four rotations around the same axis change nothing, not even the counter
	fn four_rotations() {
		for size in 2..=4 {
			let mut cube = scrambled(size, 3);
			let before = cube.clone();
			for axis in Axis::iter() {
				for _ in 0..4 {
					cube.rotate_cube(axis, TurnWise::Clockwise);
				}
				assert_eq!(cube, before);
			}
		}
	}

	#[test]
	/// Turn directions seen from outside the face
	fn turn_directions() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(3)?;
		cube.apply_move(Move::from_str("r")?);
		// Front goes up
		assert_eq!(cube.stickers().column(Face::Up, 2)?, [Color::Red; 3]);

		let mut cube = Cube::new(3)?;
		cube.apply_move(Move::from_str("u")?);
		// Right goes to the front
		assert_eq!(cube.stickers().row(Face::Front, 0)?, [Color::Blue; 3]);

		let mut cube = Cube::new(3)?;
		cube.apply_move(Move::from_str("b")?);
		// Right goes up
		assert_eq!(cube.stickers().row(Face::Up, 0)?, [Color::Blue; 3]);

		let mut cube = Cube::new(3)?;
		cube.apply_move(Move::from_str("y")?);
		assert_eq!(cube.stickers().uniform_color(Face::Left), Some(Color::Red));
		assert_eq!(cube.count(), 0);
		Ok(())
	}

	#[test]
	/// Rotations are the same as turning every layer
	fn rotation_equals_layers() -> Result<(), Box<dyn Error>> {
		let cases = [("x", "r m' l'"), ("y", "u e' d'"), ("z", "f s b'")];
		for (rotation, layers) in cases {
			let mut a = scrambled(3, 11);
			let mut b = a.clone();
			a.apply_moves(&parse_moves(rotation)?);
			b.apply_moves(&parse_moves(layers)?);
			assert_eq!(a.stickers(), b.stickers(), "{}", rotation);
		}
		Ok(())
	}

	#[test]
	fn depth_out_of_range() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(3)?;
		assert!(matches!(
			cube.move_slice(Face::Up, 3, TurnWise::Clockwise),
			Err(CubeError::Index { index: 3, size: 3 })
		));
		assert_eq!(cube, Cube::new(3)?);
		Ok(())
	}

	#[test]
	/// Every orientation of a fresh cube is solved and they are all different
	fn fresh_cubes_are_solved() -> Result<(), Box<dyn Error>> {
		for size in 2..=5 {
			let mut seen = Vec::new();
			for rotation in Cube::orientations() {
				let mut cube = Cube::new(size)?;
				cube.apply_moves(&rotation);
				assert!(cube.is_solved()?);
				assert!(!seen.contains(cube.stickers()));
				seen.push(cube.stickers().clone());
			}
			assert_eq!(seen.len(), 24);
		}
		Ok(())
	}

	#[test]
	fn broken_sticker_is_not_solved() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(3)?;
		cube.stickers_mut().set(Face::Front, 1, 2, Color::Green)?;
		assert!(!cube.is_solved()?);
		Ok(())
	}

	#[test]
	fn missing_color_is_invalid() -> Result<(), Box<dyn Error>> {
		let mut cube = Cube::new(2)?;
		cube.stickers_mut().set_face(Face::Back, &[Color::Red; 4])?;
		match cube.is_solved() {
			Err(CubeError::Invalid(InvalidCube::MissingColor)) => Ok(()),
			other => panic!("expected a missing color, got {:?}", other),
		}
	}

	#[test]
	/// Swapping two opposite faces gives a mirror image
	fn reflection_is_invalid() -> Result<(), Box<dyn Error>> {
		for size in 2..=4 {
			let mut cube = Cube::new(size)?;
			cube.apply_move(Move::from_str("z")?);
			let left = cube.stickers().face(Face::Left);
			let right = cube.stickers().face(Face::Right);
			cube.stickers_mut().set_face(Face::Left, &right)?;
			cube.stickers_mut().set_face(Face::Right, &left)?;

			let err = cube.is_solved().unwrap_err();
			assert!(err.is_invalid_cube());
			assert!(matches!(err, CubeError::Invalid(InvalidCube::Reflection)));
		}
		Ok(())
	}

	#[test]
	/// A scramble is reproducible with the same seed and resets the counter
	fn seeded_scramble() {
		let a = scrambled(3, 42);
		let b = scrambled(3, 42);
		assert_eq!(a, b);
		assert_eq!(a.count(), 0);
		assert!(!a.is_solved().unwrap());
	}

	#[test]
	/// Rotations while scrambling go both ways
	fn scramble_rotates_both_ways() {
		let mut seen = Vec::new();
		for seed in 0..200 {
			let mut cube = Cube::new(3).unwrap();
			cube.scramble_with(&mut StdRng::seed_from_u64(seed), 1, 0);
			assert!(cube.is_solved().unwrap());
			if !seen.contains(&cube) {
				seen.push(cube);
			}
		}
		// x, x', y, y', z and z' all give different cubes
		assert_eq!(seen.len(), 6);
	}

	#[test]
	fn checkpoint_rollback() -> Result<(), Box<dyn Error>> {
		let mut cube = scrambled(4, 5);
		let checkpoint = cube.checkpoint();
		let before = cube.clone();

		cube.apply_moves(&parse_moves("u r f' m e s")?);
		assert_eq!(cube.count(), 6);
		cube.rollback(&checkpoint)?;
		assert_eq!(cube, before);
		Ok(())
	}

	#[test]
	fn save_and_load() -> Result<(), Box<dyn Error>> {
		let mut cube = scrambled(3, 9);
		cube.apply_moves(&parse_moves("u r")?);

		let path = std::env::temp_dir().join(format!("nxcube-{}.bin", std::process::id()));
		cube.save(&path)?;
		let loaded = Cube::load(&path)?;
		std::fs::remove_file(&path)?;

		assert_eq!(loaded, cube);
		assert_eq!(loaded.count(), 2);
		Ok(())
	}

	#[test]
	/// A file with faces of the wrong size is rejected when loading
	fn load_rejects_broken_faces() -> Result<(), Box<dyn Error>> {
		#[derive(Serialize)]
		struct Faces {
			size: usize,
			faces: [Vec<Color>; NUM_FACES],
		}
		#[derive(Serialize)]
		struct Saved {
			state: Faces,
			count: usize,
		}

		let path = std::env::temp_dir().join(format!("nxcube-{}-broken.bin", std::process::id()));
		let mut broken = Saved {
			state: Faces {
				size: 3,
				faces: Default::default(),
			},
			count: 0,
		};
		std::fs::write(&path, bincode::serialize(&broken)?)?;
		assert!(matches!(Cube::load(&path), Err(CubeError::Encoding(_))));

		// One sticker short on a single face
		broken.state.faces = Face::ALL.map(|face| vec![face.solved_color(); 9]);
		broken.state.faces[Face::Back as usize].pop();
		std::fs::write(&path, bincode::serialize(&broken)?)?;
		assert!(Cube::load(&path).is_err());

		broken.state.size = 1;
		broken.state.faces = Face::ALL.map(|face| vec![face.solved_color(); 1]);
		std::fs::write(&path, bincode::serialize(&broken)?)?;
		assert!(Cube::load(&path).is_err());

		// The same layout with full faces loads
		broken.state.size = 3;
		broken.state.faces = Face::ALL.map(|face| vec![face.solved_color(); 9]);
		std::fs::write(&path, bincode::serialize(&broken)?)?;
		let loaded = Cube::load(&path)?;
		std::fs::remove_file(&path)?;

		assert_eq!(loaded, Cube::new(3)?);
		assert!(loaded.is_solved()?);
		Ok(())
	}

	#[test]
	/// On a 2x2 the middle slice is the opposite face
	fn small_cube_slices() -> Result<(), Box<dyn Error>> {
		let mut a = Cube::new(2)?;
		let mut b = Cube::new(2)?;
		a.apply_moves(&parse_moves("m")?);
		b.apply_moves(&parse_moves("r'")?);
		assert_eq!(a, b);
		Ok(())
	}
}
