use crate::cube::*;
use serde::{Deserialize, Serialize};
use std::{io::Write, str::FromStr};

/// The stickers of a cube with `size` layers.
///
/// Every face is stored row-major. The layout is the unfolded net with
/// Up above Front, Down below Front, Left and Right beside it:
/// - the last row of Up and the first row of Down touch Front
/// - the last column of Left and the first column of Right touch Front
/// - Back is stored as if unfolded below Down, so its first row touches
///   Down, its last row touches Up and its first column lies on the left side
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct CubeState {
	size: usize,
	faces: [Vec<Color>; NUM_FACES],
}

/// A decoded `CubeState` whose faces haven't been checked yet
#[derive(Deserialize)]
struct RawState {
	size: usize,
	faces: [Vec<Color>; NUM_FACES],
}

impl TryFrom<RawState> for CubeState {
	type Error = CubeError;

	fn try_from(raw: RawState) -> Result<Self, Self::Error> {
		if raw.size < MIN_SIZE {
			return Err(CubeError::Size(raw.size));
		}
		for face in &raw.faces {
			Self::check_length(raw.size * raw.size, face.len())?;
		}
		Ok(Self {
			size: raw.size,
			faces: raw.faces,
		})
	}
}

const FINGERPRINT_ORDER: [Face; NUM_FACES] = [
	Face::Up,
	Face::Down,
	Face::Left,
	Face::Right,
	Face::Front,
	Face::Back,
];

/// An opaque copy of a `CubeState`, used to undo changes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot(CubeState);

impl CubeState {
	/// Creates a *solved* cube with the given number of layers.
	pub fn new(size: usize) -> Result<Self, CubeError> {
		if size < MIN_SIZE {
			return Err(CubeError::Size(size));
		}

		let faces = Face::ALL.map(|face| vec![face.solved_color(); size * size]);
		Ok(Self { size, faces })
	}

	pub fn size(&self) -> usize {
		self.size
	}

	fn check_index(&self, index: usize) -> Result<(), CubeError> {
		if index < self.size {
			Ok(())
		} else {
			Err(CubeError::Index {
				index,
				size: self.size,
			})
		}
	}

	fn check_length(expected: usize, got: usize) -> Result<(), CubeError> {
		if expected == got {
			Ok(())
		} else {
			Err(CubeError::Length { expected, got })
		}
	}

	/// Unchecked sticker access for callers which know the size.
	pub(crate) fn at(&self, face: Face, row: usize, col: usize) -> Color {
		self.faces[face as usize][row * self.size + col]
	}

	pub fn get(&self, face: Face, row: usize, col: usize) -> Result<Color, CubeError> {
		self.check_index(row)?;
		self.check_index(col)?;
		Ok(self.at(face, row, col))
	}

	pub fn set(&mut self, face: Face, row: usize, col: usize, color: Color) -> Result<(), CubeError> {
		self.check_index(row)?;
		self.check_index(col)?;
		self.faces[face as usize][row * self.size + col] = color;
		Ok(())
	}

	pub fn row(&self, face: Face, row: usize) -> Result<Vec<Color>, CubeError> {
		self.check_index(row)?;
		Ok(self.row_at(face, row))
	}

	pub fn column(&self, face: Face, col: usize) -> Result<Vec<Color>, CubeError> {
		self.check_index(col)?;
		Ok(self.column_at(face, col))
	}

	/// A row-major copy of the whole face
	pub fn face(&self, face: Face) -> Vec<Color> {
		self.faces[face as usize].clone()
	}

	pub fn set_row(&mut self, face: Face, row: usize, values: &[Color]) -> Result<(), CubeError> {
		self.check_index(row)?;
		Self::check_length(self.size, values.len())?;
		self.put_row(face, row, values);
		Ok(())
	}

	pub fn set_column(&mut self, face: Face, col: usize, values: &[Color]) -> Result<(), CubeError> {
		self.check_index(col)?;
		Self::check_length(self.size, values.len())?;
		self.put_column(face, col, values);
		Ok(())
	}

	// ===== Unchecked lines, for the move engine =====

	pub(crate) fn row_at(&self, face: Face, row: usize) -> Vec<Color> {
		let start = row * self.size;
		self.faces[face as usize][start..start + self.size].to_vec()
	}

	pub(crate) fn column_at(&self, face: Face, col: usize) -> Vec<Color> {
		(0..self.size).map(|row| self.at(face, row, col)).collect()
	}

	pub(crate) fn put_row(&mut self, face: Face, row: usize, values: &[Color]) {
		let start = row * self.size;
		self.faces[face as usize][start..start + self.size].copy_from_slice(values);
	}

	pub(crate) fn put_column(&mut self, face: Face, col: usize, values: &[Color]) {
		for (row, color) in values.iter().enumerate() {
			self.faces[face as usize][row * self.size + col] = *color;
		}
	}

	pub fn set_face(&mut self, face: Face, values: &[Color]) -> Result<(), CubeError> {
		Self::check_length(self.size * self.size, values.len())?;
		self.faces[face as usize].copy_from_slice(values);
		Ok(())
	}

	/// The color of the face if every sticker on it has the same color.
	pub fn uniform_color(&self, face: Face) -> Option<Color> {
		let stickers = &self.faces[face as usize];
		let first = stickers[0];
		stickers.iter().all(|c| *c == first).then_some(first)
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot(self.clone())
	}

	pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CubeError> {
		if snapshot.0.size != self.size {
			return Err(CubeError::WrongSize {
				expected: self.size,
				got: snapshot.0.size,
			});
		}
		self.faces.clone_from(&snapshot.0.faces);
		Ok(())
	}

	/// Rotate the stickers of one face by a quarter turn.
	///
	/// Clockwise: n[i][j] = o[k-j][i], counterclockwise: n[i][j] = o[j][k-i]
	pub(crate) fn rotate_grid(&mut self, face: Face, wise: TurnWise) {
		let k = self.size - 1;
		let old = self.faces[face as usize].clone();
		let new = &mut self.faces[face as usize];

		for i in 0..=k {
			for j in 0..=k {
				new[i * self.size + j] = match wise {
					TurnWise::Clockwise => old[(k - j) * self.size + i],
					TurnWise::CounterClockwise => old[j * self.size + (k - i)],
				};
			}
		}
	}

	/// Move whole faces around: order[0] <- order[1] <- order[2] <- order[3] <- order[0]
	pub(crate) fn cycle_faces(&mut self, order: [Face; 4]) {
		let first = std::mem::take(&mut self.faces[order[0] as usize]);
		for pair in order.windows(2) {
			self.faces[pair[0] as usize] = std::mem::take(&mut self.faces[pair[1] as usize]);
		}
		self.faces[order[3] as usize] = first;
	}

	/// The 2x2 cube made up of the corner stickers only.
	pub fn corners(&self) -> CubeState {
		let k = self.size - 1;
		let faces = Face::ALL.map(|face| {
			vec![
				self.at(face, 0, 0),
				self.at(face, 0, k),
				self.at(face, k, 0),
				self.at(face, k, k),
			]
		});
		CubeState { size: 2, faces }
	}

	/// All stickers in the face order U, D, L, R, F, B, each face row-major.
	pub fn fingerprint(&self) -> Vec<Color> {
		FINGERPRINT_ORDER
			.iter()
			.flat_map(|face| self.faces[*face as usize].iter().copied())
			.collect()
	}

	/// The inverse of `fingerprint`. `colors` must hold six full faces.
	pub(crate) fn from_fingerprint(size: usize, colors: &[Color]) -> CubeState {
		let mut faces: [Vec<Color>; NUM_FACES] = Default::default();
		for (face, chunk) in FINGERPRINT_ORDER.iter().zip(colors.chunks(size * size)) {
			faces[*face as usize] = chunk.to_vec();
		}
		CubeState { size, faces }
	}

	/// The sticker shown in row `row` and column `col` of a face in the net.
	/// Back is shown as seen from behind, in the same strip as Left, Front and Right.
	fn net_sticker(&self, face: Face, row: usize, col: usize) -> Color {
		let k = self.size - 1;
		match face {
			Face::Back => self.at(face, k - row, k - col),
			_ => self.at(face, row, col),
		}
	}

	fn write_net<W, F>(&self, out: &mut W, mut sticker: F) -> std::io::Result<()>
	where
		W: std::io::Write + ?Sized,
		F: FnMut(&mut W, Color) -> std::io::Result<()>,
	{
		const STRIP: [Face; 4] = [Face::Left, Face::Front, Face::Right, Face::Back];
		let space = " ".repeat(self.size + 1);

		for block in [&[Face::Up][..], &STRIP[..], &[Face::Down][..]] {
			for row in 0..self.size {
				for (i, face) in block.iter().enumerate() {
					if block.len() == 1 {
						write!(out, "{}", space)?;
					} else if i > 0 {
						write!(out, " ")?;
					}
					for col in 0..self.size {
						sticker(out, self.net_sticker(*face, row, col))?;
					}
				}
				writeln!(out)?;
			}
		}

		Ok(())
	}

	/// Write the net with ANSI-colors
	pub fn write_colored<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
		self.write_net(out, |out, color| write!(out, "{}█", color.ansi()))?;
		// Reset ansi color
		write!(out, "\x1b[00m")
	}

	/// One letter per sticker in the face order of `Face`.
	pub fn to_letters(&self) -> String {
		self.faces.iter().flatten().map(|c| c.letter()).collect()
	}
}

impl std::fmt::Display for CubeState {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let mut buf = Vec::new();
		self.write_net(&mut buf, |out, color| write!(out, "{}", color.letter()))
			.map_err(|_| std::fmt::Error)?;
		f.write_str(&String::from_utf8_lossy(&buf))
	}
}

impl FromStr for CubeState {
	type Err = CubeError;

	/// Parse the output of `to_letters`. The size follows from the length.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let colors = s
			.chars()
			.filter(|c| !c.is_whitespace())
			.map(|c| Color::from_letter(c).ok_or(CubeError::UnknownColor(c)))
			.collect::<Result<Vec<_>, _>>()?;

		let area = colors.len() / NUM_FACES;
		let size = (1..=area).find(|n| n * n >= area).unwrap_or(0);
		if size * size * NUM_FACES != colors.len() {
			return Err(CubeError::Length {
				expected: size.max(MIN_SIZE).pow(2) * NUM_FACES,
				got: colors.len(),
			});
		}

		let mut state = CubeState::new(size)?;
		for (face, chunk) in Face::ALL.iter().zip(colors.chunks(size * size)) {
			state.set_face(*face, chunk)?;
		}
		Ok(state)
	}
}

impl From<&CubeState> for String {
	fn from(val: &CubeState) -> Self {
		val.to_letters()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	/// A fresh state has every face in its own color
	fn solved_faces() -> Result<(), Box<dyn Error>> {
		let state = CubeState::new(4)?;
		for face in Face::ALL {
			assert_eq!(state.uniform_color(face), Some(face.solved_color()));
			assert_eq!(state.face(face).len(), 16);
		}
		assert!(matches!(CubeState::new(1), Err(CubeError::Size(1))));
		Ok(())
	}

	#[test]
	/// Rows and columns are copies and written back in order
	fn rows_and_columns() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(3)?;
		let values = [Color::Red, Color::Green, Color::Blue];

		state.set_row(Face::Up, 1, &values)?;
		assert_eq!(state.row(Face::Up, 1)?, values);
		assert_eq!(state.column(Face::Up, 2)?, [Color::White, Color::Blue, Color::White]);

		state.set_column(Face::Back, 0, &values)?;
		assert_eq!(state.column(Face::Back, 0)?, values);
		assert_eq!(state.get(Face::Back, 2, 0)?, Color::Blue);

		let mut row = state.row(Face::Up, 1)?;
		row[0] = Color::Yellow;
		assert_eq!(state.get(Face::Up, 1, 0)?, Color::Red);
		Ok(())
	}

	#[test]
	/// Bad indices and lengths are rejected before anything changes
	fn bounds_are_checked() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(2)?;
		let before = state.clone();

		assert!(matches!(state.row(Face::Up, 2), Err(CubeError::Index { index: 2, size: 2 })));
		assert!(state.column(Face::Left, 5).is_err());
		assert!(state.get(Face::Front, 0, 2).is_err());
		assert!(matches!(
			state.set_row(Face::Up, 0, &[Color::Red]),
			Err(CubeError::Length { expected: 2, got: 1 })
		));
		assert!(state.set_column(Face::Up, 2, &[Color::Red, Color::Red]).is_err());
		assert!(state.set_face(Face::Down, &[Color::Red; 3]).is_err());
		assert!(state.set(Face::Down, 2, 0, Color::Red).is_err());

		assert_eq!(state, before);
		Ok(())
	}

	#[test]
	fn snapshot_restore() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(3)?;
		let snapshot = state.snapshot();

		state.set_face(Face::Left, &[Color::Orange; 9])?;
		assert_ne!(state, CubeState::new(3)?);

		state.restore(&snapshot)?;
		assert_eq!(state, CubeState::new(3)?);

		let other = CubeState::new(2)?.snapshot();
		assert!(matches!(
			state.restore(&other),
			Err(CubeError::WrongSize { expected: 3, got: 2 })
		));
		Ok(())
	}

	#[test]
	/// Rotating a face four times gives the same face, one time moves the corner
	fn grid_rotation() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(3)?;
		state.set(Face::Front, 0, 0, Color::Blue)?;

		state.rotate_grid(Face::Front, TurnWise::Clockwise);
		assert_eq!(state.get(Face::Front, 0, 2)?, Color::Blue);

		state.rotate_grid(Face::Front, TurnWise::CounterClockwise);
		state.rotate_grid(Face::Front, TurnWise::CounterClockwise);
		assert_eq!(state.get(Face::Front, 2, 0)?, Color::Blue);
		Ok(())
	}

	#[test]
	/// The net shows Back turned around and formatting twice gives the same text
	fn net_display() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(2)?;
		state.set(Face::Back, 0, 0, Color::Red)?;

		let net = state.to_string();
		assert_eq!(net, state.to_string());
		assert_eq!(net, "   ww\n   ww\ngg rr bb oo\ngg rr bb or\n   yy\n   yy\n");
		Ok(())
	}

	#[test]
	fn letters_roundtrip() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(3)?;
		state.set(Face::Right, 2, 1, Color::Yellow)?;

		let letters: String = (&state).into();
		assert_eq!(letters.len(), 54);
		assert_eq!(CubeState::from_str(&letters)?, state);

		assert!(matches!(CubeState::from_str("wwq"), Err(CubeError::UnknownColor('q'))));
		assert!(matches!(CubeState::from_str("wwwwwww"), Err(CubeError::Length { .. })));
		Ok(())
	}

	#[test]
	fn corner_reduction() -> Result<(), Box<dyn Error>> {
		let mut state = CubeState::new(3)?;
		state.set(Face::Up, 2, 2, Color::Red)?;
		state.set(Face::Up, 1, 1, Color::Blue)?;

		let corners = state.corners();
		assert_eq!(corners.size(), 2);
		assert_eq!(corners.get(Face::Up, 1, 1)?, Color::Red);
		assert_eq!(corners.uniform_color(Face::Down), Some(Color::Yellow));
		Ok(())
	}
}
