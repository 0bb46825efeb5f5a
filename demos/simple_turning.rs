use nxcube::prelude::*;

fn main() -> Result<(), CubeError> {
	let mut cube = Cube::new(4)?;

	let turns = parse_moves("r r l l u u d d f f b b")?;
	let back = invert_moves(&turns);

	cube.apply_moves(&turns);
	println!("{}", cube);

	cube.apply_moves(&back);
	println!("{} quarter turns later:\n{}", cube.count(), cube);

	assert!(cube.is_solved()?);

	// The same inner layer, once from each side
	cube.move_slice(Face::Right, 2, TurnWise::Clockwise)?;
	cube.move_slice(Face::Left, 1, TurnWise::Clockwise)?;
	assert!(cube.is_solved()?);

	Ok(())
}
