use nxcube::prelude::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn scrambled(size: usize, seed: u64) -> Cube {
	let mut cube = Cube::new(size).unwrap();
	cube.scramble_with(&mut StdRng::seed_from_u64(seed), DEFAULT_ROTATIONS, DEFAULT_MOVES);
	cube
}

fn wise(clockwise: bool) -> TurnWise {
	if clockwise {
		TurnWise::Clockwise
	} else {
		TurnWise::CounterClockwise
	}
}

proptest! {
	#[test]
	fn slice_then_inverse_restores(
		seed in any::<u64>(),
		size in 2usize..=5,
		face in 0usize..6,
		depth in 0usize..5,
		clockwise in any::<bool>(),
	) {
		let mut cube = scrambled(size, seed);
		let before = cube.clone();
		let face = Face::from_repr(face).unwrap();
		let depth = depth % size;

		cube.move_slice(face, depth, wise(clockwise)).unwrap();
		cube.move_slice(face, depth, wise(clockwise).inverse()).unwrap();

		prop_assert_eq!(cube.stickers(), before.stickers());
		prop_assert_eq!(cube.count(), before.count() + 2);
	}

	#[test]
	fn four_rotations_are_identity(seed in any::<u64>(), size in 2usize..=5, axis in 0usize..3) {
		let mut cube = scrambled(size, seed);
		let before = cube.clone();

		for _ in 0..4 {
			cube.rotate_cube(Axis::ALL[axis], TurnWise::Clockwise);
		}
		prop_assert_eq!(cube, before);
	}

	#[test]
	/// Holding a solved cube differently doesn't unsolve it
	fn rotated_cube_is_solved(size in 2usize..=5, rotations in proptest::collection::vec((0usize..3, any::<bool>()), 0..8)) {
		let mut cube = Cube::new(size).unwrap();
		for (axis, clockwise) in rotations {
			cube.rotate_cube(Axis::ALL[axis], wise(clockwise));
		}
		prop_assert!(cube.is_solved().unwrap());
	}

	#[test]
	fn formatting_is_stable(seed in any::<u64>(), size in 2usize..=4) {
		let cube = scrambled(size, seed);
		let first = cube.to_string();
		prop_assert_eq!(&first, &cube.to_string());

		let parsed: CubeState = cube.stickers().to_letters().parse().unwrap();
		prop_assert_eq!(&parsed, cube.stickers());
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(12))]

	#[test]
	fn pair_solver_solves(seed in any::<u64>()) {
		let cube = scrambled(2, seed);
		let moves = PairSolver::new(&cube).unwrap().solve().unwrap();
		prop_assert!(moves.len() <= PairSolver::MAX_DEPTH);

		let mut replay = cube.clone();
		replay.apply_moves(&moves);
		prop_assert!(replay.is_solved().unwrap());
	}

	#[test]
	fn layer_solver_solves(seed in any::<u64>()) {
		let cube = scrambled(3, seed);
		let moves = LayerSolver::new(&cube).unwrap().solve().unwrap();

		let mut replay = cube.clone();
		replay.apply_moves(&moves);
		prop_assert!(replay.is_solved().unwrap());
	}
}
