use std::{error::Error, io::Write, str::FromStr};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use strum::{Display, IntoEnumIterator};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use nxcube::prelude::*;

mod interactive;

#[derive(PartialEq, Eq, Debug, Display, Copy, Clone, strum::EnumIter)]
enum SolverKind {
	/// Optimal search for the 2x2x2
	#[strum(to_string = "pair (2x2x2, optimal)")]
	Pair,
	/// Layer by layer for the 3x3x3
	#[strum(to_string = "layer (3x3x3, layer by layer)")]
	Layer,
}

/// Turn and solve cubes of any size
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// The number of layers of the cube
	#[arg(short = 'n', long, default_value_t = 3)]
	size: usize,

	/// Use a sequence to apply on the cube
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from a string (the same format as when you output the cube via the "-c"-flag)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// Scramble the cube
	#[arg(short = 'r', long, default_value_t = false)]
	scramble: bool,

	/// Number of whole-cube rotations when scrambling
	#[arg(long, default_value_t = DEFAULT_ROTATIONS)]
	rotations: usize,

	/// Number of slice moves when scrambling
	#[arg(long, default_value_t = DEFAULT_MOVES)]
	moves: usize,

	/// Seed for a reproducible scramble
	#[arg(long)]
	seed: Option<u64>,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Output the number of quarter turns of the solution (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Write every step of the solution to a file (if --solve is used)
	#[arg(long)]
	trace: Option<String>,

	/// Output the cube as a string rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Start from a cube saved with --save
	#[arg(long)]
	load: Option<String>,

	/// Save the resulting cube to a file
	#[arg(long)]
	save: Option<String>,

	/// Load user macros for the interactive mode
	#[arg(long)]
	macros: Option<String>,

	/// Enter commands interactively
	#[arg(short, long, default_value_t = false)]
	interactive: bool,

	/// Log what the solvers do
	#[arg(short, long, default_value_t = false)]
	verbose: bool,

	/// Print all solvers and quit
	#[arg(long, default_value_t = false)]
	list_solvers: bool,
}

/// Log to stderr, RUST_LOG takes precedence over --verbose
fn initialize_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();
	initialize_tracing(args.verbose);

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// List the solvers and exit
	if args.list_solvers {
		for kind in SolverKind::iter() {
			writeln!(out, "{}", kind)?;
		}
		return Ok(());
	}

	let mut cube = match &args.load {
		Some(path) => Cube::load(path)?,
		None => Cube::new(args.size)?,
	};

	// Parses a cube out of the cube string
	if !args.set.is_empty() {
		cube = Cube::from_state(CubeState::from_str(&args.set)?);
	}

	if args.scramble {
		match args.seed {
			Some(seed) => cube.scramble_with(&mut StdRng::seed_from_u64(seed), args.rotations, args.moves),
			None => cube.scramble(args.rotations, args.moves),
		}
	}

	cube.apply_moves(&parse_moves(&args.sequence)?);
	debug!(size = cube.size(), "cube ready");

	if args.interactive {
		let mut control = Controller::new(cube);
		if let Some(path) = &args.macros {
			let count = control.load_macros(path)?;
			info!(count, path = path.as_str(), "loaded macros");
		}
		interactive::run(&mut control, args.char_print)?;
		cube = control.cube().clone();
	}

	if let Some(path) = &args.save {
		cube.save(path)?;
	}

	// Solve the cube and only outputs the sequence
	if args.solve {
		let moves = solver_for(&cube)?.solve()?;
		let trace = Trace::replay(&cube, &moves);

		write!(out, "{}", format_moves(&moves))?;
		if args.length {
			writeln!(out, " (qt={})", trace.quarter_turns)?;
		} else {
			writeln!(out)?;
		}

		if let Some(path) = &args.trace {
			let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
			trace.write_to(&mut file)?;
			file.flush()?;
		}
		return Ok(());
	}

	// Print the resulting cube (either as a string or with colors)
	if args.char_print {
		let s: String = cube.stickers().into();
		writeln!(out, "{}", s)?;
	} else {
		cube.stickers().write_colored(out.as_mut())?;
		writeln!(out)?;
	}

	Ok(())
}
