use std::io::{self, BufRead, Write};

use nxcube::{control::HELP, prelude::*};

const PROMPT: &str = "cube> ";

/// Draw the cube followed by the move counter
fn draw(out: &mut impl Write, cube: &Cube, char_print: bool) -> io::Result<()> {
	if char_print {
		write!(out, "{}", cube)?;
	} else {
		cube.stickers().write_colored(out)?;
	}
	writeln!(out, "Move count: {}\n", cube.count())
}

/// Read commands from stdin until the cube is solved or the user quits
pub fn run(control: &mut Controller, char_print: bool) -> io::Result<()> {
	let stdin = io::stdin();
	let mut out = io::stdout().lock();

	// Only stop on a solved cube if it didn't start solved
	let mut check_solved = !control.cube().is_solved().unwrap_or(false);

	draw(&mut out, control.cube(), char_print)?;
	write!(out, "{}", PROMPT)?;
	out.flush()?;

	for line in stdin.lock().lines() {
		let line = line?;

		match control.execute(&line) {
			Ok(Reply::Quit) => break,
			Ok(Reply::Help) => writeln!(out, "{}", HELP)?,
			Ok(Reply::Macros(list)) => writeln!(out, "{}", list)?,
			Ok(Reply::Defined(name)) => writeln!(out, "Defined {}", name)?,
			Ok(Reply::Loaded(count)) => writeln!(out, "Loaded {} macros", count)?,
			Ok(Reply::Saved) => writeln!(out, "Saved macros")?,
			Ok(Reply::Solved(trace)) => writeln!(
				out,
				"{} (qt={})",
				format_moves(&trace.moves()),
				trace.quarter_turns
			)?,
			Ok(Reply::Scrambled) => check_solved = true,
			Ok(Reply::Applied(_) | Reply::Undone | Reply::Show) => {}
			Err(e) => {
				writeln!(out, "Invalid command line: {}", line.trim())?;
				writeln!(out, "{}", e)?;
			}
		}

		draw(&mut out, control.cube(), char_print)?;

		match control.cube().is_solved() {
			Ok(true) if check_solved => {
				writeln!(out, "SOLVED!")?;
				break;
			}
			Err(e) => writeln!(out, "{}", e)?,
			_ => {}
		}

		write!(out, "{}", PROMPT)?;
		out.flush()?;
	}

	Ok(())
}
