//! Command interpreter on top of the move engine.
//!
//! A command line is a list of move tokens and user macros. Macros expand
//! to other tokens and may refer to each other, as long as no macro ends
//! up expanding to itself. Every line which changes the cube can be undone.

use crate::cube::{
	engine::{Checkpoint, Cube, DEFAULT_MOVES, DEFAULT_ROTATIONS},
	turn::*,
	*,
};
use crate::solve::{solver_for, Trace};
use std::{
	collections::BTreeMap,
	fs::File,
	io::{BufRead, BufReader, BufWriter, Write},
	path::Path,
	str::FromStr,
};
use tracing::{debug, warn};

/// Words with a meaning of their own, which can't be macro names.
pub const COMMANDS: [&str; 10] = ["quit", "q", "undo", "-", "save", "load", "solve", "cmds", "scramble", "show"];

#[derive(thiserror::Error, Debug)]
pub enum ControlError {
	#[error(transparent)]
	Cube(#[from] CubeError),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("macro \"{0}\" expands to itself")]
	MacroCycle(String),
	#[error("no moves to undo")]
	NothingToUndo,
	#[error("line {line} of the macro file needs a name and at least one token")]
	MacroFile { line: usize },
	#[error("\"{0}\" is a move or a command and can't be redefined")]
	Reserved(String),
}

/// What `Controller::execute` did with a line.
#[derive(Debug)]
pub enum Reply {
	/// Moves were applied, the number of moves after expanding macros
	Applied(usize),
	Defined(String),
	Undone,
	Solved(Trace),
	Scrambled,
	Saved,
	/// Macros were loaded, the number of macros
	Loaded(usize),
	/// The defined macros, one per line
	Macros(String),
	Show,
	Help,
	Quit,
}

pub const HELP: &str = "\
moves:     u d f b l r m e s, rotations: x y z, add ' to turn the other way
name : ... define a macro
undo, -    undo the last line
solve [f]  solve the cube, write every step to f
scramble   scramble the cube
cmds       list the macros
save f     save the macros to f
load f     replace the macros with the ones in f
show       print the cube
quit, q    leave";

pub struct Controller {
	cube: Cube,
	macros: BTreeMap<String, Vec<String>>,
	history: Vec<Checkpoint>,
}

impl Controller {
	pub fn new(cube: Cube) -> Self {
		Self {
			cube,
			macros: BTreeMap::new(),
			history: vec![],
		}
	}

	pub fn cube(&self) -> &Cube {
		&self.cube
	}

	pub fn macros(&self) -> &BTreeMap<String, Vec<String>> {
		&self.macros
	}

	fn is_reserved(name: &str) -> bool {
		Move::from_str(name).is_ok() || COMMANDS.contains(&name) || name == "help" || name == ":"
	}

	/// The name of a macro which would expand to itself, following known macros only.
	fn find_cycle(&self, token: &str, stack: &mut Vec<String>) -> Option<String> {
		let body = self.macros.get(token)?;
		if stack.iter().any(|t| t == token) {
			return Some(token.to_string());
		}

		stack.push(token.to_string());
		let cycle = body.iter().find_map(|t| self.find_cycle(t, stack));
		stack.pop();
		cycle
	}

	/// Define or replace a macro.
	///
	/// Tokens don't need to be known yet, so macros can refer to macros defined later.
	pub fn define(&mut self, name: &str, tokens: Vec<String>) -> Result<(), ControlError> {
		if Self::is_reserved(name) {
			return Err(ControlError::Reserved(name.to_string()));
		}

		let old = self.macros.insert(name.to_string(), tokens);
		if let Some(cycle) = self.find_cycle(name, &mut vec![]) {
			match old {
				Some(old) => self.macros.insert(name.to_string(), old),
				None => self.macros.remove(name),
			};
			return Err(ControlError::MacroCycle(cycle));
		}

		debug!(name, "defined macro");
		Ok(())
	}

	/// Define a macro from a line of the form `name : token token ...`
	pub fn add_command(&mut self, line: &str) -> Result<String, ControlError> {
		let words: Vec<&str> = line.split_whitespace().collect();
		match words.as_slice() {
			[name, ":", tokens @ ..] if !tokens.is_empty() => {
				self.define(name, tokens.iter().map(|t| t.to_string()).collect())?;
				Ok(name.to_string())
			}
			_ => Err(CubeError::UnknownCommand(line.trim().to_string()).into()),
		}
	}

	fn expand_into(&self, token: &str, stack: &mut Vec<String>, out: &mut Vec<Move>) -> Result<(), ControlError> {
		if let Ok(mv) = Move::from_str(token) {
			out.push(mv);
			return Ok(());
		}

		let Some(body) = self.macros.get(token) else {
			warn!(token, "rejected unknown token");
			return Err(CubeError::UnknownCommand(token.to_string()).into());
		};
		if stack.iter().any(|t| t == token) {
			return Err(ControlError::MacroCycle(token.to_string()));
		}

		stack.push(token.to_string());
		for t in body {
			self.expand_into(t, stack, out)?;
		}
		stack.pop();
		Ok(())
	}

	/// Resolve a line of tokens and macros into moves.
	pub fn expand(&self, line: &str) -> Result<Vec<Move>, ControlError> {
		let mut out = vec![];
		for token in line.split_whitespace() {
			self.expand_into(token, &mut vec![], &mut out)?;
		}
		Ok(out)
	}

	/// Apply a line of tokens. Nothing is applied if a token is unknown.
	pub fn do_command(&mut self, line: &str) -> Result<usize, ControlError> {
		let moves = self.expand(line)?;
		if moves.is_empty() {
			return Ok(0);
		}

		self.history.push(self.cube.checkpoint());
		self.cube.apply_moves(&moves);
		Ok(moves.len())
	}

	pub fn undo(&mut self) -> Result<(), ControlError> {
		let checkpoint = self.history.pop().ok_or(ControlError::NothingToUndo)?;
		self.cube.rollback(&checkpoint)?;
		Ok(())
	}

	pub fn scramble(&mut self) {
		self.history.push(self.cube.checkpoint());
		self.cube.scramble(DEFAULT_ROTATIONS, DEFAULT_MOVES);
	}

	/// Solve a copy of the cube. The cube itself is left as it is.
	pub fn solve(&self) -> Result<Trace, ControlError> {
		let moves = solver_for(&self.cube)?.solve()?;
		Ok(Trace::replay(&self.cube, &moves))
	}

	/// One macro per line: the name followed by its tokens
	pub fn save_macros<P: AsRef<Path>>(&self, path: P) -> Result<(), ControlError> {
		let mut out = BufWriter::new(File::create(path)?);
		for (name, tokens) in &self.macros {
			writeln!(out, "{} {}", name, tokens.join(" "))?;
		}
		out.flush()?;
		Ok(())
	}

	/// Replace every macro with the ones stored in the file. Returns how many were read.
	pub fn load_macros<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ControlError> {
		let file = BufReader::new(File::open(path)?);

		let mut entries = vec![];
		for (i, line) in file.lines().enumerate() {
			let line = line?;
			if line.trim().is_empty() {
				continue;
			}
			let mut words = line.split_whitespace().map(str::to_string);
			match (words.next(), words.collect::<Vec<_>>()) {
				(Some(name), tokens) if !tokens.is_empty() => entries.push((name, tokens)),
				_ => return Err(ControlError::MacroFile { line: i + 1 }),
			}
		}

		let old = std::mem::take(&mut self.macros);
		for (name, tokens) in entries {
			if let Err(e) = self.define(&name, tokens) {
				self.macros = old;
				return Err(e);
			}
		}
		Ok(self.macros.len())
	}

	fn list_macros(&self) -> String {
		self.macros
			.iter()
			.map(|(name, tokens)| format!("{} : {}", name, tokens.join(" ")))
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Run one line of the command language.
	pub fn execute(&mut self, line: &str) -> Result<Reply, ControlError> {
		let words: Vec<&str> = line.split_whitespace().collect();

		match words.as_slice() {
			[] => Ok(Reply::Applied(0)),
			["quit" | "q"] => Ok(Reply::Quit),
			["help"] => Ok(Reply::Help),
			["show"] => Ok(Reply::Show),
			["cmds"] => Ok(Reply::Macros(self.list_macros())),
			["undo" | "-"] => self.undo().map(|_| Reply::Undone),
			["scramble"] => {
				self.scramble();
				Ok(Reply::Scrambled)
			}
			["save", file] => self.save_macros(file).map(|_| Reply::Saved),
			["load", file] => self.load_macros(file).map(Reply::Loaded),
			["solve"] => self.solve().map(Reply::Solved),
			["solve", file] => {
				let trace = self.solve()?;
				let mut out = BufWriter::new(File::create(file)?);
				trace.write_to(&mut out)?;
				out.flush()?;
				Ok(Reply::Solved(trace))
			}
			[_, ":", ..] => self.add_command(line).map(Reply::Defined),
			_ => self.do_command(line).map(Reply::Applied),
		}
	}
}
