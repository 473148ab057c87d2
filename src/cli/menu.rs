//! Interactive menu loop
//!
//! Reads choices and expressions line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so the loop runs unchanged against
//! stdin/stdout or in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, Session};
use crate::domain::{DomainError, Traversal};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult, ServiceContainer};

/// Banner used when the menu file cannot be read.
pub const DEFAULT_MENU: &str = "\
Menu:
1. Enter an arithmetic expression in infix notation.
2. Build the binary expression tree.
3. Display the binary expression tree.
4. Evaluate the expression (tree traversal).
5. Exit.";

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    EnterExpression,
    BuildTree,
    ShowTraversals,
    Evaluate,
    Exit,
}

impl Choice {
    /// Parse a menu number; anything other than 1..=5 is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<i64>().ok()? {
            1 => Some(Choice::EnterExpression),
            2 => Some(Choice::BuildTree),
            3 => Some(Choice::ShowTraversals),
            4 => Some(Choice::Evaluate),
            5 => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Menu banner lines: the menu file if readable, otherwise a notice plus [`DEFAULT_MENU`].
pub fn load_banner(fs: &dyn FileSystem, path: &Path) -> String {
    match fs.read_to_string(path) {
        Ok(content) => content.lines().collect::<Vec<_>>().join("\n"),
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                debug!("menu file not found: {}", path.display());
            } else {
                warn!("cannot read menu file {}: {}", path.display(), e);
            }
            format!("Menu file not found. Using default menu.\n\n{DEFAULT_MENU}")
        }
    }
}

/// The interactive loop over a session.
pub struct MenuLoop<R, W> {
    input: R,
    out: W,
    session: Session,
    show_tree: bool,
}

impl<R: BufRead, W: Write> MenuLoop<R, W> {
    pub fn new(container: &ServiceContainer, input: R, out: W) -> Self {
        Self {
            input,
            out,
            session: container.session(),
            show_tree: container.settings.show_tree,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Print the banner, then serve choices until 5 or end of input.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&mut self, banner: &str) -> InfraResult<()> {
        self.emit(banner)?;

        loop {
            self.prompt("\nChoose an option:")?;
            let Some(line) = self.read_line()? else {
                debug!("end of input");
                return Ok(());
            };
            self.emit("")?;

            match Choice::parse(&line) {
                Some(Choice::EnterExpression) => self.enter_expression()?,
                Some(Choice::BuildTree) => self.build_tree()?,
                Some(Choice::ShowTraversals) => self.show_traversals()?,
                Some(Choice::Evaluate) => self.evaluate()?,
                Some(Choice::Exit) => {
                    self.emit("Exiting...")?;
                    return Ok(());
                }
                None => {
                    let msg = "Invalid option. Please choose a valid option.";
                    self.emit(msg.yellow())?;
                }
            }
        }
    }

    fn enter_expression(&mut self) -> InfraResult<()> {
        self.prompt("Enter the arithmetic expression in infix notation:")?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        match self.session.enter_expression(&line) {
            Ok(()) => self.emit("Valid expression.".green()),
            Err(ApplicationError::Domain(e @ DomainError::InvalidExpression { .. })) => {
                debug!("{e}");
                self.emit("Invalid expression.".red())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn build_tree(&mut self) -> InfraResult<()> {
        match self.session.build() {
            Ok(_) => self.emit("Binary expression tree created.".green()),
            Err(ApplicationError::NoExpression) => self.emit("Enter a valid expression first."),
            Err(ApplicationError::Domain(e)) => self.emit(format!("Error: {e}").red()),
            Err(e) => Err(e.into()),
        }
    }

    fn show_traversals(&mut self) -> InfraResult<()> {
        match self.traversal_report() {
            Some(report) => self.emit(report),
            None => self.emit("Build the tree first."),
        }
    }

    /// All three traversals, plus the tree shape when enabled.
    fn traversal_report(&self) -> Option<String> {
        let tree = self.session.tree()?;
        let precision = self.session.precision();

        let mut sections: Vec<String> = Traversal::ALL
            .iter()
            .map(|order| format!("\n{}:\n{}", order.title(), tree.render(*order, precision)))
            .collect();
        if self.show_tree {
            sections.push(format!("\nTree:\n{}", tree.to_termtree(precision)));
        }
        Some(sections.join("\n"))
    }

    fn evaluate(&mut self) -> InfraResult<()> {
        match self.session.evaluate() {
            Ok(value) => self.emit(format!("Result of the expression: {value}")),
            Err(ApplicationError::NoTree) => self.emit("Build the tree first."),
            Err(ApplicationError::Domain(DomainError::DivisionByZero)) => {
                self.emit("Error: division by zero".red())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// One line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> InfraResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read input", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, msg: &str) -> InfraResult<()> {
        write!(self.out, "{} ", msg.cyan())
            .and_then(|_| self.out.flush())
            .map_err(|e| InfraError::io("write output", e))
    }

    fn emit(&mut self, msg: impl std::fmt::Display) -> InfraResult<()> {
        writeln!(self.out, "{msg}").map_err(|e| InfraError::io("write output", e))
    }
}

/// Run the menu on stdin/stdout with the configured banner.
pub fn run_interactive(container: &ServiceContainer) -> InfraResult<()> {
    let banner = load_banner(container.fs.as_ref(), &container.settings.menu_file);
    let stdin = io::stdin();
    let stdout = io::stdout();
    MenuLoop::new(container, stdin.lock(), stdout.lock()).run(&banner)
}
