//! exprtree: an interactive calculator built on binary expression trees
//!
//! Pipeline: validate infix text, build an expression tree with a
//! shunting-yard pass, then traverse (pre/in/post-order) or evaluate it.
//!
//! Layers, innermost first:
//! - [`domain`]: validator, tree builder, node model, traversals, evaluator
//! - [`application`]: the calculator [`application::Session`]
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: clap front end and the interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
