//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{Precision, Traversal};

/// Interactive infix calculator: validate, build and evaluate binary expression trees
#[derive(Parser, Debug)]
#[command(name = "exprtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Floating-point precision: single or double
    #[arg(short, long, global = true)]
    pub precision: Option<Precision>,

    /// Menu banner file (default: Menu.txt)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub menu: Option<PathBuf>,

    /// Additional config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check an expression without building it
    Validate {
        /// Infix expression, e.g. "3 + 4 * 2"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Build and evaluate an expression
    Eval {
        /// Infix expression, e.g. "3 + 4 * 2"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Print traversals and tree shape of an expression
    Show {
        /// Infix expression, e.g. "3 + 4 * 2"
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Only this order: pre, in or post
        #[arg(short, long)]
        order: Option<Traversal>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}
