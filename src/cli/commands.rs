//! Command dispatch: one-shot subcommands and the interactive menu

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::Session;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{validator, Traversal};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Load settings, apply command-line overrides and wire the container.
pub fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(precision) = cli.precision {
        settings.precision = precision;
    }
    if let Some(menu) = &cli.menu {
        settings.menu_file = menu.clone();
    }
    debug!(?settings, "effective settings");
    Ok(ServiceContainer::new(settings))
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let container = build_container(cli)?;
    match &cli.command {
        None => menu::run_interactive(&container).map_err(CliError::from),
        Some(Commands::Validate { expression }) => cmd_validate(expression),
        Some(Commands::Eval { expression }) => cmd_eval(&container, expression),
        Some(Commands::Show { expression, order }) => cmd_show(&container, expression, *order),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument]
fn cmd_validate(expression: &str) -> CliResult<()> {
    match validator::check(expression) {
        Ok(()) => {
            output::success("valid expression");
            Ok(())
        }
        Err(e) => {
            output::failure(&e);
            Err(e.into())
        }
    }
}

/// Validate, build and evaluate `expression` in a throwaway session.
fn prepare(container: &ServiceContainer, expression: &str) -> CliResult<Session> {
    let mut session = container.session();
    session.enter_expression(expression)?;
    session.build()?;
    Ok(session)
}

#[instrument(skip(container))]
fn cmd_eval(container: &ServiceContainer, expression: &str) -> CliResult<()> {
    let session = prepare(container, expression)?;
    let value = session.evaluate()?;
    output::info(&value);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(
    container: &ServiceContainer,
    expression: &str,
    order: Option<Traversal>,
) -> CliResult<()> {
    let session = prepare(container, expression)?;

    match order {
        Some(order) => output::info(&session.traverse(order)?),
        None => {
            for order in Traversal::ALL {
                output::action(order.title(), &session.traverse(order)?);
            }
            if container.settings.show_tree {
                if let Some(tree) = session.tree() {
                    output::header("Tree:");
                    output::info(&tree.to_termtree(session.precision()));
                }
            }
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            output::info(&path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                output::warning(&format!("config exists: {}", path.display()));
                return Err(CliError::Usage("use --force to overwrite".into()));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
