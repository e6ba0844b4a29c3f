//! Command dispatch: load settings, restore the session, run one command.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{SelectionSession, TemplateOptions};
use crate::application::{RenderOptions, TreeRender};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = match &cli.command {
        Some(command) => command,
        None => {
            return Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e).into());
        }
    };

    if let Commands::Completion { shell } = command {
        return cmd_completion(*shell);
    }

    let container = ServiceContainer::new(load_settings(cli)?);

    match command {
        Commands::Show { expand_all, ids } => cmd_show(&container, *expand_all, *ids),
        Commands::Toggle { ids } => cmd_toggle(&container, ids),
        Commands::SelectAll => cmd_select_all(&container),
        Commands::Expand { ids } => cmd_expand(&container, ids),
        Commands::ExpandAll => cmd_expand_all(&container, true),
        Commands::CollapseAll => cmd_expand_all(&container, false),
        Commands::State { id } => cmd_state(&container, id),
        Commands::Fields => cmd_fields(&container),
        Commands::Export {
            output,
            keys,
            delimiter,
        } => cmd_export(&container, output.as_ref(), *keys, delimiter.as_deref()),
        Commands::Reset => cmd_reset(&container),
        Commands::Config { command } => cmd_config(&container, command, cli),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Settings with command-line flags applied on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let project_dir = cli
        .project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let mut settings = Settings::load(project_dir.as_deref())?;
    if let Some(tree) = &cli.tree {
        settings.tree_file = Some(tree.clone());
    }
    if let Some(state) = &cli.state {
        settings.state_file = state.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Restore the stored session, or open a fresh one.
fn open_session(container: &ServiceContainer) -> CliResult<SelectionSession> {
    let tree_file = container.tree_file()?;
    let model = container.trees.load(&tree_file)?;
    let session = match container.store.load()? {
        Some(state) => SelectionSession::restore(model, state),
        None => {
            let mut session = SelectionSession::new(model);
            session.open();
            session
        }
    };
    Ok(session)
}

fn save_session(container: &ServiceContainer, session: &SelectionSession) -> CliResult<()> {
    container.store.save(&session.snapshot())?;
    Ok(())
}

fn print_tree(
    container: &ServiceContainer,
    session: &SelectionSession,
    expand_all: bool,
    ids: bool,
) {
    let options = RenderOptions {
        expand_all,
        show_ids: ids || container.settings.show_ids,
    };
    output::info(&session.to_tree_string(&options));
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, expand_all: bool, ids: bool) -> CliResult<()> {
    let session = open_session(container)?;
    print_tree(container, &session, expand_all, ids);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_toggle(container: &ServiceContainer, ids: &[String]) -> CliResult<()> {
    let mut session = open_session(container)?;
    session.toggle_many(ids)?;
    save_session(container, &session)?;
    print_tree(container, &session, false, false);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_select_all(container: &ServiceContainer) -> CliResult<()> {
    let mut session = open_session(container)?;
    let selection = session.select_all()?;
    if selection.is_empty() {
        output::success("selection cleared");
    } else {
        output::success(&format!("{} nodes selected", selection.len()));
    }
    save_session(container, &session)?;
    print_tree(container, &session, false, false);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_expand(container: &ServiceContainer, ids: &[String]) -> CliResult<()> {
    let mut session = open_session(container)?;
    for id in ids {
        session.toggle_expanded(id)?;
    }
    save_session(container, &session)?;
    print_tree(container, &session, false, false);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_expand_all(container: &ServiceContainer, expand: bool) -> CliResult<()> {
    let mut session = open_session(container)?;
    if expand {
        session.expand_all()?;
    } else {
        session.collapse_all()?;
    }
    save_session(container, &session)?;
    print_tree(container, &session, false, false);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_state(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let session = open_session(container)?;
    let state = session.state(id)?;
    output::info(&format!("{id}: {state}"));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_fields(container: &ServiceContainer) -> CliResult<()> {
    let session = open_session(container)?;
    let fields = session.confirm()?;
    if fields.is_empty() {
        output::warning("no fields selected");
        return Ok(());
    }
    let summary = session.summary();
    output::header(&format!(
        "{} of {} fields selected",
        summary.selected_fields, summary.total_fields
    ));
    for field in &fields {
        let group = field.payload.group.as_deref().unwrap_or("-");
        output::detail(&format!(
            "{}\t{}\t{}\t{}",
            field.id, field.label, field.payload.key, group
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_export(
    container: &ServiceContainer,
    output_path: Option<&PathBuf>,
    keys: bool,
    delimiter: Option<&str>,
) -> CliResult<()> {
    let session = open_session(container)?;
    let fields = session.confirm()?;
    if fields.is_empty() {
        output::warning("no fields selected, template is empty");
    }

    let settings = &container.settings;
    let options = TemplateOptions::from_delimiter(
        delimiter.unwrap_or(&settings.delimiter),
        keys || settings.include_keys,
    )?;

    match output_path {
        Some(path) => {
            container.templates.write(&fields, &options, path)?;
            output::success(&format!(
                "template with {} fields written to {}",
                fields.len(),
                path.display()
            ));
        }
        None => print!("{}", container.templates.render(&fields, &options)),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_reset(container: &ServiceContainer) -> CliResult<()> {
    if container.store.clear()? {
        output::success("session closed, selection discarded");
    } else {
        output::info("no open session");
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, cli: &Cli) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info("global: <unavailable>"),
            }
            if let Some(dir) = cli
                .project_dir
                .clone()
                .or_else(|| std::env::current_dir().ok())
            {
                output::info(&format!("local:  {}", local_config_path(&dir).display()));
            }
            output::info(&format!(
                "state:  {}",
                container.settings.state_file.display()
            ));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
