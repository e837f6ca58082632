//! Command dispatch: settings layering, loading and printing

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{load_departments, HierarchyService};
use crate::cli::args::{BuildArgs, Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Print {
            build,
            prefix,
            first_prefix,
        }) => _print(cli, build, prefix.as_deref(), first_prefix.as_deref()),
        Some(Commands::Tree { build }) => _tree(cli, build),
        Some(Commands::Flat { build }) => _flat(cli, build),
        Some(Commands::Find { build, id }) => _find(cli, build, id),
        Some(Commands::Size { build }) => _size(cli, build),
        Some(Commands::Config) => _config(cli),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help".to_string(),
        )),
    }
}

/// Loaded settings with the build flags applied on top.
fn settings_for(cli: &Cli, build: &BuildArgs) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if build.forest {
        settings.forest = true;
    }
    if build.orphans.is_some() {
        settings.orphan_policy = build.orphans;
    }
    if build.sorted {
        settings.sorted = true;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(cli))]
fn _print(
    cli: &Cli,
    build: &BuildArgs,
    prefix: Option<&str>,
    first_prefix: Option<&str>,
) -> CliResult<()> {
    let mut settings = settings_for(cli, build)?;
    if let Some(prefix) = prefix {
        settings.prefix = prefix.to_string();
    }
    if let Some(first) = first_prefix {
        settings.first_prefix = Some(first.to_string()).filter(|p| !p.is_empty());
    }
    let departments = load_departments(&build.file)?;
    let text = HierarchyService::new(settings).render(departments)?;
    output::info(&text);
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, build: &BuildArgs) -> CliResult<()> {
    let service = HierarchyService::new(settings_for(cli, build)?);
    let text = service.termtree(load_departments(&build.file)?)?;
    output::info(&text);
    Ok(())
}

#[instrument(skip(cli))]
fn _flat(cli: &Cli, build: &BuildArgs) -> CliResult<()> {
    let service = HierarchyService::new(settings_for(cli, build)?);
    for path in service.flat(load_departments(&build.file)?)? {
        output::info(&path);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _find(cli: &Cli, build: &BuildArgs, id: &str) -> CliResult<()> {
    if id.trim().is_empty() {
        return Err(CliError::InvalidArgs("id must not be empty".to_string()));
    }
    let service = HierarchyService::new(settings_for(cli, build)?);
    let found = service.find(load_departments(&build.file)?, id)?;
    output::action("path", &found.path);
    output::action("layer", &found.layer);
    output::action("children", &found.children);
    Ok(())
}

#[instrument(skip(cli))]
fn _size(cli: &Cli, build: &BuildArgs) -> CliResult<()> {
    let service = HierarchyService::new(settings_for(cli, build)?);
    let report = service.size(load_departments(&build.file)?)?;
    output::action("cached", &report.cached);
    output::action("live", &report.live);
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    output::info(&settings.to_toml()?);
    Ok(())
}
