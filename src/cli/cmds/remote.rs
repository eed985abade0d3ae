use std::io::Write;

use clap::{App, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn pull_subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("pull").about("Pull the tracked branch from the remote")
}

pub(crate) fn push_subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("push").about("Push the tracked branch to the remote")
}

pub(crate) fn run_pull(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let output = open_store(cli)?.pull()?;
    write!(cli, "{}", output)?;
    Ok(())
}

pub(crate) fn run_push(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let output = open_store(cli)?.push()?;
    write!(cli, "{}", output)?;
    Ok(())
}
