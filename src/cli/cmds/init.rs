use std::io::Write;

use clap::{App, ArgMatches, SubCommand};

use super::load_config;
use crate::{App as Cli, Result};

use exo_git::Store;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init").about("Create an empty wiki repository")
}

pub(crate) fn run(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let store = Store::from_config(&load_config(cli)?);
    store.init()?;

    writeln!(
        cli,
        "Initialized empty wiki repository in {}",
        store.repo().display()
    )?;

    Ok(())
}
