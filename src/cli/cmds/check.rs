use std::io::Write;

use clap::{App, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("check")
        .about("Verify that git is installed and the wiki repository exists")
}

pub(crate) fn run(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let store = open_store(cli)?;
    store.ensure_valid_environment()?;

    let version = store.git_version()?;
    writeln!(
        cli,
        "git {} ok, wiki repository at {}",
        version,
        store.repo().display()
    )?;

    Ok(())
}
