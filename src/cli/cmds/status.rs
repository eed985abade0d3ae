use std::io::Write;

use clap::{App, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("status").about("Show the repository status")
}

pub(crate) fn run(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let status = open_store(cli)?.status()?;
    write!(cli, "{}", status)?;
    Ok(())
}
