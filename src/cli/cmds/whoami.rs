use std::io::Write;

use clap::{App, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("whoami").about("Show the author name used for commits")
}

pub(crate) fn run(cli: &mut Cli, _args: &ArgMatches) -> Result<()> {
    let user = open_store(cli)?.current_user()?;
    writeln!(cli, "{}", user)?;
    Ok(())
}
