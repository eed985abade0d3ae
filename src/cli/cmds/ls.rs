use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("ls")
        .about("List pages in the wiki")
        .arg(
            Arg::with_name("pattern")
                .help("Only list paths matching this pattern (lists every tracked file)"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let store = open_store(cli)?;

    let pages = match args.value_of("pattern") {
        Some(pattern) => store.ls_pattern(pattern)?,
        None => store.ls()?,
    };

    for page in pages {
        writeln!(cli, "{}", page)?;
    }

    Ok(())
}
