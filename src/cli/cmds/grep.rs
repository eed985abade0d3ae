use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("grep")
        .about("Search pages (case-insensitive, fixed string)")
        .arg(Arg::with_name("pattern").required(true))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let pattern = args.value_of("pattern").unwrap();

    for hit in open_store(cli)?.grep(pattern)? {
        writeln!(cli, "{}:{}:{}", hit.page, hit.line_number, hit.content)?;
    }

    Ok(())
}
