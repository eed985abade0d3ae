use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("view")
        .about("Print a page")
        .arg(
            Arg::with_name("page")
                .required(true)
                .help("Page path, with or without .md"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let page = args.value_of("page").unwrap();
    let body = open_store(cli)?.view(page)?;
    write!(cli, "{}", body)?;
    Ok(())
}
