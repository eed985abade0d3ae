use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

use exo_git::Page;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("write")
        .about("Write a page from standard input and commit it")
        .arg(
            Arg::with_name("page")
                .required(true)
                .help("Page path, with or without .md"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let store = open_store(cli)?;

    let mut body = String::new();
    cli.stdin.read_to_string(&mut body)?;

    let page = Page::new(args.value_of("page").unwrap(), body);
    store.write_page(&page)?;

    writeln!(cli, "Wrote {}", page.prefix)?;
    Ok(())
}
