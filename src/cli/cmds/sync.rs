use std::{io::Write, time::Duration};

use clap::{App, Arg, ArgMatches, SubCommand};

use exo_git::Store;

use super::load_config;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("sync")
        .about("Pull and push periodically until interrupted")
        .arg(
            Arg::with_name("interval")
                .long("interval")
                .value_name("seconds")
                .takes_value(true)
                .help("Seconds between syncs (default: sync_interval from config)"),
        )
        .arg(
            Arg::with_name("once")
                .long("once")
                .help("Run a single pull-then-push cycle and exit"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(interval) = args.value_of("interval") {
        config = config.with_sync_interval(interval.parse()?);
        config.validate()?;
    }

    let store = Store::from_config(&config);
    store.ensure_valid_environment()?;

    if args.is_present("once") {
        store.sync_once();
        writeln!(cli, "Synced {}/{}", store.remote(), store.branch())?;
        return Ok(());
    }

    writeln!(
        cli,
        "Syncing {}/{} every {}s",
        store.remote(),
        store.branch(),
        config.sync_interval
    )?;
    cli.flush()?;

    store
        .sync(Duration::from_secs(config.sync_interval))?
        .wait();
    Ok(())
}
