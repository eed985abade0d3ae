use std::path::Path;

use exo_git::{config::CONFIG_FILE_NAME, Config, Store};

use crate::{App, Result};

mod check;
mod grep;
mod init;
mod ls;
mod remote;
mod rm;
mod status;
mod sync;
mod view;
mod whoami;
mod write;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(check::subcommand())
        .subcommand(grep::subcommand())
        .subcommand(init::subcommand())
        .subcommand(ls::subcommand())
        .subcommand(remote::pull_subcommand())
        .subcommand(remote::push_subcommand())
        .subcommand(rm::subcommand())
        .subcommand(status::subcommand())
        .subcommand(sync::subcommand())
        .subcommand(view::subcommand())
        .subcommand(whoami::subcommand())
        .subcommand(write::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("check", Some(m)) => check::run(app, &m),
        ("grep", Some(m)) => grep::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("ls", Some(m)) => ls::run(app, &m),
        ("pull", Some(m)) => remote::run_pull(app, &m),
        ("push", Some(m)) => remote::run_push(app, &m),
        ("rm", Some(m)) => rm::run(app, &m),
        ("status", Some(m)) => status::run(app, &m),
        ("sync", Some(m)) => sync::run(app, &m),
        ("view", Some(m)) => view::run(app, &m),
        ("whoami", Some(m)) => whoami::run(app, &m),
        ("write", Some(m)) => write::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

// Work out the configuration from the top-level options.
//
// An explicit `--config` file wins; otherwise `exocortex.json` in the repo
// is used if there is one. `--repo`, `--remote` and `--branch` override
// whatever the file says.
pub(crate) fn load_config(app: &App) -> Result<Config> {
    let m = &app.arg_matches;
    let repo = Path::new(m.value_of("repo").unwrap_or("."));

    let mut config = match m.value_of("config") {
        Some(path) => Config::load(path)?,
        None => {
            let default_path = repo.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                Config::load(default_path)?
            } else {
                Config::new().with_repo(repo)
            }
        }
    };

    if m.is_present("repo") {
        config = config.with_repo(repo);
    }
    if let Some(remote) = m.value_of("remote") {
        config = config.with_remote(remote);
    }
    if let Some(branch) = m.value_of("branch") {
        config = config.with_branch(branch);
    }

    config.validate()?;
    Ok(config)
}

pub(crate) fn open_store(app: &App) -> Result<Store> {
    Ok(Store::from_config(&load_config(app)?))
}
