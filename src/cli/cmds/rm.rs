use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use super::open_store;
use crate::{App as Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("rm")
        .about("Delete a page and commit the deletion")
        .arg(
            Arg::with_name("message")
                .short("m")
                .long("message")
                .value_name("msg")
                .takes_value(true)
                .help("Commit message (default: generated)"),
        )
        .arg(
            Arg::with_name("path")
                .required(true)
                .help("Tracked path to delete, including its extension"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let path = args.value_of("path").unwrap();
    let msg = args.value_of("message").unwrap_or("");

    open_store(cli)?.remove(path, msg)?;

    writeln!(cli, "Removed {}", path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{temp_wiki::TempWiki, App};

    #[test]
    fn removes_page() {
        let wiki = TempWiki::new();
        fs::write(wiki.path().join("old.md"), "bye").unwrap();
        wiki.git(&["add", "old.md"]);
        wiki.git(&["commit", "-q", "-m", "seed"]);

        let stdout = App::run_with_args(vec![
            "--repo",
            wiki.path_str(),
            "rm",
            "-m",
            "clean up",
            "old.md",
        ])
        .unwrap();
        assert_eq!(stdout, b"Removed old.md\n".to_vec());

        assert!(!wiki.path().join("old.md").exists());
        assert_eq!(wiki.git(&["log", "-1", "--format=%s"]), "clean up\n");
    }

    #[test]
    fn error_untracked() {
        let wiki = TempWiki::new();
        assert!(App::run_with_args(vec!["--repo", wiki.path_str(), "rm", "nope.md"]).is_err());
    }
}
