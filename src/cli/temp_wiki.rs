use std::{path::Path, process::Command};

use exo_git::Store;

// An initialized wiki repository in a temporary directory, with a local
// author configured so commits succeed on any host.
pub(crate) struct TempWiki {
    tempdir: tempfile::TempDir,
}

impl TempWiki {
    pub fn new() -> TempWiki {
        let tempdir = tempfile::tempdir().unwrap();
        Store::new(tempdir.path(), "origin", "master").init().unwrap();

        let wiki = TempWiki { tempdir };
        wiki.git(&["config", "user.name", "Exo Tester"]);
        wiki.git(&["config", "user.email", "tester@example.com"]);
        wiki.git(&["config", "commit.gpgsign", "false"]);
        wiki
    }

    pub fn path(&self) -> &Path {
        self.tempdir.path()
    }

    pub fn path_str(&self) -> &str {
        self.path().to_str().unwrap()
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
