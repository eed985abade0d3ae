use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use crate::Store;

pub(crate) const TEST_USER: &str = "Exo Tester";

/// A `TempGitRepo` creates a temporary repo using the command-line git
/// from the host system, with a local author configured so commits work
/// regardless of the host's global git config.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempGitRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TempGitRepo {
    // Create a new repo with an unborn `master` branch in a temporary
    // directory. The directory is deleted when the struct is dropped.
    pub fn new() -> TempGitRepo {
        let mut r = TempGitRepo::empty_dir();
        r.git_command(&["init", "-q"])
            .git_command(&["symbolic-ref", "HEAD", "refs/heads/master"])
            .git_command(&["config", "user.name", TEST_USER])
            .git_command(&["config", "user.email", "tester@example.com"])
            .git_command(&["config", "commit.gpgsign", "false"]);
        r
    }

    // Create a bare repo suitable for use as a remote.
    pub fn new_bare() -> TempGitRepo {
        let mut r = TempGitRepo::empty_dir();
        r.git_command(&["init", "-q", "--bare"])
            .git_command(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        r
    }

    // A temporary directory with no repository in it.
    pub fn empty_dir() -> TempGitRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();
        TempGitRepo { tempdir, path }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // A store on this repo tracking `origin`/`master`.
    pub fn store(&self) -> Store {
        Store::new(&self.path, "origin", "master")
    }

    // Create a command struct pointing to the root of the repo.
    pub fn command<S: AsRef<OsStr>>(&self, program: S) -> Command {
        let mut c = Command::new(program);
        c.current_dir(&self.path);
        c
    }

    // Run a git command and return stdout.
    // Since this is used primarily for testing purposes, panics if command fails.
    pub fn git_output<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.command("git").args(args).output().unwrap();

        if !output.status.success() {
            panic!(
                "git command failed with status {:?}\n\nstdout:\n\n{}\n\nstderr:\n\n{}\n\n",
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    // Run a git command and return the git repo struct for method chaining.
    pub fn git_command<I, S>(&mut self, args: I) -> &mut TempGitRepo
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.git_output(args);
        self
    }

    // Write a file in the working tree, creating parent directories.
    pub fn write_file(&mut self, rel_path: &str, contents: &str) -> &mut TempGitRepo {
        let path = self.path.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    // Write, stage and commit a file in one go.
    pub fn commit_file(&mut self, rel_path: &str, contents: &str) -> &mut TempGitRepo {
        let msg = format!("add {}", rel_path);
        self.write_file(rel_path, contents)
            .git_command(&["add", rel_path])
            .git_command(&["commit", "-q", "-m", msg.as_str()])
    }

    // Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        self.git_output(&["rev-list", "--count", "HEAD"])
            .trim()
            .parse()
            .unwrap()
    }

    // Subject line of the latest commit.
    pub fn last_subject(&self) -> String {
        self.git_output(&["log", "-1", "--format=%s"])
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::TempGitRepo;

    #[test]
    fn temp_path() {
        let path = {
            let mut r = TempGitRepo::new();
            r.git_command(&["status"]);

            let path = r.path().to_path_buf();
            assert!(path.join(".git").is_dir());

            path
        };

        assert!(!path.as_path().is_dir());
    }

    #[test]
    fn commit_file_counts() {
        let mut r = TempGitRepo::new();
        r.commit_file("a.md", "a").commit_file("b/c.md", "c");

        assert_eq!(r.commit_count(), 2);
        assert_eq!(r.last_subject(), "add b/c.md");
    }

    #[test]
    #[should_panic(expected = "git command failed with status")]
    fn git_command_error() {
        let mut r = TempGitRepo::new();
        r.git_command(&["bogus"]);
    }
}
