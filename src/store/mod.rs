//! A wiki store backed by a local git repository.
//!
//! Every operation shells out to the host `git` binary with the repository
//! root as its working directory. The store keeps no data of its own: pages
//! are markdown files in the working tree and history is whatever git
//! records.
//!
//! Clones of a `Store` share a single repository lock. Writes, commits and
//! sync cycles hold it for their duration; reads do not.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use chrono::Local;
use tracing::{debug, warn};

use crate::{
    config::Config,
    page::{self, Page, SearchResult},
    wiki_path,
};

mod error;
pub use error::{Error, Result};

mod sync;
pub use sync::SyncHandle;

/// Files that `Store::ls` never reports.
pub const PREFIX_IGNORE: &[&str] = &[".gitignore", "exocortex.json", "readme.md", ""];

const DEFAULT_GIT: &str = "git";

// Applied to every invocation so that paths with non-ASCII characters come
// back verbatim instead of as quoted octal escapes.
const GIT_CONFIG_OVERRIDES: &[&str] = &["-c", "core.quotePath=false"];

/// Wiki storage on top of a local git repository.
#[derive(Clone, Debug)]
pub struct Store {
    repo: PathBuf,
    remote: String,
    branch: String,
    git: OsString,
    lock: Arc<Mutex<()>>,
}

impl Store {
    /// Create a store for the repository rooted at `repo`, syncing with
    /// `branch` on `remote`.
    ///
    /// Nothing is checked here. Use `ensure_valid_environment` before
    /// relying on the store, or `init` to create the repository.
    pub fn new<P, R, B>(repo: P, remote: R, branch: B) -> Store
    where
        P: Into<PathBuf>,
        R: Into<String>,
        B: Into<String>,
    {
        Store {
            repo: repo.into(),
            remote: remote.into(),
            branch: branch.into(),
            git: OsString::from(DEFAULT_GIT),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &Config) -> Store {
        Store::new(&config.repo, &config.remote, &config.branch)
    }

    /// Use a different `git` executable than the one found on `PATH`.
    pub fn with_git_program<S: Into<OsString>>(mut self, program: S) -> Store {
        self.git = program.into();
        self
    }

    /// Return the repository root (working directory).
    pub fn repo(&self) -> &Path {
        self.repo.as_path()
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> PathBuf {
        self.repo.join(".git")
    }

    /// Create a new git repository at the store's root.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init), except
    /// that an existing repository is an error rather than a reinitialization.
    pub fn init(&self) -> Result<()> {
        let _guard = self.lock();

        let git_dir = self.git_dir();
        if wiki_path::exists(&git_dir)? {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        fs::create_dir_all(&self.repo)?;
        self.exec_unchecked(&["init"])?;
        Ok(())
    }

    /// Return the output of `git status -v`.
    pub fn status(&self) -> Result<String> {
        self.exec(&["status", "-v"])
    }

    /// Commit `path` with `msg`, or with a generated message if `msg` is empty.
    pub fn commit(&self, path: &str, msg: &str) -> Result<String> {
        let _guard = self.lock();
        self.commit_unlocked(path, msg)
    }

    /// Stage `path` and commit it.
    pub fn add(&self, path: &str, msg: &str) -> Result<String> {
        let _guard = self.lock();
        self.add_unlocked(path, msg)
    }

    /// Delete `path` from the wiki and commit the deletion.
    ///
    /// An empty `msg` produces the standard message with the action
    /// `Removed` rather than the `Updated` used by `commit`.
    ///
    /// If the commit fails, the staged deletion is undone and the file is
    /// restored in the working tree before the commit error is returned.
    pub fn remove(&self, path: &str, msg: &str) -> Result<()> {
        let _guard = self.lock();

        self.exec(&["rm", "--", path])?;

        let msg = if msg.is_empty() {
            self.exo_message(path, "Removed")
        } else {
            msg.to_string()
        };

        if let Err(err) = self.commit_unlocked(path, &msg) {
            self.restore_removed(path);
            return Err(err);
        }

        Ok(())
    }

    /// List the tracked files of the latest commit whose paths match `pattern`.
    ///
    /// An empty pattern lists every tracked file.
    pub fn ls_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        let mut args = vec!["ls-tree", "--name-only", "-r", "HEAD"];
        if !pattern.is_empty() {
            args.push("--");
            args.push(pattern);
        }

        let listing = self.exec(&args)?;
        Ok(listing
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// List every page in the wiki, leaving out the files in `PREFIX_IGNORE`.
    pub fn ls(&self) -> Result<Vec<String>> {
        Ok(self
            .ls_pattern("")?
            .into_iter()
            .filter(|p| !PREFIX_IGNORE.contains(&p.as_str()))
            .collect())
    }

    /// Return the author name from git configuration.
    pub fn current_user(&self) -> Result<String> {
        let name = self.exec(&["config", "--get", "user.name"])?;
        Ok(name.trim().to_string())
    }

    /// Read a page's current contents from the working tree.
    pub fn view(&self, path: &str) -> Result<String> {
        self.require_git_dir()?;

        let resolved = wiki_path::resolve(&self.repo, path)?;
        debug!("Resolved path: {}", resolved.display());

        Ok(fs::read_to_string(resolved)?)
    }

    /// Case-insensitive fixed-string search across tracked text files.
    pub fn grep(&self, pattern: &str) -> Result<Vec<SearchResult>> {
        self.require_git_dir()?;

        // `-z` ends each path with a NUL, so paths containing `:` parse cleanly.
        let args = [
            "grep", "--no-color", "-z", "-F", "-n", "-i", "-I", "-e", pattern,
        ];
        let output = self.run(&args)?;

        // `git grep` exits 1 with no output when nothing matches.
        if output.status.code() == Some(1) && output.stdout.is_empty() && output.stderr.is_empty()
        {
            return Ok(Vec::new());
        }

        let stdout = stdout_or_error(&args, output)?;
        stdout
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                page::parse_grep_line(l).ok_or_else(|| Error::MalformedOutput {
                    command: args.join(" "),
                    output: l.to_string(),
                })
            })
            .collect()
    }

    /// Write a page to disk and commit it.
    pub fn write_page(&self, page: &Page) -> Result<()> {
        let path = wiki_path::ensure_md_path(&page.prefix)?;
        self.require_git_dir()?;

        let _guard = self.lock();

        let abs_path = self.repo.join(&path);
        wiki_path::ensure_dir_exists(&abs_path)?;
        write_private(&abs_path, page.body.as_bytes())?;

        self.add_unlocked(&path, "")?;
        Ok(())
    }

    /// Build the standard commit message for `action` on `page`.
    pub fn exo_message(&self, page: &str, action: &str) -> String {
        let author = match self.current_user() {
            Ok(name) if !name.is_empty() => name,
            _ => "Unknown".to_string(),
        };

        format!(
            "exo: {} {} by {} at {}",
            action,
            page,
            author,
            Local::now().format("%-I:%M%p")
        )
    }

    /// Pull the tracked branch from the tracked remote.
    pub fn pull(&self) -> Result<String> {
        let _guard = self.lock();
        self.exec(&["pull", self.remote.as_str(), self.branch.as_str()])
    }

    /// Push the tracked branch to the tracked remote.
    pub fn push(&self) -> Result<String> {
        let _guard = self.lock();
        self.exec(&["push", self.remote.as_str(), self.branch.as_str()])
    }

    /// Run one pull-then-push cycle.
    ///
    /// Failures are logged and otherwise ignored; a failed pull does not
    /// prevent the push.
    pub fn sync_once(&self) {
        debug!(
            "Starting sync for remote '{}' and branch '{}'",
            self.remote, self.branch
        );
        let start = Instant::now();

        {
            let _guard = self.lock();

            if let Err(err) = self.exec(&["pull", self.remote.as_str(), self.branch.as_str()]) {
                warn!("sync: pull failed: {}", err);
            }

            if let Err(err) = self.exec(&["push", self.remote.as_str(), self.branch.as_str()]) {
                warn!("sync: push failed: {}", err);
            }
        }

        debug!("Finished sync in: {:?}", start.elapsed());
    }

    /// Start syncing in the background every `interval` until the returned
    /// handle is stopped or dropped.
    pub fn sync(&self, interval: Duration) -> Result<SyncHandle> {
        Ok(sync::spawn(self.clone(), interval)?)
    }

    /// Return the installed git version (`2.39.2` for `git version 2.39.2`).
    pub fn git_version(&self) -> Result<String> {
        let args = ["--version"];
        let output = self.command(&args).output().map_err(|source| Error::Spawn {
            command: args.join(" "),
            source,
        })?;

        let stdout = stdout_or_error(&args, output)?;
        parse_version(&stdout).ok_or_else(|| Error::MalformedOutput {
            command: args.join(" "),
            output: stdout.trim().to_string(),
        })
    }

    /// Check that git is installed and that the store's root holds a git
    /// repository.
    pub fn ensure_valid_environment(&self) -> Result<()> {
        let version = self.git_version()?;
        debug!("Found git version {}", version);

        if !wiki_path::exists(&self.repo)? {
            return Err(Error::WorkDirDoesntExist(self.repo.clone()));
        }

        self.require_git_dir()
    }

    fn add_unlocked(&self, path: &str, msg: &str) -> Result<String> {
        self.exec(&["add", "--", path])?;
        self.commit_unlocked(path, msg)
    }

    fn commit_unlocked(&self, path: &str, msg: &str) -> Result<String> {
        let msg = if msg.is_empty() {
            self.exo_message(path, "Updated")
        } else {
            msg.to_string()
        };

        self.exec(&["commit", "-m", &msg, "--", path])
    }

    // Undo a `git rm` whose commit failed.
    fn restore_removed(&self, path: &str) {
        if let Err(err) = self.exec(&["reset", "-q", "HEAD", "--", path]) {
            warn!("could not unstage removal of {}: {}", path, err);
            return;
        }
        if let Err(err) = self.exec(&["checkout", "--", path]) {
            warn!("could not restore {}: {}", path, err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a panic elsewhere can't leave it inconsistent.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_git_dir(&self) -> Result<()> {
        let git_dir = self.git_dir();
        if wiki_path::exists(&git_dir)? {
            Ok(())
        } else {
            Err(Error::GitDirDoesntExist(git_dir))
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut c = Command::new(&self.git);
        c.args(GIT_CONFIG_OVERRIDES).args(args);
        c
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("git {} (in {})", args.join(" "), self.repo.display());

        self.command(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|source| Error::Spawn {
                command: args.join(" "),
                source,
            })
    }

    // Run git without checking for `.git` first. Only `init` needs this.
    fn exec_unchecked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        stdout_or_error(args, output)
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        self.require_git_dir()?;
        self.exec_unchecked(args)
    }
}

fn stdout_or_error(args: &[&str], output: Output) -> Result<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(Error::CommandFailed {
            command: args.join(" "),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn parse_version(output: &str) -> Option<String> {
    let mut tokens = output.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("git"), Some("version"), Some(version)) => Some(version.to_string()),
        _ => None,
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::{fs::OpenOptions, io::Write, os::unix::fs::OpenOptionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
mod tests;
