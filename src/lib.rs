//! Git-backed storage for a personal wiki.
//!
//! A [`Store`] wraps a local git repository and exposes the handful of
//! operations a wiki needs: write a page, list pages, read a page, search,
//! and keep the repository in sync with a remote. All version control work
//! is delegated to the host `git` binary.
//!
//! ```no_run
//! use exo_git::{Page, Store};
//!
//! let store = Store::new("/home/me/wiki", "origin", "master");
//! store.ensure_valid_environment()?;
//! store.write_page(&Page::new("notes/todo", "- buy milk"))?;
//! for hit in store.grep("milk")? {
//!     println!("{}:{}: {}", hit.page, hit.line_number, hit.content);
//! }
//! # Ok::<(), exo_git::Error>(())
//! ```

pub mod config;
pub use config::{Config, ConfigError};

mod page;
pub use page::{Page, SearchResult};

pub mod store;
pub use store::{Error, Result, Store, SyncHandle};

pub mod wiki_path;

#[cfg(test)]
pub(crate) mod test_support;
