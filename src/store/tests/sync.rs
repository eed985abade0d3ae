use std::{thread, time::Duration};

use super::super::*;

use crate::test_support::TempGitRepo;

// A working repo with `origin` pointing at a fresh bare repo.
fn repo_with_remote() -> (TempGitRepo, TempGitRepo) {
    let remote = TempGitRepo::new_bare();
    let mut local = TempGitRepo::new();
    let url = remote.path().to_str().unwrap().to_string();
    local.git_command(&["remote", "add", "origin", url.as_str()]);
    (local, remote)
}

fn clone_of(remote: &TempGitRepo) -> TempGitRepo {
    let mut clone = TempGitRepo::new();
    let url = remote.path().to_str().unwrap().to_string();
    clone.git_command(&["remote", "add", "origin", url.as_str()]);
    clone
}

#[test]
fn push_then_pull_between_clones() {
    let (local, remote) = repo_with_remote();
    let store = local.store();
    store.write_page(&Page::new("index", "home")).unwrap();
    store.push().unwrap();

    let remote_head = remote.git_output(&["rev-parse", "refs/heads/master"]);
    let local_head = local.git_output(&["rev-parse", "HEAD"]);
    assert_eq!(remote_head, local_head);

    let other = clone_of(&remote);
    other.store().pull().unwrap();
    assert_eq!(other.store().ls().unwrap(), vec!["index.md"]);
    assert_eq!(other.store().view("index").unwrap(), "home");
}

#[test]
fn pull_without_remote_fails() {
    let mut tgr = TempGitRepo::new();
    tgr.commit_file("a.md", "a");

    match tgr.store().pull().unwrap_err() {
        Error::CommandFailed { command, stderr, .. } => {
            assert_eq!(command, "pull origin master");
            assert!(!stderr.is_empty());
        }
        err => panic!("wrong error: {:?}", err),
    }
}

#[test]
fn sync_once_replicates_both_ways() {
    let (local, remote) = repo_with_remote();
    let other = clone_of(&remote);

    local
        .store()
        .write_page(&Page::new("from-local", "a"))
        .unwrap();
    // Remote is still empty, so the pull fails and the push succeeds.
    local.store().sync_once();

    other.store().sync_once();
    other
        .store()
        .write_page(&Page::new("from-other", "b"))
        .unwrap();
    other.store().sync_once();

    local.store().sync_once();
    assert_eq!(
        local.store().ls().unwrap(),
        vec!["from-local.md", "from-other.md"]
    );
}

#[test]
fn sync_once_swallows_errors() {
    // No remote configured and no commits: both halves fail.
    let tgr = TempGitRepo::new();
    tgr.store().sync_once();

    // Not even a repository.
    let dir = TempGitRepo::empty_dir();
    Store::new(dir.path(), "origin", "master").sync_once();
}

#[test]
fn background_sync_runs_until_stopped() {
    // Both pull and push fail here; the loop must keep going regardless.
    let tgr = TempGitRepo::new();
    let handle = tgr.store().sync(Duration::from_secs(1)).unwrap();

    thread::sleep(Duration::from_millis(2500));
    assert!(handle.cycles() >= 1, "cycles: {}", handle.cycles());

    handle.stop();
}

#[test]
fn background_sync_pushes_new_pages() {
    let (local, remote) = repo_with_remote();
    let store = local.store();
    store.write_page(&Page::new("index", "home")).unwrap();

    let handle = store.sync(Duration::from_millis(50)).unwrap();
    for _ in 0..100 {
        if handle.cycles() >= 1 {
            break;
        }
        thread::sleep(Duration::from_millis(50));
    }
    handle.stop();

    let remote_log = remote.git_output(&["log", "--format=%s", "refs/heads/master"]);
    assert!(remote_log.contains("exo: Updated index.md"));
}

#[test]
fn stop_before_first_cycle() {
    let tgr = TempGitRepo::new();
    let handle = tgr.store().sync(Duration::from_secs(3600)).unwrap();

    // Returns promptly instead of waiting out the interval.
    handle.stop();
}

#[test]
fn dropping_handle_ends_loop() {
    let tgr = TempGitRepo::new();
    let handle = tgr.store().sync(Duration::from_millis(10)).unwrap();
    drop(handle);
    thread::sleep(Duration::from_millis(50));
}
