use std::{path::Path, process::Command};

#[allow(dead_code)]
pub fn exo(repo: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("exo").unwrap();
    cmd.arg("--repo").arg(repo);
    cmd
}

// Run host git in `path`, panicking on failure.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap();

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

// Give a freshly initialized repo a local author so commits work on any host.
#[allow(dead_code)]
pub fn configure_author(path: &Path) {
    git(path, &["config", "user.name", "Exo Tester"]);
    git(path, &["config", "user.email", "tester@example.com"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}
