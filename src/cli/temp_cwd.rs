use std::{
    env,
    path::{Path, PathBuf},
};

// Switches the process working directory for the lifetime of the guard,
// so commands that default to `--repo .` can be exercised in-process.
//
// Any test that uses this must be marked #[serial]: the working directory
// is shared by every thread in the test binary.
pub(crate) struct TempCwd {
    previous: PathBuf,
}

impl TempCwd {
    pub fn enter<P: AsRef<Path>>(path: P) -> TempCwd {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { previous }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.previous).unwrap();
    }
}
