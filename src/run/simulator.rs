use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// A blocking external radiative-transfer program.
pub trait Simulator: Send + Sync {
    /// Runs the program inside `workdir` and returns its exit status
    /// (0 = success). `Err` means it could not be run at all.
    fn invoke(&self, workdir: &Path, args: &[&str]) -> io::Result<i32>;
}

impl<F> Simulator for F
where
    F: Fn(&Path, &[&str]) -> io::Result<i32> + Send + Sync,
{
    fn invoke(&self, workdir: &Path, args: &[&str]) -> io::Result<i32> {
        self(workdir, args)
    }
}

/// The MCFOST command-line program.
#[derive(Debug, Clone)]
pub struct McfostCli {
    program: PathBuf,
    env: BTreeMap<String, String>,
}

impl McfostCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

impl Simulator for McfostCli {
    fn invoke(&self, workdir: &Path, args: &[&str]) -> io::Result<i32> {
        debug!(program = %self.program.display(), ?args, workdir = %workdir.display(), "invoking simulator");
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(workdir)
            .envs(&self.env)
            .output()?;

        // Killed by a signal: no exit code
        let code = output.status.code().unwrap_or(1);
        if code != 0 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(code, ?args, stderr = %stderr.trim(), "simulator exited with an error");
        }
        Ok(code)
    }
}
