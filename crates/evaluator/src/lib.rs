use std::env;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Canonical name of the evaluator script looked up on PATH.
pub const EVALUATOR_SCRIPT: &str = "parsepkgbuild.sh";

/// Environment variable overriding the evaluator script location.
pub const EVALUATOR_ENV: &str = "PKGVET_EVALUATOR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("evaluator script not found; install {EVALUATOR_SCRIPT} on PATH or set {EVALUATOR_ENV}")]
    ScriptNotFound,

    #[error("failed to launch evaluator: {0}")]
    Launch(#[source] io::Error),

    #[error("failed to read evaluator output: {0}")]
    Io(#[from] io::Error),

    #[error("evaluator exited with {0}")]
    NonZeroExit(ExitStatus),

    #[error("evaluator did not finish within {0:?}")]
    Timeout(Duration),
}

/// Driver for the external shell evaluator. The evaluator receives the
/// descriptor's bare filename as its sole argument, runs with the
/// descriptor's directory as its working directory, and prints one
/// `"key": value` line per variable on stdout.
pub struct ShellEvaluator {
    script: PathBuf,
    timeout: Duration,
}

impl ShellEvaluator {
    /// Locate the evaluator script: the PKGVET_EVALUATOR environment
    /// variable wins, then a PATH lookup of the canonical script name.
    pub fn new() -> Result<Self, EvaluatorError> {
        if let Ok(script) = env::var(EVALUATOR_ENV) {
            return Ok(Self::with_script(script));
        }
        match which::which(EVALUATOR_SCRIPT) {
            Ok(script) => Ok(Self::with_script(script)),
            Err(_) => Err(EvaluatorError::ScriptNotFound),
        }
    }

    pub fn with_script(script: impl Into<PathBuf>) -> Self {
        ShellEvaluator {
            script: script.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Run the evaluator over one descriptor file and return its stdout
    /// lines. The full output stream is read to EOF before the exit status
    /// is collected, so a chatty evaluator cannot deadlock on a full pipe.
    /// A watchdog bounds the whole exchange; on expiry the child is killed.
    pub fn evaluate(
        &self,
        working_dir: &Path,
        filename: &str,
    ) -> Result<Vec<String>, EvaluatorError> {
        logging::debug(&format!(
            "running {} {} in {}",
            self.script.display(),
            filename,
            working_dir.display()
        ));

        let mut child = Command::new(&self.script)
            .arg(filename)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(EvaluatorError::Launch)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            EvaluatorError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "evaluator stdout was not captured",
            ))
        })?;

        // Drain stdout on a separate thread so the watchdog below can give
        // up without blocking on a wedged child.
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let lines: io::Result<Vec<String>> = BufReader::new(stdout).lines().collect();
            let _ = sender.send(lines);
        });

        match receiver.recv_timeout(self.timeout) {
            Ok(lines) => {
                let lines = lines?;
                let status = child.wait()?;
                if !status.success() {
                    return Err(EvaluatorError::NonZeroExit(status));
                }
                Ok(lines)
            }
            Err(_) => {
                logging::warning(&format!(
                    "evaluator timed out after {:?}, killing it",
                    self.timeout
                ));
                let _ = child.kill();
                let _ = child.wait();
                Err(EvaluatorError::Timeout(self.timeout))
            }
        }
    }
}
