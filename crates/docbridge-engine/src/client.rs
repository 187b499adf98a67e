use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use docbridge_core::config::{absolutize, expand_path, resolve_with_base, EngineSettings};
use docbridge_core::encoding::decode_lossy;
use docbridge_core::error::{ConfigError, EngineError};
use docbridge_core::types::{EngineInvocation, EngineOutput};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the external engine binary, one child process per call.
///
/// Holds only immutable configuration, so a single client can be shared by
/// every concurrent request.
#[derive(Debug, Clone)]
pub struct EngineClient {
    engine_path: PathBuf,
    index_dir: PathBuf,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl EngineClient {
    /// Fails only when the engine binary is missing. A missing index
    /// directory is logged: it just means no index has been built yet.
    pub fn new(settings: &EngineSettings) -> Result<Self, ConfigError> {
        let engine_path = absolutize(&expand_path(&settings.path)).map_err(|e| ConfigError::Invalid(format!("cannot resolve engine path: {e}")))?;
        if !engine_path.is_file() {
            return Err(ConfigError::MissingEngine { path: engine_path });
        }
        let working_dir = match &settings.working_dir {
            Some(dir) => Some(absolutize(&expand_path(dir)).map_err(|e| ConfigError::Invalid(format!("cannot resolve working dir: {e}")))?),
            None => None,
        };
        let index_dir = match &working_dir {
            Some(base) => resolve_with_base(base, &settings.index_dir),
            None => expand_path(&settings.index_dir),
        };
        if !index_dir.exists() {
            tracing::warn!(index_dir = %index_dir.display(), "index directory does not exist yet; build the index before searching");
        }
        Ok(Self { engine_path, index_dir, working_dir, timeout: settings.timeout_secs.map(Duration::from_secs) })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine_path(&self) -> &Path { &self.engine_path }

    pub fn index_dir(&self) -> &Path { &self.index_dir }

    /// `<engine> <abs_doc_dir>`. Relative directories are resolved against the
    /// caller's working directory, never the engine's.
    pub fn build_index(&self, doc_dir: &Path) -> Result<EngineOutput, EngineError> {
        let doc_dir = absolutize(doc_dir).map_err(|_| EngineError::InvalidDocumentDir { path: doc_dir.to_path_buf() })?;
        if !doc_dir.is_dir() {
            return Err(EngineError::InvalidDocumentDir { path: doc_dir });
        }
        tracing::info!(doc_dir = %doc_dir.display(), "building index");
        let output = self.invoke(&EngineInvocation::build_index(&doc_dir.to_string_lossy()))?;
        if !output.stdout.trim().is_empty() {
            tracing::info!(stdout = %output.stdout.trim_end(), "engine build output");
        }
        if !output.stderr.trim().is_empty() {
            tracing::warn!(stderr = %output.stderr.trim_end(), "engine build warnings");
        }
        Ok(output)
    }

    /// `<engine> search <text>`. Zero matches is still a success.
    pub fn query(&self, text: &str) -> Result<EngineOutput, EngineError> {
        self.invoke(&EngineInvocation::search(text))
    }

    pub fn invoke(&self, invocation: &EngineInvocation) -> Result<EngineOutput, EngineError> {
        tracing::debug!(mode = ?invocation.mode, args = ?invocation.args, "invoking engine");
        let mut command = Command::new(&self.engine_path);
        command.args(&invocation.args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        let mut child = command.spawn().map_err(|source| self.unavailable(source))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self.wait(&mut child)?;
        let output = EngineOutput { exit_code: status.code(), stdout: collect(stdout), stderr: collect(stderr) };

        if status.success() {
            Ok(output)
        } else {
            Err(EngineError::InvocationFailed { exit_code: output.exit_code, stderr: output.stderr })
        }
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, EngineError> {
        let Some(limit) = self.timeout else {
            return child.wait().map_err(|source| self.unavailable(source));
        };
        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait().map_err(|source| self.unavailable(source))? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                // Reader threads are left to finish on their own once the pipes close.
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(engine = %self.engine_path.display(), after = ?limit, "engine timed out and was killed");
                return Err(EngineError::Timeout { after: limit });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn unavailable(&self, source: std::io::Error) -> EngineError {
        EngineError::EngineUnavailable { path: self.engine_path.clone(), source }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle.and_then(|h| h.join().ok()).map(|bytes| decode_lossy(&bytes)).unwrap_or_default()
}
