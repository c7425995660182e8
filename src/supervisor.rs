//! Engine supervision: render config, start the engine, wait for it.
//!
//! The lifecycle is single-shot and each step consumes the previous one:
//! [`Supervisor`] -> [`ConfiguredEngine`] -> [`RunningEngine`] -> [`EngineExit`].
//! Only a `ConfiguredEngine` can spawn, and it only exists once the config
//! file has been written, synced and closed.
//!
//! CHANGELOG:
//! - 10/18/2026 - Background wait via into_task
//! - 10/18/2026 - Initial implementation

use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::ResolvedConfig;
use crate::error::{BootstrapError, Result};
use crate::template::{Template, TemplateFields};

pub const DEFAULT_TEMPLATE_PATH: &str = "/config.json.template";
pub const DEFAULT_CONFIG_PATH: &str = "/config.json";
pub const DEFAULT_ENGINE_PATH: &str = "/usr/bin/xray";

/// How to invoke the engine binary.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    pub binary: PathBuf,
    /// Arguments placed before the config path (e.g. `run`).
    pub leading_args: Vec<String>,
    /// Flag preceding the config path; `None` passes the path positionally.
    pub config_flag: Option<String>,
}

impl EngineCommand {
    /// `<binary> run -config <path>`
    pub fn xray(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            leading_args: vec!["run".to_string()],
            config_flag: Some("-config".to_string()),
        }
    }

    pub fn args(&self, config_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        if let Some(flag) = &self.config_flag {
            args.push(OsString::from(flag));
        }
        args.push(config_path.as_os_str().to_owned());
        args
    }
}

/// Unconfigured supervisor.
#[derive(Debug, Clone)]
pub struct Supervisor {
    template_path: PathBuf,
    output_path: PathBuf,
    engine: EngineCommand,
}

impl Supervisor {
    pub fn new(
        template_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        engine: EngineCommand,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
            engine,
        }
    }

    /// Render the template and write the engine config.
    ///
    /// The template is read and fully parsed before the output file is
    /// opened, so a bad template leaves any existing config untouched.
    pub fn configure(self, config: &ResolvedConfig) -> Result<ConfiguredEngine> {
        let text = std::fs::read_to_string(&self.template_path).map_err(|source| {
            BootstrapError::Template {
                path: self.template_path.clone(),
                source,
            }
        })?;
        let template = Template::parse(&text)?;
        let rendered = template.render(&TemplateFields::from(config))?;

        write_synced(&self.output_path, rendered.as_bytes()).map_err(|source| {
            BootstrapError::ConfigWrite {
                path: self.output_path.clone(),
                source,
            }
        })?;

        info!(
            template = %self.template_path.display(),
            config = %self.output_path.display(),
            placeholders = template.placeholders().len(),
            "wrote engine config"
        );

        Ok(ConfiguredEngine {
            config_path: self.output_path,
            engine: self.engine,
        })
    }
}

/// Create/truncate, write, flush and fsync. The file is closed on return.
fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

/// Config is on disk; the engine has not started.
#[derive(Debug)]
pub struct ConfiguredEngine {
    config_path: PathBuf,
    engine: EngineCommand,
}

impl ConfiguredEngine {
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Start the engine with stdout/stderr inherited from this process.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> Result<RunningEngine> {
        let args = self.engine.args(&self.config_path);
        let child = Command::new(&self.engine.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BootstrapError::Spawn {
                binary: self.engine.binary.clone(),
                source,
            })?;

        let pid = child.id();
        info!(
            binary = %self.engine.binary.display(),
            pid = pid.unwrap_or_default(),
            "engine started"
        );

        Ok(RunningEngine {
            child,
            pid,
            binary: self.engine.binary,
        })
    }
}

/// Handle to the running engine process.
///
/// Dropping it without waiting kills the child.
#[derive(Debug)]
pub struct RunningEngine {
    child: Child,
    pid: Option<u32>,
    binary: PathBuf,
}

impl RunningEngine {
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    /// Wait for the engine to exit and log how it ended.
    ///
    /// A failing engine is reported, not restarted; restarts belong to the
    /// host platform.
    pub async fn wait(mut self) -> Result<EngineExit> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| BootstrapError::Wait { source })?;
        let exit = EngineExit::from(status);

        let binary = self.binary.display();
        match exit {
            EngineExit::Success => info!(%binary, "engine exited cleanly"),
            EngineExit::Code(code) => warn!(%binary, code, "engine exited with failure"),
            EngineExit::Signal(signal) => warn!(%binary, signal, "engine killed by signal"),
            EngineExit::Unknown => error!(%binary, "engine exited with unknown status"),
        }
        Ok(exit)
    }

    /// Move the wait onto a background task.
    pub fn into_task(self) -> JoinHandle<Result<EngineExit>> {
        tokio::spawn(self.wait())
    }
}

/// How the engine process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineExit {
    Success,
    Code(i32),
    Signal(i32),
    Unknown,
}

impl EngineExit {
    pub fn success(&self) -> bool {
        matches!(self, EngineExit::Success)
    }
}

impl From<ExitStatus> for EngineExit {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return EngineExit::Success;
        }
        if let Some(code) = status.code() {
            return EngineExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return EngineExit::Signal(signal);
            }
        }
        EngineExit::Unknown
    }
}
