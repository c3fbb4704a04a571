use std::fmt;
use std::io;

use fancylogin_config::ConfigError;

#[derive(Debug)]
pub enum FancyError {
    Config(ConfigError),
    Kubeconfig(String),
    /// The bounded wait on an interactive selection ran out.
    SelectionTimeout { what: String, secs: u64 },
    /// A collaborator ran and exited unsuccessfully; `stderr` is its own diagnostic.
    ExternalTool { tool: String, status: Option<i32>, stderr: String },
    Spawn { tool: String, source: io::Error },
    Io(io::Error),
    WizardAborted(String),
    NoProfiles,
}

impl FancyError {
    pub fn external(tool: impl Into<String>, status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::ExternalTool { tool: tool.into(), status, stderr: stderr.into() }
    }
}

impl fmt::Display for FancyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Kubeconfig(msg) => write!(f, "failed to read kubeconfig: {msg}"),
            Self::SelectionTimeout { what, secs } => write!(f, "{what} selection timed out after {secs} seconds"),
            Self::ExternalTool { tool, status, stderr } => {
                match status {
                    Some(code) => write!(f, "{tool} exited with status {code}")?,
                    None => write!(f, "{tool} was terminated")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            Self::Spawn { tool, source } => write!(f, "failed to start {tool}: {source}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::WizardAborted(reason) => write!(f, "configuration wizard aborted: {reason}"),
            Self::NoProfiles => write!(f, "no AWS profiles found"),
        }
    }
}

impl std::error::Error for FancyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Spawn { source, .. } | Self::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for FancyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for FancyError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
