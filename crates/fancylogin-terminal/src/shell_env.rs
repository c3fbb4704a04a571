use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    Posix,
    PowerShell,
    Cmd,
}

impl ShellFlavor {
    /// PowerShell on Windows, POSIX shells elsewhere.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }
}

/// The selected profile, handed to the calling shell through a small script
/// it sources after the process exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileExport {
    pub profile: String,
}

impl ProfileExport {
    pub fn new(profile: impl Into<String>) -> Self {
        Self { profile: profile.into() }
    }

    pub fn script(&self, flavor: ShellFlavor) -> String {
        match flavor {
            ShellFlavor::Posix => format!("export AWS_PROFILE={}\n", self.profile),
            ShellFlavor::PowerShell => format!("$env:AWS_PROFILE=\"{}\"\n", self.profile),
            ShellFlavor::Cmd => format!("set AWS_PROFILE={}\n", self.profile),
        }
    }

    pub fn write_to(&self, path: &Path, flavor: ShellFlavor) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.script(flavor))?;
        tracing::debug!("exported {} to {}", self.profile, path.display());
        Ok(())
    }
}

/// Environment for the dashboard process: the current environment with the
/// selected profile overlaid. The context goes on the k9s command line.
pub struct DashboardEnv {
    pub profile: String,
}

impl DashboardEnv {
    pub fn to_env_map(&self) -> HashMap<String, String> {
        self.overlay(std::env::vars())
    }

    fn overlay(&self, base: impl IntoIterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut env: HashMap<String, String> = base.into_iter().collect();
        env.insert("AWS_PROFILE".into(), self.profile.clone());
        env
    }
}
