use std::path::PathBuf;

use crate::general::DEFAULT_REGION;
use crate::legacy::{CONTEXTS_FILE, NAMESPACES_FILE};

/// Runtime settings taken from the process environment once at startup and
/// then passed around explicitly.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub home_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub aws_dir: PathBuf,
    pub kube_dir: PathBuf,
    pub aws_config_file: PathBuf,
    /// Every entry of `KUBECONFIG`, or `<kube_dir>/config` when unset.
    pub kubeconfig: Vec<PathBuf>,
    pub namespace_config: PathBuf,
    pub profile_export: PathBuf,
    pub default_region: String,
    /// `AWS_REGION`, consulted when no configured region applies.
    pub aws_region: Option<String>,
    pub verbose: bool,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let flag = |key: &str| matches!(var(key).as_deref(), Some("1") | Some("true"));

        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let bin_dir = var("FANCY_BIN_DIR").map(PathBuf::from).unwrap_or_else(|| default_bin_dir(&home_dir));
        let aws_dir = var("FANCY_AWS_DIR").map(PathBuf::from).unwrap_or_else(|| home_dir.join(".aws"));
        let kube_dir = var("FANCY_KUBE_DIR").map(PathBuf::from).unwrap_or_else(|| home_dir.join(".kube"));

        let aws_config_file = var("AWS_CONFIG_FILE").map(PathBuf::from).unwrap_or_else(|| aws_dir.join("config"));
        let kubeconfig = match var("KUBECONFIG") {
            Some(paths) => std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect(),
            None => vec![kube_dir.join("config")],
        };

        Self {
            namespace_config: var("FANCY_NAMESPACE_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| bin_dir.join(NAMESPACES_FILE)),
            profile_export: var("FANCY_PROFILE_TEMP").map(PathBuf::from).unwrap_or_else(default_profile_export),
            default_region: var("FANCY_DEFAULT_REGION").unwrap_or_else(|| DEFAULT_REGION.into()),
            aws_region: var("AWS_REGION"),
            verbose: flag("FANCY_VERBOSE"),
            debug: flag("FANCY_DEBUG"),
            home_dir,
            bin_dir,
            aws_dir,
            kube_dir,
            aws_config_file,
            kubeconfig,
        }
    }

    pub fn context_config(&self) -> PathBuf {
        self.bin_dir.join(CONTEXTS_FILE)
    }
}

fn default_bin_dir(home: &std::path::Path) -> PathBuf {
    if cfg!(windows) {
        home.join("AppData").join("Local").join("fancy-login")
    } else {
        home.join(".local").join("bin")
    }
}

fn default_profile_export() -> PathBuf {
    if cfg!(windows) {
        std::env::temp_dir().join("aws_profile.ps1")
    } else {
        PathBuf::from("/tmp/aws_profile.sh")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_with(vars: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        EnvConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let env = env_with(&[]);
        assert_eq!(env.default_region, "eu-central-1");
        assert!(!env.verbose);
        assert!(!env.debug);
        assert_eq!(env.aws_region, None);
        assert_eq!(env.aws_config_file, env.aws_dir.join("config"));
        assert_eq!(env.kubeconfig, vec![env.kube_dir.join("config")]);
        assert_eq!(env.namespace_config, env.bin_dir.join(".fancy-namespaces.conf"));
        assert_eq!(env.context_config(), env.bin_dir.join(".fancy-contexts.conf"));
    }

    #[cfg(unix)]
    #[test]
    fn unix_defaults() {
        let env = env_with(&[]);
        assert!(env.bin_dir.ends_with(".local/bin"));
        assert_eq!(env.profile_export, PathBuf::from("/tmp/aws_profile.sh"));
    }

    #[test]
    fn overrides_are_honoured() {
        let env = env_with(&[
            ("FANCY_DEFAULT_REGION", "us-west-2"),
            ("FANCY_BIN_DIR", "/custom/bin"),
            ("FANCY_PROFILE_TEMP", "/custom/profile.sh"),
            ("AWS_CONFIG_FILE", "/custom/aws/config"),
            ("AWS_REGION", "ap-south-1"),
        ]);
        assert_eq!(env.default_region, "us-west-2");
        assert_eq!(env.bin_dir, PathBuf::from("/custom/bin"));
        assert_eq!(env.namespace_config, PathBuf::from("/custom/bin/.fancy-namespaces.conf"));
        assert_eq!(env.profile_export, PathBuf::from("/custom/profile.sh"));
        assert_eq!(env.aws_config_file, PathBuf::from("/custom/aws/config"));
        assert_eq!(env.aws_region.as_deref(), Some("ap-south-1"));
    }

    #[test]
    fn boolean_flags_accept_only_one_and_true() {
        assert!(env_with(&[("FANCY_VERBOSE", "true")]).verbose);
        assert!(env_with(&[("FANCY_VERBOSE", "1")]).verbose);
        assert!(!env_with(&[("FANCY_VERBOSE", "yes")]).verbose);
        assert!(!env_with(&[("FANCY_VERBOSE", "false")]).verbose);
        assert!(env_with(&[("FANCY_DEBUG", "true")]).debug);
    }

    #[cfg(unix)]
    #[test]
    fn kubeconfig_splits_path_list() {
        let env = env_with(&[("KUBECONFIG", "/a/config::/b/config")]);
        assert_eq!(env.kubeconfig, vec![PathBuf::from("/a/config"), PathBuf::from("/b/config")]);
    }
}
