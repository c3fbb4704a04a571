use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use kube::config::Kubeconfig;
use regex::Regex;

use crate::collaborators::{ContextSource, ProfileSource};
use crate::error::FancyError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsProfile {
    pub name: String,
    pub account_id: Option<String>,
    pub region: Option<String>,
    pub sso_start_url: Option<String>,
    pub sso_region: Option<String>,
    pub sso_role: Option<String>,
    pub is_sso: bool,
}

impl AwsProfile {
    fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    fn apply(&mut self, key: &str, value: &str) {
        let value = Some(value.to_string());
        match key {
            "sso_account_id" => {
                self.account_id = value;
                self.is_sso = true;
            }
            "sso_start_url" => {
                self.sso_start_url = value;
                self.is_sso = true;
            }
            "sso_region" => self.sso_region = value,
            "sso_role_name" => self.sso_role = value,
            "region" => self.region = value,
            _ => {}
        }
    }
}

fn section_name(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner == "default" {
        return Some("default");
    }
    let rest = inner.strip_prefix("profile")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim()).filter(|name| !name.is_empty())
}

/// Reads `[profile NAME]` and `[default]` sections of an AWS CLI config file.
/// Other sections (`[sso-session ...]`, `[services ...]`) are skipped.
pub fn parse_aws_config(text: &str) -> Vec<AwsProfile> {
    let mut profiles = Vec::new();
    let mut current: Option<AwsProfile> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            profiles.extend(current.take());
            current = section_name(line).map(AwsProfile::named);
            continue;
        }
        if let (Some(profile), Some((key, value))) = (current.as_mut(), line.split_once('=')) {
            profile.apply(key.trim(), value.trim());
        }
    }
    profiles.extend(current);

    for profile in &mut profiles {
        if profile.account_id.is_none() {
            profile.account_id = account_id_from_name(&profile.name);
        }
    }
    profiles
}

/// A twelve digit run inside a profile name is taken as its account id.
pub fn account_id_from_name(name: &str) -> Option<String> {
    static ACCOUNT: OnceLock<Regex> = OnceLock::new();
    let re = ACCOUNT.get_or_init(|| Regex::new(r"(?:^|\D)(\d{12})(?:\D|$)").expect("account id regex is valid"));
    re.captures(name).map(|caps| caps[1].to_string())
}

#[derive(Debug, Clone)]
pub struct AwsConfigFile {
    path: PathBuf,
}

impl AwsConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_sso(&self, profile: &str) -> Result<bool, FancyError> {
        Ok(self.profiles()?.iter().any(|p| p.name == profile && p.is_sso))
    }
}

impl ProfileSource for AwsConfigFile {
    fn profiles(&self) -> Result<Vec<AwsProfile>, FancyError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| {
            FancyError::Config(fancylogin_config::ConfigError::Read { path: self.path.clone(), source })
        })?;
        Ok(parse_aws_config(&text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeContext {
    pub name: String,
    pub cluster: String,
    pub namespace: Option<String>,
}

/// Contexts from every kubeconfig on the list, merged in order the way
/// kubectl treats `KUBECONFIG`.
#[derive(Debug, Clone)]
pub struct KubeconfigFiles {
    paths: Vec<PathBuf>,
}

impl KubeconfigFiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    fn read_merged(&self) -> Result<Kubeconfig, FancyError> {
        let mut merged: Option<Kubeconfig> = None;
        for path in self.paths.iter().filter(|p| p.exists()) {
            let config = Kubeconfig::read_from(path).map_err(|e| FancyError::Kubeconfig(e.to_string()))?;
            merged = Some(match merged {
                Some(previous) => previous.merge(config).map_err(|e| FancyError::Kubeconfig(e.to_string()))?,
                None => config,
            });
        }
        merged.ok_or_else(|| FancyError::Kubeconfig("no kubeconfig file found".into()))
    }
}

impl ContextSource for KubeconfigFiles {
    fn contexts(&self) -> Result<Vec<KubeContext>, FancyError> {
        let kubeconfig = self.read_merged()?;
        Ok(kubeconfig
            .contexts
            .into_iter()
            .map(|named| {
                let (cluster, namespace) = match named.context {
                    Some(ctx) => (ctx.cluster, ctx.namespace),
                    None => (String::new(), None),
                };
                KubeContext { name: named.name, cluster, namespace }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AWS_CONFIG: &str = r#"
# shared settings
[default]
region = eu-central-1

[profile ACME_DEV_ADMIN]
sso_start_url = https://acme.awsapps.com/start
sso_region = eu-west-1
sso_account_id = 111122223333
sso_role_name = AdministratorAccess
region = eu-west-1

[sso-session acme]
sso_start_url = https://acme.awsapps.com/start

[profile legacy-123456789012-ro]
region = us-east-1
"#;

    #[test]
    fn parses_default_and_named_profiles() {
        let profiles = parse_aws_config(AWS_CONFIG);
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["default", "ACME_DEV_ADMIN", "legacy-123456789012-ro"]);
    }

    #[test]
    fn sso_keys_mark_profile_as_sso() {
        let profiles = parse_aws_config(AWS_CONFIG);
        let dev = &profiles[1];
        assert!(dev.is_sso);
        assert_eq!(dev.account_id.as_deref(), Some("111122223333"));
        assert_eq!(dev.sso_region.as_deref(), Some("eu-west-1"));
        assert_eq!(dev.sso_role.as_deref(), Some("AdministratorAccess"));
        assert_eq!(dev.region.as_deref(), Some("eu-west-1"));
        assert!(!profiles[0].is_sso);
    }

    #[test]
    fn account_id_inferred_from_name() {
        let profiles = parse_aws_config(AWS_CONFIG);
        assert_eq!(profiles[2].account_id.as_deref(), Some("123456789012"));
        assert_eq!(profiles[0].account_id, None);
    }

    #[test]
    fn account_id_needs_exactly_twelve_digits() {
        assert_eq!(account_id_from_name("acct_123456789012_admin"), Some("123456789012".into()));
        assert_eq!(account_id_from_name("1234567890123"), None);
        assert_eq!(account_id_from_name("dev-42"), None);
    }

    #[test]
    fn section_names_require_profile_keyword() {
        assert_eq!(section_name("[profile x]"), Some("x"));
        assert_eq!(section_name("[default]"), Some("default"));
        assert_eq!(section_name("[profilex]"), None);
        assert_eq!(section_name("[sso-session a]"), None);
    }

    #[test]
    fn aws_config_file_reports_sso() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, AWS_CONFIG).unwrap();
        let file = AwsConfigFile::new(&path);
        assert!(file.is_sso("ACME_DEV_ADMIN").unwrap());
        assert!(!file.is_sso("default").unwrap());
        assert_eq!(file.profiles().unwrap().len(), 3);
    }

    #[test]
    fn missing_aws_config_is_an_error() {
        let file = AwsConfigFile::new("/nonexistent/aws/config");
        assert!(file.profiles().is_err());
    }

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
- name: dev-cluster
  cluster:
    server: https://dev.example.com
contexts:
- name: dev
  context:
    cluster: dev-cluster
    user: dev-user
    namespace: team-a
- name: prod
  context:
    cluster: prod-cluster
    user: prod-user
"#;

    #[test]
    fn kubeconfig_contexts_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, KUBECONFIG).unwrap();
        let files = KubeconfigFiles::new(vec![dir.path().join("missing"), path]);

        let contexts = files.contexts().unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].name, "dev");
        assert_eq!(contexts[0].cluster, "dev-cluster");
        assert_eq!(contexts[0].namespace.as_deref(), Some("team-a"));
        assert_eq!(contexts[1].namespace, None);
    }

    #[test]
    fn no_kubeconfig_is_an_error() {
        let files = KubeconfigFiles::new(vec![PathBuf::from("/nonexistent/kube/config")]);
        assert!(files.contexts().is_err());
    }
}
