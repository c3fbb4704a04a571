//! Rows shown in the profile picker. Decoration is for the operator only;
//! the picked row is always mapped back to the bare profile name.

use fancylogin_config::{FancyConfig, ProfileConfig};

use crate::collaborators::ProfileSource;
use crate::error::FancyError;

pub const QUICK_ACCESS_HEADER: &str = "=== QUICK ACCESS (K9S AUTO-LAUNCH) ===";
pub const CONFIGURED_HEADER: &str = "=== OTHER CONFIGURED PROFILES ===";
pub const UNCONFIGURED_HEADER: &str = "=== UNCONFIGURED PROFILES ===";
pub const ALL_CONFIGURED_HINT: &str = "✓ All AWS profiles are configured! Run --config to modify settings.";

const UNCONFIGURED_INDENT: &str = "           ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDisplayInfo {
    /// Profile identity; empty for headers, separators and hints.
    pub name: String,
    pub display_text: String,
    pub is_configured: bool,
    pub metadata: String,
}

impl ProfileDisplayInfo {
    fn decoration(text: &str) -> Self {
        Self { name: String::new(), display_text: text.to_string(), is_configured: false, metadata: String::new() }
    }

    pub fn is_selectable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// `| ECR | k8s:<context> | auto-k9s`, or empty when nothing is enabled.
pub fn profile_metadata(profile: &ProfileConfig) -> String {
    let mut parts = Vec::new();
    if profile.ecr_login {
        parts.push("ECR".to_string());
    }
    if profile.has_context() {
        parts.push(format!("k8s:{}", profile.k8s_context));
    }
    if profile.k9s_auto_launch {
        parts.push("auto-k9s".to_string());
    }
    if parts.is_empty() {
        return String::new();
    }
    format!("| {}", parts.join(" | "))
}

fn prefixed_label(profile: &ProfileConfig) -> String {
    let marker = if profile.k9s_auto_launch { "★ " } else { "  " };
    format!("{marker}{}", profile.display_label())
}

/// Groups profiles that exist in the AWS config into quick access (dashboard
/// auto-launch), other configured and unconfigured sections.
pub fn build_display_list(aws_profiles: &[String], config: &FancyConfig) -> Vec<ProfileDisplayInfo> {
    let configured: Vec<&ProfileConfig> =
        config.profile_configs.values().filter(|p| aws_profiles.iter().any(|name| *name == p.name)).collect();

    let width = configured.iter().map(|p| prefixed_label(p).chars().count()).max().unwrap_or(0);

    let (mut quick, mut other): (Vec<&ProfileConfig>, Vec<&ProfileConfig>) =
        configured.iter().copied().partition(|p| p.k9s_auto_launch);
    quick.sort_by(|a, b| a.display_label().cmp(b.display_label()));
    other.sort_by(|a, b| a.display_label().cmp(b.display_label()));

    let row = |profile: &ProfileConfig| {
        let label = prefixed_label(profile);
        let metadata = profile_metadata(profile);
        let display_text = if metadata.is_empty() {
            label
        } else {
            let padding = width.saturating_sub(label.chars().count());
            format!("{label}{} {metadata}", " ".repeat(padding))
        };
        ProfileDisplayInfo { name: profile.name.clone(), display_text, is_configured: true, metadata }
    };

    let mut rows = Vec::new();
    if !quick.is_empty() {
        rows.push(ProfileDisplayInfo::decoration(QUICK_ACCESS_HEADER));
        rows.extend(quick.iter().copied().map(&row));
    }
    if !other.is_empty() {
        if !quick.is_empty() {
            rows.push(ProfileDisplayInfo::decoration(""));
        }
        rows.push(ProfileDisplayInfo::decoration(CONFIGURED_HEADER));
        rows.extend(other.iter().copied().map(&row));
    }

    let mut unconfigured: Vec<&String> = aws_profiles.iter().filter(|name| !config.is_configured(name)).collect();
    unconfigured.sort();
    unconfigured.dedup();

    if !unconfigured.is_empty() {
        if !configured.is_empty() {
            rows.push(ProfileDisplayInfo::decoration(""));
        }
        rows.push(ProfileDisplayInfo::decoration(UNCONFIGURED_HEADER));
        rows.extend(unconfigured.into_iter().map(|name| ProfileDisplayInfo {
            name: name.clone(),
            display_text: format!("{UNCONFIGURED_INDENT}{name}"),
            is_configured: false,
            metadata: String::new(),
        }));
    } else if !configured.is_empty() {
        rows.push(ProfileDisplayInfo::decoration(""));
        rows.push(ProfileDisplayInfo::decoration(ALL_CONFIGURED_HINT));
    }
    rows
}

pub fn list_profiles_for_selection(
    source: &impl ProfileSource,
    config: &FancyConfig,
) -> Result<Vec<ProfileDisplayInfo>, FancyError> {
    let names: Vec<String> = source.profiles()?.into_iter().map(|p| p.name).collect();
    if names.is_empty() {
        return Err(FancyError::NoProfiles);
    }
    Ok(build_display_list(&names, config))
}

/// The selector may strip leading whitespace from what it prints back.
pub fn profile_for_selection<'a>(rows: &'a [ProfileDisplayInfo], chosen: &str) -> Option<&'a ProfileDisplayInfo> {
    let chosen = chosen.trim_end_matches(['\r', '\n']);
    let mut selectable = rows.iter().filter(|row| row.is_selectable());
    if let Some(row) = selectable.clone().find(|row| row.display_text == chosen) {
        return Some(row);
    }
    selectable.find(|row| row.display_text.trim() == chosen.trim())
}

pub fn count_configured(rows: &[ProfileDisplayInfo]) -> usize {
    rows.iter().filter(|row| row.is_configured).count()
}

pub fn count_profiles(rows: &[ProfileDisplayInfo]) -> usize {
    rows.iter().filter(|row| row.is_selectable()).count()
}
