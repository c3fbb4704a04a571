//! Line-oriented files from before per-profile configuration existed:
//! `pattern = context` rules and `CODE=namespace` project codes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::env::EnvConfig;
use crate::error::ConfigError;

pub const CONTEXTS_FILE: &str = ".fancy-contexts.conf";
pub const NAMESPACES_FILE: &str = ".fancy-namespaces.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMapping {
    pub pattern: String,
    pub context: String,
}

impl ContextMapping {
    pub fn new(pattern: impl Into<String>, context: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), context: context.into() }
    }
}

fn key_value_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
}

/// Keeps file order: the first matching rule wins.
pub fn parse_context_mappings(text: &str) -> Vec<ContextMapping> {
    key_value_lines(text).map(|(pattern, context)| ContextMapping::new(pattern, context)).collect()
}

pub fn parse_namespace_table(text: &str) -> HashMap<String, String> {
    key_value_lines(text).map(|(code, project)| (code.to_string(), project.to_string())).collect()
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })
}

pub fn read_context_mappings(path: &Path) -> Result<Vec<ContextMapping>, ConfigError> {
    read(path).map(|text| parse_context_mappings(&text))
}

pub fn read_namespace_table(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    read(path).map(|text| parse_namespace_table(&text))
}

/// Both legacy tables, loaded leniently: an unreadable file is an empty table.
#[derive(Debug, Clone, Default)]
pub struct LegacyTables {
    pub contexts: Vec<ContextMapping>,
    pub namespaces: HashMap<String, String>,
}

impl LegacyTables {
    pub fn load(env: &EnvConfig, prefer_local: bool) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_in(&cwd, env, prefer_local)
    }

    pub fn load_in(dir: &Path, env: &EnvConfig, prefer_local: bool) -> Self {
        let contexts_path = pick(dir.join(CONTEXTS_FILE), env.context_config(), prefer_local);
        let namespaces_path = pick(dir.join(NAMESPACES_FILE), env.namespace_config.clone(), prefer_local);

        let contexts = read_context_mappings(&contexts_path).unwrap_or_else(|e| {
            tracing::debug!("no legacy context rules: {e}");
            Vec::new()
        });
        let namespaces = read_namespace_table(&namespaces_path).unwrap_or_else(|e| {
            tracing::debug!("no namespace table: {e}");
            HashMap::new()
        });

        tracing::debug!(
            "legacy tables: {} context rules from {}, {} project codes from {}",
            contexts.len(),
            contexts_path.display(),
            namespaces.len(),
            namespaces_path.display()
        );
        Self { contexts, namespaces }
    }
}

fn pick(local: PathBuf, installed: PathBuf, prefer_local: bool) -> PathBuf {
    if prefer_local && local.is_file() {
        local
    } else {
        installed
    }
}
