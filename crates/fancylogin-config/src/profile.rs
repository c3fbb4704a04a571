use serde::{Deserialize, Serialize};

/// Per-profile directives as stored in the `profile_configs` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub ecr_login: bool,
    #[serde(default)]
    pub ecr_region: String,
    /// Empty means the profile deliberately has no cluster context.
    #[serde(default)]
    pub k8s_context: String,
    #[serde(default)]
    pub k9s_auto_launch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Dashboard namespace chosen in the wizard; wins over the derived one.
    #[serde(default, alias = "namespace_prefix", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ProfileConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn has_context(&self) -> bool {
        !self.k8s_context.is_empty()
    }

    /// Auto-launch only makes sense with a context to launch against.
    pub fn wants_dashboard(&self) -> bool {
        self.k9s_auto_launch && self.has_context()
    }

    pub fn display_label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }

    /// The map key is the identity. Older documents used `name` as a free
    /// label, so a differing name is kept as the display name.
    pub(crate) fn normalize(&mut self, key: &str) {
        if self.name != key {
            let previous = std::mem::replace(&mut self.name, key.to_string());
            if !previous.is_empty() && self.display_name.is_none() {
                self.display_name = Some(previous);
            }
        }
        for field in [&mut self.account_id, &mut self.display_name, &mut self.namespace] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }
}
