use std::collections::HashMap;
use std::time::Duration;

use fancylogin_config::{derive_namespace, ContextMapping, FancyConfig, LegacyTables, NamespaceMiss, WildcardPattern};

use crate::collaborators::{ClusterCli, Selector};
use crate::error::FancyError;

/// Upper bound on waiting for the operator in the fuzzy selector.
pub const SELECTION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextDecision {
    /// The profile's own `k8s_context`.
    Configured(String),
    /// The profile is configured but has no context: do not switch.
    NotConfigured,
    /// Unknown profile, first legacy rule that matched.
    Legacy { pattern: String, context: String },
    /// Unknown profile and no rule matched; the operator has to choose.
    Unmapped,
}

impl ContextDecision {
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Configured(ctx) | Self::Legacy { context: ctx, .. } => Some(ctx.as_str()),
            Self::NotConfigured | Self::Unmapped => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceOutcome {
    /// Set explicitly on the profile.
    Configured(String),
    /// Derived from the `CODE_ENV_DEVENG` naming rule.
    Derived(String),
    Undetermined(NamespaceMiss),
}

impl NamespaceOutcome {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Configured(ns) | Self::Derived(ns) => Some(ns.as_str()),
            Self::Undetermined(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub profile: String,
    /// Whether the profile has an entry in the document at all.
    pub configured: bool,
    pub context: ContextDecision,
    pub ecr_login: bool,
    /// Effective region; may be empty when neither profile nor settings name one.
    pub ecr_region: String,
    pub k9s_auto_launch: bool,
    pub namespace: NamespaceOutcome,
}

impl Directive {
    /// The dashboard is only launched against a context that was actually
    /// resolved from configuration or a legacy rule.
    pub fn dashboard_actionable(&self) -> bool {
        self.k9s_auto_launch && matches!(self.context, ContextDecision::Configured(_) | ContextDecision::Legacy { .. })
    }

    pub fn dashboard_namespace(&self) -> Option<&str> {
        if self.dashboard_actionable() {
            self.namespace.name()
        } else {
            None
        }
    }
}

pub struct ResolutionEngine<'a> {
    config: &'a FancyConfig,
    rules: &'a [ContextMapping],
    project_codes: &'a HashMap<String, String>,
}

impl<'a> ResolutionEngine<'a> {
    pub fn new(config: &'a FancyConfig, legacy: &'a LegacyTables) -> Self {
        Self { config, rules: &legacy.contexts, project_codes: &legacy.namespaces }
    }

    pub fn resolve(&self, profile: &str) -> Directive {
        let entry = self.config.profile(profile);
        let context = self.decide_context(profile);
        let (ecr_login, ecr_region) = match entry {
            Some(p) if p.ecr_login => (true, self.config.ecr_region_for(p)),
            _ => (false, String::new()),
        };

        let directive = Directive {
            profile: profile.to_string(),
            configured: entry.is_some(),
            context,
            ecr_login,
            ecr_region,
            k9s_auto_launch: entry.is_some_and(|p| p.k9s_auto_launch),
            namespace: self.namespace_for(profile),
        };
        tracing::debug!("resolved {profile}: {directive:?}");
        directive
    }

    /// Configured context, then explicit skip, then the first legacy rule.
    pub fn decide_context(&self, profile: &str) -> ContextDecision {
        if let Some(entry) = self.config.profile(profile) {
            if entry.has_context() {
                return ContextDecision::Configured(entry.k8s_context.clone());
            }
            return ContextDecision::NotConfigured;
        }

        self.rules
            .iter()
            .find(|rule| WildcardPattern::compile(&rule.pattern).matches(profile))
            .map(|rule| ContextDecision::Legacy { pattern: rule.pattern.clone(), context: rule.context.clone() })
            .unwrap_or(ContextDecision::Unmapped)
    }

    pub fn namespace_for(&self, profile: &str) -> NamespaceOutcome {
        if let Some(ns) = self.config.profile(profile).and_then(|p| p.namespace.as_deref()) {
            return NamespaceOutcome::Configured(ns.to_string());
        }
        match derive_namespace(profile, self.project_codes) {
            Ok(ns) => NamespaceOutcome::Derived(ns),
            Err(miss) => NamespaceOutcome::Undetermined(miss),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOrigin {
    Configured,
    Legacy,
    Selected,
    /// Nothing was chosen; whatever kubectl already had active.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOutcome {
    Active { name: String, origin: ContextOrigin },
    /// kubectl refused the switch; whatever was active before still is.
    SwitchFailed { name: String },
    Skipped,
    NoneSelected,
}

/// Final context state plus the failures met on the way, which the caller
/// reports but which did not stop the session.
#[derive(Debug)]
pub struct Settled {
    pub outcome: ContextOutcome,
    pub issues: Vec<FancyError>,
}

impl Settled {
    /// Context to open the dashboard against: only one the directive
    /// decided and that is now actually active.
    pub fn dashboard_context(&self, directive: &Directive) -> Option<&str> {
        if !directive.dashboard_actionable() {
            return None;
        }
        match &self.outcome {
            ContextOutcome::Active { name, origin: ContextOrigin::Configured | ContextOrigin::Legacy } => {
                Some(name.as_str())
            }
            _ => None,
        }
    }
}

/// Carries out the context part of a directive: switches to a decided
/// context, or falls back to interactive selection and finally to the
/// currently active context.
pub async fn settle_context<C, S>(directive: &Directive, cluster: &C, selector: &S, timeout: Duration) -> Settled
where
    C: ClusterCli,
    S: Selector,
{
    let mut issues = Vec::new();
    let (name, origin) = match &directive.context {
        ContextDecision::NotConfigured => {
            tracing::debug!("{} has no context configured, skipping", directive.profile);
            return Settled { outcome: ContextOutcome::Skipped, issues };
        }
        ContextDecision::Configured(ctx) => (ctx.clone(), ContextOrigin::Configured),
        ContextDecision::Legacy { pattern, context } => {
            tracing::debug!("matched pattern {pattern}, using context {context}");
            (context.clone(), ContextOrigin::Legacy)
        }
        ContextDecision::Unmapped => match choose_context(cluster, selector, timeout).await {
            Ok(Some(ctx)) => (ctx, ContextOrigin::Selected),
            Ok(None) => return fall_back_to_current(cluster, issues).await,
            Err(e) => {
                issues.push(e);
                return fall_back_to_current(cluster, issues).await;
            }
        },
    };

    if let Err(e) = cluster.use_context(&name).await {
        tracing::warn!("failed to switch to context {name}: {e}");
        issues.push(e);
        return Settled { outcome: ContextOutcome::SwitchFailed { name }, issues };
    }
    Settled { outcome: ContextOutcome::Active { name, origin }, issues }
}

async fn choose_context<C: ClusterCli, S: Selector>(
    cluster: &C,
    selector: &S,
    timeout: Duration,
) -> Result<Option<String>, FancyError> {
    let contexts = cluster.list_contexts().await?;
    if contexts.is_empty() {
        tracing::debug!("no contexts available to choose from");
        return Ok(None);
    }
    let choice = selector.select("Select Kubernetes Context: ", &contexts, timeout).await?;
    Ok(choice.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()))
}

async fn fall_back_to_current<C: ClusterCli>(cluster: &C, issues: Vec<FancyError>) -> Settled {
    let outcome = match cluster.current_context().await {
        Ok(name) if !name.trim().is_empty() => {
            ContextOutcome::Active { name: name.trim().to_string(), origin: ContextOrigin::Current }
        }
        Ok(_) => ContextOutcome::NoneSelected,
        Err(e) => {
            tracing::debug!("no current context: {e}");
            ContextOutcome::NoneSelected
        }
    };
    Settled { outcome, issues }
}
