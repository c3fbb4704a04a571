//! Interactive first-run setup. The wizard walks a fixed sequence of stages,
//! asks its questions through a [`Prompter`] and writes the document once,
//! at the end.

use std::path::PathBuf;

use fancylogin_config::{ConfigStore, FancyConfig, ProfileConfig, DEFAULT_REGION};

use crate::collaborators::{answer_declines, answer_is_yes, ContextSource, ProfileSource, Prompter};
use crate::discovery::{AwsProfile, KubeContext};
use crate::error::FancyError;

const WIZARD_TITLE: &str = "🎯 Fancy Login Configuration Wizard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    DiscoverExisting,
    ShowDiscovered,
    ConfigureProfiles,
    ConfigureGlobals,
    Persist,
    Done,
}

impl WizardStage {
    fn next(self) -> Self {
        match self {
            Self::DiscoverExisting => Self::ShowDiscovered,
            Self::ShowDiscovered => Self::ConfigureProfiles,
            Self::ConfigureProfiles => Self::ConfigureGlobals,
            Self::ConfigureGlobals => Self::Persist,
            Self::Persist | Self::Done => Self::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    /// Drop every stored profile and configure all discovered ones again.
    OverrideAll,
    /// Keep stored profiles as they are; only ask about new ones.
    AddNewOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardReport {
    pub path: PathBuf,
    pub mode: WizardMode,
    /// Profiles configured during this run, in the order they were asked.
    pub configured: Vec<String>,
}

pub struct ConfigWizard<'a, P, S, C> {
    store: &'a ConfigStore,
    prompter: &'a mut P,
    profile_source: &'a S,
    context_source: &'a C,
    requested_mode: Option<WizardMode>,
    fallback_region: String,
    stage: WizardStage,
    mode: WizardMode,
    config: FancyConfig,
    aws_profiles: Vec<AwsProfile>,
    contexts: Vec<KubeContext>,
    configured: Vec<String>,
    saved_to: Option<PathBuf>,
}

impl<'a, P, S, C> ConfigWizard<'a, P, S, C>
where
    P: Prompter,
    S: ProfileSource,
    C: ContextSource,
{
    pub fn new(store: &'a ConfigStore, prompter: &'a mut P, profile_source: &'a S, context_source: &'a C) -> Self {
        Self {
            store,
            prompter,
            profile_source,
            context_source,
            requested_mode: None,
            fallback_region: DEFAULT_REGION.to_string(),
            stage: WizardStage::DiscoverExisting,
            mode: WizardMode::AddNewOnly,
            config: FancyConfig::default(),
            aws_profiles: Vec::new(),
            contexts: Vec::new(),
            configured: Vec::new(),
            saved_to: None,
        }
    }

    /// `None` asks the operator when there is something to override.
    pub fn with_mode(mut self, mode: Option<WizardMode>) -> Self {
        self.requested_mode = mode;
        self
    }

    /// Suggested ECR region for profiles that do not name one.
    pub fn with_fallback_region(mut self, region: impl Into<String>) -> Self {
        self.fallback_region = region.into();
        self
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn run(mut self) -> Result<WizardReport, FancyError> {
        self.prompter.say(WIZARD_TITLE);
        while self.stage != WizardStage::Done {
            self.step()?;
        }
        let path = self.saved_to.take().unwrap_or_else(|| self.store.path());
        self.prompter.say(&format!("Configuration saved to: {}", path.display()));
        Ok(WizardReport { path, mode: self.mode, configured: self.configured })
    }

    /// Runs the current stage and moves to the next one.
    pub fn step(&mut self) -> Result<WizardStage, FancyError> {
        match self.stage {
            WizardStage::DiscoverExisting => self.discover_existing()?,
            WizardStage::ShowDiscovered => self.show_discovered(),
            WizardStage::ConfigureProfiles => self.configure_profiles()?,
            WizardStage::ConfigureGlobals => self.configure_globals()?,
            WizardStage::Persist => self.persist()?,
            WizardStage::Done => {}
        }
        self.stage = self.stage.next();
        Ok(self.stage)
    }

    fn ask(&mut self, question: &str) -> Result<String, FancyError> {
        Ok(self.prompter.ask(question)?.trim().to_string())
    }

    fn discover_existing(&mut self) -> Result<(), FancyError> {
        let existing = self.store.load()?;
        self.mode = if existing.is_empty() {
            WizardMode::AddNewOnly
        } else {
            self.prompter.say(&format!("Found existing configuration with {} profiles", existing.profile_configs.len()));
            self.choose_mode()?
        };
        tracing::debug!("wizard mode: {:?}", self.mode);

        self.config = match self.mode {
            WizardMode::AddNewOnly => existing,
            WizardMode::OverrideAll => FancyConfig { settings: existing.settings, ..FancyConfig::default() },
        };

        self.aws_profiles = self.profile_source.profiles().unwrap_or_else(|e| {
            self.prompter.say(&format!("Warning: could not read AWS config: {e}"));
            Vec::new()
        });
        self.contexts = self.context_source.contexts().unwrap_or_else(|e| {
            self.prompter.say(&format!("Warning: could not read Kubernetes config: {e}"));
            Vec::new()
        });
        Ok(())
    }

    fn choose_mode(&mut self) -> Result<WizardMode, FancyError> {
        let wants_override = match self.requested_mode {
            Some(mode) => mode == WizardMode::OverrideAll,
            None => {
                self.prompter.say("Configuration mode:");
                self.prompter.say("  1. Override all (reconfigure all profiles)");
                self.prompter.say("  2. Add new profiles only (keep existing, add new ones)");
                self.ask("Choice [2]: ")? == "1"
            }
        };
        if !wants_override {
            return Ok(WizardMode::AddNewOnly);
        }

        self.prompter.say("This will replace your existing configuration!");
        let confirm = self.ask("Are you sure? [y/N]: ")?;
        if answer_is_yes(&confirm, false) {
            Ok(WizardMode::OverrideAll)
        } else {
            self.prompter.say("Keeping existing profiles, adding new ones only.");
            Ok(WizardMode::AddNewOnly)
        }
    }

    fn show_discovered(&mut self) {
        let mut lines = Vec::new();
        if !self.aws_profiles.is_empty() {
            lines.push("AWS Profiles:".to_string());
            for (i, profile) in self.aws_profiles.iter().enumerate() {
                let kind = if profile.is_sso { "SSO" } else { "Standard" };
                let account = match &profile.account_id {
                    Some(id) => format!("Account: {id}"),
                    None => "Unknown Account".to_string(),
                };
                let marker = if self.config.is_configured(&profile.name) { " [Configured]" } else { "" };
                lines.push(format!("  {}. {} ({kind}, {account}){marker}", i + 1, profile.name));
            }
        }
        if !self.contexts.is_empty() {
            lines.push("Kubernetes Contexts:".to_string());
            for (i, ctx) in self.contexts.iter().enumerate() {
                let namespace = ctx.namespace.as_deref().unwrap_or("default");
                lines.push(format!("  {}. {} (Cluster: {}, Namespace: {namespace})", i + 1, ctx.name, ctx.cluster));
            }
        }
        for line in &lines {
            self.prompter.say(line);
        }
    }

    fn configure_profiles(&mut self) -> Result<(), FancyError> {
        if self.aws_profiles.is_empty() {
            self.prompter.say("No AWS profiles found. You can configure profiles manually later.");
            return Ok(());
        }

        let candidates: Vec<AwsProfile> = match self.mode {
            WizardMode::OverrideAll => self.aws_profiles.clone(),
            WizardMode::AddNewOnly => {
                self.aws_profiles.iter().filter(|p| !self.config.is_configured(&p.name)).cloned().collect()
            }
        };
        let skipped = self.aws_profiles.len() - candidates.len();
        if skipped > 0 {
            self.prompter.say(&format!("Skipping {skipped} existing profiles"));
        }
        if candidates.is_empty() {
            self.prompter.say("No new profiles found. All profiles are already configured.");
            return Ok(());
        }

        let total = candidates.len();
        for (i, profile) in candidates.iter().enumerate() {
            self.prompter.say(&format!("Configuring Profile {}/{total}: {}", i + 1, profile.name));
            if let Some(id) = &profile.account_id {
                self.prompter.say(&format!("Account ID: {id}"));
            }
            if let Some(region) = &profile.region {
                self.prompter.say(&format!("Region: {region}"));
            }
            if profile.is_sso {
                self.prompter.say("Type: SSO Profile");
            }

            if answer_declines(&self.ask("Configure this profile? [Y/n]: ")?) {
                self.prompter.say("Skipping profile.");
                continue;
            }
            let entry = self.ask_profile(profile)?;
            self.config.insert_profile(entry);
            self.configured.push(profile.name.clone());
            self.prompter.say(&format!("Profile {} configured", profile.name));
        }
        Ok(())
    }

    fn ask_profile(&mut self, profile: &AwsProfile) -> Result<ProfileConfig, FancyError> {
        let name = &profile.name;
        let mut entry = ProfileConfig { account_id: profile.account_id.clone(), ..ProfileConfig::new(name.as_str()) };

        entry.ecr_login = answer_is_yes(&self.ask(&format!("Enable ECR login for profile {name}? [Y/n]: "))?, true);
        if entry.ecr_login {
            let suggested = profile.region.clone().unwrap_or_else(|| self.fallback_region.clone());
            let region = self.ask(&format!("ECR region for {name} [{suggested}]: "))?;
            entry.ecr_region = if region.is_empty() { suggested } else { region };
        }

        if !self.contexts.is_empty() {
            self.prompter.say(&format!("Select Kubernetes context for profile {name}:"));
            let options: Vec<String> =
                self.contexts.iter().enumerate().map(|(i, ctx)| format!("  {}. {}", i + 1, ctx.name)).collect();
            for option in &options {
                self.prompter.say(option);
            }
            self.prompter.say("  0. None");
            let choice = self.ask("Choice [0]: ")?;
            entry.k8s_context = self.context_by_number(&choice).unwrap_or_default();
        }

        if entry.has_context() {
            entry.k9s_auto_launch =
                answer_is_yes(&self.ask(&format!("Auto-launch K9s for profile {name}? [y/N]: "))?, false);
            if entry.k9s_auto_launch {
                let namespace = self.ask("Kubernetes namespace for K9s (optional) [default]: ")?;
                if !namespace.is_empty() && namespace != "default" {
                    entry.namespace = Some(namespace);
                }
            }
        }
        Ok(entry)
    }

    /// 1-based index into the discovered contexts; anything else means none.
    fn context_by_number(&self, choice: &str) -> Option<String> {
        let index: usize = choice.parse().ok()?;
        let ctx = self.contexts.get(index.checked_sub(1)?)?;
        Some(ctx.name.clone())
    }

    fn configure_globals(&mut self) -> Result<(), FancyError> {
        let current = self.config.settings.default_region.clone();
        let region = self.ask(&format!("Default AWS region [{current}]: "))?;
        if !region.is_empty() {
            self.config.settings.default_region = region;
        }
        self.config.settings.wizard_completed = true;
        Ok(())
    }

    fn persist(&mut self) -> Result<(), FancyError> {
        self.prompter.say(&format!("Save configuration to: {}", self.store.path().display()));
        if answer_declines(&self.ask("Proceed? [Y/n]: ")?) {
            return Err(FancyError::WizardAborted("configuration save cancelled".into()));
        }
        self.saved_to = Some(self.store.save(&self.config)?);
        Ok(())
    }
}

/// Runs the wizard unless it already completed. A document that exists
/// without the completion flag asks first, defaulting to no.
pub fn run_if_needed<P, S, C>(
    store: &ConfigStore,
    prompter: &mut P,
    profile_source: &S,
    context_source: &C,
    fallback_region: &str,
) -> Result<Option<WizardReport>, FancyError>
where
    P: Prompter,
    S: ProfileSource,
    C: ContextSource,
{
    let config = store.load()?;
    if config.settings.wizard_completed {
        return Ok(None);
    }
    if store.exists() {
        prompter.say("Configuration file exists but wizard hasn't been completed.");
        let answer = prompter.ask("Run configuration wizard to update settings? [y/N]: ")?;
        if !answer_is_yes(&answer, false) {
            return Ok(None);
        }
    }
    ConfigWizard::new(store, prompter, profile_source, context_source)
        .with_fallback_region(fallback_region)
        .run()
        .map(Some)
}
