//! One login session: pick a profile, authenticate, settle the cluster
//! context, log in to the registry and optionally open the dashboard.

use anyhow::{anyhow, bail, Context};
use fancylogin_config::{ConfigStore, EnvConfig, FancyConfig, LegacyTables};
use fancylogin_core::selection::{count_configured, count_profiles};
use fancylogin_core::{
    answer_is_yes, list_profiles_for_selection, profile_for_selection, run_if_needed, settle_context, AwsConfigFile,
    ConfigWizard, ContextOutcome, Directive, KubeconfigFiles, NamespaceOutcome, Prompter, ResolutionEngine, Selector,
    Settled, WizardMode, SELECTION_TIMEOUT,
};
use fancylogin_terminal::{DashboardEnv, ProfileExport, Reporter, ShellFlavor};

use crate::aws::AwsCli;
use crate::fzf::FzfSelector;
use crate::kubectl::KubectlCli;
use crate::prompt::TerminalPrompter;
use crate::summary::{EcrStatus, Summary};

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub verbose: bool,
    pub launch_k9s: bool,
    pub force_login: bool,
}

pub struct Session<'a> {
    env: &'a EnvConfig,
    options: Options,
    reporter: Reporter,
    store: ConfigStore,
    aws_config: AwsConfigFile,
    kubeconfig: KubeconfigFiles,
    prompter: TerminalPrompter,
    aws: AwsCli,
    kubectl: KubectlCli,
}

impl<'a> Session<'a> {
    pub fn new(env: &'a EnvConfig, options: Options) -> Self {
        let reporter = Reporter::new(options.verbose);
        Self {
            env,
            options,
            reporter,
            store: ConfigStore::new(env),
            aws_config: AwsConfigFile::new(&env.aws_config_file),
            kubeconfig: KubeconfigFiles::new(env.kubeconfig.clone()),
            prompter: TerminalPrompter::open(),
            aws: AwsCli::new(reporter),
            kubectl: KubectlCli::new(reporter),
        }
    }

    pub fn run_wizard(&mut self, mode: Option<WizardMode>) -> anyhow::Result<()> {
        let report = ConfigWizard::new(&self.store, &mut self.prompter, &self.aws_config, &self.kubeconfig)
            .with_mode(mode)
            .with_fallback_region(self.env.default_region.as_str())
            .run()?;
        tracing::info!("wizard configured {} profiles in {:?} mode", report.configured.len(), report.mode);
        self.reporter.info("Configuration wizard completed successfully!");
        Ok(())
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        if let Some(report) = run_if_needed(
            &self.store,
            &mut self.prompter,
            &self.aws_config,
            &self.kubeconfig,
            &self.env.default_region,
        )? {
            tracing::debug!("first-run wizard wrote {}", report.path.display());
        }

        let mut config = self.store.load().context("failed to load fancy-login configuration")?;
        let profile = self.select_profile(&config).await?;
        if !config.is_configured(&profile) && self.offer_configuration(&profile)? {
            config = self.store.load()?;
        }
        self.export_profile(&profile);
        self.reporter.success(&format!("Selected AWS Profile: {profile}"));

        self.ensure_session(&profile).await?;

        let legacy = LegacyTables::load(self.env, config.settings.prefer_local_config);
        let directive = ResolutionEngine::new(&config, &legacy).resolve(&profile);

        let settled = settle_context(&directive, &self.kubectl, &FzfSelector, SELECTION_TIMEOUT).await;
        for issue in &settled.issues {
            self.reporter.warning(&format!("Kubernetes context: {issue}"));
        }
        let namespace = match (&settled.outcome, &directive.namespace) {
            (ContextOutcome::Active { .. }, ns) => ns.name(),
            _ => None,
        };
        if let Some(ns) = namespace {
            self.reporter.namespace_title(ns);
        }

        let account_id = match self.aws.account_id(&profile).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!("account id unavailable: {e}");
                None
            }
        };
        let ecr = self.registry_login(&directive, account_id.as_deref()).await;

        if !self.options.verbose {
            let summary = Summary {
                profile: &profile,
                context: &settled.outcome,
                namespace,
                ecr,
                account_id: account_id.as_deref(),
            };
            println!();
            for line in summary.lines() {
                println!("{line}");
            }
            println!();
        }

        if let Err(e) = self.maybe_launch_dashboard(&directive, &settled).await {
            self.reporter.error(&format!("Failed to launch k9s: {e}"));
        }
        self.reporter.completion("Script execution completed.");
        Ok(())
    }

    async fn select_profile(&self, config: &FancyConfig) -> anyhow::Result<String> {
        let rows = list_profiles_for_selection(&self.aws_config, config)
            .with_context(|| format!("no AWS profiles found in {}", self.aws_config.path().display()))?;

        self.reporter.trace("☁️ AWS Profile Selection");
        self.reporter.trace(&format!(
            "Found {} configured profiles out of {} total AWS profiles",
            count_configured(&rows),
            count_profiles(&rows)
        ));

        let texts: Vec<String> = rows.iter().map(|r| r.display_text.clone()).collect();
        let chosen = FzfSelector
            .select("Select AWS Profile: ", &texts, SELECTION_TIMEOUT)
            .await?
            .ok_or_else(|| anyhow!("No profile selected. Exiting."))?;
        let row = profile_for_selection(&rows, &chosen).ok_or_else(|| anyhow!("invalid profile selection"))?;

        self.reporter.trace(&format!("Profile selected: {} (configured: {})", row.name, row.is_configured));
        Ok(row.name.clone())
    }

    /// Returns whether the document changed.
    fn offer_configuration(&mut self, profile: &str) -> anyhow::Result<bool> {
        self.reporter.warning(&format!("Profile '{profile}' is not configured in fancy-config"));
        let answer = self.prompter.ask("Would you like to configure this profile now? (y/N): ")?;
        if !answer_is_yes(&answer, false) {
            self.reporter.warning("Continuing with unconfigured profile...");
            return Ok(false);
        }
        self.run_wizard(Some(WizardMode::AddNewOnly))?;
        Ok(true)
    }

    fn export_profile(&self, profile: &str) {
        let export = ProfileExport::new(profile);
        let mut targets = vec![(self.env.profile_export.clone(), ShellFlavor::native())];
        if cfg!(windows) {
            targets.push((self.env.profile_export.with_extension("bat"), ShellFlavor::Cmd));
        }
        for (path, flavor) in targets {
            if let Err(e) = export.write_to(&path, flavor) {
                self.reporter.warning(&format!("Failed to export profile to {}: {e}", path.display()));
            }
        }
    }

    async fn ensure_session(&mut self, profile: &str) -> anyhow::Result<()> {
        self.reporter.trace(&format!("Checking AWS SSO session for profile {profile}..."));
        if !self.options.force_login && self.aws.session_valid(profile).await {
            self.reporter.success(&format!("AWS SSO session is still valid for {profile}."));
            return Ok(());
        }

        if self.aws_config.is_sso(profile)? {
            self.reporter.trace(&format!("Attempting SSO login for profile {profile}..."));
            self.aws.sso_login(profile).await.with_context(|| format!("AWS SSO login failed for {profile}"))?;
            if !self.aws.session_valid(profile).await {
                bail!("AWS SSO login verification failed for {profile}");
            }
            self.reporter.success(&format!("AWS SSO login successful for {profile}."));
            return Ok(());
        }

        self.reporter
            .warning(&format!("Unable to authenticate with profile {profile}. This might not be an SSO profile."));
        let answer = self.prompter.ask("Do you want to continue anyway? (y/n): ")?;
        if !answer_is_yes(&answer, false) {
            bail!("User chose to exit due to authentication issues.");
        }
        self.reporter.warning("Continuing with potentially invalid credentials...");
        Ok(())
    }

    async fn registry_login(&self, directive: &Directive, account_id: Option<&str>) -> EcrStatus {
        if !directive.ecr_login {
            return EcrStatus::NotRequested;
        }
        let Some(account_id) = account_id else {
            self.reporter
                .error("Failed to retrieve AWS account ID. Your session may have expired or is not authenticated.");
            return EcrStatus::Failed;
        };
        let region = self.ecr_region(directive);
        self.reporter.trace(&format!("Account ID: {account_id}, Region: {region}"));

        match self.aws.ecr_login(&directive.profile, account_id, &region).await {
            Ok(()) => {
                self.reporter.trace("ECR login successful");
                EcrStatus::Succeeded
            }
            Err(e) => {
                tracing::warn!("ECR login failed: {e}");
                self.reporter.trace(&format!("ECR login failed: {e}"));
                EcrStatus::Failed
            }
        }
    }

    /// Configured region, then `AWS_REGION`, then the built-in default.
    fn ecr_region(&self, directive: &Directive) -> String {
        if !directive.ecr_region.is_empty() {
            return directive.ecr_region.clone();
        }
        self.env.aws_region.clone().unwrap_or_else(|| self.env.default_region.clone())
    }

    async fn maybe_launch_dashboard(&mut self, directive: &Directive, settled: &Settled) -> anyhow::Result<()> {
        let Some(context) = settled.dashboard_context(directive) else {
            if directive.dashboard_actionable() {
                self.reporter.warning("Not launching k9s: the Kubernetes context could not be switched.");
            }
            return Ok(());
        };
        let namespace = match (directive.dashboard_namespace(), &directive.namespace) {
            (Some(ns), _) => ns.to_string(),
            (None, NamespaceOutcome::Undetermined(miss)) => {
                bail!("Unable to derive namespace from profile {}: {miss}", directive.profile)
            }
            (None, _) => return Ok(()),
        };

        if !self.options.launch_k9s {
            let answer = self.prompter.ask("Do you want to open k9s? (y/n): ")?;
            if !answer_is_yes(&answer, false) {
                return Ok(());
            }
        }
        let env = DashboardEnv { profile: directive.profile.clone() };
        self.kubectl.launch_dashboard(&env, context, &namespace).await?;
        Ok(())
    }
}
