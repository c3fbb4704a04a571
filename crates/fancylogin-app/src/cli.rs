use clap::Parser;
use fancylogin_core::WizardMode;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_TIME: &str = match option_env!("FANCY_BUILD_TIME") {
    Some(v) => v,
    None => "unknown",
};
pub const GIT_COMMIT: &str = match option_env!("FANCY_GIT_COMMIT") {
    Some(v) => v,
    None => "unknown",
};

#[derive(Parser, Debug, PartialEq)]
#[command(name = "fancy-login")]
#[command(about = "Interactive AWS SSO login and Kubernetes context selection", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,

    /// Launch k9s without asking when the profile has auto-launch enabled
    #[arg(short = 'k', long = "k9s", default_value_t = false)]
    pub k9s: bool,

    /// Run AWS SSO login even if a valid session exists
    #[arg(long = "force-aws-login", default_value_t = false)]
    pub force_aws_login: bool,

    /// Run the configuration wizard
    #[arg(long = "config", default_value_t = false)]
    pub config: bool,

    /// Run the wizard, configuring only profiles not yet in the config
    #[arg(long = "add-new", default_value_t = false, conflicts_with = "override_all")]
    pub add_new: bool,

    /// Run the wizard, reconfiguring every profile
    #[arg(long = "override-all", default_value_t = false)]
    pub override_all: bool,

    /// Show version information
    #[arg(long = "version", default_value_t = false)]
    pub version: bool,
}

impl Cli {
    /// `Some(None)` runs the wizard asking for the mode.
    pub fn wizard_request(&self) -> Option<Option<WizardMode>> {
        if self.override_all {
            Some(Some(WizardMode::OverrideAll))
        } else if self.add_new {
            Some(Some(WizardMode::AddNewOnly))
        } else if self.config {
            Some(None)
        } else {
            None
        }
    }

    pub fn version_text() -> String {
        format!("fancy-login version {VERSION}\nBuild time: {BUILD_TIME}\nGit commit: {GIT_COMMIT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from(["fancy-login", "-v", "-k"]);
        assert!(cli.verbose);
        assert!(cli.k9s);
        assert!(!cli.force_aws_login);
        assert_eq!(cli.wizard_request(), None);
    }

    #[test]
    fn wizard_modes() {
        assert_eq!(Cli::parse_from(["fancy-login", "--config"]).wizard_request(), Some(None));
        assert_eq!(Cli::parse_from(["fancy-login", "--add-new"]).wizard_request(), Some(Some(WizardMode::AddNewOnly)));
        assert_eq!(
            Cli::parse_from(["fancy-login", "--override-all"]).wizard_request(),
            Some(Some(WizardMode::OverrideAll))
        );
    }

    #[test]
    fn add_new_conflicts_with_override_all() {
        assert!(Cli::try_parse_from(["fancy-login", "--add-new", "--override-all"]).is_err());
    }

    #[test]
    fn version_text_names_the_build() {
        assert!(Cli::version_text().starts_with(&format!("fancy-login version {VERSION}")));
    }
}
