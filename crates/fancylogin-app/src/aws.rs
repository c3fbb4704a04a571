use fancylogin_core::FancyError;
use fancylogin_terminal::{Reporter, Spinner};

use crate::process::{capture, capture_with_input, command, run_attached, run_quiet};

/// The `aws` and `docker` calls a session needs.
pub struct AwsCli {
    reporter: Reporter,
}

impl AwsCli {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    pub async fn account_id(&self, profile: &str) -> Result<String, FancyError> {
        let cmd = command(
            "aws",
            &["sts", "get-caller-identity", "--profile", profile, "--query", "Account", "--output", "text"],
        );
        capture(cmd, "aws").await
    }

    pub async fn session_valid(&self, profile: &str) -> bool {
        match self.account_id(profile).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("no valid session for {profile}: {e}");
                false
            }
        }
    }

    /// Browser-based SSO login. Quiet runs hide the tool's output behind a
    /// spinner; verbose runs attach it to the terminal.
    pub async fn sso_login(&self, profile: &str) -> Result<(), FancyError> {
        let cmd = command("aws", &["sso", "login", "--profile", profile]);
        if self.reporter.verbose() {
            return run_attached(cmd, "aws").await;
        }
        let spinner = Spinner::start("🔑 AWS SSO login...");
        let result = run_quiet(cmd, "aws").await;
        spinner.stop().await;
        result
    }

    /// `aws ecr get-login-password` piped into `docker login`.
    pub async fn ecr_login(&self, profile: &str, account_id: &str, region: &str) -> Result<(), FancyError> {
        let spinner = (!self.reporter.verbose()).then(|| Spinner::start("🐳 Logging in to ECR..."));
        let result = self.docker_login(profile, account_id, region).await;
        if let Some(spinner) = spinner {
            spinner.stop().await;
        }
        let output = result?;
        if self.reporter.verbose() && !output.is_empty() {
            self.reporter.success(&format!("Docker: {output}"));
        }
        Ok(())
    }

    async fn docker_login(&self, profile: &str, account_id: &str, region: &str) -> Result<String, FancyError> {
        let password = capture(
            command("aws", &["ecr", "get-login-password", "--region", region, "--profile", profile]),
            "aws",
        )
        .await?;
        let registry = registry_host(account_id, region);
        let docker = command("docker", &["login", "--username", "AWS", "--password-stdin", &registry]);
        capture_with_input(docker, "docker", password.as_bytes()).await
    }
}

pub fn registry_host(account_id: &str, region: &str) -> String {
    format!("{account_id}.dkr.ecr.{region}.amazonaws.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_host_format() {
        assert_eq!(registry_host("111122223333", "eu-central-1"), "111122223333.dkr.ecr.eu-central-1.amazonaws.com");
    }
}
