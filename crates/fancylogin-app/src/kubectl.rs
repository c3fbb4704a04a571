use fancylogin_core::{ClusterCli, FancyError};
use fancylogin_terminal::{DashboardEnv, Reporter};

use crate::process::{capture, command, run_attached, run_quiet};

pub struct KubectlCli {
    reporter: Reporter,
}

impl KubectlCli {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    /// Runs k9s in the foreground until the operator quits it.
    pub async fn launch_dashboard(&self, env: &DashboardEnv, context: &str, namespace: &str) -> Result<(), FancyError> {
        self.reporter.trace(&format!("Launching k9s on {context} in {namespace}."));
        let mut cmd = command("k9s", &["--context", context, "-n", namespace]);
        cmd.env_clear().envs(env.to_env_map());
        run_attached(cmd, "k9s").await
    }
}

impl ClusterCli for KubectlCli {
    async fn list_contexts(&self) -> Result<Vec<String>, FancyError> {
        let out = capture(command("kubectl", &["config", "get-contexts", "-o", "name"]), "kubectl").await?;
        Ok(out.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
    }

    async fn current_context(&self) -> Result<String, FancyError> {
        capture(command("kubectl", &["config", "current-context"]), "kubectl").await
    }

    async fn use_context(&self, name: &str) -> Result<(), FancyError> {
        let cmd = command("kubectl", &["config", "use-context", name]);
        if self.reporter.verbose() {
            self.reporter.info(&format!("Switching to Kubernetes context: {name}"));
            return run_attached(cmd, "kubectl").await;
        }
        run_quiet(cmd, "kubectl").await
    }
}
