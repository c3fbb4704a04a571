use crossterm::style::{Color, Stylize};
use fancylogin_core::{ContextOrigin, ContextOutcome};

const RULE: &str = "───────────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcrStatus {
    NotRequested,
    Succeeded,
    Failed,
}

pub struct Summary<'a> {
    pub profile: &'a str,
    pub context: &'a ContextOutcome,
    pub namespace: Option<&'a str>,
    pub ecr: EcrStatus,
    pub account_id: Option<&'a str>,
}

impl Summary<'_> {
    pub fn context_line(&self) -> String {
        let label = "🌱 Kubernetes Context:".with(Color::Green);
        match self.context {
            ContextOutcome::Active { name, origin } => {
                let mut line = format!("{label} {}", name.as_str().bold());
                if let Some(ns) = self.namespace {
                    line.push_str(&format!(" {}", format!("(ns: {ns})").with(Color::Cyan)));
                }
                if *origin == ContextOrigin::Current {
                    line.push_str(" (unchanged)");
                }
                line
            }
            ContextOutcome::SwitchFailed { name } => {
                format!("{label} {} {}", name.as_str().bold(), "(switch failed)".with(Color::Red))
            }
            ContextOutcome::Skipped => format!("{label} (not configured for this profile)"),
            ContextOutcome::NoneSelected => format!("{label} (none selected)"),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", "🦄 ".with(Color::Yellow), "Fancy Login Summary".bold().with(Color::Yellow)),
            RULE.with(Color::Yellow).to_string(),
            format!("{} {}", "🔑 AWS Profile:".with(Color::Yellow), self.profile.bold()),
            self.context_line(),
        ];
        match self.ecr {
            EcrStatus::NotRequested => {}
            EcrStatus::Succeeded => lines.push("🐳 ECR login: successful".with(Color::Green).to_string()),
            EcrStatus::Failed => lines.push("🐳 ECR login: failed".with(Color::Red).to_string()),
        }
        if let Some(id) = self.account_id {
            lines.push(format!("{} {}", "☁️  AWS Account ID:".with(Color::Cyan), id.bold()));
        }
        lines.push(RULE.with(Color::Yellow).to_string());
        lines
    }
}
