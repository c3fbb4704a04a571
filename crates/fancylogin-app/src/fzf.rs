use std::process::Stdio;
use std::time::Duration;

use fancylogin_core::{FancyError, Selector};
use tokio::io::AsyncWriteExt;

use crate::process::command;

/// Single choice through `fzf`. The child is killed if the wait runs out.
pub struct FzfSelector;

/// "Select AWS Profile: " names the thing being selected.
fn subject(prompt: &str) -> String {
    let trimmed = prompt.trim().trim_end_matches(':').trim();
    trimmed.strip_prefix("Select ").unwrap_or(trimmed).to_string()
}

impl Selector for FzfSelector {
    async fn select(&self, prompt: &str, items: &[String], timeout: Duration) -> Result<Option<String>, FancyError> {
        let prompt_arg = format!("--prompt={prompt}");
        let mut cmd = command("fzf", &[&prompt_arg]);
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::inherit());
        let mut child = cmd.spawn().map_err(|source| FancyError::Spawn { tool: "fzf".into(), source })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(items.join("\n").as_bytes()).await?;
        }

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => return Err(FancyError::SelectionTimeout { what: subject(prompt), secs: timeout.as_secs() }),
        };

        match output.status.code() {
            Some(0) => {
                let chosen = String::from_utf8_lossy(&output.stdout).trim_end_matches(['\r', '\n']).to_string();
                Ok(Some(chosen).filter(|c| !c.trim().is_empty()))
            }
            // no match, or the operator pressed Esc / Ctrl-C
            Some(1) | Some(130) => Ok(None),
            code => Err(FancyError::external("fzf", code, "")),
        }
    }
}
