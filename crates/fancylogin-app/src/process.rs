//! Running the external tools. Failures carry the tool's own stderr.

use std::process::Stdio;

use fancylogin_core::FancyError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub fn command(tool: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(tool);
    cmd.args(args);
    cmd.kill_on_drop(true);
    cmd
}

fn spawn_error(tool: &str) -> impl FnOnce(std::io::Error) -> FancyError + '_ {
    move |source| FancyError::Spawn { tool: tool.to_string(), source }
}

/// Trimmed stdout of a successful run.
pub async fn capture(mut cmd: Command, tool: &str) -> Result<String, FancyError> {
    cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    let output = cmd.output().await.map_err(spawn_error(tool))?;
    if !output.status.success() {
        return Err(FancyError::external(tool, output.status.code(), String::from_utf8_lossy(&output.stderr)));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Output is discarded unless the tool fails.
pub async fn run_quiet(cmd: Command, tool: &str) -> Result<(), FancyError> {
    capture(cmd, tool).await.map(|_| ())
}

/// Runs with the terminal attached; there is no stderr to forward.
pub async fn run_attached(mut cmd: Command, tool: &str) -> Result<(), FancyError> {
    cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    let status = cmd.status().await.map_err(spawn_error(tool))?;
    if !status.success() {
        return Err(FancyError::external(tool, status.code(), ""));
    }
    Ok(())
}

/// Feeds `input` on stdin and returns trimmed stdout.
pub async fn capture_with_input(mut cmd: Command, tool: &str, input: &[u8]) -> Result<String, FancyError> {
    cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(spawn_error(tool))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input).await?;
    }
    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(FancyError::external(tool, output.status.code(), String::from_utf8_lossy(&output.stderr)));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
