//! Seams to the outside world. The binary implements these over real
//! processes and the terminal; tests implement them in memory.

use std::future::Future;
use std::io;
use std::time::Duration;

use crate::discovery::{AwsProfile, KubeContext};
use crate::error::FancyError;

/// Asks one question and returns one trimmed answer. An empty answer means
/// "take the default".
pub trait Prompter {
    fn ask(&mut self, question: &str) -> io::Result<String>;
    fn say(&mut self, line: &str);
}

pub trait ProfileSource {
    fn profiles(&self) -> Result<Vec<AwsProfile>, FancyError>;
}

pub trait ContextSource {
    fn contexts(&self) -> Result<Vec<KubeContext>, FancyError>;
}

pub trait ClusterCli {
    fn list_contexts(&self) -> impl Future<Output = Result<Vec<String>, FancyError>> + Send;
    fn current_context(&self) -> impl Future<Output = Result<String, FancyError>> + Send;
    fn use_context(&self, name: &str) -> impl Future<Output = Result<(), FancyError>> + Send;
}

/// Interactive single choice. `Ok(None)` means the operator picked nothing;
/// running out of `timeout` is `FancyError::SelectionTimeout`.
pub trait Selector {
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        timeout: Duration,
    ) -> impl Future<Output = Result<Option<String>, FancyError>> + Send;
}

/// `[Y/n]`-style answer: empty takes `default`, otherwise the first letter decides.
pub fn answer_is_yes(answer: &str, default: bool) -> bool {
    match answer.trim().chars().next() {
        None => default,
        Some(c) => c.eq_ignore_ascii_case(&'y'),
    }
}

/// Only an explicit `n...` declines; anything else goes ahead.
pub fn answer_declines(answer: &str) -> bool {
    answer.trim().chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
}
