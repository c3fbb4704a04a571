pub mod collaborators;
pub mod discovery;
pub mod error;
pub mod resolution;
pub mod selection;
pub mod wizard;

pub use collaborators::{answer_declines, answer_is_yes, ClusterCli, ContextSource, ProfileSource, Prompter, Selector};
pub use discovery::{AwsConfigFile, AwsProfile, KubeContext, KubeconfigFiles};
pub use error::FancyError;
pub use resolution::{
    settle_context, ContextDecision, ContextOrigin, ContextOutcome, Directive, NamespaceOutcome, ResolutionEngine,
    Settled, SELECTION_TIMEOUT,
};
pub use selection::{list_profiles_for_selection, profile_for_selection, ProfileDisplayInfo};
pub use wizard::{run_if_needed, ConfigWizard, WizardMode, WizardReport, WizardStage};
