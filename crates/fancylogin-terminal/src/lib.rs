mod shell_env;
mod spinner;
pub mod status;

pub use shell_env::{DashboardEnv, ProfileExport, ShellFlavor};
pub use spinner::Spinner;
pub use status::Reporter;
