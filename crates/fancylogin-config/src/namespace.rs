use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const DEVENG_SHAPE: &str = r"^([A-Z]+)_([A-Z]+)_DEVENG$";

fn deveng_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(DEVENG_SHAPE).expect("namespace shape regex is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceMiss {
    /// Profile is not of the `CODE_ENV_DEVENG` shape.
    Shape(String),
    UnknownCode(String),
}

impl fmt::Display for NamespaceMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(profile) => write!(f, "profile {profile} does not match DEVENG pattern"),
            Self::UnknownCode(code) => write!(f, "project code {code} not found in namespace config"),
        }
    }
}

/// `OV_TEST_DEVENG` with `OV=overviews` becomes `test-overviews`.
pub fn derive_namespace(profile: &str, project_codes: &HashMap<String, String>) -> Result<String, NamespaceMiss> {
    let caps = deveng_shape().captures(profile).ok_or_else(|| NamespaceMiss::Shape(profile.to_string()))?;
    let code = &caps[1];
    let environment = caps[2].to_lowercase();

    let project = project_codes.get(code).ok_or_else(|| NamespaceMiss::UnknownCode(code.to_string()))?;
    Ok(format!("{environment}-{project}"))
}
