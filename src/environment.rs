use crate::consts::cli_consts::backend::DEFAULT_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Where the analysis backend lives.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on this machine at its default address.
    #[default]
    Local,
    /// Backend at an explicit base URL.
    Custom { backend_url: String },
}

impl Environment {
    /// Returns the backend base URL associated with the environment.
    pub fn backend_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_URL.to_string(),
            Environment::Custom { backend_url } => backend_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid backend '{0}': expected 'local' or an http(s) URL")]
pub struct InvalidEnvironment(String);

impl FromStr for Environment {
    type Err = InvalidEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                backend_url: trimmed.to_string(),
            });
        }
        Err(InvalidEnvironment(s.to_string()))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.backend_url())
    }
}
