use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::prompt::Prompter;

/// Environment variable holding the GitHub token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const TOKEN_PROMPT: &str = "Please enter your GitHub Personal Access Token";

/// GitHub credentials for one run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Credentials {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolves the token from the environment value, or asks for it once.
///
/// The token is not validated; a bad token surfaces when GitHub rejects a call.
pub fn get_token(env_token: Option<&str>, prompter: &mut dyn Prompter) -> Result<Credentials> {
    if let Some(token) = env_token.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("Using token from {TOKEN_ENV}");
        return Ok(Credentials::new(token));
    }

    debug!("{TOKEN_ENV} not set, prompting for token");
    let token = prompter.password(TOKEN_PROMPT)?;
    Ok(Credentials::new(token.trim()))
}
