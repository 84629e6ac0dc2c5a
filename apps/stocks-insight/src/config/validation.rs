//! Credential validation at startup.

use super::Config;

/// Environment variable holding the quotes provider key.
pub const QUOTES_KEY_VAR: &str = "STOCKS_API";

/// Environment variable holding the text-generation key.
pub const INSIGHT_KEY_VAR: &str = "GEMINI_API";

/// Errors from startup validation.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// One or both secret keys are missing.
    #[error(
        "Missing required credentials: {}. Set them (or their lowercase forms) in your \
         environment, a .env file, or the api_key fields of config.yaml, then restart.",
        .missing.join(", ")
    )]
    MissingCredentials {
        /// Names of the missing variables.
        missing: Vec<&'static str>,
    },
}

/// Which commands need which secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialNeeds {
    /// The quotes provider key is used.
    pub quotes: bool,
    /// The text-generation key is used.
    pub insight: bool,
}

impl CredentialNeeds {
    /// Both keys are required.
    pub const ALL: Self = Self {
        quotes: true,
        insight: true,
    };

    /// No key is required.
    pub const NONE: Self = Self {
        quotes: false,
        insight: false,
    };
}

/// Check that every needed secret is present before any network call.
///
/// # Errors
///
/// Returns [`StartupError::MissingCredentials`] naming each empty key.
pub fn validate_startup(config: &Config, needs: CredentialNeeds) -> Result<(), StartupError> {
    let mut missing = Vec::new();

    if needs.quotes && config.quotes.api_key.trim().is_empty() {
        missing.push(QUOTES_KEY_VAR);
    }
    if needs.insight && config.insight.api_key.trim().is_empty() {
        missing.push(INSIGHT_KEY_VAR);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StartupError::MissingCredentials { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(quotes_key: &str, insight_key: &str) -> Config {
        let mut config = Config::default();
        config.quotes.api_key = quotes_key.to_string();
        config.insight.api_key = insight_key.to_string();
        config
    }

    #[test]
    fn both_keys_present_passes() {
        assert!(validate_startup(&config("q", "g"), CredentialNeeds::ALL).is_ok());
    }

    #[test]
    fn missing_keys_are_listed() {
        let Err(StartupError::MissingCredentials { missing }) =
            validate_startup(&config("", " "), CredentialNeeds::ALL)
        else {
            panic!("expected missing credentials");
        };
        assert_eq!(missing, vec![QUOTES_KEY_VAR, INSIGHT_KEY_VAR]);
    }

    #[test]
    fn message_names_variables_and_setup() {
        let err = validate_startup(&config("", "g"), CredentialNeeds::ALL).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("STOCKS_API"));
        assert!(!message.contains("GEMINI_API"));
        assert!(message.contains(".env"));
    }

    #[test]
    fn single_missing_key_fails() {
        let err = validate_startup(&config("q", ""), CredentialNeeds::ALL).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API"));
    }

    #[test]
    fn offline_commands_need_nothing() {
        assert!(validate_startup(&config("", ""), CredentialNeeds::NONE).is_ok());
    }
}
