use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Validated connection settings for the hosted generative model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct GeneratorSettingsDraft {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorSettingsError {
    #[error("generative model API key is missing")]
    MissingApiKey,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GeneratorSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling in defaults for model and base URL.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorSettingsError` when the key is blank or the base URL does not parse.
    pub fn validate(self) -> Result<GeneratorSettings, GeneratorSettingsError> {
        let api_key = normalize_optional(self.api_key).ok_or(GeneratorSettingsError::MissingApiKey)?;
        let model = normalize_optional(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            normalize_optional(self.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if Url::parse(&base_url).is_err() {
            return Err(GeneratorSettingsError::InvalidBaseUrl(base_url));
        }

        Ok(GeneratorSettings {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl GeneratorSettings {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let settings = GeneratorSettingsDraft {
            api_key: Some(" key ".into()),
            ..GeneratorSettingsDraft::new()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.api_key(), "key");
        assert_eq!(settings.model(), DEFAULT_MODEL);
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GeneratorSettingsDraft {
            api_key: Some("   ".into()),
            ..GeneratorSettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, GeneratorSettingsError::MissingApiKey);
    }

    #[test]
    fn base_url_is_validated_and_trimmed() {
        let err = GeneratorSettingsDraft {
            api_key: Some("key".into()),
            base_url: Some("not a url".into()),
            ..GeneratorSettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, GeneratorSettingsError::InvalidBaseUrl(_)));

        let settings = GeneratorSettingsDraft {
            api_key: Some("key".into()),
            base_url: Some("http://localhost:11434/v1/".into()),
            model: Some("llama3".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(settings.base_url(), "http://localhost:11434/v1");
        assert_eq!(settings.model(), "llama3");
    }
}
