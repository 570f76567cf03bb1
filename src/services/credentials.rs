use crate::config::ForwarderConfig;
use crate::models::ForwardRequest;
use crate::utils::ForwardError;

/// Where the document store credential comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `APPWRITE_FUNCTION_API_KEY` from the environment
    Env,
    /// Named request header, forwarded unchanged
    Header(String),
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Env => "env",
            CredentialSource::Header(_) => "header",
        }
    }

    /// Resolves the credential for one execution. `None` means the store
    /// is called without a key and decides for itself.
    ///
    /// A header-sourced credential must appear at most once; repeated
    /// headers are rejected instead of picking one of the values.
    pub fn resolve(
        &self,
        config: &ForwarderConfig,
        request: &ForwardRequest,
    ) -> Result<Option<String>, ForwardError> {
        match self {
            CredentialSource::Env => Ok(config.api_key.clone()),
            CredentialSource::Header(name) => match request.header_values(name) {
                [] => Ok(None),
                [value] => Ok(Some(value.clone()).filter(|v| !v.is_empty())),
                _ => Err(ForwardError::Validation(format!(
                    "Multiple {} headers in request",
                    name
                ))),
            },
        }
    }
}
