use std::fmt;

/// Failure of a single forwarding execution.
///
/// Every variant carries the exact message that ends up in the
/// `{ "error": ... }` response body, so `Display` prints it unprefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardError {
    /// Missing userId or missing configuration, detected before any I/O
    Validation(String),
    /// Document store point-read failed (not found, auth, network)
    Lookup(String),
    /// Webhook transport error or non-2xx status
    Delivery(String),
}

impl ForwardError {
    pub fn message(&self) -> &str {
        match self {
            ForwardError::Validation(msg)
            | ForwardError::Lookup(msg)
            | ForwardError::Delivery(msg) => msg,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Validation(_) => "validation",
            ForwardError::Lookup(_) => "lookup",
            ForwardError::Delivery(_) => "delivery",
        }
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ForwardError {}
