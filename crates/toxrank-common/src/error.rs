use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToxRankError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered 400 for the identifier.
    #[error("Identifier {0} not found in CompTox")]
    InvalidIdentifier(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Compound not found: {0}")]
    NotFound(String),

    #[error("Invalid API response: status code {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Hazard data could not be retrieved for {dtxsid} (status code {status})")]
    HazardUnavailable { dtxsid: String, status: u16 },

    #[error("No hazard data found for {0}")]
    NoHazardData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ToxRankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_carries_code() {
        let err = ToxRankError::UnexpectedStatus { status: 503 };
        assert_eq!(err.to_string(), "Invalid API response: status code 503");
    }

    #[test]
    fn test_hazard_unavailable_message_names_compound() {
        let err = ToxRankError::HazardUnavailable {
            dtxsid: "DTXSID3039242".into(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Hazard data could not be retrieved for DTXSID3039242 (status code 500)"
        );
    }
}
