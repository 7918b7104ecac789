/// Everything that keeps a check from producing an evaluation.
///
/// The message of each variant is what ends up on the plugin output line.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Invalid query URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to query prometheus: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to query prometheus. Got {0} status code")]
    UnexpectedStatus(u16),
    #[error("Failed to decode prometheus response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Prometheus returned status '{status}': {message}")]
    QueryFailed { status: String, message: String },
    #[error("No data received in the response")]
    EmptyResult,
    #[error("Value '{value}' of {labels} is not a number")]
    InvalidValue { labels: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CheckError::UnexpectedStatus(503).to_string(),
            "Failed to query prometheus. Got 503 status code"
        );
        assert_eq!(
            CheckError::EmptyResult.to_string(),
            "No data received in the response"
        );

        let err = CheckError::QueryFailed {
            status: "error".to_owned(),
            message: "bad_data: parse error".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Prometheus returned status 'error': bad_data: parse error"
        );
    }

    #[test]
    fn test_messages_start_capitalized() {
        let errors = [
            CheckError::InvalidUrl("http://h:x".to_owned()),
            CheckError::UnexpectedStatus(500),
            CheckError::Decode(serde_json::from_str::<u8>("x").unwrap_err()),
            CheckError::QueryFailed {
                status: "error".to_owned(),
                message: "timeout".to_owned(),
            },
            CheckError::EmptyResult,
            CheckError::InvalidValue {
                labels: "{}".to_owned(),
                value: "x".to_owned(),
            },
        ];

        for err in errors {
            let message = err.to_string();
            assert!(
                message.starts_with(|c: char| c.is_ascii_uppercase()),
                "{}",
                message
            );
        }
    }
}
