//! Roster service client error types.

use jury_roster::StoreError;

/// Errors from roster service calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("roster service {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ClientError {
    /// HTTP status of an API error, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client errors as seen by the roster session: the service refused
/// (client error status or bad payload) or could not be reached.
impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, body, .. } if (400..500).contains(&status) => {
                StoreError::Rejected {
                    reason: if body.trim().is_empty() {
                        format!("status {status}")
                    } else {
                        body
                    },
                }
            }
            undecodable @ ClientError::Deserialization { .. } => StoreError::Rejected {
                reason: undecodable.to_string(),
            },
            other => StoreError::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_status_maps_to_rejection() {
        let err = ClientError::Api {
            endpoint: "PUT /jury".into(),
            status: 409,
            body: "official already seated".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            StoreError::from(err),
            StoreError::Rejected {
                reason: "official already seated".into()
            }
        );
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = ClientError::Api {
            endpoint: "PUT /jury".into(),
            status: 422,
            body: String::new(),
        };
        assert_eq!(
            StoreError::from(err),
            StoreError::Rejected {
                reason: "status 422".into()
            }
        );
    }

    #[test]
    fn server_status_maps_to_unavailable() {
        let err = ClientError::Api {
            endpoint: "GET /jury".into(),
            status: 503,
            body: "down".into(),
        };
        assert!(matches!(StoreError::from(err), StoreError::Unavailable { .. }));
    }
}
