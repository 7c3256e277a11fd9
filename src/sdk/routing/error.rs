use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    /// A selected name has no known location.
    #[error("Coordonnées manquantes pour le point choisi: {0}")]
    MissingCoordinates(String),

    // Non-2xx answer; the message is the service's `error` field or the HTTP reason phrase.
    #[error("{message}")]
    ServiceError { status: u16, message: String },

    #[error("Aucun itinéraire trouvé.")]
    EmptyResult,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// A newer request was started before this response arrived.
    #[error("Response for request #{generation} superseded by a newer request")]
    Superseded { generation: u64 },
}

impl RoutingError {
    /// True for failures where the service never produced a usable answer.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            RoutingError::Transport(_) | RoutingError::MalformedResponse(_)
        )
    }
}
