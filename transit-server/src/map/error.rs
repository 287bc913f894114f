//! Map API error types.

/// Errors from fetching or interpreting the upstream map document.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("map API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize the response body
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The document deserialized but is not a usable network description
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Malformed upstream data. Fatal for the refresh attempt that hit it;
/// the previous snapshot stays in service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A route's station list names an id absent from the station set.
    #[error("route {route:?} references unknown station {station:?}")]
    UnknownStationRef { route: String, station: String },

    /// The document contains no stations at all.
    #[error("map document contains no stations")]
    NoStations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MapError::Api {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "map API error 502: Bad Gateway");

        let err = ParseError::UnknownStationRef {
            route: "Loop".into(),
            station: "9f".into(),
        };
        assert_eq!(
            err.to_string(),
            "route \"Loop\" references unknown station \"9f\""
        );

        let wrapped: MapError = ParseError::NoStations.into();
        assert_eq!(wrapped.to_string(), "map document contains no stations");
    }
}
