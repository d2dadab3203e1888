use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foxroute_core::Error;

/// Error body returned by every endpoint: `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = match &error {
            Error::NodeNotFound(_) => StatusCode::NOT_FOUND,
            Error::NoPathFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // the graph could not be loaded or has nothing to snap to
            Error::EmptyCandidateSet | Error::IoError(_) | Error::InvalidData(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Error::Ingestion(_) | Error::GeoJsonError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self.message);
        } else {
            tracing::debug!(%status, "{}", self.message);
        }
        (
            status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use foxroute_core::NodeId;
    use foxroute_core::VectorPoint;

    use super::*;

    fn id(x: f64, y: f64) -> NodeId {
        NodeId::try_from_point(VectorPoint::new(x, y)).unwrap()
    }

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (Error::NodeNotFound(id(1.0, 2.0)), StatusCode::NOT_FOUND),
            (
                Error::NoPathFound {
                    start: id(0.0, 0.0),
                    end: id(1.0, 1.0),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (Error::EmptyCandidateSet, StatusCode::SERVICE_UNAVAILABLE),
            (
                Error::InvalidData("bad weight".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                Error::GeoJsonError("bad feature".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }
}
