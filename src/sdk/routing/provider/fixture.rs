use super::remote::interpret_response;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::RouteService;
use crate::sdk::routing::types::{RouteRequest, RoutesResponse};
use reqwest::StatusCode;
use std::{fs, io, path::Path};

/// Replays a recorded service answer, for offline rendering.
#[derive(Debug, Clone)]
pub struct FixtureRouteService {
    status: StatusCode,
    body: String,
}

impl FixtureRouteService {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Reads a 2xx response body from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(StatusCode::OK, fs::read_to_string(path)?))
    }
}

impl RouteService for FixtureRouteService {
    async fn compute_routes(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutingError> {
        log::debug!(
            "[FIXTURE] Replaying recorded answer for {} -> {}",
            request.start,
            request.end
        );
        interpret_response(self.status, &self.body)
    }
}
