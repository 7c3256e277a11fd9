use crate::sdk::config::ServiceConfig;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::RouteService;
use crate::sdk::routing::types::{ErrorPayload, HealthStatus, RouteRequest, RoutesResponse};
use reqwest::{Client, StatusCode};

/// Route service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteService {
    client: Client,
    base_url: String,
}

impl HttpRouteService {
    pub fn new(config: &ServiceConfig) -> Result<Self, RoutingError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, RoutingError> {
        let url = format!("{}/api/health", self.base_url);
        log::debug!("[PROVIDER] Checking service health at {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(service_error(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl RouteService for HttpRouteService {
    async fn compute_routes(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutingError> {
        let url = format!("{}/api/routes", self.base_url);
        log::debug!(
            "[PROVIDER] Requesting {} alternatives for {} -> {}",
            request.alternatives,
            request.start,
            request.end
        );

        let response = match self.client.post(&url).json(request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                    url,
                    serde_json::to_string_pretty(request).unwrap_or_default(),
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;
        interpret_response(status, &text)
    }
}

/// Turns a raw HTTP answer into routes or a typed error.
pub fn interpret_response(status: StatusCode, text: &str) -> Result<RoutesResponse, RoutingError> {
    if !status.is_success() {
        let err = service_error(status, text);
        log::error!("Route service returned {}: {}", status, err);
        return Err(err);
    }

    serde_json::from_str(text).map_err(|e| {
        log::error!(
            "Failed to parse RoutesResponse.\nError: {}. Body: {}",
            e,
            text
        );
        e.into()
    })
}

fn service_error(status: StatusCode, text: &str) -> RoutingError {
    // Bodies that are not JSON fall back to the reason phrase
    let message = serde_json::from_str::<ErrorPayload>(text)
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or(status.as_str())
                .to_string()
        });
    RoutingError::ServiceError {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_uses_service_message() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"no path"}"#)
            .unwrap_err();
        match err {
            RoutingError::ServiceError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "no path");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn non_success_without_message_uses_reason_phrase() {
        let err = interpret_response(StatusCode::NOT_FOUND, "<html>nope</html>").unwrap_err();
        assert_eq!(err.to_string(), "Not Found");

        let err = interpret_response(StatusCode::BAD_GATEWAY, r#"{"detail":"x"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn success_with_garbage_is_malformed() {
        let err = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn success_parses_routes() {
        let body = r#"{"routes":[{"geometry":{"coordinates":[[15.3,-4.3]]},"distance_km":1.5,"duration_min":4}],"shortest_index":0}"#;
        let resp = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(resp.routes.len(), 1);
        assert_eq!(resp.routes[0].duration_min, 4.0);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ServiceConfig {
            base_url: "http://localhost:5000/".into(),
            timeout: None,
        };
        let service = HttpRouteService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:5000");
    }
}
