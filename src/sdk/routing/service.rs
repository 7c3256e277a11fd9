use super::error::RoutingError;
use super::types::{RouteRequest, RoutesResponse};
use std::future::Future;

pub trait RouteService: Send + Sync {
    /// Asks the service for route alternatives between two points.
    ///
    /// A 2xx answer with an empty route list is returned as `Ok`; deciding what
    /// an empty result means is left to the caller.
    fn compute_routes(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RoutesResponse, RoutingError>> + Send;
}
