pub mod error;
pub mod provider;
pub mod service;
pub mod types;

pub use error::RoutingError;
pub use provider::{FixtureRouteService, HttpRouteService};
pub use service::RouteService;
pub use types::{RouteGeometry, RouteRequest, RouteResult, RoutesResponse, MAX_ALTERNATIVES};
