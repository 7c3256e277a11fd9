pub mod fixture;
pub mod remote;

pub use fixture::FixtureRouteService;
pub use remote::{interpret_response, HttpRouteService};
