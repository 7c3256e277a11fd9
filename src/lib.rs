pub mod sdk;

pub use sdk::config::ServiceConfig;
pub use sdk::controller::{ControllerState, RenderedRoute, RouteController};
pub use sdk::map::{LatLon, SceneMap};
pub use sdk::panel::HtmlPanel;
pub use sdk::places::{Endpoint, PlaceBook};
pub use sdk::routing::{HttpRouteService, RouteService, RoutingError};
