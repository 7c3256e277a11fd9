pub mod config;
pub mod controller;
pub mod map;
pub mod panel;
pub mod places;
pub mod routing;
pub mod util;
