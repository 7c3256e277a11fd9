//! Orchestrates one request/response/render cycle and lets the user inspect
//! individual alternatives afterwards.
//!
//! The controller owns every drawable it creates. Each new request first removes
//! everything from the previous cycle, so the map always mirrors the latest
//! applied response. Requests carry a generation number; a response whose
//! generation is no longer current is dropped instead of rendered.

use crate::sdk::map::{Bounds, LayerId, LineStyle, MapLayer, FIT_PADDING};
use crate::sdk::panel::{PanelState, StatusPanel, SummaryCard};
use crate::sdk::places::{Endpoint, PlaceBook};
use crate::sdk::routing::{RouteRequest, RouteService, RoutesResponse, RoutingError};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const MISSING_COORDINATES_ALERT: &str = "Coordonnées manquantes pour le point choisi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Requesting,
    Rendered,
    ErrorDisplayed,
}

/// Everything drawn for one alternative. Only route 0 carries markers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRoute {
    pub index: usize,
    pub line: LayerId,
    pub markers: Vec<LayerId>,
    pub distance_km: f64,
    pub duration_min: f64,
    pub is_best: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub origin: Endpoint,
    pub destination: Endpoint,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            origin: Endpoint::from("Rond-point Victoire"),
            destination: Endpoint::from("Gare Centrale"),
        }
    }
}

/// A request that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    generation: u64,
    request: RouteRequest,
    origin_label: String,
    destination_label: String,
}

impl PendingRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &RouteRequest {
        &self.request
    }
}

/// A finished network call, ready to be handed back to [`RouteController::apply`].
#[derive(Debug)]
pub struct CompletedRequest {
    pub pending: PendingRequest,
    pub outcome: Result<RoutesResponse, RoutingError>,
}

#[derive(Debug)]
pub struct RouteController<M, P> {
    map: M,
    panel: P,
    places: PlaceBook,
    selection: Selection,
    routes: Vec<RenderedRoute>,
    generation: u64,
    state: ControllerState,
}

impl<M: MapLayer, P: StatusPanel> RouteController<M, P> {
    pub fn new(map: M, panel: P, places: PlaceBook) -> Self {
        Self {
            map,
            panel,
            places,
            selection: Selection::default(),
            routes: Vec::new(),
            generation: 0,
            state: ControllerState::Idle,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn places(&self) -> &PlaceBook {
        &self.places
    }

    pub fn routes(&self) -> &[RenderedRoute] {
        &self.routes
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_origin(&mut self, origin: Endpoint) {
        self.selection.origin = origin;
    }

    pub fn set_destination(&mut self, destination: Endpoint) {
        self.selection.destination = destination;
    }

    /// Exchanges origin and destination. Does not recompute.
    pub fn swap_endpoints(&mut self) {
        let Selection {
            origin,
            destination,
        } = &mut self.selection;
        std::mem::swap(origin, destination);
        log::debug!("Swapped endpoints: {:?}", self.selection);
    }

    /// Removes every owned layer and empties the panel.
    pub fn clear(&mut self) {
        for route in self.routes.drain(..) {
            for id in std::iter::once(route.line).chain(route.markers) {
                if self.map.has_layer(id) {
                    self.map.remove_layer(id);
                }
            }
        }
        self.panel.show(PanelState::Empty);
    }

    /// Releases every layer and hands the collaborators back.
    pub fn teardown(mut self) -> (M, P) {
        self.clear();
        (self.map, self.panel)
    }

    /// Resolves the endpoints, clears the previous cycle and starts a new one.
    pub fn begin_request(
        &mut self,
        origin: &Endpoint,
        destination: &Endpoint,
        alternatives: u32,
    ) -> Result<PendingRequest, RoutingError> {
        let (start, origin_label) = match self.places.resolve(origin) {
            Some(resolved) => resolved,
            None => return Err(self.missing_coordinates(origin)),
        };
        let (end, destination_label) = match self.places.resolve(destination) {
            Some(resolved) => resolved,
            None => return Err(self.missing_coordinates(destination)),
        };

        self.clear();
        self.panel.show(PanelState::Computing);
        self.generation += 1;
        self.state = ControllerState::Requesting;

        let request = RouteRequest::new(start, end, alternatives);
        log::info!(
            "Request #{}: {} alternatives from {} to {}",
            self.generation,
            request.alternatives,
            describe(origin),
            describe(destination)
        );
        Ok(PendingRequest {
            generation: self.generation,
            request,
            origin_label,
            destination_label,
        })
    }

    fn missing_coordinates(&mut self, endpoint: &Endpoint) -> RoutingError {
        self.panel.alert(MISSING_COORDINATES_ALERT);
        RoutingError::MissingCoordinates(describe(endpoint))
    }

    /// Renders the outcome of `pending`, unless a newer request has started since.
    ///
    /// Returns the number of rendered routes, or the error now shown in the panel.
    pub fn apply(
        &mut self,
        pending: PendingRequest,
        outcome: Result<RoutesResponse, RoutingError>,
    ) -> Result<usize, RoutingError> {
        if pending.generation != self.generation {
            log::debug!(
                "Dropping response for request #{} (current is #{})",
                pending.generation,
                self.generation
            );
            return Err(RoutingError::Superseded {
                generation: pending.generation,
            });
        }

        match outcome {
            Ok(response) if response.routes.is_empty() => {
                Err(self.display_error(RoutingError::EmptyResult))
            }
            Ok(response) => Ok(self.render(&pending, &response)),
            Err(err) => Err(self.display_error(err)),
        }
    }

    pub fn apply_completed(&mut self, completed: CompletedRequest) -> Result<usize, RoutingError> {
        self.apply(completed.pending, completed.outcome)
    }

    fn display_error(&mut self, err: RoutingError) -> RoutingError {
        let state = match &err {
            RoutingError::ServiceError { message, .. } => PanelState::ServiceError(message.clone()),
            RoutingError::EmptyResult => PanelState::NoRoute,
            e if e.is_network() => PanelState::NetworkError(e.to_string()),
            other => PanelState::ServiceError(other.to_string()),
        };
        log::warn!("Route request failed: {}", err);
        self.panel.show(state);
        self.state = ControllerState::ErrorDisplayed;
        err
    }

    fn render(&mut self, pending: &PendingRequest, response: &RoutesResponse) -> usize {
        let mut all_bounds: Option<Bounds> = None;
        let mut cards = Vec::with_capacity(response.routes.len());

        for (idx, route) in response.routes.iter().enumerate() {
            let is_best = response.is_best(idx);
            let path = route.geometry.to_path();
            let popup = format!(
                "<b>Itinéraire {}</b><br>Distance: {} km<br>Durée: {} min",
                idx + 1,
                route.distance_km,
                route.duration_min
            );
            let line = self
                .map
                .add_polyline(&path, &LineStyle::for_route(idx, is_best), &popup);
            if let Some(b) = self.map.layer_bounds(line) {
                all_bounds = Some(match all_bounds {
                    Some(acc) => acc.extend(&b),
                    None => b,
                });
            }

            let markers = if idx == 0 {
                vec![
                    self.map.add_marker(
                        pending.request.start,
                        &format!("Départ: {}", pending.origin_label),
                    ),
                    self.map.add_marker(
                        pending.request.end,
                        &format!("Arrivée: {}", pending.destination_label),
                    ),
                ]
            } else {
                Vec::new()
            };

            self.routes.push(RenderedRoute {
                index: idx,
                line,
                markers,
                distance_km: route.distance_km,
                duration_min: route.duration_min,
                is_best,
            });
            cards.push(SummaryCard {
                index: idx,
                distance_km: route.distance_km,
                duration_min: route.duration_min,
                is_best,
                kind: route.kind.clone(),
                road_summary: route.summary.clone(),
                stops: route.stops.iter().map(|s| s.name.clone()).collect(),
            });
        }

        if let Some(bounds) = all_bounds {
            self.map.fit_bounds(bounds.pad(FIT_PADDING));
        }
        self.panel.show(PanelState::Summary(cards));
        self.state = ControllerState::Rendered;

        log::info!(
            "Rendered {} routes for request #{}",
            self.routes.len(),
            pending.generation
        );
        self.routes.len()
    }

    /// Full cycle: resolve, clear, request, render.
    pub async fn compute_and_render<S: RouteService>(
        &mut self,
        service: &S,
        origin: &Endpoint,
        destination: &Endpoint,
        alternatives: u32,
    ) -> Result<usize, RoutingError> {
        let pending = self.begin_request(origin, destination, alternatives)?;
        let outcome = service.compute_routes(pending.request()).await;
        self.apply(pending, outcome)
    }

    /// [`Self::compute_and_render`] on the current selection.
    pub async fn compute_selected<S: RouteService>(
        &mut self,
        service: &S,
        alternatives: u32,
    ) -> Result<usize, RoutingError> {
        let Selection {
            origin,
            destination,
        } = self.selection.clone();
        self.compute_and_render(service, &origin, &destination, alternatives)
            .await
    }

    /// Fits the viewport to one rendered route. Unknown indices are ignored.
    pub fn select_route(&mut self, index: usize) -> bool {
        let Some(route) = self.routes.get(index) else {
            log::debug!("No rendered route at index {}", index);
            return false;
        };
        match self.map.layer_bounds(route.line) {
            Some(bounds) => {
                self.map.fit_bounds(bounds.pad(FIT_PADDING));
                true
            }
            None => false,
        }
    }
}

/// Runs the network call for `pending` on the runtime and sends the outcome to `tx`.
pub fn spawn_request<S>(
    service: Arc<S>,
    pending: PendingRequest,
    tx: UnboundedSender<CompletedRequest>,
) -> JoinHandle<()>
where
    S: RouteService + 'static,
{
    tokio::spawn(async move {
        let outcome = service.compute_routes(pending.request()).await;
        if tx.send(CompletedRequest { pending, outcome }).is_err() {
            log::debug!("Controller went away before the response arrived");
        }
    })
}

fn describe(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Named(name) => name.clone(),
        Endpoint::Coordinates(point) => point.to_string(),
    }
}
