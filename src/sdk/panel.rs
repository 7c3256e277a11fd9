// Status area next to the map: progress, errors and one summary card per route.

/// One line of the route summary list, in response order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub index: usize,
    pub distance_km: f64,
    pub duration_min: f64,
    pub is_best: bool,
    /// How the service produced this alternative (`direct`, `via_landmark`, ...).
    pub kind: Option<String>,
    /// Road names reported by the service, if any.
    pub road_summary: Option<String>,
    pub stops: Vec<String>,
}

impl SummaryCard {
    /// Human numbering starts at 1.
    pub fn title(&self) -> String {
        format!("Itinéraire {}", self.index + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Empty,
    Computing,
    ServiceError(String),
    NoRoute,
    NetworkError(String),
    Summary(Vec<SummaryCard>),
}

impl PanelState {
    pub fn to_html(&self) -> String {
        match self {
            PanelState::Empty => String::new(),
            PanelState::Computing => {
                r#"<div class="alert alert-info">Calcul des itinéraires...</div>"#.to_string()
            }
            PanelState::ServiceError(message) => format!(
                r#"<div class="alert alert-danger">Erreur: {}</div>"#,
                escape_html(message)
            ),
            PanelState::NoRoute => {
                r#"<div class="alert alert-warning">Aucun itinéraire trouvé.</div>"#.to_string()
            }
            PanelState::NetworkError(message) => format!(
                r#"<div class="alert alert-danger">Erreur réseau: {}</div>"#,
                escape_html(message)
            ),
            PanelState::Summary(cards) => cards.iter().map(card_html).collect(),
        }
    }
}

fn card_html(card: &SummaryCard) -> String {
    let border = if card.is_best { " border-danger" } else { "" };
    let badge = if card.is_best {
        r#" <span class="badge bg-danger ms-2">Plus court</span>"#
    } else {
        ""
    };
    let kind = match card.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(kind) => format!(r#" <small class="text-muted">({})</small>"#, escape_html(kind)),
        None => String::new(),
    };
    let mut extra = String::new();
    if let Some(summary) = card.road_summary.as_deref().filter(|s| !s.is_empty()) {
        extra.push_str(&format!(
            r#"<div class="small text-muted">{}</div>"#,
            escape_html(summary)
        ));
    }
    if !card.stops.is_empty() {
        let stops: Vec<String> = card.stops.iter().map(|s| escape_html(s)).collect();
        extra.push_str(&format!(
            r#"<div class="small">Arrêts: {}</div>"#,
            stops.join(", ")
        ));
    }
    format!(
        concat!(
            r#"<div class="card mb-2{border}"><div class="card-body p-2">"#,
            r#"<div class="d-flex justify-content-between">"#,
            r#"<div><strong>{title}</strong>{kind}{badge}</div>"#,
            r#"<div><small>{distance} km • {duration} min</small></div>"#,
            r#"</div>{extra}<div class="mt-1">"#,
            r#"<button class="btn btn-sm btn-outline-primary" data-route-index="{index}">Zoom</button>"#,
            r#"</div></div></div>"#,
        ),
        border = border,
        title = card.title(),
        kind = kind,
        badge = badge,
        distance = card.distance_km,
        duration = card.duration_min,
        extra = extra,
        index = card.index,
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Where the controller reports progress and failures.
pub trait StatusPanel {
    /// Replaces whatever the panel currently shows.
    fn show(&mut self, state: PanelState);

    /// Blocking notice, used when a request cannot even be built.
    fn alert(&mut self, message: &str);
}

/// Panel that keeps the latest state and its rendered HTML fragment.
#[derive(Debug, Default, Clone)]
pub struct HtmlPanel {
    state: PanelState,
    html: String,
    alerts: Vec<String>,
}

impl HtmlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Cards currently displayed; empty unless a summary is shown.
    pub fn cards(&self) -> &[SummaryCard] {
        match &self.state {
            PanelState::Summary(cards) => cards,
            _ => &[],
        }
    }
}

impl StatusPanel for HtmlPanel {
    fn show(&mut self, state: PanelState) {
        self.html = state.to_html();
        self.state = state;
    }

    fn alert(&mut self, message: &str) {
        log::warn!("{}", message);
        self.alerts.push(message.to_string());
    }
}
