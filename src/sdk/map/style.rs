/// Line colors, assigned by cycling over the route's position in the response.
pub const PALETTE: [&str; 4] = ["#2b83ba", "#d7191c", "#1a9641", "#fdae61"];

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    /// Dash pattern in the map library's `dashArray` syntax; `None` is solid.
    pub dash_array: Option<String>,
}

impl LineStyle {
    /// Style for the route at `index`. The best route is heavier, more opaque and solid.
    pub fn for_route(index: usize, is_best: bool) -> Self {
        let color = PALETTE[index % PALETTE.len()].to_string();
        if is_best {
            Self {
                color,
                weight: 6,
                opacity: 0.95,
                dash_array: None,
            }
        } else {
            Self {
                color,
                weight: 4,
                opacity: 0.7,
                dash_array: Some("6,8".to_string()),
            }
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash_array.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_over_palette() {
        assert_eq!(LineStyle::for_route(0, false).color, "#2b83ba");
        assert_eq!(LineStyle::for_route(3, false).color, "#fdae61");
        assert_eq!(LineStyle::for_route(4, false).color, "#2b83ba");
        assert_eq!(LineStyle::for_route(5, true).color, "#d7191c");
    }

    #[test]
    fn best_route_is_heavier_and_solid() {
        let best = LineStyle::for_route(1, true);
        let other = LineStyle::for_route(1, false);
        assert!(best.weight > other.weight);
        assert!(best.opacity > other.opacity);
        assert!(!best.is_dashed());
        assert_eq!(other.dash_array.as_deref(), Some("6,8"));
    }
}
