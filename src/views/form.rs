use serde::Deserialize;

use crate::config::settings::DashboardSettings;
use crate::query::Filters;

/// Raw search-page input, as typed on the command line or sent as a query
/// string. Missing values fall back to the dashboard defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    pub name: Option<String>,
    pub country: Option<String>,
    pub min_rank: Option<i64>,
    pub max_rank: Option<i64>,
    pub min_points: Option<f64>,
}

impl SearchForm {
    /// Apply defaults and clamp each input to its slider bounds.
    ///
    /// The two rank ends are clamped independently and never swapped, so an
    /// inverted range stays inverted and yields no rows.
    pub fn to_filters(&self, settings: &DashboardSettings) -> Filters {
        let (default_lo, default_hi) = settings.default_rank_range;
        let lo = settings.clamp_rank(self.min_rank.unwrap_or(default_lo));
        let hi = settings.clamp_rank(self.max_rank.unwrap_or(default_hi));
        let min_points = settings.clamp_points(self.min_points.unwrap_or(settings.default_min_points));

        let mut filters = Filters::new()
            .with_rank_range(lo, hi)
            .with_min_points(min_points);
        filters.name = self.name.clone();
        filters.country = self.country.clone();
        filters
    }
}
