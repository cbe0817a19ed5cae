/// Named criteria a view hands to the query service. Which of them a template
/// requires or ignores is decided by the template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub limit: Option<u32>,
    /// Inclusive `(lo, hi)`. `lo > hi` is allowed and matches nothing.
    pub rank_range: Option<(i64, i64)>,
    pub min_points: Option<f64>,
    pub name: Option<String>,
    pub country: Option<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_rank_range(mut self, lo: i64, hi: i64) -> Self {
        self.rank_range = Some((lo, hi));
        self
    }

    pub fn with_min_points(mut self, min_points: f64) -> Self {
        self.min_points = Some(min_points);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Trimmed name, or `None` when absent or blank.
    pub fn name_term(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Trimmed country, or `None` when absent or blank.
    pub fn country_term(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
