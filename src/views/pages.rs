use crate::config::settings::DashboardSettings;
use crate::query::{QueryService, RowSet, Value};

use super::{bars, Content, Metric, SearchForm, Section, View};

const FETCH_ERROR: &str = "Error fetching data";
const COUNTRY_FETCH_ERROR: &str = "Error fetching country data";
const TOP_RANKED_FETCH_ERROR: &str = "Error fetching top-ranked competitors";
const HIGHEST_POINTS_FETCH_ERROR: &str = "Error fetching highest points competitors";

/// The five dashboard pages and the input each one takes.
#[derive(Debug, Clone)]
pub enum Page {
    Home,
    Search(SearchForm),
    Details(Option<String>),
    Countries,
    Leaderboards,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Search(_) => "search",
            Page::Details(_) => "details",
            Page::Countries => "countries",
            Page::Leaderboards => "leaderboards",
        }
    }

    pub fn build(&self, service: &QueryService, settings: &DashboardSettings) -> View {
        match self {
            Page::Home => homepage(service, settings),
            Page::Search(form) => search(service, settings, form),
            Page::Details(name) => competitor_details(service, name.as_deref()),
            Page::Countries => country_analysis(service),
            Page::Leaderboards => leaderboards(service, settings),
        }
    }
}

/// Summary metrics, top competitors by points and the country distribution.
/// Each of the three is fetched on its own.
pub fn homepage(service: &QueryService, settings: &DashboardSettings) -> View {
    let mut view = View::new("🏆 Sports Competitor Dashboard")
        .with_caption("Get insights about competitors, rankings, and countries.");

    view.push(match service.summary_counts() {
        Ok(rows) => Section::new(None, Content::Metrics { metrics: summary_metrics(&rows) }),
        Err(e) => Section::error(None, FETCH_ERROR, &e),
    });

    let heading = Some("Top Insights");
    view.push(match service.top_by_points(settings.homepage_top_n) {
        Ok(rows) => Section::table(heading, rows),
        Err(e) => Section::error(heading, FETCH_ERROR, &e),
    });

    let heading = Some("Competitors by Country");
    view.push(match service.country_distribution() {
        Ok(rows) => Section::new(
            heading,
            Content::BarChart {
                bars: bars(&rows, "country", "total_competitors"),
            },
        ),
        Err(e) => Section::error(heading, FETCH_ERROR, &e),
    });

    view
}

fn summary_metrics(rows: &RowSet) -> Vec<Metric> {
    let first = rows.row(0);
    let value_of = |column: &str| {
        first
            .and_then(|row| row.get(column))
            .cloned()
            .unwrap_or(Value::Null)
    };

    [
        ("Total Competitors", "total_competitors"),
        ("Number of Countries Represented", "total_countries"),
        ("Highest Points Scored", "highest_points"),
    ]
    .into_iter()
    .map(|(label, column)| Metric {
        label: label.to_string(),
        value: value_of(column),
    })
    .collect()
}

pub fn search(service: &QueryService, settings: &DashboardSettings, form: &SearchForm) -> View {
    let mut view = View::new("🔍 Search & Filter Competitors");
    let filters = form.to_filters(settings);

    view.push(match service.search(&filters) {
        Ok(rows) => Section::table(None, rows),
        Err(e) => Section::error(None, FETCH_ERROR, &e),
    });
    view
}

pub fn competitor_details(service: &QueryService, name: Option<&str>) -> View {
    let mut view = View::new("👤 Competitor Details Viewer");

    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        view.push(Section::message(None, "Please enter a competitor name."));
        return view;
    };

    view.push(match service.competitor_detail(name) {
        Ok(rows) if rows.is_empty() => Section::message(None, "No competitor found with this name."),
        Ok(rows) => Section::table(None, rows),
        Err(e) => Section::error(None, FETCH_ERROR, &e),
    });
    view
}

/// Per-country table plus a chart of the same rows.
pub fn country_analysis(service: &QueryService) -> View {
    let mut view = View::new("🌍 Country-Wise Analysis");

    match service.country_analysis() {
        Ok(rows) => {
            let chart = bars(&rows, "country", "total_competitors");
            view.push(Section::table(None, rows));
            view.push(Section::new(
                Some("Bar Chart: Total Competitors by Country"),
                Content::BarChart { bars: chart },
            ));
        }
        Err(e) => view.push(Section::error(None, COUNTRY_FETCH_ERROR, &e)),
    }
    view
}

pub fn leaderboards(service: &QueryService, settings: &DashboardSettings) -> View {
    let mut view = View::new("🏅 Leaderboards");

    let heading = Some("Top-Ranked Competitors");
    view.push(match service.top_by_rank(settings.leaderboard_top_n) {
        Ok(rows) => Section::table(heading, rows),
        Err(e) => Section::error(heading, TOP_RANKED_FETCH_ERROR, &e),
    });

    let heading = Some("Competitors with the Highest Points");
    view.push(match service.top_by_points(settings.leaderboard_top_n) {
        Ok(rows) => Section::table(heading, rows),
        Err(e) => Section::error(heading, HIGHEST_POINTS_FETCH_ERROR, &e),
    });
    view
}
