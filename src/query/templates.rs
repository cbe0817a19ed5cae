use std::fmt;

use rusqlite::types::Value as SqlValue;

use super::clause::{contains_pattern, Statement, WhereClause};
use super::error::QueryError;
use super::filters::Filters;

const SUMMARY_SQL: &str = "SELECT \
    (SELECT COUNT(*) FROM competitors) AS total_competitors, \
    (SELECT COUNT(DISTINCT country) FROM competitors) AS total_countries, \
    (SELECT MAX(points) FROM competitor_rankings) AS highest_points";

const STANDINGS_SQL: &str = "SELECT c.name AS competitor_name, c.country AS country, cr.rank AS rank, cr.points AS points \
    FROM competitors c \
    JOIN competitor_rankings cr ON c.competitor_id = cr.competitor_id";

const DETAIL_SQL: &str = "SELECT c.name AS competitor_name, c.country AS country, cr.rank AS rank, \
    cr.movement AS movement, cr.competitions_played AS competitions_played, cr.points AS points \
    FROM competitors c \
    JOIN competitor_rankings cr ON c.competitor_id = cr.competitor_id";

const COUNTRY_DISTRIBUTION_SQL: &str = "SELECT c.country AS country, COUNT(c.competitor_id) AS total_competitors \
    FROM competitors c \
    GROUP BY c.country \
    ORDER BY total_competitors DESC, c.country ASC";

const COUNTRY_ANALYSIS_SQL: &str = "SELECT c.country AS country, COUNT(DISTINCT c.competitor_id) AS total_competitors, AVG(cr.points) AS avg_points \
    FROM competitors c \
    JOIN competitor_rankings cr ON c.competitor_id = cr.competitor_id \
    GROUP BY c.country \
    ORDER BY c.country ASC";

/// The fixed statement shapes the dashboard can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTemplate {
    /// One row: `total_competitors`, `total_countries`, `highest_points`.
    SummaryCounts,
    /// Requires `limit`. Ties in points come back in store order.
    TopByPoints,
    /// Requires `limit`.
    TopByRank,
    CountryDistribution,
    /// `total_competitors` counts distinct competitors per country, while
    /// `avg_points` averages every joined ranking row.
    CountryAnalysis,
    /// Requires `rank_range`; `min_points` defaults to 0.
    Search,
    /// Requires a non-blank `name`. Exact matches sort first.
    CompetitorDetail,
}

impl QueryTemplate {
    pub const ALL: [QueryTemplate; 7] = [
        QueryTemplate::SummaryCounts,
        QueryTemplate::TopByPoints,
        QueryTemplate::TopByRank,
        QueryTemplate::CountryDistribution,
        QueryTemplate::CountryAnalysis,
        QueryTemplate::Search,
        QueryTemplate::CompetitorDetail,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QueryTemplate::SummaryCounts => "summary_counts",
            QueryTemplate::TopByPoints => "top_by_points",
            QueryTemplate::TopByRank => "top_by_rank",
            QueryTemplate::CountryDistribution => "country_distribution",
            QueryTemplate::CountryAnalysis => "country_analysis",
            QueryTemplate::Search => "search",
            QueryTemplate::CompetitorDetail => "competitor_detail",
        }
    }

    /// Shape the statement for this template. Filters the template does not
    /// use are ignored.
    pub fn build(&self, filters: &Filters) -> Result<Statement, QueryError> {
        let statement = match self {
            QueryTemplate::SummaryCounts => Statement::new(SUMMARY_SQL),
            QueryTemplate::TopByPoints => Statement::new(STANDINGS_SQL)
                .then("ORDER BY cr.points DESC LIMIT ?", [required_limit(filters)?]),
            QueryTemplate::TopByRank => Statement::new(STANDINGS_SQL)
                .then("ORDER BY cr.rank ASC LIMIT ?", [required_limit(filters)?]),
            QueryTemplate::CountryDistribution => Statement::new(COUNTRY_DISTRIBUTION_SQL),
            QueryTemplate::CountryAnalysis => Statement::new(COUNTRY_ANALYSIS_SQL),
            QueryTemplate::Search => build_search(filters)?,
            QueryTemplate::CompetitorDetail => build_detail(filters)?,
        };
        Ok(statement)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn required_limit(filters: &Filters) -> Result<SqlValue, QueryError> {
    filters
        .limit
        .map(|n| SqlValue::Integer(i64::from(n)))
        .ok_or(QueryError::MissingFilter("limit"))
}

fn build_search(filters: &Filters) -> Result<Statement, QueryError> {
    let (lo, hi) = filters
        .rank_range
        .ok_or(QueryError::MissingFilter("rank_range"))?;
    let min_points = filters.min_points.unwrap_or(0.0);
    let name = filters.name_term();
    let country = filters.country_term();

    let mut clause = WhereClause::new();
    clause
        .and(
            "cr.rank BETWEEN ? AND ?",
            [SqlValue::Integer(lo), SqlValue::Integer(hi)],
        )
        .and("cr.points >= ?", [SqlValue::Real(min_points)])
        .and_if(
            name.is_some(),
            "c.name LIKE ? ESCAPE '\\'",
            name.map(|term| SqlValue::Text(contains_pattern(term))),
        )
        .and_if(
            country.is_some(),
            "c.country LIKE ? ESCAPE '\\'",
            country.map(|term| SqlValue::Text(contains_pattern(term))),
        );

    Ok(Statement::new(STANDINGS_SQL)
        .filtered_by(clause)
        .then("ORDER BY cr.rank ASC", std::iter::empty()))
}

fn build_detail(filters: &Filters) -> Result<Statement, QueryError> {
    let name = filters.name_term().ok_or(QueryError::MissingFilter("name"))?;

    let mut clause = WhereClause::new();
    clause.and(
        "c.name LIKE ? ESCAPE '\\'",
        [SqlValue::Text(contains_pattern(name))],
    );

    Ok(Statement::new(DETAIL_SQL).filtered_by(clause).then(
        "ORDER BY LOWER(c.name) = LOWER(?) DESC, cr.rank ASC",
        [SqlValue::Text(name.to_string())],
    ))
}
