use log::{debug, warn};
use rusqlite::params_from_iter;

use super::clause::Statement;
use super::error::QueryError;
use super::filters::Filters;
use super::rowset::{RowSet, Value};
use super::templates::QueryTemplate;
use crate::database::{get_connection, DbPool};

/// Runs query templates against the shared pool.
///
/// Every call acquires its own pooled connection, runs exactly one statement
/// and hands the connection back when the guard drops, on success and on
/// error alike.
#[derive(Clone)]
pub struct QueryService {
    pool: DbPool,
}

impl QueryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn execute(&self, template: QueryTemplate, filters: &Filters) -> Result<RowSet, QueryError> {
        let statement = template.build(filters)?;
        debug!("Running {} query: {}", template, statement.sql);

        let result = self.run(&statement);
        match &result {
            Ok(rows) => debug!("{} query returned {} rows", template, rows.len()),
            Err(e) => warn!("{} query failed: {}", template, e),
        }
        result
    }

    fn run(&self, statement: &Statement) -> Result<RowSet, QueryError> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(&statement.sql)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();
        let mut rowset = RowSet::new(columns);

        let mut rows = stmt.query(params_from_iter(statement.params.iter()))?;
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|idx| row.get_ref(idx).map(Value::from))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rowset.push(values);
        }

        Ok(rowset)
    }

    pub fn summary_counts(&self) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::SummaryCounts, &Filters::new())
    }

    pub fn top_by_points(&self, limit: u32) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::TopByPoints, &Filters::new().with_limit(limit))
    }

    pub fn top_by_rank(&self, limit: u32) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::TopByRank, &Filters::new().with_limit(limit))
    }

    pub fn country_distribution(&self) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::CountryDistribution, &Filters::new())
    }

    pub fn country_analysis(&self) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::CountryAnalysis, &Filters::new())
    }

    pub fn search(&self, filters: &Filters) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::Search, filters)
    }

    pub fn competitor_detail(&self, name: &str) -> Result<RowSet, QueryError> {
        self.execute(QueryTemplate::CompetitorDetail, &Filters::new().with_name(name))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use r2d2_sqlite::SqliteConnectionManager;

    use super::*;
    use crate::database::connection::create_memory_pool;
    use crate::database::fixtures::{league_pool, two_competitor_pool};

    fn names(rows: &RowSet) -> Vec<String> {
        rows.rows()
            .map(|row| row.get("competitor_name").unwrap().to_string())
            .collect()
    }

    fn int(rows: &RowSet, index: usize, column: &str) -> i64 {
        rows.row(index).unwrap().get(column).unwrap().as_i64().unwrap()
    }

    #[test]
    fn test_top_by_rank_two_competitors() {
        let service = QueryService::new(two_competitor_pool());
        let rows = service.top_by_rank(10).unwrap();

        assert_eq!(rows.columns(), ["competitor_name", "country", "rank", "points"]);
        assert_eq!(names(&rows), vec!["Bo", "Ana"]);
        assert_eq!(int(&rows, 0, "rank"), 1);
        assert_eq!(int(&rows, 0, "points"), 800);
        assert_eq!(int(&rows, 1, "rank"), 2);
        assert_eq!(int(&rows, 1, "points"), 500);
    }

    #[test]
    fn test_search_single_rank_two_competitors() {
        let service = QueryService::new(two_competitor_pool());
        let rows = service
            .search(&Filters::new().with_rank_range(1, 1).with_min_points(0.0))
            .unwrap();
        assert_eq!(names(&rows), vec!["Bo"]);
    }

    #[test]
    fn test_summary_counts_two_competitors() {
        let service = QueryService::new(two_competitor_pool());
        let rows = service.summary_counts().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(int(&rows, 0, "total_competitors"), 2);
        assert_eq!(int(&rows, 0, "total_countries"), 2);
        assert_eq!(int(&rows, 0, "highest_points"), 800);
    }

    #[test]
    fn test_summary_counts_on_empty_store() {
        let service = QueryService::new(crate::database::fixtures::seeded_pool(&[], &[]).unwrap());
        let rows = service.summary_counts().unwrap();
        let row = rows.row(0).unwrap();
        assert_eq!(row.get("total_competitors"), Some(&Value::Integer(0)));
        assert_eq!(row.get("highest_points"), Some(&Value::Null));
    }

    #[test]
    fn test_search_rows_satisfy_bounds() {
        let service = QueryService::new(league_pool());
        for (lo, hi, threshold) in [(1, 10, 0.0), (1, 100, 3000.0), (3, 14, 2700.0), (40, 40, 1200.0)] {
            let rows = service
                .search(&Filters::new().with_rank_range(lo, hi).with_min_points(threshold))
                .unwrap();
            assert!(!rows.is_empty(), "expected rows for [{lo}, {hi}] >= {threshold}");
            for row in rows.rows() {
                let rank = row.get("rank").unwrap().as_i64().unwrap();
                let points = row.get("points").unwrap().as_f64().unwrap();
                assert!((lo..=hi).contains(&rank));
                assert!(points >= threshold);
            }
        }
    }

    #[test]
    fn test_search_bounds_are_inclusive() {
        let service = QueryService::new(league_pool());
        let rows = service
            .search(&Filters::new().with_rank_range(2, 4).with_min_points(6400.0))
            .unwrap();
        assert_eq!(names(&rows), vec!["Iga Swiatek", "Carlos Alcaraz", "Coco Gauff"]);
    }

    #[test]
    fn test_search_inverted_rank_range_is_empty() {
        let service = QueryService::new(league_pool());
        let rows = service
            .search(&Filters::new().with_rank_range(10, 1))
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(rows.columns().len(), 4);
    }

    #[test]
    fn test_blank_filters_match_omitted_filters() {
        let service = QueryService::new(league_pool());
        let base = Filters::new().with_rank_range(1, 100);

        let omitted = service.search(&base).unwrap();
        let blank = service
            .search(&base.clone().with_name("").with_country("   "))
            .unwrap();
        assert_eq!(omitted, blank);
        assert_eq!(omitted.len(), 8);
    }

    #[test]
    fn test_name_and_country_filters_are_case_insensitive_substrings() {
        let service = QueryService::new(league_pool());
        let base = Filters::new().with_rank_range(1, 100);

        let rows = service.search(&base.clone().with_name("ana")).unwrap();
        assert_eq!(names(&rows), vec!["Ana Ivanovic"]);

        let rows = service.search(&base.clone().with_country("SPA")).unwrap();
        assert_eq!(names(&rows), vec!["Carlos Alcaraz", "Paula Badosa", "Rafael Nadal"]);

        let rows = service
            .search(&base.with_name("a").with_country("poland"))
            .unwrap();
        assert_eq!(names(&rows), vec!["Iga Swiatek", "Hubert Hurkacz"]);
    }

    #[test]
    fn test_like_metacharacters_match_literally() {
        let pool = crate::database::fixtures::seeded_pool(
            &[
                crate::database::Competitor::new(1, "Team 100% Pure", "FR"),
                crate::database::Competitor::new(2, "Team 1000 Pure", "FR"),
                crate::database::Competitor::new(3, "Jean_Luc", "FR"),
                crate::database::Competitor::new(4, "JeanXLuc", "FR"),
            ],
            &[
                crate::database::Ranking::new(1, 1, 900),
                crate::database::Ranking::new(2, 2, 800),
                crate::database::Ranking::new(3, 3, 700),
                crate::database::Ranking::new(4, 4, 600),
            ],
        )
        .unwrap();
        let service = QueryService::new(pool);
        let base = Filters::new().with_rank_range(1, 100);

        let rows = service.search(&base.clone().with_name("100%")).unwrap();
        assert_eq!(names(&rows), vec!["Team 100% Pure"]);

        let rows = service.search(&base.clone().with_name("_")).unwrap();
        assert_eq!(names(&rows), vec!["Jean_Luc"]);

        let rows = service.search(&base.with_name("n_L")).unwrap();
        assert_eq!(names(&rows), vec!["Jean_Luc"]);

        let rows = service.competitor_detail("0% p").unwrap();
        assert_eq!(names(&rows), vec!["Team 100% Pure"]);
    }

    #[test]
    fn test_top_by_points_respects_limit_and_order() {
        let service = QueryService::new(league_pool());
        let rows = service.top_by_points(5).unwrap();

        assert_eq!(rows.len(), 5);
        let points: Vec<f64> = rows
            .column("points")
            .unwrap()
            .into_iter()
            .filter_map(Value::as_f64)
            .collect();
        assert!(points.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(points[0], 9800.0);

        assert_eq!(service.top_by_points(50).unwrap().len(), 8);
        assert!(service.top_by_points(0).unwrap().is_empty());
    }

    #[test]
    fn test_competitors_without_ranking_are_excluded_from_joins() {
        let service = QueryService::new(league_pool());
        let rows = service.top_by_rank(100).unwrap();
        assert!(!names(&rows).iter().any(|n| n.starts_with("Unranked")));
        assert!(service.competitor_detail("Unranked").unwrap().is_empty());
    }

    #[test]
    fn test_country_distribution_counts_every_competitor() {
        let service = QueryService::new(league_pool());
        let rows = service.country_distribution().unwrap();

        assert_eq!(rows.columns(), ["country", "total_competitors"]);
        let first = rows.row(0).unwrap();
        assert_eq!(first.get("country").and_then(Value::as_str), Some("Spain"));
        assert_eq!(first.get("total_competitors").and_then(Value::as_i64), Some(3));
        // Atlantis has no ranking row but is still a competitor.
        assert!(rows.rows().any(|r| r.get("country").and_then(Value::as_str) == Some("Atlantis")));
    }

    #[test]
    fn test_country_analysis_average_points() {
        let service = QueryService::new(league_pool());
        let rows = service.country_analysis().unwrap();
        assert_eq!(rows.columns(), ["country", "total_competitors", "avg_points"]);

        let find = |country: &str| {
            rows.rows()
                .find(|r| r.get("country").and_then(Value::as_str) == Some(country))
                .unwrap()
        };

        let spain = find("Spain");
        assert_eq!(spain.get("total_competitors").and_then(Value::as_i64), Some(3));
        assert_eq!(spain.get("avg_points").and_then(Value::as_f64), Some(4100.0));

        let usa = find("USA");
        assert_eq!(usa.get("total_competitors").and_then(Value::as_i64), Some(1));
        assert_eq!(usa.get("avg_points").and_then(Value::as_f64), Some(6400.0));

        assert!(!rows.rows().any(|r| r.get("country").and_then(Value::as_str) == Some("Atlantis")));
    }

    #[test]
    fn test_country_analysis_counts_competitors_but_averages_ranking_rows() {
        let pool = crate::database::fixtures::seeded_pool(
            &[crate::database::Competitor::new(1, "Ana", "FR")],
            &[
                crate::database::Ranking::new(1, 2, 500),
                crate::database::Ranking::new(1, 5, 300),
            ],
        )
        .unwrap();
        let service = QueryService::new(pool);

        let rows = service.country_analysis().unwrap();
        assert_eq!(rows.len(), 1);
        let france = rows.row(0).unwrap();
        assert_eq!(france.get("total_competitors").and_then(Value::as_i64), Some(1));
        assert_eq!(france.get("avg_points").and_then(Value::as_f64), Some(400.0));
    }

    #[test]
    fn test_competitor_detail_columns_and_exact_match_first() {
        let pool = crate::database::fixtures::seeded_pool(
            &[
                crate::database::Competitor::new(1, "Bo Andersson", "SE"),
                crate::database::Competitor::new(2, "Bo", "US"),
            ],
            &[
                crate::database::Ranking::new(1, 3, 300),
                crate::database::Ranking { movement: -2, competitions_played: 11, ..crate::database::Ranking::new(2, 7, 700) },
            ],
        )
        .unwrap();
        let service = QueryService::new(pool);

        let rows = service.competitor_detail("bo").unwrap();
        assert_eq!(
            rows.columns(),
            ["competitor_name", "country", "rank", "movement", "competitions_played", "points"]
        );
        assert_eq!(names(&rows), vec!["Bo", "Bo Andersson"]);
        assert_eq!(int(&rows, 0, "movement"), -2);
        assert_eq!(int(&rows, 0, "competitions_played"), 11);
    }

    #[test]
    fn test_competitor_detail_no_match_is_empty_not_error() {
        let service = QueryService::new(two_competitor_pool());
        let rows = service.competitor_detail("Zed").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_tables_surface_as_execution_errors() {
        let service = QueryService::new(create_memory_pool().unwrap());
        let filters = Filters::new()
            .with_limit(5)
            .with_rank_range(1, 10)
            .with_name("ana");

        for template in QueryTemplate::ALL {
            let err = service.execute(template, &filters).unwrap_err();
            assert!(matches!(err, QueryError::Execution(_)), "{template}: {err}");
            assert!(err.to_string().contains("no such table"), "{template}: {err}");
        }
    }

    #[test]
    fn test_failed_query_releases_connection() {
        let pool = two_competitor_pool();
        let service = QueryService::new(pool.clone());

        assert!(service.execute(QueryTemplate::Search, &Filters::new()).is_err());
        let broken = Statement::new("SELECT * FROM no_such_table");
        assert!(service.run(&broken).is_err());

        // The single pooled connection must be back for this to succeed.
        assert_eq!(service.top_by_rank(10).unwrap().len(), 2);
        assert_eq!(pool.state().idle_connections, 1);
    }

    #[test]
    fn test_unreachable_store_is_connection_error() {
        let manager = SqliteConnectionManager::file("/nonexistent-dir/competitors.db")
            .with_flags(rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY);
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(100))
            .build_unchecked(manager);
        let service = QueryService::new(pool);

        let err = service.summary_counts().unwrap_err();
        assert!(err.is_connection());
        assert!(err.to_string().starts_with("could not connect to the database"));
    }
}
