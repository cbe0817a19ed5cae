use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
    pub connection_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "competitors.db".to_string(),
            pool_size: 4,
            connection_timeout_ms: 5000,
        }
    }
}

impl DatabaseSettings {
    /// Defaults overridden by `DATABASE_PATH`, `DATABASE_POOL_SIZE` and
    /// `DATABASE_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            path: env::var("DATABASE_PATH").unwrap_or(defaults.path),
            pool_size: env_or("DATABASE_POOL_SIZE", defaults.pool_size),
            connection_timeout_ms: env_or("DATABASE_TIMEOUT_MS", defaults.connection_timeout_ms),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {key}={raw}");
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub homepage_top_n: u32,
    pub leaderboard_top_n: u32,
    pub rank_bounds: RangeInclusive<i64>,
    pub default_rank_range: (i64, i64),
    pub points_bounds: RangeInclusive<f64>,
    pub default_min_points: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            homepage_top_n: 5,
            leaderboard_top_n: 10,
            rank_bounds: 1..=100,
            default_rank_range: (1, 10),
            points_bounds: 0.0..=5000.0,
            default_min_points: 1000.0,
        }
    }
}

impl DashboardSettings {
    pub fn clamp_rank(&self, rank: i64) -> i64 {
        rank.clamp(*self.rank_bounds.start(), *self.rank_bounds.end())
    }

    pub fn clamp_points(&self, points: f64) -> f64 {
        if points.is_nan() {
            return *self.points_bounds.start();
        }
        points.clamp(*self.points_bounds.start(), *self.points_bounds.end())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::from_env(),
            dashboard: DashboardSettings::default(),
        }
    }
}
