use log::{debug, info};

use crate::config::settings::{AppConfig, DashboardSettings};
use crate::database::{self, DbPool};
use crate::query::QueryService;
use crate::views::{Page, View};

/// Owns the process-wide pool (through the query service) and builds pages.
#[derive(Clone)]
pub struct DashboardService {
    queries: QueryService,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(config: &AppConfig) -> Self {
        let pool = database::create_pool(&config.database);
        info!("Using {} (read-only)", config.database.path);
        Self::with_pool(pool, config.dashboard.clone())
    }

    pub fn with_pool(pool: DbPool, settings: DashboardSettings) -> Self {
        Self {
            queries: QueryService::new(pool),
            settings,
        }
    }

    pub fn view(&self, page: &Page) -> View {
        info!("Building {} view", page.name());
        let view = page.build(&self.queries, &self.settings);
        for error in view.errors() {
            debug!("{} view rendered with error: {}", page.name(), error);
        }
        view
    }
}
