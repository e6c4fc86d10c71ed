pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{job_service::JobService, stats_service::StatsService};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub job_service: JobService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let job_service = JobService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());

        Self {
            pool,
            job_service,
            stats_service,
        }
    }
}
