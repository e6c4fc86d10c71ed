use crate::error::Result;
use crate::models::job::{
    AverageSalary, JobStats, LevelCount, LocationCount, TypeCount, STATUS_ACTIVE, STATUS_INACTIVE,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct StatsService {
    pool: SqlitePool,
}

impl StatsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> Result<JobStats> {
        let active = self.count_with_status(STATUS_ACTIVE).await?;
        let inactive = self.count_with_status(STATUS_INACTIVE).await?;

        let (avg_min, avg_max): (Option<f64>, Option<f64>) =
            sqlx::query_as("SELECT AVG(salary_min), AVG(salary_max) FROM jobs")
                .fetch_one(&self.pool)
                .await?;

        let by_type = sqlx::query_as::<_, TypeCount>(
            "SELECT type, COUNT(*) AS count FROM jobs GROUP BY type",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_level = sqlx::query_as::<_, LevelCount>(
            "SELECT level, COUNT(*) AS count FROM jobs GROUP BY level",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_location = sqlx::query_as::<_, LocationCount>(
            "SELECT location, COUNT(*) AS count FROM jobs GROUP BY location ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(JobStats {
            // Doubles the active count; inactive jobs are not part of it.
            total: active + active,
            active,
            inactive,
            average_salary: AverageSalary {
                min: round_half_up(avg_min),
                max: round_half_up(avg_max),
            },
            by_type,
            by_level,
            by_location,
        })
    }

    async fn count_with_status(&self, status: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE status = ?")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Rounds .5 towards positive infinity; no data rounds to zero.
fn round_half_up(value: Option<f64>) -> i64 {
    value.map(|v| (v + 0.5).floor() as i64).unwrap_or(0)
}
