//! Database metrics collection.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Records how long one query took, labelled by operation and table.
pub fn record_query_duration(operation: &str, table: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "operation" => operation.to_string(),
        "table" => table.to_string()
    )
    .record(duration_secs);
}

/// Publishes connection pool gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one query and records it when [`QueryTimer::record`] is called.
///
/// ```ignore
/// let timer = QueryTimer::new("list", "events");
/// let rows = query.fetch_all(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    operation: &'static str,
    table: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(operation: &'static str, table: &'static str) -> Self {
        Self {
            operation,
            table,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.operation, self.table, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_labels() {
        let timer = QueryTimer::new("insert", "events");
        assert_eq!(timer.operation, "insert");
        assert_eq!(timer.table, "events");
    }

    #[test]
    fn test_record_without_recorder_is_harmless() {
        QueryTimer::new("list", "sermons").record();
    }
}
