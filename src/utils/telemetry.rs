// file: src/utils/telemetry.rs
// description: Stage timing and throughput reporting

use std::time::{Duration, Instant};
use tracing::info;

/// Operation timer for stage tracking
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        let metrics = PerformanceMetrics::new(&self.operation, count, elapsed);
        info!("Completed operation: {}", metrics.format());
        elapsed
    }
}

/// Performance metrics for operations
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    pub operation: String,
    pub count: usize,
    pub duration_ms: u64,
    pub throughput: f64, // rows per second
}

impl PerformanceMetrics {
    pub fn new(operation: &str, count: usize, duration: Duration) -> Self {
        let duration_secs = duration.as_secs_f64();

        let throughput = if duration_secs > 0.0 {
            count as f64 / duration_secs
        } else {
            0.0
        };

        Self {
            operation: operation.to_string(),
            count,
            duration_ms: duration.as_millis() as u64,
            throughput,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{}: {} rows in {}ms ({:.2} rows/sec)",
            self.operation, self.count, self.duration_ms, self.throughput
        )
    }
}
