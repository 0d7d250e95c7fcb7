use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Operation exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encode => write!(f, "encode"),
            Operation::Decode => write!(f, "decode"),
        }
    }
}

/// Request counters shared between all handlers.
///
/// Cloning is cheap and every clone points at the same counters.
#[derive(Debug, Clone, Default)]
pub struct ServiceMetrics {
    encode_requests: Arc<AtomicU64>,
    decode_requests: Arc<AtomicU64>,
    successful_requests: Arc<AtomicU64>,
    failed_requests: Arc<AtomicU64>,
    bytes_processed: Arc<AtomicU64>,
    avg_response_time: Arc<AtomicU64>, // In microseconds
}

/// Point-in-time copy of [`ServiceMetrics`], serialized by the health endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub encode_requests: u64,
    pub decode_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub bytes_processed: u64,
    pub avg_response_time_ms: f64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self, operation: Operation) {
        let counter = match operation {
            Operation::Encode => &self.encode_requests,
            Operation::Decode => &self.decode_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self, bytes: usize, elapsed: Duration) {
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.bytes_processed
            .fetch_add(bytes as u64, Ordering::Relaxed);
        self.update_response_time(elapsed);
    }

    pub fn increment_failed_requests(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn update_response_time(&self, elapsed: Duration) {
        let sample = elapsed.as_micros() as f64;
        let current = self.avg_response_time.load(Ordering::Relaxed) as f64;
        let updated = if self.successful_requests.load(Ordering::Relaxed) <= 1 {
            sample
        } else {
            current * 0.9 + sample * 0.1 // Exponential moving average
        };
        self.avg_response_time
            .store(updated as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let encode_requests = self.encode_requests.load(Ordering::Relaxed);
        let decode_requests = self.decode_requests.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: encode_requests + decode_requests,
            encode_requests,
            decode_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            bytes_processed: self.bytes_processed.load(Ordering::Relaxed),
            avg_response_time_ms: self.avg_response_time.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}
