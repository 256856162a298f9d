use std::sync::atomic::{AtomicU64, Ordering};

/// Request counter exposed at /metrics in Prometheus exposition format.
#[derive(Debug, Default)]
pub struct Metrics {
    http_requests: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_requests(&self) {
        self.http_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.http_requests.load(Ordering::Relaxed)
    }

    pub fn render(&self) -> String {
        format!(
            "# HELP http_requests_total Total HTTP Request\n\
             # TYPE http_requests_total counter\n\
             http_requests_total {}\n",
            self.requests()
        )
    }
}
