use prometheus::{
    exponential_buckets, histogram_opts, register_histogram, register_int_counter,
    register_int_counter_vec, register_int_gauge, Histogram, IntCounter, IntCounterVec, IntGauge,
};

pub static REQUESTS_TOTAL: once_cell::sync::Lazy<IntCounter> = once_cell::sync::Lazy::new(|| {
    register_int_counter!("media_gateway_requests_total", "Total number of HTTP requests")
        .unwrap()
});

pub static ERRORS_TOTAL: once_cell::sync::Lazy<IntCounter> = once_cell::sync::Lazy::new(|| {
    register_int_counter!(
        "media_gateway_errors_total",
        "Total responses with a 4xx or 5xx status"
    )
    .unwrap()
});

pub static ACTIVE_REQUESTS: once_cell::sync::Lazy<IntGauge> = once_cell::sync::Lazy::new(|| {
    register_int_gauge!("media_gateway_active_requests", "Current active requests").unwrap()
});

pub static LATENCY: once_cell::sync::Lazy<Histogram> = once_cell::sync::Lazy::new(|| {
    let opts = histogram_opts!(
        "media_gateway_latency_seconds",
        "End-to-end latency in seconds",
        exponential_buckets(0.01, 2.0, 15).unwrap()
    );
    register_histogram!(opts).unwrap()
});

/// 按依赖（analysis / mux）统计的上游失败次数
pub static UPSTREAM_FAILURES: once_cell::sync::Lazy<IntCounterVec> =
    once_cell::sync::Lazy::new(|| {
        register_int_counter_vec!(
            "media_gateway_upstream_failures_total",
            "Failed calls to external dependencies",
            &["dependency"]
        )
        .unwrap()
    });
