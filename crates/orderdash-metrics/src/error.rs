use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    #[error("order source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("sum for {metric} is not a finite number")]
    NonFiniteSum { metric: &'static str },

    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}
