use thiserror::Error;

pub type TnResult<T> = Result<T, TnError>;

/// Value-level failures shared by every transitnet crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TnError {
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} cannot be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("not a station id: {text:?}")]
    InvalidStationId { text: String },
}
