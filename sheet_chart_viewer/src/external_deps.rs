pub use axum::body::Bytes;
pub use chrono::{DateTime, Local};
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    Record,
};
pub use num_format::{Locale, ToFormattedString};
pub use once_cell::sync::Lazy as once_lazy;
pub use urlencoding::{decode, encode};
pub use uuid::Uuid;
