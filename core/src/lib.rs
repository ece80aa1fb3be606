pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod prompt;
pub mod report;
pub mod sections;
pub mod timeframe;
pub mod value;

pub use client::RagflowClient;
pub use config::{AppConfig, CorsConfig, RagflowConfig};
pub use error::{Result, ServiceError};
pub use payload::{assemble_payload, PayloadConfig};
pub use report::{generate_report, PreparedReport, ReportRequest};
pub use timeframe::Timeframe;
pub use value::StructuredValue;
