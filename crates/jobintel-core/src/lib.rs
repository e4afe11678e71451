pub mod app_config;
pub mod audit;
pub mod cleaning;
pub mod config;
pub mod gate;
pub mod jobs;
pub mod location;
pub mod quality;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use audit::{
    audit_persisted_locations, AuditMode, AuditOutcome, AuditReport, CleanupOutcome,
    InvalidLocationEntry, LocationStore, PersistedLocation,
};
pub use cleaning::{CleaningOutput, CleaningStage};
pub use config::{load_app_config, load_app_config_from_env};
pub use gate::{Admission, GatedJob, RemotePolicy, ValidationGate};
pub use jobs::{CleanJob, RawJob, ValidatedLocation};
pub use location::{
    ApprovedCityRegistry, CityReference, LocationClassifier, RejectionCategory, ValidationVerdict,
};
pub use quality::{
    critical_gaps, field_completeness, summarize, summarize_jobs, FieldCompleteness, QualityStats,
    QualityTier,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read cities file {path}: {source}")]
    CitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cities file: {0}")]
    CitiesFileParse(#[from] serde_yaml::Error),

    #[error("invalid city registry: {0}")]
    InvalidRegistry(String),
}
