// Library interface for trackside
// This allows integration tests and benches to access internal modules

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod storage;
pub mod writer;

// Re-export commonly used types
pub use config::{AppConfig, OutputFormat};
pub use diagnostics::{
    AnalysisTier, Category, ConfigurationProfile, DiagnosticEngine, DiagnosticReport,
    DiagnosticRequest, Recommendation, Severity, Symptom, SymptomProfile, TrackContext,
    run_diagnostics,
};
pub use errors::TracksideError;
pub use storage::{FileBasedStorage, SavedSetup, SetupStorage};
