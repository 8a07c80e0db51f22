pub mod diagnostics;
pub mod language_service;

pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use language_service::{CultureChange, LanguageService};
