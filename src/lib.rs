// Biblioteca raíz del crate `gradecalc`.
// Catálogo de créditos por reglamento, motores de GPA/CGPA y las dos
// pantallas que los usan, más exportación del resultado y preferencia de tema.
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod screen;

pub use catalog::{Catalog, CatalogLoader, FsCatalogSource, LoadOutcome, LookupPolicy};
pub use config::Settings;
pub use engine::{compute_cgpa, compute_gpa};
pub use error::{CalcError, Result};
pub use export::{Exporter, PdfExporter, Snapshot};
pub use logging::init_logging;
pub use models::{ComputationResult, GradeEntry, LetterGrade, ResultKind};
pub use preferences::{Theme, ThemeStore};
pub use screen::{CgpaScreen, GpaScreen, LookupMode};
