//! Exportación del resultado como documento descargable.
//!
//! La pantalla entrega un `Snapshot` (el formulario aplanado, con cada input
//! reemplazado por el texto que muestra) y un `Exporter` lo convierte en
//! archivo. La única precondición es que exista un resultado calculado.

pub mod layout;
pub mod pdf;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{CalcError, Result};
use crate::models::ResultKind;
use layout::{paginate, PageGeometry};

/// Nombre del archivo generado para cada tipo de resultado
pub fn export_file_name(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Gpa => "GPA_Result.pdf",
        ResultKind::Cgpa => "CGPA_Result.pdf",
    }
}

/// Formulario aplanado listo para exportar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub kind: ResultKind,
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub result: Option<String>,
}

impl Snapshot {
    /// Texto del resultado, o el rechazo que se muestra al usuario si aún no
    /// se calculó nada.
    pub fn require_result(&self) -> Result<&str> {
        match self.result.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => Ok(r),
            _ => Err(CalcError::ExportPrecondition(format!("Calculate {} first!", self.kind.label()))),
        }
    }

    /// Líneas del documento: título, campos, resultado.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.fields.len() + 4);
        out.push(self.title.clone());
        out.push(String::new());
        for (label, value) in &self.fields {
            out.push(format!("{}: {}", label, value));
        }
        if let Some(r) = &self.result {
            out.push(String::new());
            out.push(r.clone());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: usize,
}

pub trait Exporter {
    fn export(&self, snapshot: &Snapshot) -> Result<ExportArtifact>;
}

/// Escribe `GPA_Result.pdf` / `CGPA_Result.pdf` dentro de `out_dir`.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    out_dir: PathBuf,
    geometry: PageGeometry,
}

impl PdfExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        PdfExporter { out_dir: out_dir.into(), geometry: PageGeometry::A4_PORTRAIT }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Exporter for PdfExporter {
    fn export(&self, snapshot: &Snapshot) -> Result<ExportArtifact> {
        snapshot.require_result()?;

        let pages = paginate(&snapshot.lines(), &self.geometry);
        let doc = pdf::render_pdf(&pages, &self.geometry, &snapshot.title, chrono::Utc::now());

        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(export_file_name(snapshot.kind));
        std::fs::write(&path, &doc)?;

        info!(path = %path.display(), pages = pages.len(), bytes = doc.len(), "result exported");
        Ok(ExportArtifact { path, pages: pages.len(), bytes: doc.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(result: Option<&str>) -> Snapshot {
        Snapshot {
            kind: ResultKind::Cgpa,
            title: "CGPA Calculator".to_string(),
            fields: vec![("Semester 1 GPA".to_string(), "8.5".to_string())],
            result: result.map(str::to_string),
        }
    }

    #[test]
    fn file_names() {
        assert_eq!(export_file_name(ResultKind::Gpa), "GPA_Result.pdf");
        assert_eq!(export_file_name(ResultKind::Cgpa), "CGPA_Result.pdf");
    }

    #[test]
    fn refuses_without_result() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PdfExporter::new(dir.path());
        for s in [snapshot(None), snapshot(Some("   "))] {
            match exporter.export(&s) {
                Err(CalcError::ExportPrecondition(msg)) => assert_eq!(msg, "Calculate CGPA first!"),
                other => panic!("unexpected: {:?}", other),
            }
        }
        assert!(!dir.path().join("CGPA_Result.pdf").exists());
    }

    #[test]
    fn writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let art = PdfExporter::new(dir.path()).export(&snapshot(Some("Your CGPA is: 8.50"))).unwrap();
        assert_eq!(art.path, dir.path().join("CGPA_Result.pdf"));
        assert_eq!(art.pages, 1);
        let bytes = std::fs::read(&art.path).unwrap();
        assert_eq!(bytes.len(), art.bytes);
        assert!(String::from_utf8_lossy(&bytes).contains("(Your CGPA is: 8.50) Tj"));
    }

    #[test]
    fn lines_layout() {
        let lines = snapshot(Some("Your CGPA is: 8.50")).lines();
        assert_eq!(lines, vec!["CGPA Calculator", "", "Semester 1 GPA: 8.5", "", "Your CGPA is: 8.50"]);
    }
}
