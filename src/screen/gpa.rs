use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{no_data_options, with_placeholder, SelectOption};
use crate::catalog::{
    Catalog, CatalogLoader, CatalogSource, FetchedCatalog, LoadOutcome, LoadTicket, LookupPolicy,
};
use crate::engine::compute_gpa;
use crate::error::Result;
use crate::export::Snapshot;
use crate::models::{ComputationResult, GradeEntry, LetterGrade, ResultKind};

/// Cómo se resuelven los códigos de la pantalla de GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LookupMode {
    /// Exige semestre seleccionado
    #[default]
    Direct,
    /// Busca en todos los semestres del departamento
    ScanSemesters,
}

/// Fila del formulario. Una fila nueva trae código vacío y nota `O`
/// (la primera opción del selector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRow {
    pub code: String,
    pub grade: LetterGrade,
}

impl Default for SubjectRow {
    fn default() -> Self {
        SubjectRow { code: String::new(), grade: LetterGrade::O }
    }
}

#[derive(Debug, Default)]
pub struct GpaScreen {
    loader: CatalogLoader,
    regulation: Option<String>,
    department: Option<String>,
    semester: Option<String>,
    mode: LookupMode,
    rows: Vec<SubjectRow>,
    result: Option<ComputationResult>,
}

impl GpaScreen {
    pub fn new() -> Self {
        GpaScreen::default()
    }

    pub fn with_mode(mode: LookupMode) -> Self {
        GpaScreen { mode, ..GpaScreen::default() }
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.loader.catalog()
    }

    pub fn regulation(&self) -> Option<&str> {
        self.regulation.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn semester(&self) -> Option<&str> {
        self.semester.as_deref()
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LookupMode) {
        self.mode = mode;
    }

    // ---------------- reglamento / catálogo ----------------

    /// Cambia de reglamento y espera la carga del catálogo.
    pub async fn select_regulation<S: CatalogSource>(&mut self, source: &S, regulation: &str) -> Result<LoadOutcome> {
        let Some(ticket) = self.begin_regulation(regulation) else {
            return Ok(LoadOutcome::Skipped);
        };
        let fetched = CatalogLoader::fetch(source, ticket).await;
        self.finish_regulation(fetched)
    }

    /// Primera mitad de `select_regulation`, para quien necesite lanzar la
    /// descarga por su cuenta. Mientras tanto el catálogo anterior sigue usable.
    pub fn begin_regulation(&mut self, regulation: &str) -> Option<LoadTicket> {
        self.loader.begin(regulation)
    }

    pub fn finish_regulation(&mut self, fetched: FetchedCatalog) -> Result<LoadOutcome> {
        let outcome = self.loader.apply(fetched);
        match &outcome {
            Ok(LoadOutcome::Loaded { regulation, .. }) => {
                self.regulation = Some(regulation.clone());
                self.reconcile_selection();
            }
            Err(_) => {
                self.regulation = None;
                self.reconcile_selection();
            }
            Ok(LoadOutcome::Skipped) | Ok(LoadOutcome::Stale { .. }) => {}
        }
        outcome
    }

    /// Descarta selecciones que ya no existen en el catálogo vigente.
    fn reconcile_selection(&mut self) {
        let catalog = self.loader.catalog();
        let dept_ok = self.department.as_deref().is_some_and(|d| catalog.department(d).is_some());
        if !dept_ok {
            self.department = None;
            self.semester = None;
            return;
        }
        let sem_ok = match (self.department.as_deref(), self.semester.as_deref()) {
            (Some(d), Some(s)) => catalog.semesters(d).iter().any(|x| x == s),
            _ => false,
        };
        if !sem_ok {
            self.semester = None;
        }
    }

    // ---------------- selectores ----------------

    pub fn department_options(&self) -> Vec<SelectOption> {
        let catalog = self.loader.catalog();
        if catalog.is_empty() {
            return no_data_options();
        }
        with_placeholder("Select Department", &catalog.departments())
    }

    pub fn semester_options(&self) -> Vec<SelectOption> {
        let catalog = self.loader.catalog();
        if catalog.is_empty() {
            return no_data_options();
        }
        let semesters = self.department.as_deref().map(|d| catalog.semesters(d)).unwrap_or_default();
        with_placeholder("Select Semester", &semesters)
    }

    /// Selecciona departamento; el valor vacío limpia la selección.
    /// Devuelve `false` si el departamento no existe en el catálogo.
    pub fn select_department(&mut self, department: &str) -> bool {
        if department.is_empty() {
            self.department = None;
            self.semester = None;
            return true;
        }
        if self.loader.catalog().department(department).is_none() {
            return false;
        }
        if self.department.as_deref() != Some(department) {
            self.semester = None;
        }
        self.department = Some(department.to_string());
        true
    }

    pub fn select_semester(&mut self, semester: &str) -> bool {
        if semester.is_empty() {
            self.semester = None;
            return true;
        }
        let known = self
            .department
            .as_deref()
            .is_some_and(|d| self.loader.catalog().semesters(d).iter().any(|s| s == semester));
        if known {
            self.semester = Some(semester.to_string());
        }
        known
    }

    // ---------------- filas ----------------

    /// Recrea `count` filas vacías. `0` se ignora y deja las filas como están.
    pub fn set_subject_count(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.rows = vec![SubjectRow::default(); count];
    }

    pub fn add_row(&mut self) {
        self.rows.push(SubjectRow::default());
    }

    pub fn set_row(&mut self, index: usize, code: &str, grade: LetterGrade) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.code = code.to_string();
                row.grade = grade;
                true
            }
            None => false,
        }
    }

    pub fn remove_row(&mut self, index: usize) -> Option<SubjectRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn rows(&self) -> &[SubjectRow] {
        &self.rows
    }

    // ---------------- cálculo ----------------

    fn policy(&self) -> Option<LookupPolicy> {
        match self.mode {
            LookupMode::Direct => self.semester.clone().map(|semester| LookupPolicy::Direct { semester }),
            LookupMode::ScanSemesters => Some(LookupPolicy::ScanSemesters),
        }
    }

    /// Créditos que se muestran junto a la fila, si el código resuelve.
    pub fn credit_for_row(&self, index: usize) -> Option<f64> {
        let row = self.rows.get(index)?;
        let department = self.department.as_deref()?;
        let policy = self.policy()?;
        let catalog = self.loader.catalog();
        let resolver = policy.bind(&catalog, department);
        resolver.credit(&row.code)
    }

    /// Calcula el GPA de las filas actuales. Un rechazo borra el resultado
    /// anterior para que no se pueda exportar un resultado viejo.
    pub fn calculate(&mut self) -> Result<ComputationResult> {
        let entries: Vec<GradeEntry> = self.rows.iter().map(|r| GradeEntry::new(r.code.clone(), r.grade)).collect();
        let catalog = self.loader.catalog();
        let policy = self.policy();

        let outcome = match (self.department.as_deref(), policy.as_ref()) {
            (Some(department), Some(policy)) => {
                let resolver = policy.bind(&catalog, department);
                compute_gpa(&entries, &*resolver)
            }
            // sin departamento/semestre ningún código resuelve
            _ => compute_gpa(&entries, &|_: &str| None::<f64>),
        };

        match outcome {
            Ok(res) => {
                self.result = Some(res.clone());
                Ok(res)
            }
            Err(e) => {
                self.result = None;
                Err(e)
            }
        }
    }

    pub fn result(&self) -> Option<&ComputationResult> {
        self.result.as_ref()
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.display.as_str())
    }

    /// Formulario aplanado para exportar.
    pub fn snapshot(&self) -> Snapshot {
        let mut fields = vec![
            ("Regulation".to_string(), self.regulation.clone().unwrap_or_default()),
            ("Department".to_string(), self.department.clone().unwrap_or_default()),
        ];
        if self.mode == LookupMode::Direct {
            fields.push(("Semester".to_string(), self.semester.clone().unwrap_or_default()));
        }
        for (i, row) in self.rows.iter().enumerate() {
            let credit = match self.credit_for_row(i) {
                Some(c) => format!(" ({} credits)", c),
                None => String::new(),
            };
            fields.push((format!("Subject {}", i + 1), format!("{} - {}{}", row.code.trim().to_uppercase(), row.grade, credit)));
        }
        Snapshot {
            kind: ResultKind::Gpa,
            title: "GPA Calculator".to_string(),
            fields,
            result: self.result_text().map(str::to_string),
        }
    }
}
