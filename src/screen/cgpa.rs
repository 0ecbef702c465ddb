use serde::{Deserialize, Serialize};

use super::{with_placeholder, SelectOption};
use crate::engine::compute_cgpa;
use crate::error::Result;
use crate::export::Snapshot;
use crate::models::{ComputationResult, ResultKind};

/// Máximo de semestres que ofrece el selector
pub const MAX_SEMESTERS: usize = 8;

/// Input de GPA de un semestre: etiqueta visible + texto escrito.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpaInput {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct CgpaScreen {
    inputs: Vec<GpaInput>,
    result: Option<ComputationResult>,
}

impl CgpaScreen {
    pub fn new() -> Self {
        CgpaScreen::default()
    }

    pub fn semester_count_options() -> Vec<SelectOption> {
        let counts: Vec<String> = (1..=MAX_SEMESTERS).map(|n| n.to_string()).collect();
        with_placeholder("Select Semesters", &counts)
    }

    /// Reemplaza los inputs por `count` vacíos, "Semester 1 GPA:" .. "Semester N GPA:".
    pub fn set_semester_count(&mut self, count: usize) {
        self.inputs = (1..=count)
            .map(|i| GpaInput { label: format!("Semester {} GPA:", i), value: String::new() })
            .collect();
    }

    pub fn set_value(&mut self, index: usize, raw: &str) -> bool {
        match self.inputs.get_mut(index) {
            Some(input) => {
                input.value = raw.to_string();
                true
            }
            None => false,
        }
    }

    pub fn inputs(&self) -> &[GpaInput] {
        &self.inputs
    }

    /// Calcula el CGPA. Igual que en GPA, un rechazo borra el resultado anterior.
    pub fn calculate(&mut self) -> Result<ComputationResult> {
        let raw: Vec<&str> = self.inputs.iter().map(|i| i.value.as_str()).collect();
        match compute_cgpa(&raw) {
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

    pub fn snapshot(&self) -> Snapshot {
        let fields = self
            .inputs
            .iter()
            .map(|i| (i.label.trim_end_matches(':').to_string(), i.value.trim().to_string()))
            .collect();
        Snapshot {
            kind: ResultKind::Cgpa,
            title: "CGPA Calculator".to_string(),
            fields,
            result: self.result_text().map(str::to_string),
        }
    }
}
