use tracing::debug;

use super::round2;
use crate::error::{CalcError, Result};
use crate::models::{ComputationResult, ResultKind};

const MIN_GPA: f64 = 0.0;
const MAX_GPA: f64 = 10.0;

/// Interpreta el GPA de un semestre tal como fue escrito. `index` es el número
/// de semestre (desde 1) y sólo se usa para el error.
pub fn parse_semester_gpa(index: usize, raw: &str) -> Result<f64> {
    let invalid = || CalcError::InvalidGpaValue { index, value: raw.to_string() };
    let v: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !v.is_finite() || !(MIN_GPA..=MAX_GPA).contains(&v) {
        return Err(invalid());
    }
    Ok(v)
}

/// CGPA a partir de los valores crudos del formulario (uno por semestre).
pub fn compute_cgpa<S: AsRef<str>>(raw_values: &[S]) -> Result<ComputationResult> {
    let values = raw_values
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_semester_gpa(i + 1, raw.as_ref()))
        .collect::<Result<Vec<f64>>>()?;
    compute_cgpa_values(&values)
}

/// Promedio simple de GPAs ya numéricos. Lista vacía -> 0.
pub fn compute_cgpa_values(values: &[f64]) -> Result<ComputationResult> {
    for (i, v) in values.iter().enumerate() {
        if !v.is_finite() || !(MIN_GPA..=MAX_GPA).contains(v) {
            return Err(CalcError::InvalidGpaValue { index: i + 1, value: v.to_string() });
        }
    }

    let cgpa = if values.is_empty() {
        0.0
    } else {
        round2(values.iter().sum::<f64>() / values.len() as f64)
    };
    debug!(semesters = values.len(), cgpa, "cgpa computed");
    Ok(ComputationResult::new(ResultKind::Cgpa, cgpa))
}
