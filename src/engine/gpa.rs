use tracing::debug;

use super::round2;
use crate::catalog::{normalize_code, SubjectResolver};
use crate::error::{CalcError, Result};
use crate::models::{ComputationResult, GradeEntry, ResultKind};

/// GPA ponderado por créditos.
///
/// Cada código se normaliza y se resuelve con `resolver`; el primer código
/// (en orden de entrada) que no se resuelve aborta el cálculo completo.
/// Con total de créditos 0 (incluida la lista vacía) el resultado es 0.
pub fn compute_gpa<R>(entries: &[GradeEntry], resolver: &R) -> Result<ComputationResult>
where
    R: SubjectResolver + ?Sized,
{
    let mut total_points = 0.0_f64;
    let mut total_credits = 0.0_f64;

    for entry in entries {
        let code = normalize_code(&entry.code);
        let credit = match resolver.credit(&code) {
            Some(c) => c,
            None => {
                return Err(CalcError::SubjectNotFound {
                    suggestion: resolver.suggest(&code),
                    department: resolver.scope(),
                    code,
                });
            }
        };
        total_points += f64::from(entry.grade.point()) * credit;
        total_credits += credit;
    }

    let gpa = if total_credits > 0.0 { round2(total_points / total_credits) } else { 0.0 };
    debug!(subjects = entries.len(), total_credits, gpa, "gpa computed");
    Ok(ComputationResult::new(ResultKind::Gpa, gpa))
}
