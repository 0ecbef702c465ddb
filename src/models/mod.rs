// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nota en letra tal como aparece en el selector del formulario de GPA.
/// El punto asociado es fijo; no existe ingreso numérico libre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    O,
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    /// U / RA / Fail / Withdraw
    U,
}

impl LetterGrade {
    /// Orden del selector (de mayor a menor)
    pub const ALL: [LetterGrade; 7] = [
        LetterGrade::O,
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::U,
    ];

    pub fn point(self) -> u8 {
        match self {
            LetterGrade::O => 10,
            LetterGrade::APlus => 9,
            LetterGrade::A => 8,
            LetterGrade::BPlus => 7,
            LetterGrade::B => 6,
            LetterGrade::C => 5,
            LetterGrade::U => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LetterGrade::O => "O",
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::U => "U/RA",
        }
    }

    /// Interpreta la etiqueta escrita por el usuario (sin distinguir mayúsculas).
    /// Las variantes de reprobado/retiro colapsan a `U`.
    pub fn from_label(s: &str) -> Option<LetterGrade> {
        match s.trim().to_uppercase().as_str() {
            "O" => Some(LetterGrade::O),
            "A+" => Some(LetterGrade::APlus),
            "A" => Some(LetterGrade::A),
            "B+" => Some(LetterGrade::BPlus),
            "B" => Some(LetterGrade::B),
            "C" => Some(LetterGrade::C),
            "U" | "RA" | "U/RA" | "FAIL" | "F" | "W" | "WITHDRAW" | "AB" => Some(LetterGrade::U),
            _ => None,
        }
    }

    /// Inverso de `point`: sólo los valores del conjunto discreto son válidos.
    pub fn from_point(p: u8) -> Option<LetterGrade> {
        LetterGrade::ALL.iter().copied().find(|g| g.point() == p)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fila del formulario de GPA: código de asignatura + nota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub code: String,
    pub grade: LetterGrade,
}

impl GradeEntry {
    pub fn new(code: impl Into<String>, grade: LetterGrade) -> Self {
        GradeEntry { code: code.into(), grade }
    }
}

/// Registro de asignatura dentro del catálogo. Los campos descriptivos que no
/// usamos (nombre, tipo, etc.) se conservan tal cual en `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub code: String,
    pub credit: f64,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Subject {
    pub fn new(code: impl Into<String>, credit: f64) -> Self {
        Subject { code: code.into(), credit, extra: serde_json::Map::new() }
    }

    /// Nombre descriptivo si el catálogo lo trae (`name` o `title`).
    pub fn name(&self) -> Option<&str> {
        self.extra
            .get("name")
            .or_else(|| self.extra.get("title"))
            .and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Gpa,
    Cgpa,
}

impl ResultKind {
    pub fn label(self) -> &'static str {
        match self {
            ResultKind::Gpa => "GPA",
            ResultKind::Cgpa => "CGPA",
        }
    }
}

/// Resultado de un cálculo. Se recalcula desde cero en cada disparo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationResult {
    pub kind: ResultKind,
    pub value: f64,
    pub display: String,
}

impl ComputationResult {
    pub fn new(kind: ResultKind, value: f64) -> Self {
        let display = format!("Your {} is: {:.2}", kind.label(), value);
        ComputationResult { kind, value, display }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_points_follow_the_fixed_scale() {
        let points: Vec<u8> = LetterGrade::ALL.iter().map(|g| g.point()).collect();
        assert_eq!(points, vec![10, 9, 8, 7, 6, 5, 0]);
    }

    #[test]
    fn fail_variants_collapse_to_zero() {
        for label in ["U", "ra", "U/RA", "Fail", "w", "Withdraw"] {
            assert_eq!(LetterGrade::from_label(label), Some(LetterGrade::U), "{}", label);
        }
        assert_eq!(LetterGrade::from_label(" a+ "), Some(LetterGrade::APlus));
        assert_eq!(LetterGrade::from_label("D"), None);
    }

    #[test]
    fn from_point_rejects_values_outside_the_scale() {
        assert_eq!(LetterGrade::from_point(8), Some(LetterGrade::A));
        assert_eq!(LetterGrade::from_point(4), None);
    }

    #[test]
    fn result_display_uses_two_decimals() {
        let r = ComputationResult::new(ResultKind::Gpa, 8.0);
        assert_eq!(r.display, "Your GPA is: 8.00");
        let r = ComputationResult::new(ResultKind::Cgpa, 8.42);
        assert_eq!(r.display, "Your CGPA is: 8.42");
    }
}
