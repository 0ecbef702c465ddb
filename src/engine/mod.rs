// Motores de cálculo: GPA ponderado por créditos y CGPA como promedio simple.
// Ambos validan todo antes de producir un resultado (todo o nada).
mod cgpa;
mod gpa;

pub use cgpa::{compute_cgpa, compute_cgpa_values, parse_semester_gpa};
pub use gpa::compute_gpa;

/// Redondeo a dos decimales, mitad hacia arriba (los valores aquí son >= 0).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
