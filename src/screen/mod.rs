//! Controladores de las dos pantallas (GPA y CGPA).
//!
//! Cada pantalla es dueña de su estado: selecciones, filas del formulario y
//! el último resultado. Las listas de opciones se generan con funciones puras
//! (`render_options`), separadas de cualquier renderizado.

mod cgpa;
mod gpa;

pub use cgpa::{CgpaScreen, GpaInput, MAX_SEMESTERS};
pub use gpa::{GpaScreen, LookupMode, SubjectRow};

use serde::Serialize;

use crate::models::LetterGrade;

/// Opción de un selector: valor enviado + texto visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption { value: value.into(), label: label.into() }
    }
}

pub const NO_DATA_LABEL: &str = "No data";

/// Una opción por clave, en el mismo orden; valor y etiqueta iguales.
pub fn render_options<S: AsRef<str>>(keys: &[S]) -> Vec<SelectOption> {
    keys.iter().map(|k| SelectOption::new(k.as_ref(), k.as_ref())).collect()
}

/// `render_options` precedido por la opción vacía de "Select ...".
pub fn with_placeholder<S: AsRef<str>>(placeholder: &str, keys: &[S]) -> Vec<SelectOption> {
    let mut out = Vec::with_capacity(keys.len() + 1);
    out.push(SelectOption::new("", placeholder));
    out.extend(render_options(keys));
    out
}

/// Estado explícito de "sin datos" tras un catálogo vacío o una carga fallida.
pub fn no_data_options() -> Vec<SelectOption> {
    vec![SelectOption::new("", NO_DATA_LABEL)]
}

/// Selector de notas: valor = punto, etiqueta = letra.
pub fn grade_options() -> Vec<SelectOption> {
    LetterGrade::ALL
        .iter()
        .map(|g| SelectOption::new(g.point().to_string(), g.label()))
        .collect()
}
