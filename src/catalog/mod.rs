//! Catálogo de créditos por reglamento.
//!
//! Submódulos:
//! - `source`: de dónde se obtiene el documento JSON (`<data_dir>/<reglamento>.json`)
//! - `loader`: carga con reemplazo atómico y descarte de cargas obsoletas
//! - `resolver`: políticas de búsqueda código -> asignatura
//!
//! Estructura del documento esperado:
//! ```json
//! {
//!   "CSE": {
//!     "1": { "CS101": { "credit": 4, "name": "Programming" }, "CS102": { "credit": 3 } },
//!     "2": { "CS201": 4 }
//!   }
//! }
//! ```
//! El orden de departamentos/semestres/asignaturas es el orden de inserción
//! del JSON.

pub mod loader;
pub mod resolver;
pub mod source;

pub use loader::{CatalogLoader, FetchedCatalog, LoadOutcome, LoadTicket};
pub use resolver::{DirectResolver, LookupPolicy, ScanResolver, SubjectResolver};
pub use source::{CatalogSource, FsCatalogSource};

use serde::Serialize;
use serde_json::Value;

use crate::error::{CalcError, Result};
use crate::models::Subject;

/// Tope de créditos por asignatura; valores mayores desbordan la media ponderada.
pub const MAX_CREDIT: f64 = 100.0;

/// Normaliza un código de asignatura: sin espacios alrededor y en mayúsculas.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Semester {
    pub id: String,
    pub subjects: Vec<Subject>,
}

impl Semester {
    pub fn subject(&self, code: &str) -> Option<&Subject> {
        let code = normalize_code(code);
        self.subjects.iter().find(|s| s.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub name: String,
    pub semesters: Vec<Semester>,
}

impl Department {
    pub fn semester(&self, id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }
}

/// Tabla departamento -> semestre -> código -> asignatura para un reglamento.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    regulation: String,
    departments: Vec<Department>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Parsea y valida el documento completo. Cualquier problema de forma
    /// invalida el documento entero: nunca se devuelve un catálogo parcial.
    pub fn parse(regulation: &str, text: &str) -> Result<Catalog> {
        let fail = |reason: String| CalcError::CatalogParse { regulation: regulation.to_string(), reason };

        let root: Value = serde_json::from_str(text).map_err(|e| fail(format!("invalid JSON: {}", e)))?;
        let root = root.as_object().ok_or_else(|| fail("top level is not an object".to_string()))?;

        let mut departments = Vec::with_capacity(root.len());
        for (dept_name, dept_val) in root.iter() {
            let sem_map = dept_val
                .as_object()
                .ok_or_else(|| fail(format!("department '{}' is not an object", dept_name)))?;

            let mut semesters = Vec::with_capacity(sem_map.len());
            for (sem_id, sem_val) in sem_map.iter() {
                let subj_map = sem_val
                    .as_object()
                    .ok_or_else(|| fail(format!("semester '{}' of '{}' is not an object", sem_id, dept_name)))?;

                let mut subjects: Vec<Subject> = Vec::with_capacity(subj_map.len());
                for (raw_code, subj_val) in subj_map.iter() {
                    let code = normalize_code(raw_code);
                    if code.is_empty() {
                        return Err(fail(format!("empty subject code in {}/{}", dept_name, sem_id)));
                    }
                    if subjects.iter().any(|s| s.code == code) {
                        return Err(fail(format!("duplicate subject code '{}' in {}/{}", code, dept_name, sem_id)));
                    }
                    let subject = parse_subject(&code, subj_val)
                        .map_err(|reason| fail(format!("{}/{}/{}: {}", dept_name, sem_id, code, reason)))?;
                    subjects.push(subject);
                }
                semesters.push(Semester { id: sem_id.clone(), subjects });
            }
            departments.push(Department { name: dept_name.clone(), semesters });
        }

        Ok(Catalog { regulation: regulation.to_string(), departments })
    }

    pub fn regulation(&self) -> &str {
        &self.regulation
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Nombres de departamento en orden del documento
    pub fn departments(&self) -> Vec<String> {
        self.departments.iter().map(|d| d.name.clone()).collect()
    }

    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    /// Semestres del departamento en orden del documento (vacío si no existe)
    pub fn semesters(&self, department: &str) -> Vec<String> {
        self.department(department)
            .map(|d| d.semesters.iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn subject_count(&self) -> usize {
        self.departments
            .iter()
            .flat_map(|d| d.semesters.iter())
            .map(|s| s.subjects.len())
            .sum()
    }

    /// Búsqueda directa de dos niveles (departamento + semestre).
    pub fn subject(&self, department: &str, semester: &str, code: &str) -> Option<&Subject> {
        self.department(department)?.semester(semester)?.subject(code)
    }

    /// Recorre todos los semestres del departamento; gana la primera coincidencia.
    pub fn find_in_department(&self, department: &str, code: &str) -> Option<&Subject> {
        let code = normalize_code(code);
        self.department(department)?
            .semesters
            .iter()
            .find_map(|s| s.subjects.iter().find(|subj| subj.code == code))
    }

    /// Todos los códigos conocidos del departamento (para sugerencias).
    pub fn known_codes(&self, department: &str) -> Vec<&str> {
        match self.department(department) {
            Some(d) => d
                .semesters
                .iter()
                .flat_map(|s| s.subjects.iter())
                .map(|s| s.code.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Un registro puede venir como objeto `{ "credit": n, ... }` o como número suelto.
fn parse_subject(code: &str, value: &Value) -> std::result::Result<Subject, String> {
    let (credit_val, extra) = match value {
        Value::Number(_) => (value, serde_json::Map::new()),
        Value::Object(obj) => {
            let credit = obj.get("credit").ok_or_else(|| "missing 'credit'".to_string())?;
            let mut extra = obj.clone();
            extra.remove("credit");
            (credit, extra)
        }
        _ => return Err("subject record is neither an object nor a number".to_string()),
    };

    let credit = credit_val
        .as_f64()
        .ok_or_else(|| format!("credit '{}' is not a number", credit_val))?;
    if !credit.is_finite() || !(0.0..=MAX_CREDIT).contains(&credit) {
        return Err(format!("credit {} is out of range", credit));
    }

    Ok(Subject { code: code.to_string(), credit, extra })
}

/// Búsqueda según la política indicada.
pub fn lookup<'a>(catalog: &'a Catalog, department: &str, code: &str, policy: &LookupPolicy) -> Option<&'a Subject> {
    match policy {
        LookupPolicy::Direct { semester } => catalog.subject(department, semester, code),
        LookupPolicy::ScanSemesters => catalog.find_in_department(department, code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        "CSE": {
            "1": { "CS101": { "credit": 4, "name": "Programming" }, "cs102": { "credit": 3 } },
            "2": { "CS201": 4, "CS101": { "credit": 2 } }
        },
        "ECE": {
            "1": { "EC101": { "credit": 3.5 } }
        }
    }"#;

    #[test]
    fn parse_keeps_document_order() {
        let c = Catalog::parse("R2021", SAMPLE).unwrap();
        assert_eq!(c.departments(), vec!["CSE", "ECE"]);
        assert_eq!(c.semesters("CSE"), vec!["1", "2"]);
        assert_eq!(c.subject_count(), 5);
        assert_eq!(c.regulation(), "R2021");
    }

    #[test]
    fn codes_are_normalized_on_both_sides() {
        let c = Catalog::parse("R2021", SAMPLE).unwrap();
        let a = c.subject("CSE", "1", "cs101 ").unwrap();
        let b = c.subject("CSE", "1", "CS101").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), Some("Programming"));
        // la clave del documento venía en minúsculas
        assert_eq!(c.subject("CSE", "1", "CS102").unwrap().credit, 3.0);
    }

    #[test]
    fn scan_takes_first_semester_match() {
        let c = Catalog::parse("R2021", SAMPLE).unwrap();
        assert_eq!(c.find_in_department("CSE", "CS101").unwrap().credit, 4.0);
        assert_eq!(c.find_in_department("CSE", "cs201").unwrap().credit, 4.0);
        assert!(c.find_in_department("ECE", "CS101").is_none());
        assert!(c.find_in_department("MECH", "CS101").is_none());
    }

    #[test]
    fn lookup_dispatches_on_policy() {
        let c = Catalog::parse("R2021", SAMPLE).unwrap();
        let direct = LookupPolicy::Direct { semester: "2".to_string() };
        assert_eq!(lookup(&c, "CSE", "CS101", &direct).unwrap().credit, 2.0);
        assert_eq!(lookup(&c, "CSE", "CS101", &LookupPolicy::ScanSemesters).unwrap().credit, 4.0);
        assert!(lookup(&c, "CSE", "CS102", &direct).is_none());
    }

    #[test]
    fn wrong_shapes_are_parse_failures() {
        let cases = [
            "not json",
            "[1, 2, 3]",
            r#"{"CSE": 3}"#,
            r#"{"CSE": {"1": []}}"#,
            r#"{"CSE": {"1": {"CS101": {"name": "x"}}}}"#,
            r#"{"CSE": {"1": {"CS101": {"credit": "four"}}}}"#,
            r#"{"CSE": {"1": {"CS101": {"credit": -1}}}}"#,
            r#"{"CSE": {"1": {"CS101": {"credit": 100.5}}}}"#,
            r#"{"CSE": {"1": {"A": 1e308, "B": 1e308}}}"#,
            r#"{"CSE": {"1": {"CS101": true}}}"#,
            r#"{"CSE": {"1": {"CS101": 3, "cs101": 4}}}"#,
            r#"{"CSE": {"1": {"  ": 3}}}"#,
        ];
        for text in cases {
            match Catalog::parse("R", text) {
                Err(CalcError::CatalogParse { .. }) => {}
                other => panic!("expected parse failure for {}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn order_follows_document_not_alphabet() {
        let c = Catalog::parse(
            "R",
            r#"{"MECH": {"2": {"X1": 1}, "1": {"X1": 5}}, "CSE": {"3": {"CS301": 4}}}"#,
        )
        .unwrap();
        assert_eq!(c.departments(), vec!["MECH", "CSE"]);
        assert_eq!(c.semesters("MECH"), vec!["2", "1"]);
        assert_eq!(c.find_in_department("MECH", "x1").unwrap().credit, 1.0);
        assert_eq!(lookup(&c, "MECH", "X1", &LookupPolicy::ScanSemesters).unwrap().credit, 1.0);
    }

    #[test]
    fn credit_upper_bound_is_inclusive() {
        let c = Catalog::parse("R", r#"{"CSE": {"1": {"CAP": 100}}}"#).unwrap();
        assert_eq!(c.subject("CSE", "1", "CAP").unwrap().credit, MAX_CREDIT);
    }

    #[test]
    fn zero_credit_and_empty_document_are_accepted() {
        let c = Catalog::parse("R", r#"{"CSE": {"1": {"AUD100": {"credit": 0}}}}"#).unwrap();
        assert_eq!(c.subject("CSE", "1", "AUD100").unwrap().credit, 0.0);
        let empty = Catalog::parse("R", "{}").unwrap();
        assert!(empty.is_empty());
    }
}
