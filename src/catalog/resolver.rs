use serde::{Deserialize, Serialize};

use super::{normalize_code, Catalog};

/// Similitud mínima (0..1) para ofrecer un código como sugerencia
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Política de resolución de códigos dentro de un departamento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupPolicy {
    /// Departamento + semestre explícito
    Direct { semester: String },
    /// Todos los semestres del departamento en orden del catálogo; gana el primero
    ScanSemesters,
}

impl LookupPolicy {
    /// Liga la política a un catálogo y departamento concretos.
    pub fn bind<'a>(&'a self, catalog: &'a Catalog, department: &'a str) -> Box<dyn SubjectResolver + 'a> {
        match self {
            LookupPolicy::Direct { semester } => Box::new(DirectResolver { catalog, department, semester }),
            LookupPolicy::ScanSemesters => Box::new(ScanResolver { catalog, department }),
        }
    }
}

/// Resuelve un código (ya normalizado o no) a sus créditos.
///
/// Se implementa para los resolvers del catálogo y para cualquier closure
/// `Fn(&str) -> Option<f64>`, de modo que el motor de GPA se puede probar sin
/// catálogo real.
pub trait SubjectResolver {
    fn credit(&self, code: &str) -> Option<f64>;

    /// Ámbito de la búsqueda (normalmente el departamento), para los mensajes de error.
    fn scope(&self) -> String {
        String::new()
    }

    /// Código conocido más parecido, si hay alguno suficientemente cercano.
    fn suggest(&self, _code: &str) -> Option<String> {
        None
    }
}

impl<F> SubjectResolver for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn credit(&self, code: &str) -> Option<f64> {
        self(code)
    }
}

pub struct DirectResolver<'a> {
    pub catalog: &'a Catalog,
    pub department: &'a str,
    pub semester: &'a str,
}

impl SubjectResolver for DirectResolver<'_> {
    fn credit(&self, code: &str) -> Option<f64> {
        self.catalog.subject(self.department, self.semester, code).map(|s| s.credit)
    }

    fn scope(&self) -> String {
        format!("{} / semester {}", self.department, self.semester)
    }

    fn suggest(&self, code: &str) -> Option<String> {
        let codes: Vec<&str> = self
            .catalog
            .department(self.department)
            .and_then(|d| d.semester(self.semester))
            .map(|s| s.subjects.iter().map(|subj| subj.code.as_str()).collect())
            .unwrap_or_default();
        closest_code(code, &codes)
    }
}

pub struct ScanResolver<'a> {
    pub catalog: &'a Catalog,
    pub department: &'a str,
}

impl SubjectResolver for ScanResolver<'_> {
    fn credit(&self, code: &str) -> Option<f64> {
        self.catalog.find_in_department(self.department, code).map(|s| s.credit)
    }

    fn scope(&self) -> String {
        self.department.to_string()
    }

    fn suggest(&self, code: &str) -> Option<String> {
        closest_code(code, &self.catalog.known_codes(self.department))
    }
}

/// Candidato con mayor similitud de Levenshtein normalizada; empates -> el primero.
pub fn closest_code(code: &str, candidates: &[&str]) -> Option<String> {
    let code = normalize_code(code);
    if code.is_empty() {
        return None;
    }
    let mut best: Option<(&str, f64)> = None;
    for cand in candidates {
        let score = strsim::normalized_levenshtein(&code, cand);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((*cand, score));
        }
    }
    best.filter(|(_, s)| *s >= SUGGESTION_THRESHOLD).map(|(c, _)| c.to_string())
}
