//! Helpers compartidos por los tests de integración

use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_test_logging() {
    INIT.call_once(|| gradecalc::init_logging("debug"));
}

/// Catálogo mínimo del ejemplo: CSE/1 con CS101 (4) y CS102 (3).
#[allow(dead_code)]
pub const WORKED_EXAMPLE: &str = r#"{"CSE": {"1": {"CS101": {"credit": 4}, "CS102": {"credit": 3}}}}"#;

/// Escribe `<dir>/<regulation>.json`
#[allow(dead_code)]
pub fn write_catalog(dir: &Path, regulation: &str, body: &str) {
    std::fs::write(dir.join(format!("{}.json", regulation)), body).expect("write catalog");
}
