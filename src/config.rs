//! Configuración: dónde están los catálogos, dónde se guardan las preferencias
//! y cuánto se espera una descarga.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::catalog::FsCatalogSource;
use crate::preferences::ThemeStore;

pub const ENV_DATA_DIR: &str = "GRADECALC_DATA_DIR";
pub const ENV_PREFS_PATH: &str = "GRADECALC_PREFS_PATH";
pub const ENV_FETCH_TIMEOUT_MS: &str = "GRADECALC_FETCH_TIMEOUT_MS";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub preferences_path: PathBuf,
    pub fetch_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: default_data_dir(),
            preferences_path: PathBuf::from("preferences.json"),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl Settings {
    /// Carga `.env` si existe y aplica las variables `GRADECALC_*` sobre los
    /// valores por defecto. Valores vacíos o mal formados se ignoran.
    pub fn from_env() -> Settings {
        let _ = dotenv::dotenv();
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de consulta inyectada (tests).
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(p) = non_empty(ENV_PREFS_PATH) {
            settings.preferences_path = PathBuf::from(p);
        }
        if let Some(ms) = non_empty(ENV_FETCH_TIMEOUT_MS).and_then(|v| v.trim().parse::<u64>().ok()) {
            if ms > 0 {
                settings.fetch_timeout = Duration::from_millis(ms);
            }
        }
        debug!(data_dir = %settings.data_dir.display(), prefs = %settings.preferences_path.display(), timeout_ms = settings.fetch_timeout.as_millis() as u64, "settings resolved");
        settings
    }

    pub fn catalog_source(&self) -> FsCatalogSource {
        FsCatalogSource::new(self.data_dir.clone()).with_timeout(self.fetch_timeout)
    }

    pub fn theme_store(&self) -> ThemeStore {
        ThemeStore::load(self.preferences_path.clone())
    }
}

/// Primer candidato existente relativo al directorio de trabajo; si ninguno
/// existe se usa `data`.
pub fn default_data_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates = [cwd.join("data"), cwd.join("src/datafiles")];
    for candidate in candidates {
        if candidate.is_dir() {
            return candidate;
        }
    }
    PathBuf::from("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DATA_DIR, "/srv/catalogs"),
            (ENV_PREFS_PATH, "/tmp/prefs.json"),
            (ENV_FETCH_TIMEOUT_MS, "2500"),
        ]);
        let s = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(s.data_dir, PathBuf::from("/srv/catalogs"));
        assert_eq!(s.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(s.fetch_timeout, Duration::from_millis(2500));
        assert_eq!(s.catalog_source().base_dir(), PathBuf::from("/srv/catalogs").as_path());
    }

    #[test]
    fn bad_values_fall_back() {
        let vars: HashMap<&str, &str> = HashMap::from([(ENV_DATA_DIR, "  "), (ENV_FETCH_TIMEOUT_MS, "soon")]);
        let s = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(s.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
        assert_eq!(s.data_dir, default_data_dir());

        let zero = Settings::from_lookup(|k| (k == ENV_FETCH_TIMEOUT_MS).then(|| "0".to_string()));
        assert_eq!(zero.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
    }
}
