use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CalcError, Result};

/// Origen del documento de catálogo de un reglamento.
pub trait CatalogSource {
    /// Devuelve el texto crudo del documento. Errores de red/archivo, estados
    /// no exitosos y timeouts se reportan como `CalcError::CatalogFetch`.
    fn fetch(&self, regulation: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Catálogos como archivos `<base_dir>/<reglamento>.json`.
#[derive(Debug, Clone)]
pub struct FsCatalogSource {
    base_dir: PathBuf,
    timeout: Duration,
}

impl FsCatalogSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FsCatalogSource { base_dir: base_dir.into(), timeout: Duration::from_secs(10) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Ruta del documento para el reglamento. Rechaza identificadores que
    /// intentan salir del directorio base.
    pub fn path_for(&self, regulation: &str) -> Result<PathBuf> {
        let reg = regulation.trim();
        if reg.is_empty() || reg.contains("..") || reg.contains('/') || reg.contains('\\') {
            return Err(CalcError::CatalogFetch {
                regulation: regulation.to_string(),
                reason: "invalid regulation identifier".to_string(),
            });
        }
        Ok(self.base_dir.join(format!("{}.json", reg)))
    }
}

impl CatalogSource for FsCatalogSource {
    async fn fetch(&self, regulation: &str) -> Result<String> {
        let path = self.path_for(regulation)?;
        let fail = |reason: String| CalcError::CatalogFetch { regulation: regulation.to_string(), reason };

        match tokio::time::timeout(self.timeout, tokio::fs::read_to_string(&path)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(fail(format!("JSON missing: {}", path.display())))
            }
            Ok(Err(e)) => Err(fail(format!("failed to read {}: {}", path.display(), e))),
            Err(_) => Err(fail(format!("timed out after {:?}", self.timeout))),
        }
    }
}
