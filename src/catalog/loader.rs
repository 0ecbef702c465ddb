use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Catalog, CatalogSource};
use crate::error::Result;

/// Permiso para una carga concreta. Sólo la última emitida puede publicar
/// su resultado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    regulation: String,
}

impl LoadTicket {
    pub fn regulation(&self) -> &str {
        &self.regulation
    }
}

/// Resultado de una descarga todavía no aplicada.
#[derive(Debug)]
pub struct FetchedCatalog {
    ticket: LoadTicket,
    result: Result<Catalog>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Reglamento vacío: no se intentó ninguna descarga
    Skipped,
    Loaded { regulation: String, departments: usize, subjects: usize },
    /// Una carga más nueva ya había empezado; este resultado se descartó
    Stale { regulation: String },
}

/// Dueño único del catálogo vigente. El catálogo se reemplaza completo en
/// cada carga (nunca se mezcla) y se comparte como `Arc` de sólo lectura.
///
/// La carga está partida en tres pasos para que la espera de E/S no tenga
/// prestado al loader:
/// 1. `begin` emite un ticket (secuencia creciente)
/// 2. `fetch` descarga y parsea
/// 3. `apply` publica sólo si el ticket sigue siendo el último emitido
#[derive(Debug, Default)]
pub struct CatalogLoader {
    current: Arc<Catalog>,
    issued: u64,
}

impl CatalogLoader {
    pub fn new() -> Self {
        CatalogLoader::default()
    }

    /// Instantánea del catálogo vigente
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.current)
    }

    pub fn begin(&mut self, regulation: &str) -> Option<LoadTicket> {
        let regulation = regulation.trim();
        if regulation.is_empty() {
            return None;
        }
        self.issued += 1;
        Some(LoadTicket { seq: self.issued, regulation: regulation.to_string() })
    }

    pub async fn fetch<S: CatalogSource>(source: &S, ticket: LoadTicket) -> FetchedCatalog {
        let result = match source.fetch(&ticket.regulation).await {
            Ok(text) => Catalog::parse(&ticket.regulation, &text),
            Err(e) => Err(e),
        };
        FetchedCatalog { ticket, result }
    }

    /// Publica una descarga. Un fallo deja el catálogo vacío, nunca el anterior.
    pub fn apply(&mut self, fetched: FetchedCatalog) -> Result<LoadOutcome> {
        let FetchedCatalog { ticket, result } = fetched;
        if ticket.seq != self.issued {
            debug!(regulation = %ticket.regulation, seq = ticket.seq, latest = self.issued, "discarding stale catalog load");
            return Ok(LoadOutcome::Stale { regulation: ticket.regulation });
        }

        match result {
            Ok(catalog) => {
                let departments = catalog.departments().len();
                let subjects = catalog.subject_count();
                info!(regulation = %ticket.regulation, departments, subjects, "catalog loaded");
                self.current = Arc::new(catalog);
                Ok(LoadOutcome::Loaded { regulation: ticket.regulation, departments, subjects })
            }
            Err(e) => {
                warn!(regulation = %ticket.regulation, error = %e, "catalog load failed; catalog reset to empty");
                self.current = Arc::new(Catalog::empty());
                Err(e)
            }
        }
    }

    /// begin + fetch + apply en una sola llamada.
    pub async fn load<S: CatalogSource>(&mut self, source: &S, regulation: &str) -> Result<LoadOutcome> {
        let Some(ticket) = self.begin(regulation) else {
            return Ok(LoadOutcome::Skipped);
        };
        let fetched = Self::fetch(source, ticket).await;
        self.apply(fetched)
    }
}
