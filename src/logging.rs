use tracing_subscriber::EnvFilter;

/// Inicializa `tracing` hacia stderr. `RUST_LOG` tiene prioridad sobre
/// `default_level` (p. ej. "info" o "gradecalc=debug"). Llamadas repetidas
/// no fallan: sólo la primera instala el subscriber.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init_logging("debug");
        super::init_logging("info");
        tracing::info!("logging initialized");
    }
}
