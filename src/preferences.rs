use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Tema de la interfaz; la única preferencia que se persiste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Ícono del botón: muestra el tema al que se cambiaría.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    theme: Theme,
}

/// Persistencia del tema en un archivo JSON (`{"theme": "dark"}`).
/// Se lee una vez al arrancar y se escribe en cada cambio.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    current: Theme,
}

impl ThemeStore {
    /// Archivo inexistente, vacío o inválido -> tema claro.
    pub fn load(path: impl Into<PathBuf>) -> ThemeStore {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => match serde_json::from_str::<StoredPreferences>(&contents) {
                Ok(p) => p.theme,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable preferences file");
                    Theme::default()
                }
            },
            _ => Theme::default(),
        };
        ThemeStore { path, current }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.current = theme;
        self.save()
    }

    /// Cambia de tema y lo guarda; devuelve el nuevo.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.current.toggled())?;
        Ok(self.current)
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(&StoredPreferences { theme: self.current })?;
        let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(&self.path)?;
        f.write_all(text.as_bytes())?;
        Ok(())
    }
}
