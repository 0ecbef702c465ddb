// Paginación del snapshot sobre hojas A4 (unidades: puntos PDF).

/// Geometría de página y tipografía usadas al exportar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub font_size: f64,
    pub line_height: f64,
}

impl PageGeometry {
    pub const A4_PORTRAIT: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 20.0,
        font_size: 12.0,
        line_height: 16.0,
    };

    /// Líneas que caben entre los márgenes superior e inferior.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.height - 2.0 * self.margin;
        ((usable / self.line_height).floor() as usize).max(1)
    }

    /// Caracteres por línea, estimando el ancho medio de Helvetica en 0.5 em.
    pub fn chars_per_line(&self) -> usize {
        let usable = self.width - 2.0 * self.margin;
        ((usable / (self.font_size * 0.5)).floor() as usize).max(1)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4_PORTRAIT
    }
}

/// Corta una línea en trozos de a lo más `max` caracteres, preferentemente en espacios.
pub fn wrap_line(line: &str, max: usize) -> Vec<String> {
    if line.chars().count() <= max {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let word_len = word.chars().count();
        let cur_len = current.chars().count();
        if cur_len > 0 && cur_len + 1 + word_len > max {
            out.push(std::mem::take(&mut current));
        }
        if word_len > max {
            // palabra más larga que la línea: partir a la fuerza
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max) {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                current = chunk.iter().collect();
            }
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Reparte las líneas (ya envueltas al ancho de página) en páginas.
/// Siempre devuelve al menos una página.
pub fn paginate(lines: &[String], geometry: &PageGeometry) -> Vec<Vec<String>> {
    let max_chars = geometry.chars_per_line();
    let wrapped: Vec<String> = lines.iter().flat_map(|l| wrap_line(l, max_chars)).collect();
    if wrapped.is_empty() {
        return vec![Vec::new()];
    }
    wrapped.chunks(geometry.lines_per_page()).map(|c| c.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_capacity() {
        let g = PageGeometry::A4_PORTRAIT;
        // (841.89 - 40) / 16 = 50.1
        assert_eq!(g.lines_per_page(), 50);
        // (595.28 - 40) / 6 = 92.5
        assert_eq!(g.chars_per_line(), 92);
    }

    #[test]
    fn wrap_prefers_spaces() {
        assert_eq!(wrap_line("short", 10), vec!["short"]);
        assert_eq!(wrap_line("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn overflow_spills_to_next_page() {
        let g = PageGeometry::A4_PORTRAIT;
        let lines: Vec<String> = (0..120).map(|i| format!("line {}", i)).collect();
        let pages = paginate(&lines, &g);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 50);
        assert_eq!(pages[2].len(), 20);
        assert_eq!(pages[1][0], "line 50");
    }

    #[test]
    fn empty_document_has_one_page() {
        assert_eq!(paginate(&[], &PageGeometry::default()), vec![Vec::<String>::new()]);
    }
}
