//! Escritor PDF mínimo: texto Helvetica (fuente base, sin incrustar) sobre
//! páginas ya paginadas. Sólo lo necesario para el comprobante de resultado.

use chrono::{DateTime, Utc};

use super::layout::PageGeometry;

/// Escapa texto para un literal PDF. Fuera de ASCII imprimible -> '?'.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn content_stream(lines: &[String], geometry: &PageGeometry, heading: bool) -> String {
    let top = geometry.height - geometry.margin - geometry.font_size;
    let mut s = String::new();
    s.push_str("BT\n");
    s.push_str(&format!("{:.2} TL\n", geometry.line_height));
    s.push_str(&format!("{:.2} {:.2} Td\n", geometry.margin, top));
    for (i, line) in lines.iter().enumerate() {
        let font = if heading && i == 0 { "/F2" } else { "/F1" };
        s.push_str(&format!("{} {:.1} Tf\n", font, geometry.font_size));
        if i > 0 {
            s.push_str("T*\n");
        }
        s.push_str(&format!("({}) Tj\n", escape_text(line)));
    }
    s.push_str("ET\n");
    s
}

/// Genera el documento completo. La primera línea de la primera página va en negrita.
pub fn render_pdf(pages: &[Vec<String>], geometry: &PageGeometry, title: &str, created: DateTime<Utc>) -> Vec<u8> {
    // objetos fijos: 1 catálogo, 2 árbol de páginas, 3 y 4 fuentes, 5 info;
    // luego por página: objeto página + stream de contenido
    let first_page_obj = 6;
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_obj + 2 * i).collect();

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string());
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>".to_string());
    objects.push(format!(
        "<< /Title ({}) /Producer (gradecalc) /CreationDate (D:{}Z) >>",
        escape_text(title),
        created.format("%Y%m%d%H%M%S")
    ));

    for (i, lines) in pages.iter().enumerate() {
        let content_id = page_ids[i] + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            geometry.width, geometry.height, content_id
        ));
        let stream = content_stream(lines, geometry, i == 0);
        objects.push(format!("<< /Length {} >>\nstream\n{}endstream", stream.len(), stream));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_at = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for off in offsets {
        out.push_str(&format!("{:010} 00000 n \n", off));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    ));
    out.into_bytes()
}
