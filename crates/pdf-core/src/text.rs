//! Text rendering utilities

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, Tf, Td, Tj, ET) that render text with
/// its baseline starting at a specific position.
///
/// # Arguments
/// * `text_hex` - Hex-encoded WinAnsi text (e.g., "<4142>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(text_hex: &str, x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let mut ops = String::new();

    // Begin Text
    ops.push_str("BT\n");

    // Set font and size: /F1 12 Tf
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));

    // Move to position: x y Td
    ops.push_str(&format!("{x} {y} Td\n"));

    // Show text: <hex> Tj
    ops.push_str(&format!("{text_hex} Tj\n"));

    // End Text
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Encode text as WinAnsi bytes
///
/// Returns the encoded bytes and the number of characters that had no
/// WinAnsi code and were replaced by `?`.
pub fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;

    for c in text.chars() {
        match win_ansi_code(c) {
            Some(code) => bytes.push(code),
            None => {
                bytes.push(b'?');
                replaced += 1;
            }
        }
    }

    (bytes, replaced)
}

/// Format encoded bytes as a PDF hex string (e.g., "<4142>")
pub(crate) fn to_hex_string(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2 + 2);
    hex.push('<');
    for b in bytes {
        hex.push_str(&format!("{b:02X}"));
    }
    hex.push('>');
    hex
}

fn win_ansi_code(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            _ => None,
        },
    }
}
