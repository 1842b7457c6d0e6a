//! Hex color strings: `#RGB` / `#RRGGBB` parsing and `#RRGGBB` formatting.

use super::Rgb;

/// Parse a hex color string into [`Rgb`].
///
/// Accepts `"#812DD3"`, `"812dd3"`, and the shorthand `"#f00"` (each digit
/// doubled). Surrounding whitespace and one leading `#` are ignored.
pub fn parse_hex(s: &str) -> crate::error::Result<Rgb> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    // from_str_radix tolerates a leading '+', so check every byte up front
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(s));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid(s)),
    };

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid(s))
    };
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Format as `#RRGGBB` with uppercase digits.
pub fn format_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Format as `#RGB` when every channel is digit-doubled (`0xFF`, `0x00`,
/// `0x33`...), otherwise as `#RRGGBB`.
pub fn format_hex_short(rgb: Rgb) -> String {
    let doubled = |v: u8| v >> 4 == v & 0x0F;
    if doubled(rgb.r) && doubled(rgb.g) && doubled(rgb.b) {
        format!("#{:X}{:X}{:X}", rgb.r & 0x0F, rgb.g & 0x0F, rgb.b & 0x0F)
    } else {
        format_hex(rgb)
    }
}

fn invalid(s: &str) -> crate::CommonToolsError {
    crate::CommonToolsError::InvalidColorFormat(s.to_string())
}
