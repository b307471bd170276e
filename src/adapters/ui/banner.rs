//! Startup banner: the mosque name in figlet ASCII with an emerald-to-gold gradient.

use crate::domain::DomainError;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Emerald (#10b981).
pub const EMERALD: (u8, u8, u8) = (0x10, 0xb9, 0x81);
/// Gold (#fbbf24).
pub const GOLD: (u8, u8, u8) = (0xfb, 0xbf, 0x24);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Figlet rendering of `text`, one entry per output line.
pub fn banner_lines(text: &str) -> Result<Vec<String>, DomainError> {
    let font =
        FIGfont::standard().map_err(|e| DomainError::Render(format!("figlet font: {}", e)))?;
    let figure = font
        .convert(text)
        .ok_or_else(|| DomainError::Render(format!("figlet cannot render {:?}", text)))?;
    Ok(figure.to_string().lines().map(str::to_string).collect())
}

fn print_colored(
    out: &mut impl Write,
    (r, g, b): (u8, u8, u8),
    text: &str,
) -> std::io::Result<()> {
    out.execute(SetForegroundColor(Color::Rgb { r, g, b }))?;
    out.execute(Print(text))?;
    out.execute(Print("\r\n"))?;
    out.execute(ResetColor)?;
    Ok(())
}

/// Prints the welcome banner followed by the crate version.
pub fn print_welcome(name: &str) -> Result<(), DomainError> {
    let lines = banner_lines(name)?;
    let total = lines.len().max(1);
    let mut out = stdout();
    let io = |e: std::io::Error| DomainError::Render(e.to_string());

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        print_colored(&mut out, lerp_rgb(EMERALD, GOLD, t), line).map_err(io)?;
    }
    let version = format!("masjid-tv v{}", env!("CARGO_PKG_VERSION"));
    print_colored(&mut out, GOLD, &version).map_err(io)?;
    out.flush().map_err(io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(EMERALD, GOLD, 0.0), EMERALD);
        assert_eq!(lerp_rgb(EMERALD, GOLD, 1.0), GOLD);
    }

    #[test]
    fn test_banner_lines_not_empty() {
        let lines = banner_lines("Masjid").unwrap();
        assert!(lines.len() > 1);
        assert!(lines.iter().any(|l| !l.trim().is_empty()));
    }
}
