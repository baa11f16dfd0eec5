// SPDX-License-Identifier: MIT
//
// Terminal rendering of palettes and previews.
//
// Plain functions that write to any `impl Write`. Swatches are 24-bit SGR
// background runs; with color disabled only the hex codes are printed, so
// the output stays readable when piped.

use std::io::{self, Write};

use n_color::Color;
use n_tint::contrast::{contrast_ratio_hex, grade};
use n_tint::preview::swatch_keys;
use n_tint::{Element, PreviewRow, TintResult};

// ─── SGR ────────────────────────────────────────────────────────────────────

fn fg(w: &mut impl Write, (r, g, b): (u8, u8, u8)) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

fn bg(w: &mut impl Write, (r, g, b): (u8, u8, u8)) -> io::Result<()> {
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    Color::hex(hex).ok().map(Color::to_rgb8)
}

/// A two-cell color block followed by the hex code.
fn swatch(w: &mut impl Write, hex: &str, color: bool) -> io::Result<()> {
    if let (true, Some(c)) = (color, rgb(hex)) {
        bg(w, c)?;
        w.write_all(b"  ")?;
        reset(w)?;
        w.write_all(b" ")?;
    }
    write!(w, "{hex}")
}

/// `label` drawn in `fg_hex` on `bg_hex`, padded to `width`.
fn sample(w: &mut impl Write, label: &str, bg_hex: &str, fg_hex: &str, width: usize, color: bool) -> io::Result<()> {
    match (color, rgb(bg_hex), rgb(fg_hex)) {
        (true, Some(b), Some(f)) => {
            bg(w, b)?;
            fg(w, f)?;
            write!(w, " {label:<width$} ")?;
            reset(w)
        }
        _ => write!(w, " {label:<width$} {bg_hex}/{fg_hex} "),
    }
}

// ─── Palette ────────────────────────────────────────────────────────────────

/// The inspector view: every key with its tint, theme and final colors.
pub fn write_table(w: &mut impl Write, result: &TintResult, color: bool) -> io::Result<()> {
    write!(w, "base hue {:>3.0}  ", result.base_hue)?;
    swatch(w, &result.base_tint_hex, color)?;
    if let Some(dir) = result.hue_direction {
        write!(w, "  blend {}", dir.name())?;
    }
    writeln!(w)?;
    writeln!(w)?;

    let swatch_width = if color { 10 } else { 7 };
    writeln!(
        w,
        "  {:<34}{:<sw$}  {:<sw$}  {:<sw$}  {}",
        "key",
        "tint",
        "theme",
        "final",
        "blend",
        sw = swatch_width
    )?;
    for detail in &result.keys {
        let mark = if detail.enabled { '*' } else { ' ' };
        write!(w, "{mark} {:<34}", detail.key.name())?;
        swatch(w, &detail.tint_hex, color)?;
        w.write_all(b"  ")?;
        match &detail.theme_hex {
            Some(hex) => swatch(w, hex, color)?,
            None => write!(w, "{:<swatch_width$}", "-")?,
        }
        w.write_all(b"  ")?;
        swatch(w, &detail.final_hex, color)?;
        writeln!(w, "  {:.2}", detail.blend_factor)?;
    }

    writeln!(w)?;
    for element in Element::TINTABLE {
        let Some((bg_key, fg_key)) = swatch_keys(element) else {
            continue;
        };
        let (Some(bg_detail), Some(fg_detail)) = (result.get(bg_key), result.get(fg_key)) else {
            continue;
        };
        let ratio = contrast_ratio_hex(&bg_detail.final_hex, &fg_detail.final_hex).map_err(io::Error::other)?;
        w.write_all(b"  ")?;
        sample(w, element.name(), &bg_detail.final_hex, &fg_detail.final_hex, 12, color)?;
        writeln!(w, " {ratio:>5.2}:1  {}", grade(ratio))?;
    }
    Ok(())
}

// ─── Preview ────────────────────────────────────────────────────────────────

/// One line per sample hue: every element as a labelled swatch.
pub fn write_preview(w: &mut impl Write, rows: &[PreviewRow], color: bool) -> io::Result<()> {
    for row in rows {
        write!(w, "{:>5.0}  ", row.hue)?;
        for s in &row.swatches {
            sample(w, s.element.name(), &s.background, &s.foreground, 11, color)?;
            write!(w, "{:>5.1} ", s.contrast)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
