//! Color presets for the rendered document.

use clap::ValueEnum;
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum PdfTheme {
    /// Light-grey header band, grey grid, black text (default).
    Grayscale,
    /// No fill at all; black borders only.
    Borders,
    /// Green header band with white text, green footer accents.
    Color,
}

impl PdfTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfTheme::Grayscale => "grayscale",
            PdfTheme::Borders => "borders",
            PdfTheme::Color => "color",
        }
    }
}

impl fmt::Display for PdfTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
const LIGHT_GREY: Rgb = Rgb(0.83, 0.83, 0.83);
const GREY: Rgb = Rgb(0.5, 0.5, 0.5);
const GREEN: Rgb = Rgb(0.0, 0.5, 0.0);
const DARK_GREEN: Rgb = Rgb(0.0, 0.39, 0.0);

/// Resolved colors for one preset.
#[derive(Copy, Clone, Debug)]
pub struct ThemeSpec {
    /// Header-row band; `None` leaves the band unfilled.
    pub header_fill: Option<Rgb>,
    pub header_text: Rgb,
    pub grid: Rgb,
    /// Footer text color.
    pub accent: Rgb,
}

impl PdfTheme {
    pub fn spec(&self) -> ThemeSpec {
        match self {
            PdfTheme::Grayscale => ThemeSpec {
                header_fill: Some(LIGHT_GREY),
                header_text: BLACK,
                grid: GREY,
                accent: BLACK,
            },
            PdfTheme::Borders => ThemeSpec {
                header_fill: None,
                header_text: BLACK,
                grid: BLACK,
                accent: BLACK,
            },
            PdfTheme::Color => ThemeSpec {
                header_fill: Some(GREEN),
                header_text: WHITE,
                grid: DARK_GREEN,
                accent: GREEN,
            },
        }
    }
}
