// src/core/color.rs

use colored::Color;
use thiserror::Error;

/// A colour name nobody recognizes.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown color name: '{0}'")]
pub struct UnknownColor(pub String);

/// Parses a color name (e.g. "red", "bright cyan", "bright_green") as used in
/// the `[prompt]` configuration table.
pub fn parse_color_name(name: &str) -> Result<Color, UnknownColor> {
    let normalized = name.trim().to_lowercase().replace(['_', '-', ' '], "");
    let color = match normalized.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "brightblack" | "gray" | "grey" => Color::BrightBlack,
        "brightred" => Color::BrightRed,
        "brightgreen" => Color::BrightGreen,
        "brightyellow" => Color::BrightYellow,
        "brightblue" => Color::BrightBlue,
        "brightmagenta" => Color::BrightMagenta,
        "brightcyan" => Color::BrightCyan,
        "brightwhite" => Color::BrightWhite,
        _ => return Err(UnknownColor(name.to_string())),
    };
    Ok(color)
}
