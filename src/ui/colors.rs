//! Catppuccin Mocha Color Palette Module
//! Based on the official Catppuccin theme: https://catppuccin.com/

use ratatui::style::Color;
pub struct Mocha;

impl Mocha {
    pub const BASE: Color = Color::Rgb(30, 30, 46);
    pub const SURFACE: Color = Color::Rgb(49, 50, 68);
    pub const OVERLAY: Color = Color::Rgb(108, 112, 134);
    pub const TEXT: Color = Color::Rgb(205, 214, 244);
    pub const SUBTEXT: Color = Color::Rgb(166, 173, 200);
    pub const RED: Color = Color::Rgb(243, 139, 168);
    pub const PEACH: Color = Color::Rgb(250, 179, 135);
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);
    pub const GREEN: Color = Color::Rgb(166, 227, 161);
    pub const TEAL: Color = Color::Rgb(148, 226, 213);
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);
}
