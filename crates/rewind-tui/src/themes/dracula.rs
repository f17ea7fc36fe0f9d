//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36), // background
        bg1: Color::Rgb(0x21, 0x22, 0x2c),
        bg2: Color::Rgb(0x44, 0x47, 0x5a), // current line
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2), // foreground
        fg1: Color::Rgb(0xbd, 0xc0, 0xd4),
        grey0: Color::Rgb(0x62, 0x72, 0xa4), // comment
        grey1: Color::Rgb(0x7a, 0x86, 0xb8),
        red: Color::Rgb(0xff, 0x55, 0x55),
        orange: Color::Rgb(0xff, 0xb8, 0x6c),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        aqua: Color::Rgb(0x8b, 0xe9, 0xfd), // cyan
        blue: Color::Rgb(0xbd, 0x93, 0xf9), // purple, Dracula has no blue
        purple: Color::Rgb(0xff, 0x79, 0xc6), // pink
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        selection: Color::Rgb(0x44, 0x47, 0x5a),
        hour_hand: Color::Rgb(0xf8, 0xf8, 0xf2),
        minute_hand: Color::Rgb(0xbd, 0x93, 0xf9),
        progress: Color::Rgb(0xff, 0x79, 0xc6),
        borrow: Color::Rgb(0xf1, 0xfa, 0x8c),
        answer: Color::Rgb(0x50, 0xfa, 0x7b),
        error: Color::Rgb(0xff, 0x55, 0x55),
    }
}
