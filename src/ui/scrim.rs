//! Background scrim.  Darkens whatever is already in the buffer.
//!
//! Terminals have no alpha channel, so "opacity" is emulated by blending
//! every cell's foreground and background toward black.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// What `Color::Reset` is assumed to look like when blending.
const DEFAULT_FG: (u8, u8, u8) = (0xc0, 0xc0, 0xc0);
const DEFAULT_BG: (u8, u8, u8) = (0x00, 0x00, 0x00);

/// Full-bleed dimming layer.  Opacity outside `[0, 1]` is clamped, so the
/// negative values an unclamped drag fade produces render as transparent.
pub struct Scrim {
    pub opacity: f64,
}

impl Widget for Scrim {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let opacity = self.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    let fg = dim_color(cell.fg, opacity, DEFAULT_FG);
                    let bg = dim_color(cell.bg, opacity, DEFAULT_BG);
                    cell.set_fg(fg);
                    cell.set_bg(bg);
                }
            }
        }
    }
}

/// Blend `color` toward black by `opacity`.
pub fn dim_color(color: Color, opacity: f64, reset: (u8, u8, u8)) -> Color {
    let (r, g, b) = to_rgb(color).unwrap_or(reset);
    let keep = 1.0 - opacity.clamp(0.0, 1.0);
    let scale = |c: u8| (f64::from(c) * keep).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Approximate RGB for a terminal colour.  `None` for `Reset`.
fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0x80, 0x00, 0x00),
        Color::Green => (0x00, 0x80, 0x00),
        Color::Yellow => (0x80, 0x80, 0x00),
        Color::Blue => (0x00, 0x00, 0x80),
        Color::Magenta => (0x80, 0x00, 0x80),
        Color::Cyan => (0x00, 0x80, 0x80),
        Color::Gray => (0xc0, 0xc0, 0xc0),
        Color::DarkGray => (0x80, 0x80, 0x80),
        Color::LightRed => (0xff, 0x00, 0x00),
        Color::LightGreen => (0x00, 0xff, 0x00),
        Color::LightYellow => (0xff, 0xff, 0x00),
        Color::LightBlue => (0x00, 0x00, 0xff),
        Color::LightMagenta => (0xff, 0x00, 0xff),
        Color::LightCyan => (0x00, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        Color::Indexed(i) => indexed_rgb(i),
    };
    Some(rgb)
}

/// xterm 256-colour palette.
fn indexed_rgb(i: u8) -> (u8, u8, u8) {
    const BASIC: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match i {
        0..=15 => to_rgb(BASIC[i as usize]).unwrap_or(DEFAULT_FG),
        16..=231 => {
            let i = i - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + (i - 232) * 10;
            (v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn half_opacity_halves_channels() {
        assert_eq!(
            dim_color(Color::Rgb(200, 100, 0), 0.5, DEFAULT_FG),
            Color::Rgb(100, 50, 0)
        );
    }

    #[test]
    fn reset_uses_assumed_default() {
        assert_eq!(dim_color(Color::Reset, 0.5, DEFAULT_FG), Color::Rgb(96, 96, 96));
    }

    #[test]
    fn indexed_cube_and_grey_ramp() {
        assert_eq!(indexed_rgb(16), (0, 0, 0));
        assert_eq!(indexed_rgb(231), (255, 255, 255));
        assert_eq!(indexed_rgb(232), (8, 8, 8));
        assert_eq!(indexed_rgb(9), (0xff, 0, 0));
    }

    #[test]
    fn zero_or_negative_opacity_leaves_buffer_untouched() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().fg(Color::White));
        let before = buf.clone();

        Scrim { opacity: 0.0 }.render(area, &mut buf);
        Scrim { opacity: -0.4 }.render(area, &mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn dims_every_cell() {
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().fg(Color::White).bg(Color::Blue));

        Scrim { opacity: 0.5 }.render(area, &mut buf);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf[(x, y)].fg, Color::Rgb(128, 128, 128));
                assert_eq!(buf[(x, y)].bg, Color::Rgb(0, 0, 64));
            }
        }
    }
}
