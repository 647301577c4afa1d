use statline_config::ColorLevel;

/// A terminal color as written in settings.
///
/// Accepted spellings: ANSI names (`"red"`, `"brightCyan"`, `"gray"`),
/// `"ansi256:N"` or a bare `"N"`, and `"hex:RRGGBB"` / `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// One of the 16 basic colors; 8..=15 are the bright variants.
    Basic(u8),
    Indexed(u8),
    Rgb(u8, u8, u8),
}

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// xterm's default RGB values for the 16 basic colors.
const BASIC_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Color {
    pub const FALLBACK_BG: Self = Self::Indexed(236);

    /// Parse a settings color string.  Returns `None` for anything
    /// unrecognised so callers can fall back to a default.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(index) = raw.strip_prefix("ansi256:") {
            return index.trim().parse().ok().map(Self::Indexed);
        }
        if let Some(hex) = raw.strip_prefix("hex:") {
            return Self::from_hex(hex);
        }
        if raw.starts_with('#') {
            return Self::from_hex(raw);
        }
        if let Ok(index) = raw.parse::<u8>() {
            return Some(Self::Indexed(index));
        }
        Self::from_name(raw)
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `RRGGBB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };
        Some(Self::Rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?))
    }

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if matches!(lower.as_str(), "gray" | "grey") {
            return Some(Self::Basic(8));
        }
        let (base, bright) = if let Some(rest) = lower.strip_prefix("bright") {
            (rest.trim_start_matches(['-', '_']), true)
        } else if let Some(rest) = lower.strip_suffix("bright") {
            (rest.trim_end_matches(['-', '_']), true)
        } else {
            (lower.as_str(), false)
        };
        let index = NAMES.iter().position(|n| *n == base)? as u8;
        Some(Self::Basic(if bright { index + 8 } else { index }))
    }

    /// Approximate RGB value of this color.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Basic(n) => BASIC_RGB[usize::from(n & 15)],
            Self::Indexed(n) if n < 16 => BASIC_RGB[usize::from(n)],
            Self::Indexed(n) if n >= 232 => {
                let v = 8 + (n - 232) * 10;
                (v, v, v)
            }
            Self::Indexed(n) => {
                let n = n - 16;
                (
                    CUBE_LEVELS[usize::from(n / 36)],
                    CUBE_LEVELS[usize::from((n / 6) % 6)],
                    CUBE_LEVELS[usize::from(n % 6)],
                )
            }
            Self::Rgb(r, g, b) => (r, g, b),
        }
    }

    /// Reduce this color to what `level` can display.
    #[must_use]
    pub fn downgrade(self, level: ColorLevel) -> Option<Self> {
        match (level, self) {
            (ColorLevel::None, _) => None,
            (ColorLevel::TrueColor, c) => Some(c),
            (ColorLevel::Ansi256, Self::Rgb(r, g, b)) => Some(Self::Indexed(rgb_to_256(r, g, b))),
            (ColorLevel::Ansi256, c) => Some(c),
            (ColorLevel::Basic, Self::Basic(n)) => Some(Self::Basic(n)),
            (ColorLevel::Basic, Self::Indexed(n)) if n < 16 => Some(Self::Basic(n)),
            (ColorLevel::Basic, c) => Some(Self::Basic(nearest_basic(c.to_rgb()))),
        }
    }

    /// SGR parameters selecting this color as foreground.
    pub fn fg_params(self) -> String {
        match self {
            Self::Basic(n) if n < 8 => format!("{}", 30 + n),
            Self::Basic(n) => format!("{}", 90 + (n & 7)),
            Self::Indexed(n) => format!("38;5;{n}"),
            Self::Rgb(r, g, b) => format!("38;2;{r};{g};{b}"),
        }
    }

    /// SGR parameters selecting this color as background.
    pub fn bg_params(self) -> String {
        match self {
            Self::Basic(n) if n < 8 => format!("{}", 40 + n),
            Self::Basic(n) => format!("{}", 100 + (n & 7)),
            Self::Indexed(n) => format!("48;5;{n}"),
            Self::Rgb(r, g, b) => format!("48;2;{r};{g};{b}"),
        }
    }
}

fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            239..=255 => 231,
            v => 232 + (v - 8) / 10,
        };
    }
    let step = |v: u8| -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            v => (v - 35) / 40,
        }
    };
    16 + 36 * step(r) + 6 * step(g) + step(b)
}

fn nearest_basic((r, g, b): (u8, u8, u8)) -> u8 {
    let dist = |(cr, cg, cb): (u8, u8, u8)| -> u32 {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2) as u32;
        d(r, cr) + d(g, cg) + d(b, cb)
    };
    (0u8..16)
        .min_by_key(|&i| dist(BASIC_RGB[usize::from(i)]))
        .unwrap_or(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!(Color::parse("red"), Some(Color::Basic(1)));
        assert_eq!(Color::parse("brightCyan"), Some(Color::Basic(14)));
        assert_eq!(Color::parse("cyanBright"), Some(Color::Basic(14)));
        assert_eq!(Color::parse("gray"), Some(Color::Basic(8)));
        assert_eq!(Color::parse("mauve"), None);
    }

    #[test]
    fn parses_indexed_and_hex() {
        assert_eq!(Color::parse("ansi256:208"), Some(Color::Indexed(208)));
        assert_eq!(Color::parse("141"), Some(Color::Indexed(141)));
        assert_eq!(Color::parse("hex:1E1E2E"), Some(Color::Rgb(0x1e, 0x1e, 0x2e)));
        assert_eq!(Color::parse("#cba6f7"), Some(Color::Rgb(0xcb, 0xa6, 0xf7)));
        assert_eq!(Color::parse("#cba6f"), None);
    }

    #[test]
    fn sgr_params() {
        assert_eq!(Color::Basic(2).fg_params(), "32");
        assert_eq!(Color::Basic(9).fg_params(), "91");
        assert_eq!(Color::Basic(4).bg_params(), "44");
        assert_eq!(Color::Indexed(236).bg_params(), "48;5;236");
        assert_eq!(Color::Rgb(1, 2, 3).fg_params(), "38;2;1;2;3");
    }

    #[test]
    fn downgrade_levels() {
        let rgb = Color::Rgb(255, 0, 0);
        assert_eq!(rgb.downgrade(ColorLevel::None), None);
        assert_eq!(rgb.downgrade(ColorLevel::TrueColor), Some(rgb));
        assert_eq!(rgb.downgrade(ColorLevel::Ansi256), Some(Color::Indexed(196)));
        assert_eq!(rgb.downgrade(ColorLevel::Basic), Some(Color::Basic(9)));
        assert_eq!(Color::Indexed(4).downgrade(ColorLevel::Basic), Some(Color::Basic(4)));
    }

    #[test]
    fn gray_ramp_round_trips() {
        assert_eq!(rgb_to_256(128, 128, 128), 244);
        assert_eq!(Color::Indexed(244).to_rgb(), (128, 128, 128));
    }

    #[test]
    fn every_gray_downgrades_to_a_valid_index() {
        for v in 0..=255u8 {
            let Some(Color::Indexed(n)) = Color::Rgb(v, v, v).downgrade(ColorLevel::Ansi256) else {
                panic!("gray {v} did not map to an indexed color");
            };
            assert!(n == 16 || n == 231 || (232..=255).contains(&n), "gray {v} -> {n}");
        }
        assert_eq!(rgb_to_256(0xf8, 0xf8, 0xf8), 231);
        assert_eq!(rgb_to_256(238, 238, 238), 255);
    }
}
