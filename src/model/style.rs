//! Style-bearing values: fonts, fills, borders, bullets and paragraph styles.
//!
//! These are plain values. They never carry an assigned id; the ids produced
//! by interning live in the resolved slots of the nodes that use them.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a color from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color such as `"FF0000"` or `"#4472c4"`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Uppercase `RRGGBB` form used by OOXML `srgbClr`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Underline style for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
}

impl Underline {
    /// OOXML `u` attribute value.
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "sng",
            Self::Double => "dbl",
        }
    }
}

/// Character formatting of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    /// Typeface name
    pub name: String,
    /// Size in hundredths of a point (1800 = 18pt)
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikethrough: bool,
    pub color: Color,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 1800,
            bold: false,
            italic: false,
            underline: Underline::None,
            strikethrough: false,
            color: Color::BLACK,
        }
    }
}

impl Font {
    /// Create a font with the given typeface and size in points.
    pub fn new(name: impl Into<String>, size_pt: f64) -> Self {
        Self {
            name: name.into(),
            size: (size_pt * 100.0).round() as u32,
            ..Self::default()
        }
    }

    /// Builder method: set bold.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Builder method: set italic.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Builder method: set underline.
    pub fn underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    /// Builder method: set strikethrough.
    pub fn strikethrough(mut self, strike: bool) -> Self {
        self.strikethrough = strike;
        self
    }

    /// Builder method: set the text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Area fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    #[default]
    None,
    Solid(Color),
    /// Linear gradient; `angle` in degrees, clockwise from left-to-right
    Gradient { start: Color, end: Color, angle: u16 },
}

/// Dash pattern of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    None,
    #[default]
    Solid,
    Dash,
    Dot,
}

impl LineStyle {
    /// OOXML `prstDash` value.
    pub fn ooxml_dash(&self) -> &'static str {
        match self {
            Self::None | Self::Solid => "solid",
            Self::Dash => "dash",
            Self::Dot => "sysDot",
        }
    }

    /// Name of the ODF `draw:stroke-dash` definition, if the style is dashed.
    pub fn odf_dash_name(&self) -> Option<&'static str> {
        match self {
            Self::Dash => Some("Dash"),
            Self::Dot => Some("Dot"),
            Self::None | Self::Solid => None,
        }
    }
}

/// Shape outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Border {
    pub style: LineStyle,
    /// Width in EMUs
    pub width: i64,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: LineStyle::Solid,
            width: 12_700,
            color: Color::BLACK,
        }
    }
}

/// Numbering scheme of an auto-numbered bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberScheme {
    #[default]
    ArabicPeriod,
    AlphaLowerParen,
    RomanUpperPeriod,
}

impl NumberScheme {
    /// OOXML `buAutoNum` type.
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::ArabicPeriod => "arabicPeriod",
            Self::AlphaLowerParen => "alphaLcParenR",
            Self::RomanUpperPeriod => "romanUcPeriod",
        }
    }

    /// ODF `style:num-format` and `style:num-suffix` pair.
    pub fn odf_format(&self) -> (&'static str, &'static str) {
        match self {
            Self::ArabicPeriod => ("1", "."),
            Self::AlphaLowerParen => ("a", ")"),
            Self::RomanUpperPeriod => ("I", "."),
        }
    }
}

/// What a bullet draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BulletKind {
    Char(char),
    AutoNumber { scheme: NumberScheme, start_at: u32 },
}

/// Paragraph bullet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bullet {
    pub kind: BulletKind,
    pub font: Option<String>,
    pub color: Option<Color>,
    /// Size relative to the text, in percent
    pub size_percent: u32,
}

impl Bullet {
    /// A character bullet at full text size.
    pub fn char(ch: char) -> Self {
        Self {
            kind: BulletKind::Char(ch),
            font: None,
            color: None,
            size_percent: 100,
        }
    }

    /// An auto-numbered bullet.
    pub fn numbered(scheme: NumberScheme, start_at: u32) -> Self {
        Self {
            kind: BulletKind::AutoNumber { scheme, start_at },
            font: None,
            color: None,
            size_percent: 100,
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// OOXML `algn` value.
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }

    /// ODF `fo:text-align` value.
    pub fn odf_value(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "center",
            Self::Right => "end",
            Self::Justify => "justify",
        }
    }
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    /// Outline level, 0-based
    pub level: u8,
    /// Left margin in EMUs
    pub margin_left: i64,
    /// First-line indent in EMUs (negative for hanging)
    pub indent: i64,
    /// Space before in hundredths of a point
    pub space_before: u32,
    /// Space after in hundredths of a point
    pub space_after: u32,
    /// Line spacing in percent; `None` keeps the inherited spacing
    pub line_spacing: Option<u32>,
}

/// Fill and outline of a drawing object, interned together as one graphic style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GraphicStyle {
    pub fill: Fill,
    pub border: Option<Border>,
}
