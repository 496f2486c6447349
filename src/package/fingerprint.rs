//! Content fingerprints for style and resource deduplication.
//!
//! A fingerprint is a SHA-256 digest over a canonical encoding of a value's
//! semantic fields. The encoding is tagged and length-prefixed, so distinct
//! values of one kind never share an encoding, and every kind hashes under its
//! own domain string, so a `Fill` and a `Border` never share one either.
//!
//! Nothing here depends on memory addresses or the seeded std hasher; the same
//! value yields the same fingerprint on every run and platform.
use std::fmt;

use sha2::{Digest, Sha256};

use crate::model::chart::{Chart, ChartType};
use crate::model::style::{
    Alignment, Border, Bullet, BulletKind, Color, Fill, Font, GraphicStyle, LineStyle,
    NumberScheme, ParagraphStyle, Underline,
};

/// 32-byte content digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Eight bytes are plenty to tell entries apart in logs
        write!(f, "Fingerprint({}..)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonical encoder feeding a SHA-256 state.
pub struct FingerprintHasher {
    hasher: Sha256,
}

impl FingerprintHasher {
    /// Start a digest under the given domain.
    pub fn new(domain: &str) -> Self {
        let mut hasher = Self {
            hasher: Sha256::new(),
        };
        hasher.write_str(domain);
        hasher
    }

    /// Enum discriminant or presence marker.
    pub fn write_tag(&mut self, tag: u8) {
        self.hasher.update([tag]);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_tag(value as u8);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Floats hash by bit pattern after folding `-0.0` into `0.0` and every NaN
    /// into one canonical NaN.
    pub fn write_f64(&mut self, value: f64) {
        let normalized = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        self.write_u64(normalized.to_bits());
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Length-prefixed byte string.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.write_u64(value.len() as u64);
        self.hasher.update(value);
    }

    /// Presence tag followed by the value, if any.
    pub fn write_option<T>(&mut self, value: Option<&T>, write: impl FnOnce(&mut Self, &T)) {
        match value {
            None => self.write_tag(0),
            Some(v) => {
                self.write_tag(1);
                write(self, v);
            }
        }
    }

    pub fn finish(self) -> Fingerprint {
        let digest = self.hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Fingerprint(bytes)
    }
}

/// A value that can be content-addressed.
///
/// Implementations write semantic fields only. Resolved reference slots are
/// never part of a fingerprinted type.
pub trait Fingerprintable {
    /// Domain string separating this kind of value from every other kind.
    const DOMAIN: &'static str;

    /// Write the canonical encoding of every semantic field.
    fn write_fields(&self, hasher: &mut FingerprintHasher);

    fn fingerprint(&self) -> Fingerprint {
        let mut hasher = FingerprintHasher::new(Self::DOMAIN);
        self.write_fields(&mut hasher);
        hasher.finish()
    }
}

/// Fingerprint a style-bearing value.
#[inline]
pub fn fingerprint<T: Fingerprintable>(value: &T) -> Fingerprint {
    value.fingerprint()
}

/// Fingerprint a binary payload.
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = FingerprintHasher::new("deckpack.bytes");
    hasher.write_bytes(data);
    hasher.finish()
}

impl Fingerprintable for Color {
    const DOMAIN: &'static str = "deckpack.color";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        hasher.write_tag(self.r);
        hasher.write_tag(self.g);
        hasher.write_tag(self.b);
    }
}

impl Fingerprintable for Font {
    const DOMAIN: &'static str = "deckpack.font";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        hasher.write_str(&self.name);
        hasher.write_u32(self.size);
        hasher.write_bool(self.bold);
        hasher.write_bool(self.italic);
        hasher.write_tag(match self.underline {
            Underline::None => 0,
            Underline::Single => 1,
            Underline::Double => 2,
        });
        hasher.write_bool(self.strikethrough);
        self.color.write_fields(hasher);
    }
}

impl Fingerprintable for Fill {
    const DOMAIN: &'static str = "deckpack.fill";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        match self {
            Fill::None => hasher.write_tag(0),
            Fill::Solid(color) => {
                hasher.write_tag(1);
                color.write_fields(hasher);
            }
            Fill::Gradient { start, end, angle } => {
                hasher.write_tag(2);
                start.write_fields(hasher);
                end.write_fields(hasher);
                hasher.write_u32(u32::from(*angle));
            }
        }
    }
}

impl Fingerprintable for Border {
    const DOMAIN: &'static str = "deckpack.border";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        hasher.write_tag(match self.style {
            LineStyle::None => 0,
            LineStyle::Solid => 1,
            LineStyle::Dash => 2,
            LineStyle::Dot => 3,
        });
        hasher.write_i64(self.width);
        self.color.write_fields(hasher);
    }
}

impl Fingerprintable for Bullet {
    const DOMAIN: &'static str = "deckpack.bullet";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        match &self.kind {
            BulletKind::Char(ch) => {
                hasher.write_tag(0);
                hasher.write_u32(u32::from(*ch));
            }
            BulletKind::AutoNumber { scheme, start_at } => {
                hasher.write_tag(1);
                hasher.write_tag(match scheme {
                    NumberScheme::ArabicPeriod => 0,
                    NumberScheme::AlphaLowerParen => 1,
                    NumberScheme::RomanUpperPeriod => 2,
                });
                hasher.write_u32(*start_at);
            }
        }
        hasher.write_option(self.font.as_ref(), |h, name| h.write_str(name));
        hasher.write_option(self.color.as_ref(), |h, color| color.write_fields(h));
        hasher.write_u32(self.size_percent);
    }
}

impl Fingerprintable for ParagraphStyle {
    const DOMAIN: &'static str = "deckpack.paragraph";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        hasher.write_tag(match self.alignment {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
            Alignment::Justify => 3,
        });
        hasher.write_tag(self.level);
        hasher.write_i64(self.margin_left);
        hasher.write_i64(self.indent);
        hasher.write_u32(self.space_before);
        hasher.write_u32(self.space_after);
        hasher.write_option(self.line_spacing.as_ref(), |h, pct| h.write_u32(*pct));
    }
}

impl Fingerprintable for GraphicStyle {
    const DOMAIN: &'static str = "deckpack.graphic";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        self.fill.write_fields(hasher);
        hasher.write_option(self.border.as_ref(), |h, border| border.write_fields(h));
    }
}

impl Fingerprintable for Chart {
    const DOMAIN: &'static str = "deckpack.chart";

    fn write_fields(&self, hasher: &mut FingerprintHasher) {
        hasher.write_tag(match self.chart_type {
            ChartType::Bar => 0,
            ChartType::Column => 1,
            ChartType::Line => 2,
            ChartType::Pie => 3,
        });
        hasher.write_option(self.title.as_ref(), |h, title| h.write_str(title));
        hasher.write_u64(self.categories.len() as u64);
        for category in &self.categories {
            hasher.write_str(category);
        }
        hasher.write_u64(self.series.len() as u64);
        for series in &self.series {
            hasher.write_str(&series.name);
            hasher.write_u64(series.values.len() as u64);
            for value in &series.values {
                hasher.write_f64(*value);
            }
        }
        hasher.write_bool(self.show_legend);
    }
}
