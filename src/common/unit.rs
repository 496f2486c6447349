//! Unit conversion utilities.
//!
//! The model stores every length in EMUs (English Metric Units). OOXML writes
//! them as-is; ODF wants centimetres and points.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn emu_to_cm_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

/// Format an EMU length as an ODF `cm` measure with three decimals.
///
/// Fixed precision keeps the rendered markup byte-stable across runs.
pub fn format_cm(emu: i64) -> String {
    format!("{:.3}cm", emu_to_cm_f64(emu))
}

/// Format a length stored in hundredths of a point as an ODF `pt` measure.
pub fn format_centipoints(value: u32) -> String {
    if value % 100 == 0 {
        format!("{}pt", value / 100)
    } else {
        format!("{:.2}pt", value as f64 / 100.0)
    }
}
