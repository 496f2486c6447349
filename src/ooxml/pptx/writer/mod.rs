//! PresentationML part writers.
//!
//! Writers only read the resolved model: style ids are looked up in the
//! closed registry and every `r:id` comes from a reference stamped during
//! indexing.
use std::fmt::{self, Write as FmtWrite};

use crate::common::{Error, Result};
use crate::model::style::{Border, Color, Fill, LineStyle};
use crate::package::format::Reference;
use crate::package::rel::RelId;
use crate::package::style_registry::{StyleDeduplicator, StyleId};

pub mod chart;
pub mod excel_embed;
pub mod pres;
pub mod props;
pub mod shape;
pub mod slide;

/// Interned value behind a resolved style slot.
pub(crate) fn style_payload<'a, T>(
    styles: &'a StyleDeduplicator<T>,
    id: Option<StyleId>,
    what: &str,
) -> Result<&'a T>
where
    T: crate::package::fingerprint::Fingerprintable + Clone + PartialEq + fmt::Debug,
{
    let id = id.ok_or_else(|| Error::InvalidState(format!("{what} style was never interned")))?;
    styles
        .get(id)
        .map(|entry| &entry.payload)
        .ok_or_else(|| Error::InvalidState(format!("{what} style {id} is not registered")))
}

/// Relationship id behind a resolved reference slot.
pub(crate) fn rel_id(reference: Option<&Reference>, what: &str) -> Result<RelId> {
    reference
        .and_then(Reference::rel_id)
        .ok_or_else(|| Error::InvalidState(format!("{what} has no relationship id")))
}

pub(crate) fn write_color(xml: &mut String, color: Color) -> Result<()> {
    write!(xml, r#"<a:srgbClr val="{}"/>"#, color.to_hex())?;
    Ok(())
}

/// Write a DrawingML fill element.
pub(crate) fn write_fill(xml: &mut String, fill: &Fill) -> Result<()> {
    match fill {
        Fill::None => xml.push_str("<a:noFill/>"),
        Fill::Solid(color) => {
            xml.push_str("<a:solidFill>");
            write_color(xml, *color)?;
            xml.push_str("</a:solidFill>");
        }
        Fill::Gradient { start, end, angle } => {
            xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0">"#);
            write_color(xml, *start)?;
            xml.push_str(r#"</a:gs><a:gs pos="100000">"#);
            write_color(xml, *end)?;
            // 60000ths of a degree
            write!(
                xml,
                r#"</a:gs></a:gsLst><a:lin ang="{}" scaled="0"/></a:gradFill>"#,
                u32::from(*angle % 360) * 60_000
            )?;
        }
    }
    Ok(())
}

/// Write a shape outline.
pub(crate) fn write_line(xml: &mut String, border: &Border) -> Result<()> {
    if border.style == LineStyle::None {
        xml.push_str("<a:ln><a:noFill/></a:ln>");
        return Ok(());
    }
    write!(xml, r#"<a:ln w="{}"><a:solidFill>"#, border.width)?;
    write_color(xml, border.color)?;
    write!(
        xml,
        r#"</a:solidFill><a:prstDash val="{}"/></a:ln>"#,
        border.style.ooxml_dash()
    )?;
    Ok(())
}
