//! Slide part markup.
use std::fmt::Write as FmtWrite;

use super::shape::write_shape;
use super::{style_payload, write_fill};
use crate::common::Result;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::model::presentation::Slide;
use crate::ooxml::pptx::template::{EMPTY_TREE_HEAD, PML_NAMESPACES};
use crate::package::format::RenderContext;

/// Generate `slideN.xml` for an indexed slide.
pub fn slide_xml(ctx: &RenderContext<'_>, slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sld {PML_NAMESPACES}>")?;

    match &slide.name {
        Some(name) => write!(xml, r#"<p:cSld name="{}">"#, escape_xml(name))?,
        None => xml.push_str("<p:cSld>"),
    }

    // Background must precede the shape tree
    if let Some(id) = slide.resolved.background_style {
        let fill = style_payload(&ctx.styles.drawing_page, Some(id), "background")?;
        xml.push_str("<p:bg><p:bgPr>");
        write_fill(&mut xml, fill)?;
        xml.push_str("<a:effectLst/></p:bgPr></p:bg>");
    }

    xml.push_str("<p:spTree>");
    xml.push_str(EMPTY_TREE_HEAD);
    for shape in &slide.shapes {
        write_shape(&mut xml, ctx, shape)?;
    }
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    Ok(xml)
}
