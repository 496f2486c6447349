//! `content.xml`: automatic styles plus one `draw:page` per slide.
use std::fmt::Write as FmtWrite;

use super::style::{MASTER_PAGE, resolved, write_automatic_styles};
use crate::common::unit::format_cm;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::common::{Error, Result};
use crate::model::presentation::{Presentation, Slide};
use crate::model::shape::{Shape, ShapeKind};
use crate::model::text::{Hyperlink, Paragraph, TextBody, TextRun};
use crate::odf::constants::{OFFICE_VERSION, write_namespaces};
use crate::package::format::{Reference, RenderContext};

/// Name of the `draw:page` for slide `index`; slide-jump hrefs point here.
pub fn page_name(index: usize) -> String {
    format!("page{}", index + 1)
}

fn href<'a>(reference: Option<&'a Reference>, what: &str) -> Result<&'a str> {
    match reference {
        Some(Reference::Href(href)) => Ok(href),
        Some(Reference::Relationship(id)) => Err(Error::InvalidState(format!(
            "{what} resolved to relationship {id}, expected an href"
        ))),
        None => Err(Error::InvalidState(format!("{what} was never resolved"))),
    }
}

/// Generate `content.xml` from the indexed presentation.
pub fn content_xml(ctx: &RenderContext<'_>, presentation: &Presentation) -> Result<String> {
    let shape_count: usize = presentation
        .slides
        .iter()
        .flat_map(|s| s.shapes.iter())
        .map(Shape::count_nested)
        .sum();
    let mut xml = String::with_capacity(1024 + ctx.styles.len() * 256 + shape_count * 512);

    xml.push_str(XML_DECLARATION);
    xml.push_str("<office:document-content");
    write_namespaces(
        &mut xml,
        &["office", "style", "text", "draw", "fo", "xlink", "presentation", "svg"],
    );
    write!(xml, r#" office:version="{OFFICE_VERSION}">"#)?;

    write_automatic_styles(&mut xml, ctx.styles)?;

    xml.push_str("<office:body><office:presentation>");
    for (index, slide) in presentation.slides.iter().enumerate() {
        write_page(&mut xml, index, slide)?;
    }
    xml.push_str("</office:presentation></office:body></office:document-content>");
    Ok(xml)
}

fn write_page(xml: &mut String, index: usize, slide: &Slide) -> Result<()> {
    write!(xml, r#"<draw:page draw:name="{}""#, page_name(index))?;
    if let Some(style) = slide.resolved.background_style {
        write!(xml, r#" draw:style-name="{style}""#)?;
    }
    write!(xml, r#" draw:master-page-name="{MASTER_PAGE}">"#)?;
    for shape in &slide.shapes {
        write_shape(xml, shape)?;
    }
    xml.push_str("</draw:page>");
    Ok(())
}

fn write_link_open(xml: &mut String, tag: &str, href: &str, link: &Hyperlink) -> Result<()> {
    write!(
        xml,
        r#"<{tag} xlink:type="simple" xlink:href="{}""#,
        escape_xml(href)
    )?;
    if let Some(tooltip) = &link.tooltip {
        write!(xml, r#" office:title="{}""#, escape_xml(tooltip))?;
    }
    xml.push('>');
    Ok(())
}

fn write_shape(xml: &mut String, shape: &Shape) -> Result<()> {
    match &shape.hyperlink {
        Some(link) => {
            let target = href(shape.resolved.hyperlink.as_ref(), "shape hyperlink")?;
            write_link_open(xml, "draw:a", target, link)?;
            write_shape_body(xml, shape)?;
            xml.push_str("</draw:a>");
            Ok(())
        }
        None => write_shape_body(xml, shape),
    }
}

fn write_frame_attrs(xml: &mut String, shape: &Shape) -> Result<()> {
    let frame = &shape.frame;
    write!(
        xml,
        r#" draw:name="{}" draw:id="id{}" svg:x="{}" svg:y="{}" svg:width="{}" svg:height="{}""#,
        escape_xml(&shape.name),
        shape.resolved.drawing_id,
        format_cm(frame.x),
        format_cm(frame.y),
        format_cm(frame.cx),
        format_cm(frame.cy)
    )?;
    Ok(())
}

fn write_embed(xml: &mut String, tag: &str, target: &str) -> Result<()> {
    write!(
        xml,
        r#"<{tag} xlink:href="{}" xlink:type="simple" xlink:show="embed" xlink:actuate="onLoad"/>"#,
        escape_xml(target)
    )?;
    Ok(())
}

fn write_shape_body(xml: &mut String, shape: &Shape) -> Result<()> {
    match &shape.kind {
        ShapeKind::TextBox { body } => {
            xml.push_str("<draw:frame");
            write_frame_attrs(xml, shape)?;
            xml.push_str(r#" draw:layer="layout"><draw:text-box>"#);
            write_text_body(xml, body)?;
            xml.push_str("</draw:text-box></draw:frame>");
        }
        ShapeKind::AutoShape { geometry, body, .. } => {
            let style = resolved(shape.resolved.graphic_style, "graphic style")?;
            write!(xml, r#"<draw:custom-shape draw:style-name="{style}""#)?;
            write_frame_attrs(xml, shape)?;
            xml.push_str(r#" draw:layer="layout">"#);
            if let Some(body) = body {
                write_text_body(xml, body)?;
            }
            write!(
                xml,
                r#"<draw:enhanced-geometry svg:viewBox="0 0 21600 21600" draw:type="{}"/></draw:custom-shape>"#,
                geometry.odf_type()
            )?;
        }
        ShapeKind::Picture { description, .. } => {
            let target = href(shape.resolved.target.as_ref(), "picture")?;
            xml.push_str("<draw:frame");
            write_frame_attrs(xml, shape)?;
            xml.push_str(r#" draw:layer="layout">"#);
            write_embed(xml, "draw:image", target)?;
            if let Some(description) = description {
                write!(xml, "<svg:desc>{}</svg:desc>", escape_xml(description))?;
            }
            xml.push_str("</draw:frame>");
        }
        ShapeKind::Chart(_) => {
            let target = href(shape.resolved.target.as_ref(), "chart")?;
            xml.push_str("<draw:frame");
            write_frame_attrs(xml, shape)?;
            xml.push_str(r#" draw:layer="layout">"#);
            write_embed(xml, "draw:object", target)?;
            xml.push_str("</draw:frame>");
        }
        ShapeKind::Group(children) => {
            write!(
                xml,
                r#"<draw:g draw:name="{}" draw:id="id{}">"#,
                escape_xml(&shape.name),
                shape.resolved.drawing_id
            )?;
            for child in children {
                write_shape(xml, child)?;
            }
            xml.push_str("</draw:g>");
        }
    }
    Ok(())
}

fn write_text_body(xml: &mut String, body: &TextBody) -> Result<()> {
    for paragraph in &body.paragraphs {
        match (&paragraph.bullet, paragraph.resolved.list_style) {
            (Some(_), Some(list)) => {
                write!(xml, r#"<text:list text:style-name="{list}"><text:list-item>"#)?;
                write_paragraph(xml, paragraph)?;
                xml.push_str("</text:list-item></text:list>");
            }
            (Some(_), None) => {
                return Err(Error::InvalidState(
                    "bulleted paragraph has no list style".to_string(),
                ));
            }
            (None, _) => write_paragraph(xml, paragraph)?,
        }
    }
    Ok(())
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    let style = resolved(paragraph.resolved.style, "paragraph style")?;
    write!(xml, r#"<text:p text:style-name="{style}">"#)?;
    for run in &paragraph.runs {
        write_run(xml, run)?;
    }
    xml.push_str("</text:p>");
    Ok(())
}

fn write_run(xml: &mut String, run: &TextRun) -> Result<()> {
    let style = resolved(run.resolved.style, "text style")?;
    if let Some(link) = &run.hyperlink {
        let target = href(run.resolved.hyperlink.as_ref(), "run hyperlink")?;
        write_link_open(xml, "text:a", target, link)?;
    }
    write!(xml, r#"<text:span text:style-name="{style}">"#)?;
    write_text(xml, &run.text)?;
    xml.push_str("</text:span>");
    if run.hyperlink.is_some() {
        xml.push_str("</text:a>");
    }
    Ok(())
}

/// Write text content, turning line breaks, tabs and repeated spaces into
/// their ODF elements.
fn write_text(xml: &mut String, text: &str) -> Result<()> {
    fn flush(xml: &mut String, pending: &mut String) {
        xml.push_str(&escape_xml(pending));
        pending.clear();
    }

    let mut pending = String::new();
    let mut extra_spaces = 0u32;
    let mut after_space = false;

    for ch in text.chars() {
        if ch == ' ' {
            if after_space {
                extra_spaces += 1;
            } else {
                pending.push(' ');
            }
            after_space = true;
            continue;
        }

        after_space = false;
        if extra_spaces > 0 {
            flush(xml, &mut pending);
            write!(xml, r#"<text:s text:c="{extra_spaces}"/>"#)?;
            extra_spaces = 0;
        }
        match ch {
            '\n' => {
                flush(xml, &mut pending);
                xml.push_str("<text:line-break/>");
            }
            '\t' => {
                flush(xml, &mut pending);
                xml.push_str("<text:tab/>");
            }
            _ => pending.push(ch),
        }
    }

    flush(xml, &mut pending);
    if extra_spaces > 0 {
        write!(xml, r#"<text:s text:c="{extra_spaces}"/>"#)?;
    }
    Ok(())
}
