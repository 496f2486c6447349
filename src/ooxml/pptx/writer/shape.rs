//! Shape tree markup: `p:sp`, `p:pic`, `p:graphicFrame` and `p:grpSp`.
use std::fmt::Write as FmtWrite;

use super::{rel_id, style_payload, write_color, write_fill, write_line};
use crate::common::Result;
use crate::common::xml::{bool_attr, escape_xml};
use crate::model::shape::{Frame, Geometry, Shape, ShapeKind};
use crate::model::style::{BulletKind, GraphicStyle, Underline};
use crate::model::text::{Hyperlink, HyperlinkTarget, Paragraph, TextBody};
use crate::package::format::{Reference, RenderContext};

const CHART_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
const SLIDE_JUMP_ACTION: &str = "ppaction://hlinksldjump";

/// Write one shape, recursing into groups.
pub fn write_shape(xml: &mut String, ctx: &RenderContext<'_>, shape: &Shape) -> Result<()> {
    match &shape.kind {
        ShapeKind::TextBox { body } => {
            write_sp(xml, ctx, shape, Geometry::Rectangle, None, Some(body), true)
        }
        ShapeKind::AutoShape { geometry, body, .. } => {
            let style = style_payload(&ctx.styles.graphic, shape.resolved.graphic_style, "graphic")?;
            write_sp(xml, ctx, shape, *geometry, Some(style), body.as_ref(), false)
        }
        ShapeKind::Picture { description, .. } => write_pic(xml, shape, description.as_deref()),
        ShapeKind::Chart(_) => write_graphic_frame(xml, shape),
        ShapeKind::Group(children) => {
            xml.push_str("<p:grpSp><p:nvGrpSpPr>");
            write_c_nv_pr(xml, shape, None)?;
            xml.push_str("<p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr>");
            write_xfrm(xml, &shape.frame, true)?;
            xml.push_str("</p:grpSpPr>");
            for child in children {
                write_shape(xml, ctx, child)?;
            }
            xml.push_str("</p:grpSp>");
            Ok(())
        }
    }
}

/// `p:cNvPr` with the shape's drawing id and click action.
fn write_c_nv_pr(xml: &mut String, shape: &Shape, description: Option<&str>) -> Result<()> {
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="{}""#,
        shape.resolved.drawing_id,
        escape_xml(&shape.name)
    )?;
    if let Some(description) = description {
        write!(xml, r#" descr="{}""#, escape_xml(description))?;
    }
    match &shape.hyperlink {
        Some(link) => {
            xml.push('>');
            write_hlink_click(xml, link, shape.resolved.hyperlink.as_ref())?;
            xml.push_str("</p:cNvPr>");
        }
        None => xml.push_str("/>"),
    }
    Ok(())
}

fn write_hlink_click(xml: &mut String, link: &Hyperlink, reference: Option<&Reference>) -> Result<()> {
    let id = rel_id(reference, "hyperlink")?;
    write!(xml, r#"<a:hlinkClick r:id="{id}""#)?;
    if matches!(link.target, HyperlinkTarget::Slide(_)) {
        write!(xml, r#" action="{SLIDE_JUMP_ACTION}""#)?;
    }
    if let Some(tooltip) = &link.tooltip {
        write!(xml, r#" tooltip="{}""#, escape_xml(tooltip))?;
    }
    xml.push_str("/>");
    Ok(())
}

fn write_xfrm(xml: &mut String, frame: &Frame, group: bool) -> Result<()> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    if group {
        // Children are positioned in slide coordinates
        write!(
            xml,
            r#"<a:chOff x="{}" y="{}"/><a:chExt cx="{}" cy="{}"/>"#,
            frame.x, frame.y, frame.cx, frame.cy
        )?;
    }
    xml.push_str("</a:xfrm>");
    Ok(())
}

fn write_sp(
    xml: &mut String,
    ctx: &RenderContext<'_>,
    shape: &Shape,
    geometry: Geometry,
    style: Option<&GraphicStyle>,
    body: Option<&TextBody>,
    text_box: bool,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write_c_nv_pr(xml, shape, None)?;
    if text_box {
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    } else {
        xml.push_str("<p:cNvSpPr/>");
    }
    xml.push_str("<p:nvPr/></p:nvSpPr><p:spPr>");
    write_xfrm(xml, &shape.frame, false)?;
    write!(
        xml,
        r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#,
        geometry.ooxml_preset()
    )?;
    match style {
        Some(style) => {
            write_fill(xml, &style.fill)?;
            if let Some(border) = &style.border {
                write_line(xml, border)?;
            }
        }
        None => xml.push_str("<a:noFill/>"),
    }
    xml.push_str("</p:spPr>");

    if let Some(body) = body {
        write_text_body(xml, ctx, body, text_box)?;
    }
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_pic(xml: &mut String, shape: &Shape, description: Option<&str>) -> Result<()> {
    let embed = rel_id(shape.resolved.target.as_ref(), "picture")?;
    xml.push_str("<p:pic><p:nvPicPr>");
    write_c_nv_pr(xml, shape, description)?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
    write!(
        xml,
        r#"<p:blipFill><a:blip r:embed="{embed}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#
    )?;
    xml.push_str("<p:spPr>");
    write_xfrm(xml, &shape.frame, false)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
    Ok(())
}

fn write_graphic_frame(xml: &mut String, shape: &Shape) -> Result<()> {
    let chart = rel_id(shape.resolved.target.as_ref(), "chart")?;
    xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
    write_c_nv_pr(xml, shape, None)?;
    xml.push_str("<p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>");
    write!(
        xml,
        r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
        shape.frame.x, shape.frame.y, shape.frame.cx, shape.frame.cy
    )?;
    write!(
        xml,
        r#"<a:graphic><a:graphicData uri="{CHART_URI}"><c:chart xmlns:c="{CHART_URI}" r:id="{chart}"/></a:graphicData></a:graphic>"#
    )?;
    xml.push_str("</p:graphicFrame>");
    Ok(())
}

/// Write `p:txBody`. Run properties are written inline from the interned fonts.
pub fn write_text_body(
    xml: &mut String,
    ctx: &RenderContext<'_>,
    body: &TextBody,
    text_box: bool,
) -> Result<()> {
    xml.push_str("<p:txBody>");
    if text_box {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#);
    } else {
        xml.push_str(r#"<a:bodyPr rtlCol="0" anchor="ctr"/>"#);
    }
    xml.push_str("<a:lstStyle/>");

    if body.paragraphs.is_empty() {
        // A text body needs at least one paragraph
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }
    for paragraph in &body.paragraphs {
        write_paragraph(xml, ctx, paragraph)?;
    }
    xml.push_str("</p:txBody>");
    Ok(())
}

/// Percent in the 1000ths of a percent DrawingML uses.
fn pct_thousandths(percent: u32) -> u64 {
    u64::from(percent) * 1000
}

fn write_paragraph(xml: &mut String, ctx: &RenderContext<'_>, paragraph: &Paragraph) -> Result<()> {
    let style = style_payload(&ctx.styles.paragraph, paragraph.resolved.style, "paragraph")?;

    xml.push_str("<a:p>");
    write!(
        xml,
        r#"<a:pPr marL="{}" indent="{}" lvl="{}" algn="{}">"#,
        style.margin_left,
        style.indent,
        style.level,
        style.alignment.ooxml_value()
    )?;
    if let Some(spacing) = style.line_spacing {
        write!(
            xml,
            r#"<a:lnSpc><a:spcPct val="{}"/></a:lnSpc>"#,
            pct_thousandths(spacing)
        )?;
    }
    write!(
        xml,
        r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef><a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
        style.space_before, style.space_after
    )?;

    match paragraph.resolved.list_style {
        Some(id) => {
            let bullet = style_payload(&ctx.styles.list, Some(id), "list")?;
            if let Some(color) = bullet.color {
                xml.push_str("<a:buClr>");
                write_color(xml, color)?;
                xml.push_str("</a:buClr>");
            }
            write!(xml, r#"<a:buSzPct val="{}"/>"#, pct_thousandths(bullet.size_percent))?;
            if let Some(font) = &bullet.font {
                write!(xml, r#"<a:buFont typeface="{}"/>"#, escape_xml(font))?;
            }
            match &bullet.kind {
                BulletKind::Char(ch) => {
                    write!(xml, r#"<a:buChar char="{}"/>"#, escape_xml(&ch.to_string()))?
                }
                BulletKind::AutoNumber { scheme, start_at } => write!(
                    xml,
                    r#"<a:buAutoNum type="{}" startAt="{}"/>"#,
                    scheme.ooxml_value(),
                    start_at
                )?,
            }
        }
        None => xml.push_str("<a:buNone/>"),
    }
    xml.push_str("</a:pPr>");

    for run in &paragraph.runs {
        let font = style_payload(&ctx.styles.text, run.resolved.style, "text")?;
        write!(
            xml,
            r#"<a:r><a:rPr lang="en-US" sz="{}" b="{}" i="{}""#,
            font.size,
            bool_attr(font.bold),
            bool_attr(font.italic)
        )?;
        if font.underline != Underline::None {
            write!(xml, r#" u="{}""#, font.underline.ooxml_value())?;
        }
        if font.strikethrough {
            xml.push_str(r#" strike="sngStrike""#);
        }
        xml.push_str(r#" dirty="0"><a:solidFill>"#);
        write_color(xml, font.color)?;
        write!(
            xml,
            r#"</a:solidFill><a:latin typeface="{}"/>"#,
            escape_xml(&font.name)
        )?;
        if let Some(link) = &run.hyperlink {
            write_hlink_click(xml, link, run.resolved.hyperlink.as_ref())?;
        }
        write!(xml, "</a:rPr><a:t>{}</a:t></a:r>", escape_xml(&run.text))?;
    }
    xml.push_str("</a:p>");
    Ok(())
}
