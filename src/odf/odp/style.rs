//! Style markup generated from the style registry.
//!
//! Every interned style becomes one automatic style in `content.xml`, named
//! after its id (`T1`, `P2`, `gr1`, `dp1`) and written in first-seen order.
//! Gradients and dash patterns are named objects and live in `styles.xml`.
use std::fmt::Write as FmtWrite;

use crate::common::unit::{format_centipoints, format_cm};
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::common::{Error, Result};
use crate::model::presentation::SlideSize;
use crate::model::style::{
    Border, Bullet, BulletKind, Color, Fill, Font, GraphicStyle, LineStyle, ParagraphStyle,
    Underline,
};
use crate::odf::constants::{OFFICE_VERSION, write_namespaces};
use crate::package::style_registry::{StyleEntry, StyleId, StyleRegistry};

/// Name of the master page every slide uses.
pub const MASTER_PAGE: &str = "Default";
const PAGE_LAYOUT: &str = "PM1";

/// The resolved style id of a node, or `InvalidState` if indexing skipped it.
pub(crate) fn resolved(id: Option<StyleId>, what: &str) -> Result<StyleId> {
    id.ok_or_else(|| Error::InvalidState(format!("{what} was never interned")))
}

/// Name of the gradient definition owned by the style `id`.
pub fn gradient_name(id: StyleId) -> String {
    format!("Gradient_{id}")
}

fn color(c: Color) -> String {
    format!("#{}", c.to_hex().to_ascii_lowercase())
}

/// ODF measures gradient angles counterclockwise from a top-to-bottom run.
fn odf_angle(angle: u16) -> u16 {
    (450 - angle % 360) % 360
}

fn font_family(name: &str) -> String {
    if name.contains(' ') {
        escape_xml(&format!("'{name}'"))
    } else {
        escape_xml(name)
    }
}

fn write_fill(xml: &mut String, fill: &Fill, owner: StyleId) -> Result<()> {
    match fill {
        Fill::None => xml.push_str(r#" draw:fill="none""#),
        Fill::Solid(c) => write!(xml, r#" draw:fill="solid" draw:fill-color="{}""#, color(*c))?,
        Fill::Gradient { .. } => write!(
            xml,
            r#" draw:fill="gradient" draw:fill-gradient-name="{}""#,
            gradient_name(owner)
        )?,
    }
    Ok(())
}

fn write_stroke(xml: &mut String, border: Option<&Border>) -> Result<()> {
    let Some(border) = border.filter(|b| b.style != LineStyle::None) else {
        xml.push_str(r#" draw:stroke="none""#);
        return Ok(());
    };

    match border.style.odf_dash_name() {
        Some(dash) => write!(xml, r#" draw:stroke="dash" draw:stroke-dash="{dash}""#)?,
        None => xml.push_str(r#" draw:stroke="solid""#),
    }
    write!(
        xml,
        r#" svg:stroke-width="{}" svg:stroke-color="{}""#,
        format_cm(border.width),
        color(border.color)
    )?;
    Ok(())
}

fn write_drawing_page_style(xml: &mut String, entry: &StyleEntry<Fill>) -> Result<()> {
    write!(
        xml,
        r#"<style:style style:name="{}" style:family="{}"><style:drawing-page-properties presentation:background-visible="true" presentation:background-objects-visible="true""#,
        entry.id,
        entry.id.family.odf_family()
    )?;
    write_fill(xml, &entry.payload, entry.id)?;
    xml.push_str("/></style:style>");
    Ok(())
}

fn write_graphic_style(xml: &mut String, entry: &StyleEntry<GraphicStyle>) -> Result<()> {
    write!(
        xml,
        r#"<style:style style:name="{}" style:family="{}"><style:graphic-properties"#,
        entry.id,
        entry.id.family.odf_family()
    )?;
    write_fill(xml, &entry.payload.fill, entry.id)?;
    write_stroke(xml, entry.payload.border.as_ref())?;
    xml.push_str("/></style:style>");
    Ok(())
}

fn write_paragraph_style(xml: &mut String, entry: &StyleEntry<ParagraphStyle>) -> Result<()> {
    let style = &entry.payload;
    write!(
        xml,
        r#"<style:style style:name="{}" style:family="{}"><style:paragraph-properties fo:text-align="{}""#,
        entry.id,
        entry.id.family.odf_family(),
        style.alignment.odf_value()
    )?;
    write!(
        xml,
        r#" fo:margin-left="{}" fo:text-indent="{}" fo:margin-top="{}" fo:margin-bottom="{}""#,
        format_cm(style.margin_left),
        format_cm(style.indent),
        format_centipoints(style.space_before),
        format_centipoints(style.space_after)
    )?;
    if let Some(spacing) = style.line_spacing {
        write!(xml, r#" fo:line-height="{spacing}%""#)?;
    }
    xml.push_str("/></style:style>");
    Ok(())
}

fn write_text_properties(xml: &mut String, font: &Font) -> Result<()> {
    write!(
        xml,
        r#"<style:text-properties fo:font-family="{}" fo:font-size="{}" fo:font-weight="{}" fo:font-style="{}""#,
        font_family(&font.name),
        format_centipoints(font.size),
        if font.bold { "bold" } else { "normal" },
        if font.italic { "italic" } else { "normal" }
    )?;
    match font.underline {
        Underline::None => xml.push_str(r#" style:text-underline-style="none""#),
        Underline::Single => xml.push_str(
            r#" style:text-underline-style="solid" style:text-underline-width="auto" style:text-underline-color="font-color""#,
        ),
        Underline::Double => xml.push_str(
            r#" style:text-underline-style="solid" style:text-underline-type="double" style:text-underline-width="auto" style:text-underline-color="font-color""#,
        ),
    }
    write!(
        xml,
        r#" style:text-line-through-style="{}" fo:color="{}"/>"#,
        if font.strikethrough { "solid" } else { "none" },
        color(font.color)
    )?;
    Ok(())
}

fn write_text_style(xml: &mut String, entry: &StyleEntry<Font>) -> Result<()> {
    write!(
        xml,
        r#"<style:style style:name="{}" style:family="{}">"#,
        entry.id,
        entry.id.family.odf_family()
    )?;
    write_text_properties(xml, &entry.payload)?;
    xml.push_str("</style:style>");
    Ok(())
}

fn write_list_style(xml: &mut String, entry: &StyleEntry<Bullet>) -> Result<()> {
    let bullet = &entry.payload;
    write!(xml, r#"<text:list-style style:name="{}">"#, entry.id)?;

    let tag = match &bullet.kind {
        BulletKind::Char(ch) => {
            write!(
                xml,
                r#"<text:list-level-style-bullet text:level="1" text:bullet-char="{}""#,
                escape_xml(&ch.to_string())
            )?;
            "text:list-level-style-bullet"
        }
        BulletKind::AutoNumber { scheme, start_at } => {
            let (format, suffix) = scheme.odf_format();
            write!(
                xml,
                r#"<text:list-level-style-number text:level="1" style:num-format="{format}" style:num-suffix="{suffix}" text:start-value="{start_at}""#
            )?;
            "text:list-level-style-number"
        }
    };
    write!(
        xml,
        r#" text:bullet-relative-size="{}%"><style:list-level-properties text:min-label-width="0.6cm"/>"#,
        bullet.size_percent
    )?;

    if bullet.font.is_some() || bullet.color.is_some() {
        xml.push_str("<style:text-properties");
        if let Some(font) = &bullet.font {
            write!(xml, r#" fo:font-family="{}""#, font_family(font))?;
        }
        if let Some(c) = bullet.color {
            write!(xml, r#" fo:color="{}""#, color(c))?;
        }
        xml.push_str("/>");
    }
    write!(xml, "</{tag}></text:list-style>")?;
    Ok(())
}

/// Write `office:automatic-styles` for `content.xml`.
pub fn write_automatic_styles(xml: &mut String, styles: &StyleRegistry) -> Result<()> {
    xml.push_str("<office:automatic-styles>");
    for entry in styles.drawing_page.entries() {
        write_drawing_page_style(xml, entry)?;
    }
    for entry in styles.graphic.entries() {
        write_graphic_style(xml, entry)?;
    }
    for entry in styles.paragraph.entries() {
        write_paragraph_style(xml, entry)?;
    }
    for entry in styles.text.entries() {
        write_text_style(xml, entry)?;
    }
    for entry in styles.list.entries() {
        write_list_style(xml, entry)?;
    }
    xml.push_str("</office:automatic-styles>");
    Ok(())
}

fn write_gradient(xml: &mut String, owner: StyleId, fill: &Fill) -> Result<()> {
    if let Fill::Gradient { start, end, angle } = fill {
        write!(
            xml,
            r#"<draw:gradient draw:name="{}" draw:style="linear" draw:start-color="{}" draw:end-color="{}" draw:start-intensity="100%" draw:end-intensity="100%" draw:angle="{}deg" draw:border="0%"/>"#,
            gradient_name(owner),
            color(*start),
            color(*end),
            odf_angle(*angle)
        )?;
    }
    Ok(())
}

/// Generate `styles.xml`: named gradients and dashes, the page layout and the
/// master page.
pub fn styles_xml(styles: &StyleRegistry, size: SlideSize) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<office:document-styles");
    write_namespaces(
        &mut xml,
        &["office", "style", "text", "draw", "fo", "svg", "presentation"],
    );
    write!(xml, r#" office:version="{OFFICE_VERSION}">"#)?;

    xml.push_str("<office:styles>");
    for entry in styles.drawing_page.entries() {
        write_gradient(&mut xml, entry.id, &entry.payload)?;
    }
    for entry in styles.graphic.entries() {
        write_gradient(&mut xml, entry.id, &entry.payload.fill)?;
    }
    xml.push_str(r#"<draw:stroke-dash draw:name="Dash" draw:style="rect" draw:dots1="1" draw:dots1-length="0.2cm" draw:distance="0.1cm"/>"#);
    xml.push_str(r#"<draw:stroke-dash draw:name="Dot" draw:style="round" draw:dots1="1" draw:dots1-length="0.02cm" draw:distance="0.05cm"/>"#);
    xml.push_str(r#"<style:default-style style:family="graphic"><style:graphic-properties draw:fill="none" draw:stroke="none"/></style:default-style>"#);
    xml.push_str("</office:styles>");

    write!(
        xml,
        r#"<office:automatic-styles><style:page-layout style:name="{PAGE_LAYOUT}"><style:page-layout-properties fo:margin-top="0cm" fo:margin-bottom="0cm" fo:margin-left="0cm" fo:margin-right="0cm" fo:page-width="{}" fo:page-height="{}" style:print-orientation="{}"/></style:page-layout></office:automatic-styles>"#,
        format_cm(size.cx),
        format_cm(size.cy),
        if size.cx >= size.cy { "landscape" } else { "portrait" }
    )?;
    write!(
        xml,
        r#"<office:master-styles><style:master-page style:name="{MASTER_PAGE}" style:page-layout-name="{PAGE_LAYOUT}"/></office:master-styles>"#
    )?;
    xml.push_str("</office:document-styles>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::{Alignment, NumberScheme};

    #[test]
    fn test_gradient_angle() {
        assert_eq!(odf_angle(0), 90);
        assert_eq!(odf_angle(90), 0);
        assert_eq!(odf_angle(180), 270);
        assert_eq!(odf_angle(450), 0);
    }

    #[test]
    fn test_automatic_styles_in_first_seen_order() {
        let mut styles = StyleRegistry::new();
        styles.text.intern(&Font::new("Times New Roman", 12.0).bold(true)).unwrap();
        styles.text.intern(&Font::default().underline(Underline::Single)).unwrap();
        styles
            .paragraph
            .intern(&ParagraphStyle {
                alignment: Alignment::Center,
                space_before: 600,
                line_spacing: Some(150),
                ..ParagraphStyle::default()
            })
            .unwrap();

        let mut xml = String::new();
        write_automatic_styles(&mut xml, &styles).unwrap();

        let t1 = xml.find(r#"style:name="T1""#).unwrap();
        let t2 = xml.find(r#"style:name="T2""#).unwrap();
        assert!(t1 < t2);
        assert!(xml.contains(r#"fo:font-family="&apos;Times New Roman&apos;" fo:font-size="12pt" fo:font-weight="bold""#));
        assert!(xml.contains(r#"style:text-underline-style="solid""#));
        assert!(xml.contains(
            r#"<style:paragraph-properties fo:text-align="center" fo:margin-left="0.000cm" fo:text-indent="0.000cm" fo:margin-top="6pt" fo:margin-bottom="0pt" fo:line-height="150%"/>"#
        ));
    }

    #[test]
    fn test_list_styles() {
        let mut styles = StyleRegistry::new();
        let mut bullet = Bullet::char('•');
        bullet.color = Some(Color::rgb(0xFF, 0, 0));
        styles.list.intern(&bullet).unwrap();
        styles
            .list
            .intern(&Bullet::numbered(NumberScheme::AlphaLowerParen, 3))
            .unwrap();

        let mut xml = String::new();
        write_automatic_styles(&mut xml, &styles).unwrap();
        assert!(xml.contains(r#"<text:list-style style:name="L1"><text:list-level-style-bullet text:level="1" text:bullet-char="•" text:bullet-relative-size="100%">"#));
        assert!(xml.contains(r##"<style:text-properties fo:color="#ff0000"/></text:list-level-style-bullet>"##));
        assert!(xml.contains(r#"style:num-format="a" style:num-suffix=")" text:start-value="3""#));
    }

    #[test]
    fn test_graphic_fill_and_stroke() {
        let mut styles = StyleRegistry::new();
        styles
            .graphic
            .intern(&GraphicStyle {
                fill: Fill::Gradient {
                    start: Color::WHITE,
                    end: Color::BLACK,
                    angle: 90,
                },
                border: Some(Border {
                    style: LineStyle::Dash,
                    ..Border::default()
                }),
            })
            .unwrap();

        let mut content = String::new();
        write_automatic_styles(&mut content, &styles).unwrap();
        assert!(content.contains(r#"draw:fill="gradient" draw:fill-gradient-name="Gradient_gr1""#));
        assert!(content.contains(r#"draw:stroke="dash" draw:stroke-dash="Dash" svg:stroke-width="0.035cm""#));

        let xml = styles_xml(&styles, SlideSize::default()).unwrap();
        assert!(xml.contains(r##"<draw:gradient draw:name="Gradient_gr1" draw:style="linear" draw:start-color="#ffffff" draw:end-color="#000000""##));
        assert!(xml.contains(r#"draw:angle="0deg""#));
        assert!(xml.contains(r#"fo:page-width="33.867cm" fo:page-height="19.050cm" style:print-orientation="landscape""#));
    }

    #[test]
    fn test_missing_style_is_invalid_state() {
        assert!(matches!(resolved(None, "text style"), Err(Error::InvalidState(_))));
    }
}
