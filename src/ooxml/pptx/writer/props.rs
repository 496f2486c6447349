//! Document property parts: `docProps/core.xml` and `docProps/app.xml`.
use std::fmt::Write as FmtWrite;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::common::Result;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::model::presentation::Presentation;
use crate::ooxml::constants::namespace;
use crate::package::options::PackageOptions;

/// Generate the core properties part. Timestamps are written only when the
/// options carry them.
pub fn core_props_xml(presentation: &Presentation, options: &PackageOptions) -> Result<String> {
    let props = &presentation.properties;
    let mut xml = String::with_capacity(768);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
        namespace::CORE_PROPERTIES,
        namespace::DC,
        namespace::DCTERMS,
        namespace::XSI
    )?;

    let title = props.title.as_ref().or(options.title_fallback.as_ref());
    for (tag, value) in [
        ("dc:title", title),
        ("dc:subject", props.subject.as_ref()),
        ("dc:creator", props.creator.as_ref()),
        ("cp:keywords", props.keywords.as_ref()),
        ("dc:description", props.description.as_ref()),
    ] {
        if let Some(value) = value {
            write!(xml, "<{tag}>{}</{tag}>", escape_xml(value))?;
        }
    }

    write_timestamp(&mut xml, "dcterms:created", options.created)?;
    write_timestamp(&mut xml, "dcterms:modified", options.modified)?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

fn write_timestamp(xml: &mut String, tag: &str, value: Option<DateTime<Utc>>) -> Result<()> {
    if let Some(value) = value {
        write!(
            xml,
            r#"<{tag} xsi:type="dcterms:W3CDTF">{}</{tag}>"#,
            value.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }
    Ok(())
}

/// Generate the extended (application) properties part.
pub fn app_props_xml(presentation: &Presentation, options: &PackageOptions) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<Properties xmlns="{}" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
        namespace::EXTENDED_PROPERTIES
    )?;
    write!(
        xml,
        "<Application>{}</Application>",
        escape_xml(&options.application)
    )?;
    write!(
        xml,
        "<PresentationFormat>On-screen Show</PresentationFormat><Slides>{}</Slides>",
        presentation.slides.len()
    )?;
    xml.push_str("</Properties>");
    Ok(xml)
}
