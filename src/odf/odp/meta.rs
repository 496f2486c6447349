//! `meta.xml`: generator, document properties and optional timestamps.
use std::fmt::Write as FmtWrite;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::common::Result;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::model::presentation::Presentation;
use crate::odf::constants::{OFFICE_VERSION, write_namespaces};
use crate::package::options::PackageOptions;

fn write_element(xml: &mut String, tag: &str, value: Option<&String>) -> Result<()> {
    if let Some(value) = value {
        write!(xml, "<{tag}>{}</{tag}>", escape_xml(value))?;
    }
    Ok(())
}

fn write_timestamp(xml: &mut String, tag: &str, value: Option<DateTime<Utc>>) -> Result<()> {
    if let Some(value) = value {
        write!(
            xml,
            "<{tag}>{}</{tag}>",
            value.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }
    Ok(())
}

pub fn meta_xml(presentation: &Presentation, options: &PackageOptions) -> Result<String> {
    let props = &presentation.properties;
    let mut xml = String::with_capacity(768);

    xml.push_str(XML_DECLARATION);
    xml.push_str("<office:document-meta");
    write_namespaces(&mut xml, &["office", "xlink", "dc", "meta"]);
    write!(xml, r#" office:version="{OFFICE_VERSION}"><office:meta>"#)?;

    write!(
        xml,
        "<meta:generator>{}</meta:generator>",
        escape_xml(&options.application)
    )?;
    write_element(
        &mut xml,
        "dc:title",
        props.title.as_ref().or(options.title_fallback.as_ref()),
    )?;
    write_element(&mut xml, "dc:subject", props.subject.as_ref())?;
    write_element(&mut xml, "dc:description", props.description.as_ref())?;
    if let Some(keywords) = &props.keywords {
        for keyword in keywords.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            write!(xml, "<meta:keyword>{}</meta:keyword>", escape_xml(keyword))?;
        }
    }
    write_element(&mut xml, "meta:initial-creator", props.creator.as_ref())?;
    write_element(&mut xml, "dc:creator", props.creator.as_ref())?;
    write_timestamp(&mut xml, "meta:creation-date", options.created)?;
    write_timestamp(&mut xml, "dc:date", options.modified)?;

    xml.push_str("</office:meta></office:document-meta>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_properties() {
        let mut presentation = Presentation::new().with_title("Roadmap");
        presentation.properties.keywords = Some("plans, 2025 ,".to_string());
        presentation.properties.creator = Some("Ops".to_string());

        let xml = meta_xml(&presentation, &PackageOptions::default()).unwrap();
        assert!(xml.contains("<meta:generator>deckpack/"));
        assert!(xml.contains("<dc:title>Roadmap</dc:title>"));
        assert!(xml.contains("<meta:keyword>plans</meta:keyword><meta:keyword>2025</meta:keyword><meta:initial-creator>Ops"));
        assert!(!xml.contains("meta:creation-date"));
        assert!(!xml.contains("<dc:date>"));
    }

    #[test]
    fn test_meta_timestamps_from_options() {
        let options = PackageOptions {
            created: "2024-03-01T10:00:00Z".parse().ok(),
            modified: "2024-03-02T08:30:00Z".parse().ok(),
            title_fallback: Some("Untitled".to_string()),
            ..PackageOptions::default()
        };

        let xml = meta_xml(&Presentation::new(), &options).unwrap();
        assert!(xml.contains("<dc:title>Untitled</dc:title>"));
        assert!(xml.contains("<meta:creation-date>2024-03-01T10:00:00Z</meta:creation-date>"));
        assert!(xml.contains("<dc:date>2024-03-02T08:30:00Z</dc:date>"));
    }
}
