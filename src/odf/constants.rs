//! ODF MIME types, namespaces and fixed entry names.

/// ODF version written to every document root and to the manifest.
pub const OFFICE_VERSION: &str = "1.3";

/// MIME type for OpenDocument Presentation (.odp)
pub const ODF_PRESENTATION: &str = "application/vnd.oasis.opendocument.presentation";

/// MIME type for an embedded OpenDocument Chart object
pub const ODF_CHART: &str = "application/vnd.oasis.opendocument.chart";

/// Media type of every XML stream inside the package
pub const TEXT_XML: &str = "text/xml";

/// Stored, uncompressed, first entry of the archive
pub const MIMETYPE_ENTRY: &str = "mimetype";
pub const MANIFEST_ENTRY: &str = "META-INF/manifest.xml";

pub mod namespace {
    pub const OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
    pub const STYLE: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
    pub const TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
    pub const TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
    pub const DRAW: &str = "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0";
    pub const FO: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
    pub const XLINK: &str = "http://www.w3.org/1999/xlink";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const META: &str = "urn:oasis:names:tc:opendocument:xmlns:meta:1.0";
    pub const PRESENTATION: &str = "urn:oasis:names:tc:opendocument:xmlns:presentation:1.0";
    pub const SVG: &str = "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0";
    pub const CHART: &str = "urn:oasis:names:tc:opendocument:xmlns:chart:1.0";
    pub const MANIFEST: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";
}

/// Write `xmlns:prefix="uri"` declarations for each prefix, in order.
pub fn write_namespaces(xml: &mut String, prefixes: &[&str]) {
    for prefix in prefixes {
        let uri = match *prefix {
            "office" => namespace::OFFICE,
            "style" => namespace::STYLE,
            "text" => namespace::TEXT,
            "table" => namespace::TABLE,
            "draw" => namespace::DRAW,
            "fo" => namespace::FO,
            "xlink" => namespace::XLINK,
            "dc" => namespace::DC,
            "meta" => namespace::META,
            "presentation" => namespace::PRESENTATION,
            "svg" => namespace::SVG,
            "chart" => namespace::CHART,
            "manifest" => namespace::MANIFEST,
            _ => continue,
        };
        xml.push_str(" xmlns:");
        xml.push_str(prefix);
        xml.push_str("=\"");
        xml.push_str(uri);
        xml.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_namespaces() {
        let mut xml = String::from("<root");
        write_namespaces(&mut xml, &["office", "unknown", "svg"]);
        assert_eq!(
            xml,
            format!(
                r#"<root xmlns:office="{}" xmlns:svg="{}""#,
                namespace::OFFICE,
                namespace::SVG
            )
        );
    }
}
