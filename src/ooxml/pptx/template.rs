//! Fixed parts every presentation carries: one slide master, one blank
//! layout, one theme and the presentation-level property parts.
//!
//! These parts hold no model content, so they are written as constants. The
//! master is the only one with a cross-part reference and takes the id of its
//! layout relationship.
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::xml::XML_DECLARATION;
use crate::package::rel::RelId;

/// Namespace declarations shared by PresentationML parts.
pub(crate) const PML_NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// Group properties of an empty shape tree.
pub(crate) const EMPTY_TREE_HEAD: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

const COLOR_MAP: &str = r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#;

/// Generate the slide master, listing the single layout under `layout`.
pub fn slide_master_xml(layout: RelId) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sldMaster {PML_NAMESPACES}>")?;
    xml.push_str("<p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>");
    write!(xml, "<p:spTree>{EMPTY_TREE_HEAD}</p:spTree></p:cSld>")?;
    xml.push_str(COLOR_MAP);
    write!(
        xml,
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="{layout}"/></p:sldLayoutIdLst>"#
    )?;
    xml.push_str("<p:txStyles>");
    for tag in ["titleStyle", "bodyStyle", "otherStyle"] {
        write!(
            xml,
            r#"<p:{tag}><a:lvl1pPr><a:defRPr lang="en-US"/></a:lvl1pPr></p:{tag}>"#
        )?;
    }
    xml.push_str("</p:txStyles></p:sldMaster>");
    Ok(xml)
}

/// Generate the blank slide layout.
pub fn slide_layout_xml() -> Result<String> {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<p:sldLayout {PML_NAMESPACES} type="blank" preserve="1">"#)?;
    write!(xml, r#"<p:cSld name="Blank"><p:spTree>{EMPTY_TREE_HEAD}</p:spTree></p:cSld>"#)?;
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    Ok(xml)
}

pub fn pres_props_xml() -> Result<String> {
    Ok(format!(
        "{XML_DECLARATION}<p:presentationPr {PML_NAMESPACES}/>"
    ))
}

pub fn view_props_xml() -> Result<String> {
    Ok(format!(
        r#"{XML_DECLARATION}<p:viewPr {PML_NAMESPACES}><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#
    ))
}

pub fn table_styles_xml() -> Result<String> {
    Ok(format!(
        r#"{XML_DECLARATION}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    ))
}

const THEME_COLORS: [(&str, &str); 10] = [
    ("dk2", "44546A"),
    ("lt2", "E7E6E6"),
    ("accent1", "4472C4"),
    ("accent2", "ED7D31"),
    ("accent3", "A5A5A5"),
    ("accent4", "FFC000"),
    ("accent5", "5B9BD5"),
    ("accent6", "70AD47"),
    ("hlink", "0563C1"),
    ("folHlink", "954F72"),
];

/// Generate the Office theme.
pub fn theme_xml() -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#);

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (slot, rgb) in THEME_COLORS {
        write!(xml, r#"<a:{slot}><a:srgbClr val="{rgb}"/></a:{slot}>"#)?;
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    for (tag, face) in [("majorFont", "Calibri Light"), ("minorFont", "Calibri")] {
        write!(
            xml,
            r#"<a:{tag}><a:latin typeface="{face}"/><a:ea typeface=""/><a:cs typeface=""/></a:{tag}>"#
        )?;
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        write!(
            xml,
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#
        )?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::part::PartName;
    use crate::package::rel::{RelationshipAllocator, TargetMode};

    #[test]
    fn test_master_references_layout() {
        let mut allocator =
            RelationshipAllocator::new(PartName::new("/ppt/slideMasters/slideMaster1.xml").unwrap());
        let id = allocator
            .allocate("urn:layout", "../slideLayouts/slideLayout1.xml", TargetMode::Internal)
            .unwrap();

        let xml = slide_master_xml(id).unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.ends_with("</p:sldMaster>"));
    }

    #[test]
    fn test_theme_has_full_color_scheme() {
        let xml = theme_xml().unwrap();
        for slot in ["dk1", "lt1", "dk2", "lt2", "accent6", "folHlink"] {
            assert!(xml.contains(&format!("<a:{slot}>")), "missing {slot}");
        }
        assert_eq!(xml.matches("<a:ln ").count(), 3);
    }

    #[test]
    fn test_table_styles_default_guid() {
        let xml = table_styles_xml().unwrap();
        assert!(xml.contains(r#"def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}""#));
    }
}
