//! Embedded workbooks holding chart data.
//!
//! Each chart part links to a minimal XLSX package so the data stays
//! editable. The sheet layout is fixed and the chart markup refers to it:
//!
//! ```text
//!     |    A     |    B     |    C     |
//! ----+----------+----------+----------+
//!   1 |          | Series 1 | Series 2 |
//!   2 | Cat 1    |   10.0   |   15.0   |
//!   3 | Cat 2    |   20.0   |   25.0   |
//! ```
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::model::chart::{Chart, column_letter};
use crate::ooxml::constants::{content_type, namespace, relationship_type};
use crate::package::rel::RELATIONSHIPS_CONTENT_TYPE;
use crate::package::sink::{PackageSink, ZipSink};

pub const SHEET_NAME: &str = "Sheet1";

/// Generate the XLSX bytes for `chart`. Identical charts produce identical bytes.
pub fn generate_chart_workbook(chart: &Chart) -> Result<Vec<u8>> {
    let mut sink = ZipSink::in_memory();

    sink.add_part("[Content_Types].xml", content_types_xml()?.as_bytes())?;
    sink.add_part("_rels/.rels", root_rels_xml()?.as_bytes())?;
    sink.add_part("xl/workbook.xml", workbook_xml()?.as_bytes())?;
    sink.add_part("xl/_rels/workbook.xml.rels", workbook_rels_xml()?.as_bytes())?;
    sink.add_part("xl/worksheets/sheet1.xml", worksheet_xml(chart)?.as_bytes())?;
    sink.add_part("xl/styles.xml", styles_xml().as_bytes())?;

    sink.finish_to_bytes()
}

fn content_types_xml() -> Result<String> {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Types xmlns="{}">"#, namespace::CONTENT_TYPES)?;
    write!(
        xml,
        r#"<Default Extension="rels" ContentType="{RELATIONSHIPS_CONTENT_TYPE}"/><Default Extension="xml" ContentType="application/xml"/>"#
    )?;
    for (part, ct) in [
        ("/xl/workbook.xml", content_type::SML_SHEET_MAIN),
        ("/xl/worksheets/sheet1.xml", content_type::SML_WORKSHEET),
        ("/xl/styles.xml", content_type::SML_STYLES),
    ] {
        write!(xml, r#"<Override PartName="{part}" ContentType="{ct}"/>"#)?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

fn root_rels_xml() -> Result<String> {
    Ok(format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="xl/workbook.xml"/></Relationships>"#,
        namespace::OPC_RELATIONSHIPS,
        relationship_type::OFFICE_DOCUMENT
    ))
}

fn workbook_xml() -> Result<String> {
    Ok(format!(
        r#"{XML_DECLARATION}<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        namespace::SML,
        namespace::OFC_RELATIONSHIPS
    ))
}

fn workbook_rels_xml() -> Result<String> {
    Ok(format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="{}" Target="styles.xml"/></Relationships>"#,
        namespace::OPC_RELATIONSHIPS,
        relationship_type::WORKSHEET,
        relationship_type::STYLES
    ))
}

fn styles_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    xml.push_str(r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#);
    xml.push_str(r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#);
    xml.push_str(r#"<borders count="1"><border/></borders>"#);
    xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);
    xml.push_str(r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#);
    xml.push_str("</styleSheet>");
    xml
}

fn inline_str(xml: &mut String, cell: &str, text: &str) -> Result<()> {
    write!(
        xml,
        r#"<c r="{cell}" t="inlineStr"><is><t>{}</t></is></c>"#,
        escape_xml(text)
    )?;
    Ok(())
}

fn worksheet_xml(chart: &Chart) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<worksheet xmlns="{}"><sheetData>"#, namespace::SML)?;

    xml.push_str(r#"<row r="1">"#);
    for (col, series) in chart.series.iter().enumerate() {
        inline_str(&mut xml, &format!("{}1", column_letter(col + 1)), &series.name)?;
    }
    xml.push_str("</row>");

    for point in 0..chart.point_count() {
        let row = point + 2;
        write!(xml, r#"<row r="{row}">"#)?;
        if let Some(category) = chart.categories.get(point) {
            inline_str(&mut xml, &format!("A{row}"), category)?;
        }
        for (col, series) in chart.series.iter().enumerate() {
            if let Some(value) = series.values.get(point) {
                write!(xml, r#"<c r="{}{row}"><v>{value}</v></c>"#, column_letter(col + 1))?;
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::{ChartSeries, ChartType};
    use std::io::Read;

    fn sales_chart() -> Chart {
        Chart::new(
            ChartType::Column,
            vec!["Q1".to_string(), "Q2".to_string()],
            vec![
                ChartSeries::new("Sales", vec![100.0, 200.5]),
                ChartSeries::new("R&D", vec![50.0, 75.0]),
            ],
        )
    }

    #[test]
    fn test_worksheet_layout() {
        let xml = worksheet_xml(&sales_chart()).unwrap();
        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t>Sales</t></is></c>"#));
        assert!(xml.contains(r#"<c r="C1" t="inlineStr"><is><t>R&amp;D</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A3" t="inlineStr"><is><t>Q2</t></is></c>"#));
        assert!(xml.contains(r#"<c r="B3"><v>200.5</v></c>"#));
    }

    #[test]
    fn test_workbook_is_readable_zip() {
        let bytes = generate_chart_workbook(&sales_chart()).unwrap();
        assert_eq!(&bytes[0..4], &[0x50, 0x4B, 0x03, 0x04]);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains("Sales"));
    }

    #[test]
    fn test_workbook_bytes_are_deterministic() {
        let chart = sales_chart();
        assert_eq!(
            generate_chart_workbook(&chart).unwrap(),
            generate_chart_workbook(&chart).unwrap()
        );
    }
}
