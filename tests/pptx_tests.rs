mod common;

use common::fixtures::*;
use common::{TestResult, attribute_values, build_pptx, build_with};
use deckpack::Error;
use deckpack::media::FilesystemResourceProvider;
use deckpack::model::{MediaSource, Presentation, Shape, Slide};
use deckpack::ooxml::Pptx;
use deckpack::package::{AssemblerState, MemorySink, PackageAssembler, PackageOptions};

#[test]
fn test_output_is_byte_identical() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let first = build_pptx(&mut full_deck())?;
    let second = build_pptx(&mut full_deck())?;
    assert_eq!(first.bytes, second.bytes);
    Ok(())
}

#[test]
fn test_shared_image_stored_once() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut package = build_pptx(&mut deck_with_shared_logo())?;
    let media: Vec<String> = package
        .entry_names()?
        .into_iter()
        .filter(|name| name.starts_with("ppt/media/"))
        .collect();
    assert_eq!(media, vec!["ppt/media/image1.png".to_string()]);

    let slide1 = package.read_str("ppt/slides/_rels/slide1.xml.rels")?;
    let slide2 = package.read_str("ppt/slides/_rels/slide2.xml.rels")?;
    let image_rels = |xml: &str| xml.matches("/relationships/image\"").count();
    assert_eq!(image_rels(&slide1), 2);
    assert_eq!(image_rels(&slide2), 1);
    assert_eq!(slide1.matches(r#"Target="../media/image1.png""#).count(), 2);
    Ok(())
}

#[test]
fn test_every_slide_reference_resolves() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut package = build_pptx(&mut full_deck())?;
    for slide in 1..=2 {
        let xml = package.read_str(&format!("ppt/slides/slide{slide}.xml"))?;
        let rels = package.read_str(&format!("ppt/slides/_rels/slide{slide}.xml.rels"))?;
        let declared = attribute_values(&rels, "Id");

        let mut used = attribute_values(&xml, "r:id");
        used.extend(attribute_values(&xml, "r:embed"));
        assert!(!used.is_empty());
        for id in used {
            assert!(declared.contains(&id), "slide{slide} uses {id}, not in {declared:?}");
        }
    }

    let presentation = package.read_str("ppt/presentation.xml")?;
    let rels = package.read_str("ppt/_rels/presentation.xml.rels")?;
    let declared = attribute_values(&rels, "Id");
    for id in attribute_values(&presentation, "r:id") {
        assert!(declared.contains(&id));
    }
    Ok(())
}

#[test]
fn test_content_types_cover_every_entry() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut package = build_pptx(&mut full_deck())?;
    let names = package.entry_names()?;
    assert_eq!(names[0], "[Content_Types].xml");

    let content_types = package.read_str("[Content_Types].xml")?;
    let defaults = attribute_values(&content_types, "Extension");
    let overrides = attribute_values(&content_types, "PartName");
    for name in names.iter().skip(1) {
        let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
        assert!(
            overrides.contains(&format!("/{name}")) || defaults.iter().any(|d| d == ext),
            "{name} has no content type"
        );
    }
    assert!(names.contains(&"ppt/embeddings/Microsoft_Excel_Worksheet3.xlsx".to_string()));
    Ok(())
}

#[test]
fn test_path_resources_from_disk() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("logo.png"), png_bytes())?;

    let mut presentation = Presentation::new();
    presentation.add_slide(Slide::new(vec![
        Shape::picture("A", FRAME, MediaSource::Path("logo.png".to_string())),
        Shape::picture("B", FRAME, MediaSource::Path("logo.png".to_string())),
    ]));

    let mut sink = MemorySink::new();
    let mut assembler = PackageAssembler::new(Pptx::new())
        .with_provider(Box::new(FilesystemResourceProvider::new(dir.path())));
    assembler.assemble(&mut presentation, &mut sink)?;

    assert_eq!(assembler.resources().len(), 1);
    assert_eq!(sink.get("ppt/media/image1.png"), Some(png_bytes().as_slice()));
    Ok(())
}

#[test]
fn test_missing_resource_fails_before_output() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let mut presentation = Presentation::new();
    presentation.add_slide(Slide::new(vec![Shape::picture(
        "Missing",
        FRAME,
        MediaSource::Path("missing.png".to_string()),
    )]));

    let mut sink = MemorySink::new();
    let mut assembler = PackageAssembler::new(Pptx::new())
        .with_provider(Box::new(FilesystemResourceProvider::new(dir.path())));
    let err = assembler.assemble(&mut presentation, &mut sink).unwrap_err();

    assert!(matches!(err, Error::UnreadableResource { .. }));
    assert_eq!(assembler.state(), AssemblerState::Failed);
    assert!(sink.is_empty());
}

#[test]
fn test_yaml_options_reach_document_properties() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let options = PackageOptions::from_yaml_str(
        "application: Board Reports\ncreated: 2024-06-30T18:00:00Z\ncompression: stored\n",
    )?;
    let mut package = build_with(Pptx::new(), &mut full_deck(), options)?;

    let app = package.read_str("docProps/app.xml")?;
    assert!(app.contains("<Application>Board Reports</Application>"));
    assert!(app.contains("<Slides>2</Slides>"));

    let core = package.read_str("docProps/core.xml")?;
    assert!(core.contains("<dc:title>Quarterly review</dc:title>"));
    assert!(core.contains(">2024-06-30T18:00:00Z</dcterms:created>"));
    assert!(!core.contains("dcterms:modified"));

    assert_eq!(package.compression(1)?, zip::CompressionMethod::Stored);
    Ok(())
}
