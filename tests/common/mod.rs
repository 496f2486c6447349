#![allow(dead_code)]

pub mod fixtures;

use std::io::{Cursor, Read};

use deckpack::model::Presentation;
use deckpack::odf::Odp;
use deckpack::ooxml::Pptx;
use deckpack::package::{PackageAssembler, PackageFormat, PackageOptions, ZipSink};
use zip::{CompressionMethod, ZipArchive};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A generated package read back through the zip crate
pub struct GeneratedPackage {
    pub bytes: Vec<u8>,
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl GeneratedPackage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let archive = ZipArchive::new(Cursor::new(bytes.clone()))?;
        Ok(Self { bytes, archive })
    }

    /// Entry names in archive order
    pub fn entry_names(&mut self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            names.push(self.archive.by_index(i)?.name().to_string());
        }
        Ok(names)
    }

    pub fn read_str(&mut self, name: &str) -> Result<String, Box<dyn std::error::Error>> {
        let mut text = String::new();
        self.archive.by_name(name)?.read_to_string(&mut text)?;
        Ok(text)
    }

    pub fn compression(&mut self, index: usize) -> Result<CompressionMethod, Box<dyn std::error::Error>> {
        Ok(self.archive.by_index(index)?.compression())
    }
}

pub fn build_with(
    format: impl PackageFormat + 'static,
    presentation: &mut Presentation,
    options: PackageOptions,
) -> Result<GeneratedPackage, Box<dyn std::error::Error>> {
    let mut sink = ZipSink::in_memory();
    PackageAssembler::new(format)
        .with_options(options)
        .assemble(presentation, &mut sink)?;
    GeneratedPackage::from_bytes(sink.finish_to_bytes()?)
}

pub fn build_pptx(presentation: &mut Presentation) -> Result<GeneratedPackage, Box<dyn std::error::Error>> {
    build_with(Pptx::new(), presentation, PackageOptions::default())
}

pub fn build_odp(presentation: &mut Presentation) -> Result<GeneratedPackage, Box<dyn std::error::Error>> {
    build_with(Odp::new(), presentation, PackageOptions::default())
}

/// Every value of `attr` in `xml`, in document order
pub fn attribute_values(xml: &str, attr: &str) -> Vec<String> {
    let needle = format!("{attr}=\"");
    xml.match_indices(&needle)
        .filter_map(|(i, _)| {
            xml[i + needle.len()..]
                .split_once('"')
                .map(|(value, _)| value.to_string())
        })
        .collect()
}
