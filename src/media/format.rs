//! Image format detection for picture payloads.
use phf::phf_map;

/// Image formats that can be embedded as picture parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Svg,
    Emf,
    Wmf,
}

static FORMATS_BY_MIME: phf::Map<&'static str, ImageFormat> = phf_map! {
    "image/png" => ImageFormat::Png,
    "image/jpeg" => ImageFormat::Jpeg,
    "image/jpg" => ImageFormat::Jpeg,
    "image/gif" => ImageFormat::Gif,
    "image/bmp" => ImageFormat::Bmp,
    "image/tiff" => ImageFormat::Tiff,
    "image/svg+xml" => ImageFormat::Svg,
    "image/x-emf" => ImageFormat::Emf,
    "image/emf" => ImageFormat::Emf,
    "image/x-wmf" => ImageFormat::Wmf,
    "image/wmf" => ImageFormat::Wmf,
};

static FORMATS_BY_EXTENSION: phf::Map<&'static str, ImageFormat> = phf_map! {
    "png" => ImageFormat::Png,
    "jpeg" => ImageFormat::Jpeg,
    "jpg" => ImageFormat::Jpeg,
    "gif" => ImageFormat::Gif,
    "bmp" => ImageFormat::Bmp,
    "tif" => ImageFormat::Tiff,
    "tiff" => ImageFormat::Tiff,
    "svg" => ImageFormat::Svg,
    "emf" => ImageFormat::Emf,
    "wmf" => ImageFormat::Wmf,
};

impl ImageFormat {
    /// Get the MIME type for this image format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Svg => "image/svg+xml",
            Self::Emf => "image/x-emf",
            Self::Wmf => "image/x-wmf",
        }
    }

    /// Get the file extension for this image format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Svg => "svg",
            Self::Emf => "emf",
            Self::Wmf => "wmf",
        }
    }

    /// Look up a format by MIME type (case-insensitive).
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        FORMATS_BY_MIME
            .get(mime.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    /// Look up a format by file extension, with or without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        FORMATS_BY_EXTENSION.get(ext.as_str()).copied()
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF8
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // BM
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF, little- or big-endian
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        // Placeable WMF
        if bytes.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
            return Some(Self::Wmf);
        }

        // EMF header record with the " EMF" signature at offset 40
        if bytes.len() >= 44 && bytes.starts_with(&[0x01, 0x00, 0x00, 0x00]) && &bytes[40..44] == b" EMF"
        {
            return Some(Self::Emf);
        }

        let head = &bytes[..bytes.len().min(512)];
        let head = String::from_utf8_lossy(head);
        let trimmed = head.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && trimmed.contains("<svg")) {
            return Some(Self::Svg);
        }

        None
    }
}
