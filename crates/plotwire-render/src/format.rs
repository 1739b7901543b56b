use crate::{RenderError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Screenshot type token understood by the browser driver.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Image(ImageFormat),
}

impl OutputFormat {
    pub const PNG: OutputFormat = OutputFormat::Image(ImageFormat::Png);
    pub const JPEG: OutputFormat = OutputFormat::Image(ImageFormat::Jpeg);

    /// Infers the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("htm" | "html") => Ok(OutputFormat::Html),
            Some("png") => Ok(OutputFormat::PNG),
            Some("jpg" | "jpeg") => Ok(OutputFormat::JPEG),
            _ => Err(RenderError::UnknownExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Image(image) => image.mime_type(),
        }
    }
}

/// Accepts short tokens (`png`, `:png`) and mime types (`image/png`).
impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let token = token.strip_prefix(':').unwrap_or(token);
        match token.to_ascii_lowercase().as_str() {
            "html" | "text/html" => Ok(OutputFormat::Html),
            "png" | "image/png" => Ok(OutputFormat::PNG),
            "jpg" | "jpeg" | "image/jpeg" => Ok(OutputFormat::JPEG),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_and_mime_types_parse_alike() {
        for s in ["png", ":png", "image/png", "PNG"] {
            assert_eq!(s.parse::<OutputFormat>().unwrap(), OutputFormat::PNG);
        }
        for s in ["jpeg", "jpg", ":jpeg", "image/jpeg"] {
            assert_eq!(s.parse::<OutputFormat>().unwrap(), OutputFormat::JPEG);
        }
        for s in ["html", ":html", "text/html"] {
            assert_eq!(s.parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let err = "image/gif".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported mime type to render: image/gif");
    }

    #[test]
    fn extensions_map_to_formats() {
        let cases = [
            ("plot.htm", OutputFormat::Html),
            ("plot.HTML", OutputFormat::Html),
            ("plot.png", OutputFormat::PNG),
            ("plot.jpg", OutputFormat::JPEG),
            ("dir/plot.jpeg", OutputFormat::JPEG),
        ];
        for (path, expected) in cases {
            assert_eq!(OutputFormat::from_path(Path::new(path)).unwrap(), expected);
        }
    }

    #[test]
    fn unknown_extensions_name_the_path() {
        for path in ["x.unknown", "no_extension"] {
            let err = OutputFormat::from_path(Path::new(path)).unwrap_err();
            assert!(matches!(err, RenderError::UnknownExtension { .. }));
            assert!(err.to_string().contains(path));
        }
    }
}
