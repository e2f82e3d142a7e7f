//! Rendered map output: format selection, file naming and encoding

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// Format name not recognized
    UnknownFormat(String),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::UnknownFormat(name) => {
                write!(f, "unknown output format '{}' (expected png, jpeg or bmp)", name)
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::UnknownFormat(_) => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Encodings the rendered map can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }

    /// Whether the encoding keeps the alpha channel.
    pub fn has_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    /// Case-insensitive; `jpg` is accepted for JPEG.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            _ => Err(OutputError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
        };
        f.write_str(name)
    }
}

/// Default output location: the source path with `.out` appended.
///
/// The suffix is appended, not substituted, so `maps/arena.png` renders to
/// `maps/arena.png.out`.
pub fn default_output_path(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(".out");
    PathBuf::from(path)
}

/// Encode `image` to `path` in `format`.
///
/// Parent directories are created as needed. The format is explicit and never
/// guessed from the file extension; formats without alpha get RGB data.
pub fn save_image(image: &RgbaImage, path: &Path, format: OutputFormat) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if format.has_alpha() {
        image.save_with_format(path, format.image_format())?;
    } else {
        DynamicImage::ImageRgba8(image.clone()).to_rgb8().save_with_format(path, format.image_format())?;
    }
    Ok(())
}
