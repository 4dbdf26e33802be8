//! Image serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use lumen_renderer::ImageBuffer;

/// Supported output containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text PPM (P3)
    Ppm,
    Png,
}

impl OutputFormat {
    /// Pick a format from the file extension. Anything but `.png` is PPM.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Ppm,
        }
    }
}

/// Write the image as plain-text PPM: a `P3` header, then one `r g b` line
/// per pixel in row-major order.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in &image.pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save the image to `path`, choosing the format from its extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    match OutputFormat::from_path(path) {
        OutputFormat::Ppm => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(image, &mut writer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        OutputFormat::Png => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
                .ok_or_else(|| anyhow!("Pixel buffer does not match image dimensions"))?;
            rgb.save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> ImageBuffer {
        ImageBuffer {
            width: 2,
            height: 2,
            pixels: vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [12, 34, 56]],
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.ppm")), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Ppm);
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[..3], ["P3", "2 2", "255"]);
        assert_eq!(lines[3..], ["255 0 0", "0 255 0", "0 0 255", "12 34 56"]);
    }

    #[test]
    fn test_save_png_round_trip() {
        let path = std::env::temp_dir().join(format!("lumen-output-{}.png", std::process::id()));
        save_image(&checker(), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [12, 34, 56]);
    }
}
