//! PNG output and file path generation

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
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

/// Save an RGBA image to a PNG file.
///
/// The file is always encoded as 8-bit RGBA and carries no metadata chunks.
/// Missing parent directories are created.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    write_new_file(path, |writer| {
        PngEncoder::new(writer).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgba8,
        )?;
        Ok(())
    })
}

/// Create `path` and fill it with `write`.
///
/// If writing or flushing fails the partial file is removed, so a failed
/// render never leaves a truncated PNG behind.
fn write_new_file<F>(path: &Path, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), OutputError>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let result = write(&mut writer).and_then(|()| writer.flush().map_err(OutputError::from));
    if result.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
    result
}

/// Output path for a rendered name: `{output_dir}/{name}.png`.
pub fn icon_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}.png", name))
}

/// Create the output directory (and parents).
///
/// With `clean`, existing `.png` files directly inside it are removed first.
/// Returns the number of files removed.
pub fn prepare_output_dir(output_dir: &Path, clean: bool) -> Result<usize, OutputError> {
    fs::create_dir_all(output_dir)?;
    if !clean {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        let is_png = path.extension().and_then(|e| e.to_str()) == Some("png");
        if is_png && path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_icon_path() {
        assert_eq!(icon_path(Path::new("out"), "apple"), PathBuf::from("out/apple.png"));
        assert_eq!(
            icon_path(Path::new("out/icons"), "oak_log"),
            PathBuf::from("out/icons/oak_log.png")
        );
    }

    #[test]
    fn test_save_png_roundtrip_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));

        save_png(&image, &path).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.color(), ColorType::Rgba8);
        let loaded = loaded.to_rgba8();
        assert_eq!(*loaded.get_pixel(1, 0), Rgba([0, 255, 0, 128]));
        assert_eq!(*loaded.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_save_png_forces_rgba_for_opaque_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("opaque.png");

        let image = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 255]));
        save_png(&image, &path).unwrap();

        assert_eq!(image::open(&path).unwrap().color(), ColorType::Rgba8);
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.png");

        save_png(&RgbaImage::new(1, 1), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("apple.png");

        let result = write_new_file(&path, |writer| {
            writer.write_all(b"\x89PNG partial")?;
            Err(OutputError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        });

        assert!(matches!(result, Err(OutputError::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_successful_write_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("apple.png");

        write_new_file(&path, |writer| {
            writer.write_all(b"data")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_prepare_output_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a/b/c");

        assert_eq!(prepare_output_dir(&out, false).unwrap(), 0);
        assert!(out.is_dir());
    }

    #[test]
    fn test_prepare_output_dir_clean_only_removes_png() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("old.png"), b"x").unwrap();
        fs::write(dir.path().join("readme.txt"), b"x").unwrap();

        assert_eq!(prepare_output_dir(dir.path(), false).unwrap(), 0);
        assert!(dir.path().join("old.png").exists());

        assert_eq!(prepare_output_dir(dir.path(), true).unwrap(), 1);
        assert!(!dir.path().join("old.png").exists());
        assert!(dir.path().join("readme.txt").exists());
    }
}
