//! Renderer capability consumed by the batch driver
//!
//! The batch driver only ever talks to a [`Renderer`]: it asks for the known
//! item and block names and requests one square RGBA image per name. How the
//! image is produced is up to the implementation.
//!
//! [`TextureRenderer`] is the bundled implementation. It reads flat textures
//! from `<data>/textures/item` and `<data>/textures/block` and scales them to
//! the requested size with nearest-neighbor filtering.

use crate::catalog::png_stems;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Options for a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width and height of the square output image, in pixels
    pub size: u32,
}

impl RenderOptions {
    /// Create render options for a square image of `size` pixels.
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { size: 256 }
    }
}

/// Errors raised by a renderer.
///
/// [`RenderError::DataDir`] is only returned while constructing a renderer and
/// aborts the whole run. Every other variant is raised by a single
/// [`Renderer::render_item`] call and is isolated by the render loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The data directory is missing or does not look like asset data
    #[error("Cannot load data directory '{}': {reason}", path.display())]
    DataDir {
        /// Directory that was given
        path: PathBuf,
        /// Human readable reason
        reason: String,
    },
    /// The renderer does not know this name
    #[error("Unknown item or block '{0}'")]
    UnknownName(String),
    /// Requested size cannot be rendered
    #[error("Invalid render size {0}: must be at least 1 pixel")]
    InvalidSize(u32),
    /// A texture could not be decoded
    #[error("Failed to load texture '{}': {source}", path.display())]
    Texture {
        /// Texture file
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },
    /// Any other renderer failure
    #[error("{0}")]
    Other(String),
}

/// A capability that can produce one icon image per known name.
///
/// A renderer is expensive to construct and is acquired once per run; the
/// batch driver only borrows it.
pub trait Renderer {
    /// Names of all items this renderer knows, in renderer order.
    fn known_item_names(&self) -> Vec<String>;

    /// Names of all blocks this renderer knows, in renderer order.
    fn known_block_names(&self) -> Vec<String>;

    /// Render `name` to a square RGBA image of `options.size` pixels.
    fn render_item(&self, name: &str, options: &RenderOptions) -> Result<RgbaImage, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn known_item_names(&self) -> Vec<String> {
        (**self).known_item_names()
    }

    fn known_block_names(&self) -> Vec<String> {
        (**self).known_block_names()
    }

    fn render_item(&self, name: &str, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
        (**self).render_item(name, options)
    }
}

/// Renderer backed by flat item and block textures.
#[derive(Debug, Clone)]
pub struct TextureRenderer {
    item_dir: PathBuf,
    block_dir: PathBuf,
    /// Sorted item texture names
    items: Vec<String>,
    /// Sorted block texture names
    blocks: Vec<String>,
}

impl TextureRenderer {
    /// Load a renderer from an asset data directory.
    ///
    /// The directory must exist and contain at least one of `textures/item`
    /// or `textures/block`.
    pub fn from_data_dir(path: &Path) -> Result<Self, RenderError> {
        if !path.is_dir() {
            return Err(RenderError::DataDir {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let item_dir = path.join("textures").join("item");
        let block_dir = path.join("textures").join("block");
        if !item_dir.is_dir() && !block_dir.is_dir() {
            return Err(RenderError::DataDir {
                path: path.to_path_buf(),
                reason: "missing textures/item and textures/block".to_string(),
            });
        }

        let list = |dir: &Path| -> Result<Vec<String>, RenderError> {
            let mut names = png_stems(dir).map_err(|e| RenderError::DataDir {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            names.sort();
            Ok(names)
        };

        let items = list(&item_dir)?;
        let blocks = list(&block_dir)?;
        log::debug!(
            "Loaded texture renderer from {} ({} item textures, {} block textures)",
            path.display(),
            items.len(),
            blocks.len()
        );

        Ok(Self { item_dir, block_dir, items, blocks })
    }

    /// Resolve the texture file for a name, preferring the item texture.
    fn texture_path(&self, name: &str) -> Option<PathBuf> {
        if self.items.binary_search_by(|n| n.as_str().cmp(name)).is_ok() {
            Some(self.item_dir.join(format!("{}.png", name)))
        } else if self.blocks.binary_search_by(|n| n.as_str().cmp(name)).is_ok() {
            Some(self.block_dir.join(format!("{}.png", name)))
        } else {
            None
        }
    }
}

impl Renderer for TextureRenderer {
    fn known_item_names(&self) -> Vec<String> {
        self.items.clone()
    }

    fn known_block_names(&self) -> Vec<String> {
        self.blocks.clone()
    }

    fn render_item(&self, name: &str, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
        if options.size == 0 {
            return Err(RenderError::InvalidSize(options.size));
        }

        let path =
            self.texture_path(name).ok_or_else(|| RenderError::UnknownName(name.to_string()))?;
        let texture = image::open(&path)
            .map_err(|source| RenderError::Texture { path: path.clone(), source })?
            .to_rgba8();

        if texture.dimensions() == (options.size, options.size) {
            return Ok(texture);
        }
        Ok(image::imageops::resize(&texture, options.size, options.size, FilterType::Nearest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use tempfile::TempDir;

    fn write_texture(dir: &Path, name: &str, color: Rgba<u8>) {
        fs::create_dir_all(dir).unwrap();
        let mut image = RgbaImage::new(2, 2);
        for pixel in image.pixels_mut() {
            *pixel = color;
        }
        image.save(dir.join(format!("{}.png", name))).unwrap();
    }

    fn setup_data_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        let textures = temp.path().join("textures");
        write_texture(&textures.join("item"), "diamond_sword", Rgba([0, 200, 255, 255]));
        write_texture(&textures.join("item"), "apple", Rgba([255, 0, 0, 255]));
        write_texture(&textures.join("block"), "stone", Rgba([128, 128, 128, 255]));
        temp
    }

    #[test]
    fn test_from_data_dir_missing() {
        let temp = TempDir::new().unwrap();
        let result = TextureRenderer::from_data_dir(&temp.path().join("nope"));
        assert!(matches!(result, Err(RenderError::DataDir { .. })));
    }

    #[test]
    fn test_from_data_dir_without_textures() {
        let temp = TempDir::new().unwrap();
        let result = TextureRenderer::from_data_dir(temp.path());
        match result {
            Err(RenderError::DataDir { reason, .. }) => assert!(reason.contains("textures")),
            other => panic!("Expected DataDir error, got {:?}", other),
        }
    }

    #[test]
    fn test_known_names_sorted() {
        let temp = setup_data_dir();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();
        assert_eq!(renderer.known_item_names(), vec!["apple", "diamond_sword"]);
        assert_eq!(renderer.known_block_names(), vec!["stone"]);
    }

    #[test]
    fn test_render_item_scales_to_size() {
        let temp = setup_data_dir();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();

        let image = renderer.render_item("apple", &RenderOptions::new(16)).unwrap();
        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(*image.get_pixel(15, 15), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_block_fallback() {
        let temp = setup_data_dir();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();

        let image = renderer.render_item("stone", &RenderOptions::new(4)).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_render_unknown_name() {
        let temp = setup_data_dir();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();

        let err = renderer.render_item("../secret", &RenderOptions::new(4)).unwrap_err();
        assert!(matches!(err, RenderError::UnknownName(_)));
        assert_eq!(err.to_string(), "Unknown item or block '../secret'");
    }

    #[test]
    fn test_render_zero_size() {
        let temp = setup_data_dir();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();

        let err = renderer.render_item("apple", &RenderOptions::new(0)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize(0)));
    }

    #[test]
    fn test_render_corrupt_texture() {
        let temp = setup_data_dir();
        fs::write(temp.path().join("textures/item/broken.png"), b"not a png").unwrap();
        let renderer = TextureRenderer::from_data_dir(temp.path()).unwrap();

        let err = renderer.render_item("broken", &RenderOptions::new(4)).unwrap_err();
        assert!(matches!(err, RenderError::Texture { .. }));
    }
}
