// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image resources shared along the graph.
//!
//! The node that loads an image owns the only strong reference to its
//! [`ImageResource`]; dropping it frees the GPU texture. Pins and nodes that
//! adopt the image hold an [`ImageRef`], which can read the texture while the
//! owner keeps it alive but can never free it.

use egui::{ColorImage, TextureHandle, TextureId, TextureOptions, Vec2};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

/// Errors that can occur while loading an image
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not a decodable image
    #[error("Failed to decode {path}: {source}")]
    Decode {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },

    /// Image has no pixels
    #[error("Image {0} is empty")]
    Empty(PathBuf),
}

/// Four-channel pixels ready for upload
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// RGBA8 pixel data, row-major
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl DecodedImage {
    /// Size as `[width, height]`
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Decode any supported raster file into RGBA8
pub fn decode_image(path: &Path) -> Result<DecodedImage, ImageLoadError> {
    let data = std::fs::read(path).map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&data).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(ImageLoadError::Empty(path.to_path_buf()));
    }

    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// An uploaded image. Dropping it releases the texture.
pub struct ImageResource {
    texture: TextureHandle,
    path: PathBuf,
}

impl ImageResource {
    /// Upload decoded pixels as an egui texture
    pub fn upload(ctx: &egui::Context, path: &Path, image: &DecodedImage) -> Self {
        let color_image = ColorImage::from_rgba_unmultiplied(image.size(), &image.pixels);
        Self::from_color_image(ctx, path, color_image)
    }

    /// Upload an already converted image
    pub fn from_color_image(ctx: &egui::Context, path: &Path, image: ColorImage) -> Self {
        let name = format!("lumagraph://{}", path.display());
        let texture = ctx.load_texture(name, image, TextureOptions::LINEAR);
        Self { texture, path: path.to_path_buf() }
    }

    /// Texture to paint
    pub fn texture_id(&self) -> TextureId {
        self.texture.id()
    }

    /// Size in pixels
    pub fn size(&self) -> [usize; 2] {
        self.texture.size()
    }

    /// Size in points, one point per pixel
    pub fn size_vec2(&self) -> Vec2 {
        self.texture.size_vec2()
    }

    /// File the image was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResource")
            .field("texture", &self.texture.id())
            .field("size", &self.size())
            .field("path", &self.path)
            .finish()
    }
}

/// Non-owning reference to an [`ImageResource`]
#[derive(Debug, Clone)]
pub struct ImageRef(Weak<ImageResource>);

impl ImageRef {
    /// Borrow a reference from the owner
    pub fn new(owner: &Rc<ImageResource>) -> Self {
        Self(Rc::downgrade(owner))
    }

    /// Access the resource if its owner still holds it
    pub fn get(&self) -> Option<Rc<ImageResource>> {
        self.0.upgrade()
    }

    /// Whether the owner has released the resource
    pub fn is_released(&self) -> bool {
        self.0.strong_count() == 0
    }

    /// Whether this refers to the resource owned by `owner`
    pub fn refers_to(&self, owner: &Rc<ImageResource>) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(owner))
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}
