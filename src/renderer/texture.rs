//! Cube texture decoding and upload.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Texture {} is empty", path.display())]
    Empty { path: PathBuf },
}

/// Decoded texture pixels, ready for upload.
///
/// Rows are stored bottom-up so that v = 0 samples the bottom of the image,
/// matching the cube's UV layout.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub pixels: RgbaImage,
}

impl TextureImage {
    /// Decode an image file and flip it vertically.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(TextureError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::from_rgba(decoded.flipv().to_rgba8()))
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Number of levels in a full mip chain down to 1x1.
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width().max(self.height()).leading_zeros()
    }

    /// All mip levels, base level first. Each level halves the previous one
    /// (rounding down, never below 1).
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        let mut levels = Vec::with_capacity(self.mip_level_count() as usize);
        levels.push(self.pixels.clone());

        for _ in 1..self.mip_level_count() {
            let Some(prev) = levels.last() else { break };
            let width = (prev.width() / 2).max(1);
            let height = (prev.height() / 2).max(1);
            let next = imageops::resize(prev, width, height, FilterType::Triangle);
            levels.push(next);
        }

        levels
    }
}

/// GPU-side texture view and sampler. The view keeps the texture alive.
pub struct CubeTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl CubeTexture {
    /// Create a texture with a full mip chain, repeat wrapping and nearest
    /// filtering.
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage) -> Self {
        let mip_level_count = image.mip_level_count();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Cube Texture"),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip, level) in image.mip_chain().iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.width() * 4),
                    rows_per_image: Some(level.height()),
                },
                wgpu::Extent3d {
                    width: level.width(),
                    height: level.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Cube Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::info!(
            "Uploaded texture: {}x{}, {} mip levels",
            image.width(),
            image.height(),
            mip_level_count
        );

        Self { view, sampler }
    }
}
