// Rango - a category and page directory built with Rust
// Copyright (C) 2026 Rango Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use std::path::Path;
use uuid::Uuid;

/// Magic bytes for the accepted image formats
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const GIF_MAGIC: &[u8] = b"GIF";
const WEBP_MAGIC: &[u8] = b"RIFF";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }

    /// Detect format from file content
    pub fn detect(data: &[u8]) -> Result<Self> {
        if data.len() < 12 {
            return Err(anyhow::anyhow!("File too small to determine format"));
        }

        if data.starts_with(JPEG_MAGIC) {
            Ok(ImageFormat::Jpeg)
        } else if data.starts_with(PNG_MAGIC) {
            Ok(ImageFormat::Png)
        } else if data.starts_with(GIF_MAGIC) {
            Ok(ImageFormat::Gif)
        } else if data.starts_with(WEBP_MAGIC) && &data[8..12] == b"WEBP" {
            Ok(ImageFormat::Webp)
        } else {
            Err(anyhow::anyhow!("Unsupported image format"))
        }
    }
}

/// Store an uploaded profile picture under a fresh UUID filename.
/// Returns the stored filename.
pub fn save_profile_picture(uploads_dir: &str, data: &[u8]) -> Result<String> {
    let format = ImageFormat::detect(data)?;
    let filename = format!("{}.{}", Uuid::new_v4(), format.extension());

    std::fs::create_dir_all(uploads_dir).context("Failed to create uploads directory")?;

    let path = Path::new(uploads_dir).join(&filename);
    std::fs::write(&path, data)
        .with_context(|| format!("Failed to write upload to {:?}", path))?;

    Ok(filename)
}
