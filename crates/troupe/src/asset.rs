//! # Textures and the Texture Cache
//!
//! Textures are loaded by name through a [`TextureLoader`] and kept in a
//! [`TextureStore`] owned by the [`World`](crate::stage::World). Components
//! never own texture data; they hold a [`TextureRef`], a copyable handle plus
//! the texture's dimensions.
//!
//! ```text
//! World::get_texture("ship.png")
//!   │
//!   ├─ cached?  ──► TextureRef (no load)
//!   │
//!   └─ miss ──► loader.load("ship.png")
//!                 ├─ Ok(texture) ──► push into store, cache name ──► TextureRef
//!                 └─ Err(e)      ──► log::warn!, None
//! ```
//!
//! ## Handle Stability
//!
//! Handles are indices into a `Vec`. Entries are never removed individually,
//! only all at once on [`clear`](TextureStore::clear), so a handle stays valid
//! for as long as the store holds textures.
//!
//! ## Graceful Degradation
//!
//! A missing or undecodable file is not fatal. The failure is logged and the
//! caller gets `None`; sprites without a texture simply draw nothing.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Errors reported by a [`TextureLoader`].
#[derive(Debug)]
pub enum AssetError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file was read but could not be decoded as an image.
    Decode { path: PathBuf, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "failed to read '{}': {source}", path.display())
            }
            AssetError::Decode { path, message } => {
                write!(f, "failed to decode '{}': {message}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            AssetError::Decode { .. } => None,
        }
    }
}

/// Decoded RGBA8 pixel data for one texture.
#[derive(Debug, Clone)]
pub struct Texture {
    /// The name the texture was requested by.
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Index of a texture inside the [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    /// Returns the raw index. Useful for renderers that keep their own
    /// per-texture GPU state.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A handle plus the texture's size, cheap to copy into components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Loads a texture by name.
pub trait TextureLoader {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError>;
}

/// Loads image files relative to an asset root using the `image` crate.
pub struct ImageLoader {
    root: PathBuf,
}

impl ImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureLoader for ImageLoader {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError> {
        let path = self.root.join(name);
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!("Loaded texture '{}' ({width}x{height})", path.display());
        Ok(Texture {
            name: name.to_string(),
            width,
            height,
            pixels: img.into_raw(),
        })
    }
}

/// Byte length of a `width` x `height` RGBA8 image.
fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Produces a blank texture of a fixed size for any name, unless the name
/// was marked missing. Lets scenes run without asset files on disk.
pub struct PlaceholderLoader {
    width: u32,
    height: u32,
    missing: Vec<String>,
}

impl PlaceholderLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            missing: Vec::new(),
        }
    }

    /// Make loads of `name` fail as if the file did not exist.
    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }
}

impl TextureLoader for PlaceholderLoader {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError> {
        if self.missing.iter().any(|m| m == name) {
            return Err(AssetError::Io {
                path: PathBuf::from(name),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "marked missing"),
            });
        }
        Ok(Texture {
            name: name.to_string(),
            width: self.width,
            height: self.height,
            pixels: vec![255; rgba_len(self.width, self.height)],
        })
    }
}

/// The texture cache: name → handle, handle → pixel data.
pub struct TextureStore {
    loader: Box<dyn TextureLoader>,
    textures: Vec<Texture>,
    by_name: HashMap<String, TextureHandle>,
}

impl TextureStore {
    pub fn new(loader: Box<dyn TextureLoader>) -> Self {
        Self {
            loader,
            textures: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Look up a texture by name, loading and caching it on a miss.
    ///
    /// Returns `None` (after logging a warning) if the loader fails. Failures
    /// are not cached, so a later call retries the load.
    pub fn get_or_load(&mut self, name: &str) -> Option<TextureRef> {
        if let Some(&handle) = self.by_name.get(name) {
            return self.texture_ref(handle);
        }

        let texture = match self.loader.load(name) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to load texture '{name}': {e}");
                return None;
            }
        };

        let handle = TextureHandle(self.textures.len() as u32);
        let texture_ref = TextureRef {
            handle,
            width: texture.width,
            height: texture.height,
        };
        self.textures.push(texture);
        self.by_name.insert(name.to_string(), handle);
        Some(texture_ref)
    }

    /// Pixel data for a handle.
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize)
    }

    fn texture_ref(&self, handle: TextureHandle) -> Option<TextureRef> {
        self.get(handle).map(|t| TextureRef {
            handle,
            width: t.width,
            height: t.height,
        })
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Release every cached texture. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        log::debug!("Releasing {} cached textures", self.textures.len());
        self.textures.clear();
        self.by_name.clear();
    }
}
