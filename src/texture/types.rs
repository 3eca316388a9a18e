use std::path::PathBuf;

/// A file found while walking the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Base file name, used for classification and as the output name
    pub name: String,
}

impl FileEntry {
    pub fn new(path: PathBuf, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
        }
    }
}

/// What a texture file name says about the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Standard,
    /// Normal maps are never re-encoded
    NormalMap,
    /// Mip levels are never resized: the declared size belongs to the base level
    Mipmap,
}

/// Size and kind declared by a texture file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureMetadata {
    pub declared_width: u32,
    pub declared_height: u32,
    pub kind: TextureKind,
}

/// Result of classifying a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Texture(TextureMetadata),
    NotATexture,
}

impl Classification {
    pub fn is_texture(&self) -> bool {
        matches!(self, Classification::Texture(_))
    }
}

/// Actual pixel size divided by declared size, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub width: f64,
    pub height: f64,
}

impl ScaleFactor {
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn is_integral(&self) -> bool {
        self.width.fract() == 0.0
    }
}

/// Non-fatal anomaly noticed while processing a texture
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub file: PathBuf,
    pub message: String,
}

impl Warning {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// What happened to a single texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Not a texture, nothing written
    Skipped,
    /// Original bytes written unchanged
    Copied,
    /// Downscaled to the given size
    Resized { width: u32, height: u32 },
}

/// Outcome of processing one file
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub action: Action,
    pub warnings: Vec<Warning>,
}
