//! Texture naming rules and per-file processing
//!
//! Texture packs name every file `tex1_<width>x<height>_<hash>.<ext>`, where
//! the declared size is the texture's native in-game resolution. This module
//! turns names into [`TextureMetadata`] and decides, for each texture,
//! whether it gets copied through or downscaled to the target scale.

pub mod classifier;
pub mod imaging;
pub mod processor;
pub mod types;

pub use classifier::{classify, normalize_extension};
pub use imaging::{Dimensions, ImageCrateTransform, ImageTransform, ResizeFilter};
pub use processor::TextureProcessor;
pub use types::{
    Action, Classification, FileEntry, ProcessOutcome, ScaleFactor, TextureKind, TextureMetadata,
    Warning,
};
