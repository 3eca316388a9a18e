use regex::Regex;
use std::sync::LazyLock;

use super::types::{Classification, TextureKind, TextureMetadata};

/// Extensions the texture loader understands, lowercase
pub const TEXTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "dds"];

/// `tex1_<width>x<height>_<anything>.<ext>`, compiled once and shared across workers
static TEXTURE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^tex1_(\d+)x(\d+)_(.*)\.(png|jpg|jpeg|dds)$")
        .expect("Failed to compile texture name regex")
});

/// Only DDS normal maps are protected from re-encoding
const NORMAL_MAP_MARKER: &str = ".nrm.dds";
const MIPMAP_MARKER: &str = "_mip";

/// Parse a texture file name into its declared size and kind.
///
/// Never fails: anything that is not a well-formed texture name is reported
/// as [`Classification::NotATexture`]. Declared sizes that are zero or do not
/// fit in a `u32` are rejected the same way, since no scale can be derived
/// from them.
pub fn classify(name: &str) -> Classification {
    let Some(captures) = TEXTURE_NAME_REGEX.captures(name) else {
        return Classification::NotATexture;
    };

    let (Ok(declared_width), Ok(declared_height)) =
        (captures[1].parse::<u32>(), captures[2].parse::<u32>())
    else {
        return Classification::NotATexture;
    };
    if declared_width == 0 || declared_height == 0 {
        return Classification::NotATexture;
    }

    Classification::Texture(TextureMetadata {
        declared_width,
        declared_height,
        kind: detect_kind(name),
    })
}

/// Normal maps win over mipmaps when a name carries both markers.
fn detect_kind(name: &str) -> TextureKind {
    let lower = name.to_ascii_lowercase();

    if lower.contains(NORMAL_MAP_MARKER) {
        TextureKind::NormalMap
    } else if lower.contains(MIPMAP_MARKER) {
        TextureKind::Mipmap
    } else {
        TextureKind::Standard
    }
}

/// Lowercase a recognised texture extension (`FOO.PNG` -> `FOO.png`).
/// Names with any other extension are returned untouched.
pub fn normalize_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if TEXTURE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            format!("{stem}.{}", ext.to_ascii_lowercase())
        }
        _ => name.to_string(),
    }
}
