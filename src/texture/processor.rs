use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::classifier::normalize_extension;
use super::imaging::ImageTransform;
use super::types::{
    Action, Classification, FileEntry, ProcessOutcome, ScaleFactor, TextureKind, TextureMetadata,
    Warning,
};

/// Decides what to do with one texture and writes the result.
///
/// Every processed texture produces exactly one file in the output
/// directory, either the original bytes or a downscaled re-encode.
/// Skipped files produce none.
#[derive(Clone)]
pub struct TextureProcessor {
    output_dir: PathBuf,
    target_scale: f64,
    transform: Arc<dyn ImageTransform>,
}

impl TextureProcessor {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        target_scale: f64,
        transform: Arc<dyn ImageTransform>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            target_scale,
            transform,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the output for `name` is written
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(normalize_extension(name))
    }

    /// Process one file whose raw contents are `data`.
    ///
    /// Image capability and write failures are returned as errors; anomalies
    /// in the scale are returned as warnings alongside the action taken.
    pub fn process(
        &self,
        entry: &FileEntry,
        classification: Classification,
        data: &[u8],
    ) -> Result<ProcessOutcome> {
        let Classification::Texture(meta) = classification else {
            return Ok(ProcessOutcome {
                action: Action::Skipped,
                warnings: Vec::new(),
            });
        };

        let actual = self
            .transform
            .identify(data)
            .with_context(|| format!("Failed to identify {}", entry.path.display()))?;
        let scale = ScaleFactor {
            width: actual.width as f64 / meta.declared_width as f64,
            height: actual.height as f64 / meta.declared_height as f64,
        };
        debug!(
            "{}: declared {}x{}, actual {}x{}, scale {}x{}",
            entry.name,
            meta.declared_width,
            meta.declared_height,
            actual.width,
            actual.height,
            scale.width,
            scale.height
        );

        let mut warnings = scale_warnings(entry, &scale);
        let output = self.output_path(&entry.name);

        let action = match meta.kind {
            TextureKind::NormalMap => {
                warnings.push(Warning::new(
                    &entry.path,
                    "Not converted: re-encoding normal maps may corrupt them",
                ));
                self.copy(data, &output)?
            }
            TextureKind::Mipmap => {
                warnings.push(Warning::new(&entry.path, "Mipmap not resized"));
                self.copy(data, &output)?
            }
            TextureKind::Standard if scale.width > self.target_scale => {
                self.resize(data, &meta, &output)?
            }
            TextureKind::Standard => self.copy(data, &output)?,
        };

        Ok(ProcessOutcome { action, warnings })
    }

    fn copy(&self, data: &[u8], output: &Path) -> Result<Action> {
        debug!("copying to {}", output.display());
        fs::write(output, data)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        Ok(Action::Copied)
    }

    fn resize(&self, data: &[u8], meta: &TextureMetadata, output: &Path) -> Result<Action> {
        let width = target_dimension(meta.declared_width, self.target_scale);
        let height = target_dimension(meta.declared_height, self.target_scale);
        debug!(
            "scale above {}, resizing to {}x{}",
            self.target_scale, width, height
        );

        let resized = self
            .transform
            .resize(data, width, height)
            .with_context(|| format!("Failed to resize to {}x{}", width, height))?;
        fs::write(output, resized)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        Ok(Action::Resized { width, height })
    }
}

/// `declared * scale`, truncated, never below one pixel
fn target_dimension(declared: u32, scale: f64) -> u32 {
    ((declared as f64 * scale) as u32).max(1)
}

fn scale_warnings(entry: &FileEntry, scale: &ScaleFactor) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if !scale.is_square() {
        warnings.push(Warning::new(
            &entry.path,
            format!(
                "Width and height scales differ ({}x{})",
                scale.width, scale.height
            ),
        ));
    }
    if !scale.is_integral() {
        warnings.push(Warning::new(
            &entry.path,
            format!("Non-integer scale ({}x{})", scale.width, scale.height),
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeTransform;
    use crate::texture::classify;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        transform: Arc<FakeTransform>,
        processor: TextureProcessor,
    }

    fn fixture(target_scale: f64) -> Fixture {
        let dir = TempDir::new().unwrap();
        let transform = Arc::new(FakeTransform::default());
        let processor = TextureProcessor::new(dir.path(), target_scale, transform.clone());
        Fixture {
            _dir: dir,
            transform,
            processor,
        }
    }

    fn run(fx: &Fixture, name: &str, width: u32, height: u32) -> ProcessOutcome {
        let entry = FileEntry::new(PathBuf::from("/pack").join(name), name);
        let data = FakeTransform::encode(width, height);
        fx.processor.process(&entry, classify(name), &data).unwrap()
    }

    fn written(fx: &Fixture, name: &str) -> Vec<u8> {
        fs::read(fx.processor.output_path(name)).unwrap()
    }

    fn output_count(fx: &Fixture) -> usize {
        fs::read_dir(fx.processor.output_dir()).unwrap().count()
    }

    #[test]
    fn test_oversized_texture_is_resized_to_target() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_64x64_abcd1234_5.png", 256, 256);

        assert_eq!(outcome.action, Action::Resized { width: 192, height: 192 });
        assert!(outcome.warnings.is_empty());
        assert_eq!(fx.transform.resize_calls(), vec![(192, 192)]);
        assert_eq!(
            written(&fx, "tex1_64x64_abcd1234_5.png"),
            FakeTransform::encode(192, 192)
        );
    }

    #[test]
    fn test_texture_at_target_is_copied() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_64x64_abcd1234_5.png", 192, 192);

        assert_eq!(outcome.action, Action::Copied);
        assert!(outcome.warnings.is_empty());
        assert!(fx.transform.resize_calls().is_empty());
        assert_eq!(
            written(&fx, "tex1_64x64_abcd1234_5.png"),
            FakeTransform::encode(192, 192)
        );
    }

    #[test]
    fn test_texture_below_target_is_copied() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_64x32_abc.jpg", 128, 64);
        assert_eq!(outcome.action, Action::Copied);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_non_texture_is_skipped_without_io() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "readme.png", 256, 256);

        assert_eq!(outcome.action, Action::Skipped);
        assert!(outcome.warnings.is_empty());
        assert_eq!(fx.transform.identify_calls(), 0);
        assert_eq!(output_count(&fx), 0);
    }

    #[test]
    fn test_normal_map_is_always_copied() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_64x64_surfacenrm.nrm.dds", 512, 512);

        assert_eq!(outcome.action, Action::Copied);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].message.starts_with("Not converted"));
        assert!(fx.transform.resize_calls().is_empty());
        assert_eq!(
            written(&fx, "tex1_64x64_surfacenrm.nrm.dds"),
            FakeTransform::encode(512, 512)
        );
    }

    #[test]
    fn test_mipmap_is_always_copied() {
        let fx = fixture(2.0);
        let outcome = run(&fx, "tex1_32x32_abcd_mip1.png", 256, 256);

        assert_eq!(outcome.action, Action::Copied);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].message, "Mipmap not resized");
        assert!(fx.transform.resize_calls().is_empty());
    }

    #[test]
    fn test_mismatched_scales_warn_and_use_width() {
        let fx = fixture(3.0);
        // width scale 4, height scale 2: width decides
        let outcome = run(&fx, "tex1_16x16_abc.png", 64, 32);

        assert_eq!(outcome.action, Action::Resized { width: 48, height: 48 });
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(
            outcome.warnings[0].message,
            "Width and height scales differ (4x2)"
        );
    }

    #[test]
    fn test_non_integer_scale_warns() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_10x10_abc.png", 25, 25);

        assert_eq!(outcome.action, Action::Copied);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].message, "Non-integer scale (2.5x2.5)");
        assert_eq!(outcome.warnings[0].file, PathBuf::from("/pack/tex1_10x10_abc.png"));
    }

    #[test]
    fn test_both_anomalies_on_normal_map() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_10x10_a.nrm.dds", 25, 30);
        assert_eq!(outcome.action, Action::Copied);
        assert_eq!(outcome.warnings.len(), 3);
    }

    #[test]
    fn test_fractional_target_truncates() {
        let fx = fixture(1.5);
        let outcome = run(&fx, "tex1_15x15_abc.png", 60, 60);
        assert_eq!(outcome.action, Action::Resized { width: 22, height: 22 });
    }

    #[test]
    fn test_tiny_target_scale_keeps_one_pixel() {
        let fx = fixture(0.05);
        let outcome = run(&fx, "tex1_8x8_abc.png", 64, 64);
        assert_eq!(outcome.action, Action::Resized { width: 1, height: 1 });
        assert_eq!(fx.transform.resize_calls(), vec![(1, 1)]);
    }

    #[test]
    fn test_non_dds_normal_map_is_resized() {
        let fx = fixture(3.0);
        let outcome = run(&fx, "tex1_64x64_abc.nrm.png", 256, 256);
        assert_eq!(outcome.action, Action::Resized { width: 192, height: 192 });
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_uppercase_extension_is_normalized() {
        let fx = fixture(3.0);
        run(&fx, "tex1_8x8_ABC.PNG", 8, 8);
        assert!(fx.processor.output_dir().join("tex1_8x8_ABC.png").exists());
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let fx = fixture(3.0);
        let name = "tex1_8x8_abc.png";
        fs::write(fx.processor.output_path(name), b"stale").unwrap();
        run(&fx, name, 8, 8);
        assert_eq!(written(&fx, name), FakeTransform::encode(8, 8));
    }

    #[test]
    fn test_identify_failure_is_an_error() {
        let fx = fixture(3.0);
        let name = "tex1_8x8_abc.png";
        let entry = FileEntry::new(PathBuf::from(name), name);
        let err = fx
            .processor
            .process(&entry, classify(name), b"corrupt")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to identify"));
        assert_eq!(output_count(&fx), 0);
    }
}
