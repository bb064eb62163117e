//! Artifact persistence.
//!
//! All generated images land under `<workspace>/output`. Auto-generated
//! names carry a short random suffix and never overwrite an existing file.

use crate::error::Result;
use crate::models::{DecodedImage, OutputFormat, SavedArtifact};
use log::debug;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Writer rooted at `<workspace_dir>/output`.
    pub fn new(workspace_dir: impl AsRef<Path>) -> Self {
        OutputWriter {
            output_dir: workspace_dir.as_ref().join("output"),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist one image. `name` overrides the generated prefix; the
    /// random suffix stays so repeated calls never clobber each other.
    pub fn write(
        &self,
        bytes: &[u8],
        format: OutputFormat,
        name: Option<&str>,
        prefix: &str,
    ) -> Result<SavedArtifact> {
        self.write_indexed(bytes, format, name, prefix, None)
    }

    /// Persist a batch, numbering files past the first with `_{i+1}`.
    pub fn write_all(
        &self,
        images: &[DecodedImage],
        name: Option<&str>,
        prefix: &str,
    ) -> Result<Vec<SavedArtifact>> {
        let mut artifacts = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let index = if images.len() > 1 { Some(i + 1) } else { None };
            artifacts.push(self.write_indexed(&image.bytes, image.format, name, prefix, index)?);
        }
        Ok(artifacts)
    }

    fn write_indexed(
        &self,
        bytes: &[u8],
        format: OutputFormat,
        name: Option<&str>,
        prefix: &str,
        index: Option<usize>,
    ) -> Result<SavedArtifact> {
        std::fs::create_dir_all(&self.output_dir)?;
        let base = name.unwrap_or(prefix);
        let path = loop {
            let candidate = self.output_dir.join(filename(base, format, index));
            if !candidate.exists() {
                break candidate;
            }
        };
        std::fs::write(&path, bytes)?;
        debug!(
            "💾 Wrote {} bytes of {} to {}",
            bytes.len(),
            format.as_str(),
            path.display()
        );
        Ok(SavedArtifact {
            path,
            format,
            bytes: bytes.len() as u64,
        })
    }
}

fn filename(base: &str, format: OutputFormat, index: Option<usize>) -> String {
    let tag = short_tag();
    match index {
        Some(i) => format!("{}_{}_{}.{}", base, tag, i, format.extension()),
        None => format!("{}_{}.{}", base, tag, format.extension()),
    }
}

/// First 8 hex characters of a v4 UUID. Short enough to keep filenames
/// readable, random enough that collisions are retried, not expected.
fn short_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
