//! Tesseract automation: produce an initial `.box` file for an image by
//! running the external engine's LSTM box routine. The output uses the same
//! on-disk grammar the codec consumes.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

/// Runs `tesseract <image> <stem> lstmbox`, yielding `<stem>.box` next to
/// the image.
#[derive(Debug, Clone)]
pub struct LstmBoxGenerator {
    lang: String,
}

impl Default for LstmBoxGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LstmBoxGenerator {
    pub fn new() -> Self {
        Self {
            lang: "eng".to_string(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Run the engine on an image and return the path of the generated box
    /// file.
    pub fn run(&self, image_path: &Path) -> Result<PathBuf> {
        let output_base = image_path.with_extension("");
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.lang)
            .arg("lstmbox")
            .output()
            .with_context(|| "failed to invoke tesseract; is it installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract lstmbox run failed: {stderr}");
        }

        let box_path = output_base.with_extension("box");
        if !box_path.exists() {
            anyhow::bail!(
                "expected box file not found after OCR: {}",
                box_path.display()
            );
        }
        Ok(box_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_the_output_path_from_the_image_stem() {
        let image = Path::new("scans/page_001.tif");
        let base = image.with_extension("");
        assert_eq!(base.with_extension("box"), PathBuf::from("scans/page_001.box"));
    }
}
