//! Copying result sections to the system clipboard

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::playground::AnalysisView;

/// Largest section accepted for copying: 10MB
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// A copyable block of the results pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    FixedCode,
    OptimizedCode,
    Explanation,
}

impl CopyTarget {
    pub fn label(self) -> &'static str {
        match self {
            CopyTarget::FixedCode => "fixed code",
            CopyTarget::OptimizedCode => "optimized code",
            CopyTarget::Explanation => "explanation",
        }
    }

    /// Text of this section in `view`, if it was rendered
    pub fn text<'a>(self, view: &'a AnalysisView) -> Option<&'a str> {
        match self {
            CopyTarget::FixedCode => view.fixed_code.as_deref(),
            CopyTarget::OptimizedCode => view.optimized_code.as_deref(),
            CopyTarget::Explanation => view.explanation.as_deref(),
        }
    }
}

/// Clipboard seam so copying can be tested without a display server
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Nothing to copy");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(())
}

/// Copy one section of `view` through `provider`; returns the bytes copied
pub fn copy_section(
    view: Option<&AnalysisView>,
    target: CopyTarget,
    provider: &mut dyn ClipboardProvider,
) -> Result<usize> {
    let Some(text) = view.and_then(|v| target.text(v)) else {
        bail!("No {} to copy", target.label());
    };
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(text.len())
}

/// Copy one section of `view` to the system clipboard.
///
/// Validation happens before the clipboard is opened so a missing section
/// reports "No ... to copy" even on headless machines.
pub fn copy_to_clipboard(view: Option<&AnalysisView>, target: CopyTarget) -> Result<usize> {
    if let Some(text) = view.and_then(|v| target.text(v)) {
        validate_clipboard_text(text)?;
    } else {
        bail!("No {} to copy", target.label());
    }
    let mut clipboard = SystemClipboard::new()?;
    copy_section(view, target, &mut clipboard)
}
