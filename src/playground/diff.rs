//! Line-by-line comparison of the submitted code against a suggested rewrite
//!
//! Lines are compared by position, not aligned: an inserted line shifts every
//! following line into the "changed" bucket.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Removed,
    Added,
    Neutral,
}

impl DiffKind {
    pub fn prefix(self) -> &'static str {
        match self {
            DiffKind::Removed => "- ",
            DiffKind::Added => "+ ",
            DiffKind::Neutral => "  ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffLine {
    fn new(kind: DiffKind, text: &str) -> Self {
        Self { kind, text: text.to_string() }
    }

    /// Prefixed display form, e.g. `+ return x`
    pub fn render(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.text)
    }
}

pub fn diff_lines(original: &str, revised: &str) -> Vec<DiffLine> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let revised_lines: Vec<&str> = revised.split('\n').collect();
    let max_lines = original_lines.len().max(revised_lines.len());

    let mut diff = Vec::with_capacity(max_lines);
    for i in 0..max_lines {
        let before = original_lines.get(i).copied().unwrap_or("");
        let after = revised_lines.get(i).copied().unwrap_or("");

        if before != after {
            if !before.is_empty() {
                diff.push(DiffLine::new(DiffKind::Removed, before));
            }
            if !after.is_empty() {
                diff.push(DiffLine::new(DiffKind::Added, after));
            }
        } else if !before.is_empty() {
            diff.push(DiffLine::new(DiffKind::Neutral, before));
        }
    }
    diff
}
