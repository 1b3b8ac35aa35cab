/// Delimiter used by a fenced code block inside a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Fence signature of a comment line whose marker was already stripped.
    pub fn sig(text: &str) -> Option<FenceKind> {
        let t = text.trim();
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    pub fn closes(open: FenceKind, sig: Option<FenceKind>) -> bool {
        sig == Some(open)
    }
}

/// Tracks whether successive lines are inside a fenced block.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<FenceKind>,
}

impl FenceTracker {
    /// Feeds one line and reports whether it belongs to a fence, delimiters
    /// included.
    pub fn push(&mut self, text: &str) -> bool {
        let sig = CodeFence::sig(text);
        match self.open {
            Some(open) => {
                if CodeFence::closes(open, sig) {
                    self.open = None;
                }
                true
            }
            None => {
                self.open = sig;
                sig.is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(CodeFence::sig("```yaml"), Some(FenceKind::Backticks));
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::sig("~~~"), Some(FenceKind::Tildes));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(!CodeFence::closes(
            FenceKind::Backticks,
            Some(FenceKind::Tildes)
        ));
        assert!(CodeFence::closes(FenceKind::Tildes, Some(FenceKind::Tildes)));
    }

    #[test]
    fn tracker_marks_fenced_lines() {
        let mut tracker = FenceTracker::default();
        let lines = ["Example:", "```yaml", "# @type: string", "```", "after"];
        let fenced: Vec<bool> = lines.iter().map(|l| tracker.push(l)).collect();
        assert_eq!(fenced, vec![false, true, true, true, false]);
    }
}
