use docstore::Document;
use serde::Serialize;

pub const PROMPT_EXCERPT_CHARS: usize = 400;
pub const NO_PROMPT: &str = "No prompt available";

/// Which form of the prompt a view shows. Toggling is pure display state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromptView {
    #[default]
    Short,
    Full,
}

impl PromptView {
    pub fn toggle(self) -> Self {
        match self {
            PromptView::Short => PromptView::Full,
            PromptView::Full => PromptView::Short,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptExcerpt {
    pub full: String,
    pub short: String,
    /// Whether `short` had to cut `full`; only then is a toggle worth showing.
    pub truncated: bool,
}

impl PromptExcerpt {
    /// Prompt of the first document. A missing or empty prompt gives the placeholder.
    pub fn from_documents(docs: &[Document]) -> Self {
        let full = docs
            .first()
            .and_then(Document::prompt)
            .filter(|p| !p.is_empty())
            .unwrap_or(NO_PROMPT);
        Self::new(full)
    }

    pub fn new(full: &str) -> Self {
        let truncated = full.chars().count() > PROMPT_EXCERPT_CHARS;
        let short = if truncated {
            let mut s: String = full.chars().take(PROMPT_EXCERPT_CHARS).collect();
            s.push_str("...");
            s
        } else {
            full.to_string()
        };
        Self { full: full.to_string(), short, truncated }
    }

    pub fn render(&self, view: PromptView) -> &str {
        match view {
            PromptView::Short => &self.short,
            PromptView::Full => &self.full,
        }
    }
}
