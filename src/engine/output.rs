use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputBlock {
    Text(String),
    /// Internal state dumps (exit tables, split words) shown for teaching purposes.
    Diagnostic(String),
    Event(String),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn diagnostic(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Diagnostic(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    pub fn extend(&mut self, other: Output) {
        self.blocks.extend(other.blocks);
    }

    /// Every block's text, in order. Mostly useful in tests.
    pub fn lines(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .map(|b| match b {
                OutputBlock::Text(s)
                | OutputBlock::Diagnostic(s)
                | OutputBlock::Event(s) => s.as_str(),
            })
            .collect()
    }
}
