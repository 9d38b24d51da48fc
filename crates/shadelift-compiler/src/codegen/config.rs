//! Options for GLSL emission.

/// Default float precision declared at the top of both programs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    Low,
    #[default]
    Medium,
    High,
}

impl Precision {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "lowp",
            Self::Medium => "mediump",
            Self::High => "highp",
        }
    }
}

/// Configuration for GLSL emission.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Float precision qualifier
    pub(crate) precision: Precision,
    /// One level of indentation
    pub(crate) indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            indent: "    ".to_owned(),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the float precision qualifier.
    pub fn precision(mut self, value: Precision) -> Self {
        self.precision = value;
        self
    }

    /// Set the indentation unit.
    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }
}
