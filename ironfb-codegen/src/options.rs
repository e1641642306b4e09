//! Generator configuration.

use crate::profile::{CSHARP, JAVA, LanguageProfile};
use std::fmt;
use std::path::PathBuf;

/// Target host language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Java bindings.
    #[default]
    Java,
    /// C# bindings.
    CSharp,
}

impl Language {
    /// Returns the syntax profile of this language.
    #[must_use]
    pub fn profile(self) -> &'static LanguageProfile {
        match self {
            Self::Java => &JAVA,
            Self::CSharp => &CSHARP,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Java => f.write_str("java"),
            Self::CSharp => f.write_str("csharp"),
        }
    }
}

/// Options controlling a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Target language.
    pub language: Language,
    /// Emit in-place mutators for scalar fields.
    pub mutable_buffer: bool,
    /// Put every declaration in a single file.
    pub one_file: bool,
    /// Emit value-type accessors and vector wrappers where supported.
    pub value_types: bool,
    /// Validate the IR layout before emitting.
    pub verify_layout: bool,
    /// Root directory for generated files.
    pub output_dir: PathBuf,
    /// Base file name used in one-file mode.
    pub file_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            mutable_buffer: false,
            one_file: false,
            value_types: false,
            verify_layout: false,
            output_dir: PathBuf::new(),
            file_name: "generated".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Enables or disables mutator generation.
    #[must_use]
    pub fn mutable_buffer(mut self, enabled: bool) -> Self {
        self.mutable_buffer = enabled;
        self
    }

    /// Enables or disables single-file output.
    #[must_use]
    pub fn one_file(mut self, enabled: bool) -> Self {
        self.one_file = enabled;
        self
    }

    /// Enables or disables value-type accessors.
    #[must_use]
    pub fn value_types(mut self, enabled: bool) -> Self {
        self.value_types = enabled;
        self
    }

    /// Enables or disables IR validation before emitting.
    #[must_use]
    pub fn verify_layout(mut self, enabled: bool) -> Self {
        self.verify_layout = enabled;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the base name used in one-file mode.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Returns the profile of the selected language.
    #[must_use]
    pub fn profile(&self) -> &'static LanguageProfile {
        self.language.profile()
    }

    /// Returns true if value types should be emitted for the selected language.
    #[must_use]
    pub fn emits_value_types(&self) -> bool {
        self.value_types && self.profile().value_types
    }
}
