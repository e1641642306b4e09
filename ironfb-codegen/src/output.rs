//! Output assembly: file contents, file layout and build rules.

use crate::error::CodegenError;
use crate::profile::LanguageProfile;
use ironfb_schema::Namespace;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// automatically generated, do not modify\n\n";

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Destination path.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Wraps declaration code in the file header, namespace and imports.
#[must_use]
pub fn assemble_class(
    profile: &LanguageProfile,
    namespace: &Namespace,
    code: &str,
    needs_includes: bool,
) -> String {
    let mut output = String::from(GENERATED_HEADER);
    if !namespace.is_root() {
        output.push_str(&format!(
            "{}{}{}\n\n",
            profile.namespace_ident,
            namespace.dotted(),
            profile.namespace_begin
        ));
    }
    if needs_includes {
        output.push_str(profile.includes);
    }
    output.push_str(code);
    if !namespace.is_root() {
        output.push_str(profile.namespace_end);
    }
    output
}

/// Path of a per-declaration file: one directory per namespace component.
#[must_use]
pub fn declaration_path(
    profile: &LanguageProfile,
    output_dir: &Path,
    namespace: &Namespace,
    name: &str,
) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for component in &namespace.components {
        path.push(component);
    }
    path.push(format!("{name}{}", profile.file_extension));
    path
}

/// Path of the single file written in one-file mode.
#[must_use]
pub fn one_file_path(profile: &LanguageProfile, output_dir: &Path, file_name: &str) -> PathBuf {
    output_dir.join(format!("{file_name}{}", profile.file_extension))
}

/// Writes files, creating parent directories as needed.
///
/// # Errors
/// Returns `CodegenError::Io` on the first failed directory creation or write.
pub fn write_output_files(files: &[OutputFile]) -> Result<(), CodegenError> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&file.path, &file.contents)?;
        tracing::debug!(
            "Wrote {} ({} bytes)",
            file.path.display(),
            file.contents.len()
        );
    }
    Ok(())
}

/// Dependency rule between generated files and the schemas they come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRule {
    /// Generated file paths.
    pub outputs: Vec<PathBuf>,
    /// Source schema files.
    pub inputs: Vec<String>,
}

impl fmt::Display for BuildRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outputs: Vec<String> = self
            .outputs
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        write!(f, "{}:", outputs.join(" "))?;
        for input in &self.inputs {
            write!(f, " {input}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CSHARP, JAVA};

    #[test]
    fn test_assemble_java_class() {
        let ns = Namespace::parse("MyGame.Example");
        let contents = assemble_class(&JAVA, &ns, "public final class Stat {\n};\n\n", true);
        assert!(contents.starts_with(
            "// automatically generated, do not modify\n\npackage MyGame.Example;\n\nimport java.nio.*;\n"
        ));
        assert!(contents.ends_with("public final class Stat {\n};\n\n"));
    }

    #[test]
    fn test_assemble_csharp_enum() {
        let ns = Namespace::parse("MyGame");
        let contents = assemble_class(&CSHARP, &ns, "public enum Color : sbyte\n{\n};\n\n", false);
        assert_eq!(
            contents,
            "// automatically generated, do not modify\n\n\
             namespace MyGame\n{\n\n\
             public enum Color : sbyte\n{\n};\n\n\
             \n}\n"
        );
    }

    #[test]
    fn test_assemble_root_namespace() {
        let contents = assemble_class(&JAVA, &Namespace::ROOT, "class A {}\n", false);
        assert_eq!(contents, "// automatically generated, do not modify\n\nclass A {}\n");
    }

    #[test]
    fn test_paths() {
        let ns = Namespace::parse("MyGame.Example");
        assert_eq!(
            declaration_path(&JAVA, Path::new("out"), &ns, "Monster"),
            PathBuf::from("out/MyGame/Example/Monster.java")
        );
        assert_eq!(
            declaration_path(&CSHARP, Path::new(""), &Namespace::ROOT, "Monster"),
            PathBuf::from("Monster.cs")
        );
        assert_eq!(
            one_file_path(&CSHARP, Path::new("out"), "generated"),
            PathBuf::from("out/generated.cs")
        );
    }

    #[test]
    fn test_build_rule_display() {
        let rule = BuildRule {
            outputs: vec![PathBuf::from("a/Monster.java"), PathBuf::from("a/Color.java")],
            inputs: vec!["monster.fbs".to_string(), "include.fbs".to_string()],
        };
        assert_eq!(
            rule.to_string(),
            "a/Monster.java a/Color.java: monster.fbs include.fbs"
        );
    }

    #[test]
    fn test_write_output_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let file = OutputFile {
            path: dir.path().join("MyGame").join("Stat.java"),
            contents: "class Stat {}\n".to_string(),
        };
        write_output_files(std::slice::from_ref(&file)).expect("Failed to write files");
        let written = fs::read_to_string(&file.path).expect("Failed to read file");
        assert_eq!(written, file.contents);
    }
}
