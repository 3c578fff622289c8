//! Local file naming for downloaded samples.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Derives the local file name for a sample from its display name.
///
/// Returns the prefix of `name` up to, not including, the first space, or
/// the whole name when it has no space. Nothing else is rewritten: path
/// separators, control characters and `..` pass through unchanged, and two
/// names that only differ after the first space map to the same file.
#[must_use]
pub fn sanitized_name(name: &str) -> &str {
    match name.find(' ') {
        Some(end) => &name[..end],
        None => name,
    }
}

/// Builds `<output_dir>/<file_name>` by appending, never by replacing.
///
/// `Path::join` would discard `output_dir` for a file name starting with
/// `/`; appending keeps every sample under the output directory prefix.
pub(crate) fn sample_path(output_dir: &Path, file_name: &str) -> PathBuf {
    let mut path = OsString::from(output_dir.as_os_str());
    if !output_dir.as_os_str().to_string_lossy().ends_with('/') {
        path.push("/");
    }
    path.push(file_name);
    PathBuf::from(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_name_cuts_at_first_space() {
        assert_eq!(sanitized_name("EvilCorp Trojan"), "EvilCorp");
        assert_eq!(sanitized_name("OSX.Dok dropper v2"), "OSX.Dok");
    }

    #[test]
    fn test_sanitized_name_without_space_is_unchanged() {
        assert_eq!(sanitized_name("NoSpaceName"), "NoSpaceName");
    }

    #[test]
    fn test_sanitized_name_empty_and_leading_space() {
        assert_eq!(sanitized_name(""), "");
        assert_eq!(sanitized_name(" leading"), "");
    }

    #[test]
    fn test_sanitized_name_only_splits_on_space() {
        assert_eq!(sanitized_name("tab\tseparated name"), "tab\tseparated");
        assert_eq!(sanitized_name("a/b c"), "a/b");
        assert_eq!(sanitized_name("../escape me"), "../escape");
    }

    #[test]
    fn test_sanitized_name_multibyte() {
        assert_eq!(sanitized_name("Fruit\u{00e9}Fly sample"), "Fruit\u{00e9}Fly");
    }

    #[test]
    fn test_sanitized_name_collision() {
        assert_eq!(
            sanitized_name("Shlayer variant A"),
            sanitized_name("Shlayer variant B")
        );
    }

    #[test]
    fn test_sample_path_appends_under_output_dir() {
        assert_eq!(
            sample_path(Path::new("./malware/"), "EvilCorp"),
            PathBuf::from("./malware/EvilCorp")
        );
        assert_eq!(
            sample_path(Path::new("out"), "EvilCorp").to_str().unwrap(),
            "out/EvilCorp"
        );
    }

    #[test]
    fn test_sample_path_keeps_absolute_looking_name_under_dir() {
        let path = sample_path(Path::new("/data/out/"), "/etc/passwd");
        assert!(path.starts_with("/data/out"), "{}", path.display());
    }
}
