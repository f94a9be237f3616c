//! Linux distribution lookup.
//!
//! The distribution name and version live in the `*-release` files under
//! `/etc` on most (if not all) distributions. The files are read directly;
//! a `/bin/sh -c "cat /etc/*-release"` subprocess is kept only as a fallback
//! for hosts where the directory itself cannot be listed. Parsing never
//! fails: each half of the result degrades to `"Unknown"`.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::facts::FactError;
use crate::UNKNOWN;

const RELEASE_DIR: &str = "/etc";
const RELEASE_SUFFIX: &str = "-release";
const NAME_PREFIX: &str = "NAME=";
const VERSION_PREFIX: &str = "VERSION=";

/// Read the concatenated contents of every `/etc/*-release` file.
pub fn read_release_text() -> Result<String, FactError> {
    match read_release_dir(Path::new(RELEASE_DIR)) {
        Ok(text) => Ok(text),
        Err(_) => read_release_via_shell(),
    }
}

/// Concatenate every `*-release` file in `dir`, in name order.
///
/// Errors when the directory cannot be listed or no release file could be
/// read, so the caller can fall back to the shell.
pub fn read_release_dir(dir: &Path) -> io::Result<String> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(RELEASE_SUFFIX))
        })
        .collect();
    paths.sort();

    let mut text = String::new();
    for path in paths {
        if let Ok(contents) = fs::read_to_string(&path) {
            text.push_str(&contents);
            if !contents.ends_with('\n') {
                text.push('\n');
            }
        }
    }

    if text.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no readable release files",
        ));
    }
    Ok(text)
}

fn read_release_via_shell() -> Result<String, FactError> {
    // output() drains stdout fully and reaps the child on every path.
    let output = Command::new("/bin/sh")
        .args(["-c", "cat /etc/*-release"])
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract `"<name> - <version>"` from release-file text.
///
/// Only lines with the exact `NAME=` / `VERSION=` prefixes count, so
/// `PRETTY_NAME=` and `VERSION_ID=` are ignored. Across concatenated files
/// the last matching line wins. Surrounding double quotes are stripped.
pub fn parse_distribution(text: &str) -> String {
    let mut name = UNKNOWN.to_string();
    let mut version = UNKNOWN.to_string();

    for line in text.lines() {
        if let Some(value) = line.strip_prefix(NAME_PREFIX) {
            name = value.replace('"', "");
        }
        if let Some(value) = line.strip_prefix(VERSION_PREFIX) {
            version = value.replace('"', "");
        }
    }

    format!("{} - {}", name, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_parse_name_and_version() {
        let text = "NAME=\"Ubuntu\"\nVERSION=\"20.04 LTS (Focal Fossa)\"\nID=ubuntu\n";
        assert_eq!(parse_distribution(text), "Ubuntu - 20.04 LTS (Focal Fossa)");
    }

    #[test]
    fn test_parse_unquoted_values() {
        let text = "NAME=Fedora\nVERSION=39 (Workstation Edition)\n";
        assert_eq!(parse_distribution(text), "Fedora - 39 (Workstation Edition)");
    }

    #[test]
    fn test_parse_no_matching_lines() {
        assert_eq!(parse_distribution(""), "Unknown - Unknown");
        assert_eq!(
            parse_distribution("DISTRIB_ID=Ubuntu\nDISTRIB_RELEASE=20.04\n"),
            "Unknown - Unknown"
        );
    }

    #[test]
    fn test_parse_ignores_longer_prefixes() {
        let text = "PRETTY_NAME=\"Debian GNU/Linux 12\"\nVERSION_ID=\"12\"\n";
        assert_eq!(parse_distribution(text), "Unknown - Unknown");
    }

    #[test]
    fn test_parse_missing_version_only() {
        assert_eq!(parse_distribution("NAME=\"Arch Linux\"\n"), "Arch Linux - Unknown");
    }

    #[test]
    fn test_parse_last_matching_line_wins() {
        let text = "NAME=\"first\"\nNAME=\"second\"\nVERSION=1\nVERSION=2\n";
        assert_eq!(parse_distribution(text), "second - 2");
    }

    #[test]
    fn test_read_release_dir_concatenates_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut os_release = File::create(dir.path().join("os-release")).unwrap();
        writeln!(os_release, "NAME=\"Ubuntu\"").unwrap();
        writeln!(os_release, "VERSION=\"20.04\"").unwrap();
        let mut lsb = File::create(dir.path().join("lsb-release")).unwrap();
        writeln!(lsb, "DISTRIB_ID=Ubuntu").unwrap();
        File::create(dir.path().join("unrelated.txt")).unwrap();

        let text = read_release_dir(dir.path()).unwrap();
        assert!(text.contains("NAME=\"Ubuntu\""));
        assert!(text.contains("DISTRIB_ID=Ubuntu"));
        assert!(!text.contains("unrelated"));
        // lsb-release sorts before os-release
        assert!(text.find("DISTRIB_ID").unwrap() < text.find("NAME=").unwrap());
    }

    #[test]
    fn test_read_release_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_release_dir(dir.path()).is_err());
    }
}
