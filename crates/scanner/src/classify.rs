//! Executable classification.
//!
//! Two stages: a cheap name check used while scanning, and a content sniff
//! used at launch time. Installed games frequently ship native binaries with
//! no extension, or Windows binaries next to Linux ones, so the launch path
//! never trusts the extension alone.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions (lower-case) that mark a file as a launch candidate.
pub const EXECUTABLE_EXTENSIONS: &[&str] = &[
    "exe",      // Windows PE
    "x86_64",   // 64-bit native build (Unity, Godot)
    "x86",      // 32-bit native build
    "sh",       // launcher script
    "appimage", // portable application image
    "bin",      // generic native binary
    "desktop",  // desktop entry
];

/// Extension of freedesktop desktop entries.
pub const DESKTOP_ENTRY_EXTENSION: &str = "desktop";

const ELF_MAGIC: &[u8] = b"\x7fELF";
const PE_MAGIC: &[u8] = b"MZ";

/// Binary format detected from a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryKind {
    Elf,
    Pe,
    Unknown,
}

/// Returns true if the file name carries one of the
/// [`EXECUTABLE_EXTENSIONS`] (case-insensitive).
pub fn looks_executable(file_name: &str) -> bool {
    extension_lowercase(Path::new(file_name))
        .is_some_and(|ext| EXECUTABLE_EXTENSIONS.contains(&ext.as_str()))
}

/// Returns true if the path names a desktop entry.
pub fn is_desktop_entry(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| ext == DESKTOP_ENTRY_EXTENSION)
}

/// Detects the binary format of a file from its magic bytes.
///
/// Unreadable, empty or truncated files are [`BinaryKind::Unknown`].
pub fn sniff(path: &Path) -> BinaryKind {
    let mut head = [0u8; 4];
    let read = match File::open(path).and_then(|mut f| read_head(&mut f, &mut head)) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot sniff file");
            return BinaryKind::Unknown;
        }
    };
    sniff_bytes(&head[..read])
}

/// Classifies a file from its first bytes.
pub fn sniff_bytes(head: &[u8]) -> BinaryKind {
    if head.starts_with(ELF_MAGIC) {
        BinaryKind::Elf
    } else if head.starts_with(PE_MAGIC) {
        BinaryKind::Pe
    } else {
        BinaryKind::Unknown
    }
}

/// Fills `buf` as far as the file allows.
fn read_head(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
