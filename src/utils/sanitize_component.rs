// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Derive filesystem-safe file stems from user-facing app names.

/// Stem used when a name sanitizes to nothing.
const FALLBACK_STEM: &str = "app";

/// Basenames that cannot be used as files on Windows.
const RESERVED_BASENAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Produce a filesystem-safe path component.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Å" → "A").
/// - Keep ASCII alphanumerics plus `-`, `_`, and `.`; everything else becomes `_`.
/// - Collapse runs of `_` and `.`, drop `_` directly before a dot, trim
///   leading/trailing separators.
/// - Guard against reserved and empty names.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());

    for ch in transliterated.chars() {
        let mapped = match ch {
            c if c.is_ascii_alphanumeric() || c == '-' => c,
            '.' => '.',
            _ => '_',
        };
        let repeated_separator = matches!(mapped, '_' | '.') && out.ends_with(mapped);
        if repeated_separator {
            continue;
        }
        if mapped == '.' && out.ends_with('_') {
            out.pop();
        }
        out.push(mapped);
    }

    let trimmed = out.trim_matches(|c| c == '_' || c == '.' || c == ' ');
    if trimmed.is_empty() {
        return FALLBACK_STEM.to_string();
    }

    let (base, ext) = match trimmed.split_once('.') {
        Some((base, ext)) => (base, Some(ext)),
        None => (trimmed, None),
    };
    let reserved = RESERVED_BASENAMES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(base));

    match (reserved, ext) {
        (true, Some(ext)) => format!("{base}_.{ext}"),
        (true, None) => format!("{base}_"),
        (false, _) => trimmed.to_string(),
    }
}

/// Lowercase file stem for an app name, used for desktop entries and icons.
///
/// `"Test App"` becomes `"test_app"`.
pub fn slug(name: &str) -> String {
    sanitize_component(name).to_ascii_lowercase()
}
