//! Storage key construction.

/// Used when a filename sanitizes to nothing.
const FALLBACK_FILENAME: &str = "archivo";

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores;
/// everything else becomes `_`, one underscore per character.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate the storage key for one file of a submission.
///
/// Format: `{prefix}/{group}/{timestamp_ms}-{index}-{sanitized_filename}`
#[must_use]
pub fn storage_key(
    prefix: &str,
    group: &str,
    timestamp_ms: i64,
    index: usize,
    filename: &str,
) -> String {
    let mut name = sanitize_filename(filename);
    if name.is_empty() {
        name = FALLBACK_FILENAME.to_string();
    }
    format!("{prefix}/{group}/{timestamp_ms}-{index}-{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("invoice.pdf"), "invoice.pdf");
        assert_eq!(sanitize_filename("Doc Final.pdf"), "Doc_Final.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("日本語.pdf"), "___.pdf");
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(
            storage_key("empresas", "estatuto_social", 1_700_000_000_000, 0, "Doc Final.pdf"),
            "empresas/estatuto_social/1700000000000-0-Doc_Final.pdf"
        );
    }

    #[test]
    fn test_storage_key_empty_filename_falls_back() {
        assert_eq!(storage_key("p", "logo", 5, 1, ""), "p/logo/5-1-archivo");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sanitizing twice changes nothing.
        #[test]
        fn prop_sanitize_is_idempotent(filename in ".*") {
            let once = sanitize_filename(&filename);
            prop_assert_eq!(sanitize_filename(&once), once.clone());
        }

        /// Sanitized filenames only contain `[A-Za-z0-9._-]`.
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);
            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }

        /// One output character per input character.
        #[test]
        fn prop_sanitize_preserves_char_count(filename in ".*") {
            prop_assert_eq!(sanitize_filename(&filename).chars().count(), filename.chars().count());
        }

        /// Same filename, same group, same millisecond: the index keeps keys apart.
        #[test]
        fn prop_keys_unique_within_group(
            filename in "[^/]{0,40}",
            timestamp in 0i64..4_102_444_800_000,
            count in 2usize..16,
        ) {
            let keys: std::collections::HashSet<String> = (0..count)
                .map(|index| {
                    storage_key("empresas", "estatuto_social", timestamp, index, &filename)
                })
                .collect();
            prop_assert_eq!(keys.len(), count);
        }

        /// Keys always have exactly three segments: prefix, group, file.
        #[test]
        fn prop_key_has_three_segments(filename in ".*", index in 0usize..100) {
            let key = storage_key("personas", "documento_identidad", 1, index, &filename);
            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0], "personas");
            prop_assert_eq!(parts[1], "documento_identidad");
        }
    }
}
