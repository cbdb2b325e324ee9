//! Text normalization for matching / 匹配用文本标准化
//!
//! Lowercases and keeps only letters, digits and underscores, so
//! "Red-Rose 40cm" and "redrose40cm" compare equal. Combining marks are
//! not letters here, even the ones Unicode counts as alphabetic.

use unicode_normalization::char::is_combining_mark;

/// Normalize text / 标准化文本：移除标点符号、空格，转为小写
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Normalize an optional column; `None` yields an empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

fn is_word_char(c: char) -> bool {
    (c.is_alphanumeric() && !is_combining_mark(c)) || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_spaces() {
        assert_eq!(normalize("Red-Rose 40cm!"), "redrose40cm");
        assert_eq!(normalize("  A.B,C  "), "abc");
        assert_eq!(normalize("snake_case"), "snake_case");
    }

    #[test]
    fn test_keeps_non_ascii_letters() {
        assert_eq!(normalize("玫瑰 花束"), "玫瑰花束");
        assert_eq!(normalize("Crème Brûlée"), "crèmebrûlée");
    }

    #[test]
    fn test_drops_combining_marks() {
        // vowel sign and virama are marks, not letters
        assert_eq!(normalize("नमस्ते"), "नमसत");
        assert_eq!(normalize("e\u{301}te\u{301}"), "ete");
        assert_eq!(normalize("İstanbul"), "istanbul");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("--- !!!"), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("SKU-1")), "sku1");
    }

    #[test]
    fn test_output_alphabet_and_idempotence() {
        let samples = [
            "Hello, World!",
            "MiXeD_case-123",
            "tab\tand\nnewline",
            "ÀÉÎ õü",
            "İstanbul",
            "ǅemal",
            "🌹 rose 🌹",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert!(
                once.chars().all(|c| is_word_char(c) && !c.is_uppercase()),
                "{s:?} -> {once:?}"
            );
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
