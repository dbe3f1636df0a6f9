//! Trap-answer folding: lowercase plus a fixed Latin-1 accent table.
//!
//! Riddle answers were authored with and without accents, so comparison
//! folds both sides. The table covers the accented vowels and the cedilla;
//! anything else passes through `to_ascii_lowercase` untouched.

/// Fold one answer for comparison.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'ü' | 'Ú' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Whether a given answer matches the expected solution after trimming and
/// folding both sides.
pub fn matches(expected: &str, given: &str) -> bool {
    normalize(expected.trim()) == normalize(given.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_and_accents() {
        assert_eq!(normalize("SENTENÇA"), "sentenca");
        assert_eq!(normalize("Pátio"), "patio");
        assert_eq!(normalize("liberté"), "liberte");
        assert_eq!(normalize("ação"), "acao");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(normalize("naïve"), "naïve");
        assert_eq!(normalize("X-9!"), "x-9!");
    }

    #[test]
    fn test_matches_trims_both_sides() {
        assert!(matches("October", "  octóber "));
        assert!(matches(" sombra ", "SOMBRA"));
        assert!(!matches("october", "november"));
        assert!(matches("", "   "));
    }
}
