//! Text normalization shared by index construction and queries.

/// Canonical matching form of `raw`.
///
/// Lowercases, turns every character that is not a word character
/// (alphanumeric or `_`) into a separator, then collapses separators to a
/// single space and trims. Hyphens and punctuation therefore split words.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if is_word_char(ch) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// True when `raw` has at least one cased character and none in lowercase.
///
/// Works on the original text; [`normalize`] loses case.
pub fn is_all_uppercase(raw: &str) -> bool {
    raw.chars().any(char::is_uppercase) && !raw.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_hyphens() {
        assert_eq!(
            normalize("  Dept. of Physics,  Max-Planck-Institut (MPI)!  "),
            "dept of physics max planck institut mpi"
        );
    }

    #[test]
    fn keeps_digits_underscores_and_accents() {
        assert_eq!(normalize("Université Paris_7 – Diderot"), "université paris_7 diderot");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n"), "");
        assert_eq!(normalize("--;;"), "");
    }

    #[test]
    fn uppercase_detection() {
        assert!(is_all_uppercase("LABS"));
        assert!(is_all_uppercase("MIT-CSAIL"));
        assert!(is_all_uppercase("U2"));
        assert!(!is_all_uppercase("Labs"));
        assert!(!is_all_uppercase("123"));
        assert!(!is_all_uppercase(""));
    }
}
