//! URL slugs derived from display names.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Latin letters with no canonical decomposition.
fn fold_letter(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ø' | 'Ø' => "o",
        'đ' | 'Đ' | 'ð' | 'Ð' => "d",
        'ł' | 'Ł' => "l",
        'þ' | 'Þ' => "th",
        'ı' => "i",
        _ => return None,
    })
}

/// Fold accented Latin text to ASCII: `Café` → `Cafe`, `Straße` → `Strasse`.
fn to_ascii(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.nfkd().filter(|c| !is_combining_mark(*c)) {
        match fold_letter(c) {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }
    out
}

/// Lowercase, hyphen-separated ASCII slug.
///
/// Accented letters are folded to ASCII first. `@` reads as `at`; `_`, `-`
/// and whitespace separate words; any other character that is not an
/// ASCII letter or digit is dropped.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in to_ascii(value).chars() {
        if c == '@' {
            push_word(&mut out, &mut pending_dash, "at");
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }
    out
}

fn push_word(out: &mut String, pending_dash: &mut bool, word: &str) {
    if !out.is_empty() {
        out.push('-');
    }
    *pending_dash = false;
    out.push_str(word);
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Intro to Pottery"), "intro-to-pottery");
    }

    #[test]
    fn strips_punctuation_and_is_idempotent() {
        assert_eq!(slugify("Intro to Pottery!!"), "intro-to-pottery");
        assert_eq!(slugify(&slugify("Intro to Pottery!!")), "intro-to-pottery");
    }

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(slugify("  Web -- Design__Basics  "), "web-design-basics");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn at_sign_becomes_word() {
        assert_eq!(slugify("Coding@Home"), "coding-at-home");
    }

    #[test]
    fn folds_accented_letters() {
        assert_eq!(slugify("Café Latte 2024"), "cafe-latte-2024");
        assert_eq!(slugify("Über Design"), "uber-design");
        assert_eq!(slugify("Crème Brûlée Class"), "creme-brulee-class");
        assert_eq!(slugify("Straße & Søren"), "strasse-soren");
    }

    #[test]
    fn drops_scripts_without_ascii_form() {
        assert_eq!(slugify("陶芸 Pottery"), "pottery");
    }
}
