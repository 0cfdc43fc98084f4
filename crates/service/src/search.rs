//! Case-insensitive substring search for the SeaORM repositories.

use sea_orm::sea_query::LikeExpr;

const ESCAPE: char = '\\';

/// Lowercased `term` with `%`, `_` and the escape character quoted.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `%term%` where wildcards inside `term` match literally.
pub fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape(ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn wildcards_are_quoted() {
        assert_eq!(escape_like(" 50% Off_Day "), r"50\% off\_day");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("Pottery"), "pottery");
    }
}
