const DIGITS: &str = "0123456789.";
const OPERATORS: &str = "+-*/^$";
const PARENS: &str = "()";

// Enough letters to spell pi, e, tau and root.
const KEYWORD_LETTERS: &str = "pieaturo";

fn is_allowed(c: char) -> bool {
    DIGITS.contains(c)
        || OPERATORS.contains(c)
        || PARENS.contains(c)
        || KEYWORD_LETTERS.contains(c)
}

/// Drops every character that is not part of the expression grammar,
/// including whitespace.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|&c| is_allowed(c)).collect()
}
