//! Проверка текстовой записи формул.
//!
//! Пустая строка считается корректной заглушкой в обеих проверках:
//! её отвергают уже вызывающие (леджер, правила), а не валидатор.

use crate::parser;

/// Формула допустима: символы из алфавита, нет кривых последовательностей
/// (`>`, `&&`, `||`, `<<`), текст разбирается по грамматике.
pub fn is_valid(text: &str) -> bool {
    text.is_empty() || parser::parse_lenient(text).is_ok()
}

/// Скобки согласованы с бинарными связками: каждая бинарная подформула
/// обёрнута ровно одной парой скобок, и других скобок нет.
pub fn check_brackets(text: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    parser::parse_lenient(text).is_ok_and(|parsed| parsed.well_bracketed)
}

/// Полная проверка для формулы, которая попадёт в леджер.
pub fn is_well_formed(text: &str) -> bool {
    !text.trim().is_empty() && is_valid(text) && check_brackets(text)
}

/// Каноническая расстановка пробелов: убрать все пробелы, затем окружить
/// каждую бинарную связку ровно одним пробелом с каждой стороны.
pub fn canonicalize(text: &str) -> String {
    let compact: String = text.chars().filter(|c| *c != ' ').collect();
    let mut out = String::with_capacity(compact.len() * 2);
    let mut chars = compact.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '|' | '&' => {
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            '>' if chars.peek() == Some(&'>') => {
                chars.next();
                out.push_str(" >> ");
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(is_valid(""));
        assert!(is_valid("A"));
        assert!(is_valid("(A >> B)"));
        assert!(is_valid("A >> B | C"));
        assert!(is_valid("~~(A&B)"));

        assert!(!is_valid("(A > B)"));
        assert!(!is_valid("(A && B)"));
        assert!(!is_valid("(A || B)"));
        assert!(!is_valid("(A << B)"));
        assert!(!is_valid("(A >> B"));
        assert!(!is_valid("(A >> S)"));
        assert!(!is_valid("a"));
        assert!(!is_valid("~"));
    }

    #[test]
    fn test_check_brackets() {
        assert!(check_brackets(""));
        assert!(check_brackets("A"));
        assert!(check_brackets("~A"));
        assert!(check_brackets("(A >> B)"));
        assert!(check_brackets("((A & B) >> ~(C | D))"));

        assert!(!check_brackets("A >> B"));
        assert!(!check_brackets("(A)"));
        assert!(!check_brackets("((A >> B))"));
        assert!(!check_brackets("(A >> B) >> C"));
        assert!(!check_brackets("(A >> B"));
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("(A>>B)"), "(A >> B)");
        assert_eq!(canonicalize("  ( A |  ~B )"), "(A | ~B)");
        assert_eq!(canonicalize("((A&B)>>C)"), "((A & B) >> C)");
    }

    #[test]
    fn test_canonicalize_preserves_validity_and_is_idempotent() {
        for text in [
            "A",
            "~ A",
            "(A>>B)",
            "A & B | C >> D",
            "~(  A|(B  >>~C))",
            "((A >> (B >> C)) >> ((A >> B) >> (A >> C)))",
        ] {
            let once = canonicalize(text);
            assert!(is_valid(&once), "{}", text);
            assert_eq!(canonicalize(&once), once, "{}", text);
        }
    }

    #[test]
    fn test_canonical_text_matches_display() {
        let text = "(~A>>(B|C))";
        let formula = crate::Formula::parse(text).unwrap();
        assert_eq!(canonicalize(text), formula.to_string());
    }
}
