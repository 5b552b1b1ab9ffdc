//! Токены и позиции для парсера формул.

/// Позиция в тексте формулы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Начальная позиция (байт).
    pub start: usize,
    /// Конечная позиция (байт).
    pub end: usize,
}

impl Span {
    /// Создать новый Span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Токен с позицией.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

/// Типы токенов логической формулы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Открывающая скобка `(`
    LParen,
    /// Закрывающая скобка `)`
    RParen,
    /// Пропозициональная переменная
    Var(char),
    /// Отрицание `~`
    Not,
    /// Конъюнкция `&`
    And,
    /// Дизъюнкция `|`
    Or,
    /// Импликация `>>`
    Implies,
    /// Конец ввода
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Var(c) => write!(f, "{}", c),
            Token::Not => write!(f, "~"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Implies => write!(f, ">>"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
