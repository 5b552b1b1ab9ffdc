//! Лексер для текстовой записи формул.

use logos::Logos;

use super::error::FormulaError;
use super::token::{Span, Spanned, Token};

/// Внутренние токены для logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r" +")] // Только пробелы; табуляция и переводы строк недопустимы
enum LogosToken {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Двухсимвольная импликация; одиночный `>` считается ошибкой лексера
    #[token(">>")]
    Implies,

    #[token("|")]
    Or,

    #[token("&")]
    And,

    #[token("~")]
    Not,

    // Переменные фиксированного алфавита (см. formula::ALPHABET)
    #[regex("[ABCDFGHJKLMWRTZU]", |lex| lex.slice().chars().next())]
    Var(char),
}

/// Лексер формул.
pub struct Lexer<'a> {
    logos: logos::Lexer<'a, LogosToken>,
    source: &'a str,
    peeked: Option<Spanned<Token>>,
}

impl<'a> Lexer<'a> {
    /// Создать новый лексер.
    pub fn new(source: &'a str) -> Self {
        Self {
            logos: LogosToken::lexer(source),
            source,
            peeked: None,
        }
    }

    /// Получить следующий токен.
    pub fn next_token(&mut self) -> Result<Spanned<Token>, FormulaError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        self.read_token()
    }

    /// Посмотреть на следующий токен без его потребления.
    pub fn peek_token(&mut self) -> Result<&Spanned<Token>, FormulaError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read_token()?,
        };
        let token = self.peeked.insert(token);
        Ok(&*token)
    }

    /// Прочитать токен из logos.
    fn read_token(&mut self) -> Result<Spanned<Token>, FormulaError> {
        match self.logos.next() {
            Some(Ok(logos_token)) => {
                let span = Span::new(self.logos.span().start, self.logos.span().end);
                Ok(Spanned::new(Self::convert_token(logos_token), span))
            }
            Some(Err(())) => {
                let span = Span::new(self.logos.span().start, self.logos.span().end);
                Err(FormulaError::LexerError { span })
            }
            None => {
                let pos = self.source.len();
                Ok(Spanned::new(Token::Eof, Span::new(pos, pos)))
            }
        }
    }

    /// Конвертировать внутренний токен logos в публичный Token.
    fn convert_token(logos_token: LogosToken) -> Token {
        match logos_token {
            LogosToken::LParen => Token::LParen,
            LogosToken::RParen => Token::RParen,
            LogosToken::Implies => Token::Implies,
            LogosToken::Or => Token::Or,
            LogosToken::And => Token::And,
            LogosToken::Not => Token::Not,
            LogosToken::Var(c) => Token::Var(c),
        }
    }
}

/// Разбить текст на токены целиком (без Eof).
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Token>>, FormulaError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.value == Token::Eof {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
