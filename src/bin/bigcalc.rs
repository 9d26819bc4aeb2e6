//! A REPL calculator over [`bigint::BigInt`]: tokenizer, recursive-descent
//! parser, and evaluation loop, grounded on `calc.c`'s structure.
//!
//! Grammar:
//!
//! ```text
//! expr   := sum EOL | END
//! sum    := term (('+'|'-') term)*
//! term   := factor (('*'|'/') factor)*
//! factor := '-' factor | '(' sum ')' | NUM
//! ```

use std::io::{self, Read, Write};

use bigint::BigInt;
use clap::Parser;

#[derive(Debug, thiserror::Error)]
enum CalcError {
    #[error("unexpected character: '{0}'")]
    UnexpectedCharacter(char),
    #[error("trailing character(s)")]
    TrailingCharacters,
    #[error("expected ')'")]
    ExpectedCloseParen,
    #[error("expected '-', number or '('")]
    ExpectedFactor,
    #[error("division by zero!")]
    DivisionByZero,
    #[error(transparent)]
    InvalidNumber(#[from] bigint::BigIntError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Add,
    Sub,
    Mul,
    Div,
    LParen,
    RParen,
    Num,
    Eol,
    End,
}

struct Token {
    kind: TokenKind,
    value: Option<BigInt>,
}

/// A character-at-a-time reader over stdin, buffering a one-character
/// pushback the way `calc.c` uses `ungetc`.
struct Lexer<R> {
    input: R,
    pushback: Option<char>,
}

impl<R: Read> Lexer<R> {
    fn new(input: R) -> Self {
        Lexer { input, pushback: None }
    }

    fn read_char(&mut self) -> Option<char> {
        if let Some(c) = self.pushback.take() {
            return Some(c);
        }
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(byte[0] as char),
        }
    }

    fn unread(&mut self, c: char) {
        debug_assert!(self.pushback.is_none(), "at most one character of pushback");
        self.pushback = Some(c);
    }

    /// Read the next token, skipping spaces and tabs. Numeric literals
    /// accumulate into a growable `String` instead of `calc.c`'s static
    /// `BUFFER_SIZE` buffer — no artificial length cap.
    fn next_token(&mut self) -> Result<Token, CalcError> {
        let mut c = self.read_char();
        while matches!(c, Some(' ') | Some('\t')) {
            c = self.read_char();
        }

        let kind = match c {
            Some('+') => return Ok(Token { kind: TokenKind::Add, value: None }),
            Some('-') => return Ok(Token { kind: TokenKind::Sub, value: None }),
            Some('*') => return Ok(Token { kind: TokenKind::Mul, value: None }),
            Some('/') => return Ok(Token { kind: TokenKind::Div, value: None }),
            Some('(') => return Ok(Token { kind: TokenKind::LParen, value: None }),
            Some(')') => return Ok(Token { kind: TokenKind::RParen, value: None }),
            Some('\n') => return Ok(Token { kind: TokenKind::Eol, value: None }),
            None => return Ok(Token { kind: TokenKind::End, value: None }),
            Some(other) => other,
        };

        if kind.is_ascii_digit() {
            let mut digits = String::new();
            let mut c = Some(kind);
            while let Some(d) = c {
                if !d.is_ascii_digit() {
                    self.unread(d);
                    break;
                }
                digits.push(d);
                c = self.read_char();
            }
            let value = BigInt::from_decimal(&digits)?;
            return Ok(Token { kind: TokenKind::Num, value: Some(value) });
        }

        Err(CalcError::UnexpectedCharacter(kind))
    }
}

struct Calculator<R> {
    lexer: Lexer<R>,
    current: Token,
}

impl<R: Read> Calculator<R> {
    /// The lexer starts primed with a synthetic `Eol` token so the first
    /// real call to [`Calculator::advance`] happens inside the normal
    /// error-reporting path in `run`, rather than needing its own.
    fn new(input: R) -> Self {
        Calculator { lexer: Lexer::new(input), current: Token { kind: TokenKind::Eol, value: None } }
    }

    fn advance(&mut self) -> Result<(), CalcError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Returns `None` at end-of-input, closing the REPL loop.
    fn expr(&mut self) -> Result<Option<BigInt>, CalcError> {
        if self.current.kind == TokenKind::End {
            return Ok(None);
        }

        let result = self.sum()?;

        if self.current.kind != TokenKind::Eol {
            return Err(CalcError::TrailingCharacters);
        }

        Ok(Some(result))
    }

    fn sum(&mut self) -> Result<BigInt, CalcError> {
        let mut x = self.term()?;
        loop {
            match self.current.kind {
                TokenKind::Add => {
                    self.advance()?;
                    let y = self.term()?;
                    x = x.add(&y);
                }
                TokenKind::Sub => {
                    self.advance()?;
                    let y = self.term()?;
                    x = x.sub(&y);
                }
                _ => break,
            }
        }
        Ok(x)
    }

    fn term(&mut self) -> Result<BigInt, CalcError> {
        let mut x = self.factor()?;
        loop {
            match self.current.kind {
                TokenKind::Mul => {
                    self.advance()?;
                    let y = self.factor()?;
                    x = x.mul(&y);
                }
                TokenKind::Div => {
                    self.advance()?;
                    let y = self.factor()?;
                    if y.is_zero() {
                        return Err(CalcError::DivisionByZero);
                    }
                    log::trace!("dividing {}-limb value by {}-limb value", x.max_decimal_length(), y.max_decimal_length());
                    x = x.div(&y);
                }
                _ => break,
            }
        }
        Ok(x)
    }

    fn factor(&mut self) -> Result<BigInt, CalcError> {
        match self.current.kind {
            TokenKind::Sub => {
                self.advance()?;
                let x = self.factor()?;
                Ok(x.neg())
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.sum()?;
                if self.current.kind != TokenKind::RParen {
                    return Err(CalcError::ExpectedCloseParen);
                }
                self.advance()?;
                Ok(inner)
            }
            TokenKind::Num => {
                let value = self.current.value.take().expect("NUM token always carries a value");
                self.advance()?;
                Ok(value)
            }
            _ => Err(CalcError::ExpectedFactor),
        }
    }

    /// Discard remaining tokens on the current line, so the REPL can
    /// resynchronize after a bad line instead of exiting like `calc.c`
    /// does. Assumes `self.current` accurately reflects the next
    /// unconsumed token, which holds for every error raised while parsing
    /// (parsing only ever inspects `self.current` right after a
    /// successful `advance`). A no-op if already at end-of-line/input —
    /// notably the division-by-zero check, which only fires once the
    /// divisor factor has already been consumed through to EOL.
    fn resync(&mut self) {
        while !matches!(self.current.kind, TokenKind::Eol | TokenKind::End) {
            match self.lexer.next_token() {
                Ok(token) => self.current = token,
                Err(_) => continue,
            }
        }
    }

    /// Like [`Calculator::resync`], but used after a tokenizing error from
    /// [`Calculator::advance`] itself, where `self.current` is stale (the
    /// failed call never assigned it) and must not be trusted to decide
    /// whether we're already at end-of-line.
    fn resync_from_scratch(&mut self) {
        loop {
            match self.lexer.next_token() {
                Ok(token) => {
                    let done = matches!(token.kind, TokenKind::Eol | TokenKind::End);
                    self.current = token;
                    if done {
                        break;
                    }
                }
                Err(_) => continue,
            }
        }
    }
}

/// An arbitrary-precision integer calculator REPL.
#[derive(Parser, Debug)]
#[command(name = "bigcalc", version, about)]
struct Args {
    /// Evaluate this single expression non-interactively instead of
    /// reading a REPL from stdin.
    expr: Option<String>,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

/// Evaluate every expression on `input`, writing each result to `output`.
/// Returns whether any expression failed — the REPL still recovers and
/// keeps going (see `Calculator::resync`), but the caller needs to know
/// whether an error occurred to decide the process's exit status.
fn run<R: Read, W: Write>(input: R, mut output: W) -> io::Result<bool> {
    let mut parser = Calculator::new(input);
    let mut had_error = false;

    loop {
        // Each iteration starts a fresh expression, mirroring calc.c's
        // main loop calling next_token() immediately before expr().
        if let Err(err) = parser.advance() {
            eprintln!("error: {err}");
            had_error = true;
            parser.resync_from_scratch();
            continue;
        }

        match parser.expr() {
            Ok(None) => return Ok(had_error),
            Ok(Some(value)) => {
                writeln!(output, "{}", value.to_decimal())?;
            }
            Err(err) => {
                eprintln!("error: {err}");
                had_error = true;
                parser.resync();
            }
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let stdout = io::stdout();
    // In single-expression mode the whole invocation is that one
    // expression, so a failure must surface as a non-zero exit status
    // (spec §7). The interactive REPL instead recovers from a bad line
    // and keeps reading, so its own exit status always stays 0.
    let exit_code = if let Some(expr) = args.expr {
        let source = format!("{expr}\n");
        let had_error = run(source.as_bytes(), stdout.lock())?;
        had_error as i32
    } else {
        run(io::stdin().lock(), stdout.lock())?;
        0
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> String {
        let mut out = Vec::new();
        run(source.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn evaluates_simple_sum() {
        assert_eq!(eval("1 + 2\n"), "3\n");
    }

    #[test]
    fn respects_operator_precedence() {
        assert_eq!(eval("2 + 3 * 4\n"), "14\n");
    }

    #[test]
    fn handles_parentheses_and_unary_minus() {
        assert_eq!(eval("-(2 + 3) * 4\n"), "-20\n");
    }

    #[test]
    fn division_by_zero_reports_error_and_continues() {
        let mut out = Vec::new();
        let had_error = run("1 / 0\n2 + 2\n".as_bytes(), &mut out).unwrap();
        assert!(had_error);
        assert_eq!(String::from_utf8(out).unwrap(), "4\n");
    }

    #[test]
    fn large_expression() {
        assert_eq!(
            eval("1000000000000000000 * 1000000000000000000\n"),
            "1000000000000000000000000000000000000\n"
        );
    }

    #[test]
    fn well_formed_input_reports_no_error() {
        let mut out = Vec::new();
        let had_error = run("1 + 1\n".as_bytes(), &mut out).unwrap();
        assert!(!had_error);
    }

    #[test]
    fn single_expression_division_by_zero_is_reported() {
        // The non-interactive single-expression path (a bare expression
        // with no trailing REPL input) must still surface as an error so
        // `main` can exit non-zero, even though the multi-line REPL
        // recovers from the same failure and keeps going.
        let mut out = Vec::new();
        let had_error = run("1 / 0\n".as_bytes(), &mut out).unwrap();
        assert!(had_error);
        assert!(String::from_utf8(out).unwrap().is_empty());
    }
}
