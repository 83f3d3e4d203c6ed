use crate::formula::{Atom, Proposition};
use log::trace;
use std::fmt::{self, Display, Formatter};

const SYMBOL_IMP: &str = "->";
const SYMBOL_IFF: &str = "<->";

// Stand-ins for the two multi-character operators while scanning. Digits are
// never valid input, so they cannot collide with anything the user wrote.
const SENTINEL_IMP: char = '0';
const SENTINEL_IFF: char = '1';

// Lower binds tighter.
const PREC_MAX: u8 = 10;
const PREC_IFF: u8 = 8;
const PREC_IMP: u8 = 7;
const PREC_OR: u8 = 5;
const PREC_AND: u8 = 4;
const PREC_NOT: u8 = 1;

/// Parse an infix formula such as `(A & B) -> ~C`.
///
/// Operators, tightest first: `~`, `&`, `|`, `->`, `<->`. Chains of the same
/// operator associate to the left. Whitespace is ignored and letters are
/// upper-cased; `T` and `F` are the constants.
pub fn parse(text: &str) -> Result<Proposition, ParseError> {
    let tokens = tokenize(text)?;
    trace!("tokens: {:?}", tokens);

    let cursor = Cursor { tokens: &tokens, pos: 0 };
    let (expr, cursor) = parse_with_prec(cursor, PREC_MAX)?;
    if !cursor.at_end() {
        return Err(ParseError::TrailingInput);
    }
    Ok(expr)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token {
    LeftParen,
    RightParen,
    Not,
    And,
    Or,
    Imply,
    IfOnlyIf,
    Atom(Atom),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Not => f.write_str("~"),
            Token::And => f.write_str("&"),
            Token::Or => f.write_str("|"),
            Token::Imply => f.write_str(SYMBOL_IMP),
            Token::IfOnlyIf => f.write_str(SYMBOL_IFF),
            Token::Atom(a) => write!(f, "{}", a),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BinaryOp {
    And,
    Or,
    Imply,
    IfOnlyIf,
}

impl BinaryOp {
    fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::And => Some(BinaryOp::And),
            Token::Or => Some(BinaryOp::Or),
            Token::Imply => Some(BinaryOp::Imply),
            Token::IfOnlyIf => Some(BinaryOp::IfOnlyIf),
            _ => None,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::And => PREC_AND,
            BinaryOp::Or => PREC_OR,
            BinaryOp::Imply => PREC_IMP,
            BinaryOp::IfOnlyIf => PREC_IFF,
        }
    }

    fn apply(&self, l: Proposition, r: Proposition) -> Proposition {
        match self {
            BinaryOp::And => Proposition::and(l, r),
            BinaryOp::Or => Proposition::or(l, r),
            BinaryOp::Imply => Proposition::imply(l, r),
            BinaryOp::IfOnlyIf => Proposition::iff(l, r),
        }
    }
}

/// Read position into an immutable token buffer. Every parsing step takes a
/// cursor and hands back the advanced one; backtracking is just reusing an
/// earlier copy.
#[derive(Clone, Copy, Debug)]
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(self) -> Option<(Token, Cursor<'a>)> {
        let token = *self.tokens.get(self.pos)?;
        Some((
            token,
            Cursor {
                tokens: self.tokens,
                pos: self.pos + 1,
            },
        ))
    }
}

/// Parse one primary, then fold in every following operator that binds no
/// looser than `ceiling`. The right operand of each operator is parsed with a
/// ceiling just below that operator's precedence, so an operator of equal
/// precedence is left for this loop and the chain folds to the left.
fn parse_with_prec(cursor: Cursor<'_>, ceiling: u8) -> Result<(Proposition, Cursor<'_>), ParseError> {
    let (mut expr, mut cursor) = parse_primary(cursor)?;

    while let Some((token, after)) = cursor.next() {
        if token == Token::RightParen {
            // leave it for the caller that opened the group
            return Ok((expr, cursor));
        }
        let op = BinaryOp::from_token(token).ok_or_else(|| ParseError::UnknownOperator(token.to_string()))?;
        if op.precedence() > ceiling {
            return Ok((expr, cursor));
        }
        let (rhs, rest) = parse_with_prec(after, op.precedence() - 1)?;
        expr = op.apply(expr, rhs);
        cursor = rest;
    }

    Ok((expr, cursor))
}

fn parse_primary(cursor: Cursor<'_>) -> Result<(Proposition, Cursor<'_>), ParseError> {
    let (token, after) = cursor
        .next()
        .ok_or(ParseError::ExpectedTokenAtEnd(Expected::Operand))?;

    match token {
        Token::Atom(a) => Ok((Proposition::Atom(a), after)),
        Token::Not => {
            let (expr, rest) = parse_with_prec(after, PREC_NOT)?;
            Ok((Proposition::not(expr), rest))
        }
        Token::LeftParen => {
            let (expr, rest) = parse_with_prec(after, PREC_MAX)?;
            match rest.next() {
                Some((Token::RightParen, rest)) => Ok((expr, rest)),
                Some(_) => Err(ParseError::UnmatchedParenthesis(rest.pos)),
                None => Err(ParseError::ExpectedTokenAtEnd(Expected::ClosingParenthesis)),
            }
        }
        Token::RightParen | Token::And | Token::Or | Token::Imply | Token::IfOnlyIf => {
            Err(ParseError::MissingOperand(cursor.pos))
        }
    }
}

/// Normalize the raw text and split it into one token per character.
///
/// Positions in errors refer to the compacted text: whitespace dropped and
/// each `->` / `<->` counted as a single character.
fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let text = text.to_ascii_uppercase();

    if let Some(index) = text.chars().position(|c| c.is_ascii_digit()) {
        return Err(ParseError::DisallowedCharacter(index));
    }

    let compact: Vec<char> = text
        .replace(SYMBOL_IFF, &SENTINEL_IFF.to_string())
        .replace(SYMBOL_IMP, &SENTINEL_IMP.to_string())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut tokens = Vec::with_capacity(compact.len());
    let mut in_atom = false;
    for (i, &c) in compact.iter().enumerate() {
        if c.is_ascii_uppercase() {
            if in_atom {
                return Err(ParseError::AtomTooLong(i - 1));
            }
            in_atom = true;
            tokens.push(Token::Atom(Atom { symbol: c }));
            continue;
        }
        in_atom = false;
        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '&' => Token::And,
            '|' => Token::Or,
            '~' => Token::Not,
            SENTINEL_IMP => Token::Imply,
            SENTINEL_IFF => Token::IfOnlyIf,
            _ => return Err(ParseError::DisallowedCharacter(i)),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// What the parser was still waiting for when the input ran out.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Expected {
    Operand,
    ClosingParenthesis,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expected::Operand => f.write_str("an operand"),
            Expected::ClosingParenthesis => f.write_str("')'"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    EmptyInput,
    DisallowedCharacter(usize),
    AtomTooLong(usize),
    UnknownOperator(String),
    UnmatchedParenthesis(usize),
    MissingOperand(usize),
    ExpectedTokenAtEnd(Expected),
    TrailingInput,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParseError::EmptyInput => f.write_str("empty input"),
            ParseError::DisallowedCharacter(i) => write!(f, "character at index {} is not allowed", i),
            ParseError::AtomTooLong(i) => write!(f, "atom starting at index {} is longer than one letter", i),
            ParseError::UnknownOperator(s) => write!(f, "'{}' is not a binary operator", s),
            ParseError::UnmatchedParenthesis(i) => write!(f, "expected ')' at index {}", i),
            ParseError::MissingOperand(i) => write!(f, "expected an operand at index {}", i),
            ParseError::ExpectedTokenAtEnd(e) => write!(f, "expected {} at end of input", e),
            ParseError::TrailingInput => f.write_str("input was not fully consumed"),
        }
    }
}

impl std::error::Error for ParseError {}
