use crate::eval::EvalError;
use itertools::Itertools;
use std::f64::consts;
use std::fmt;
use tracing::trace;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Root,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token {
    Number(f64),
    Operator(Op),
    LeftParen,
    RightParen,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
            Op::Root => '$',
        }
    }

    pub fn from_char(c: char) -> Option<Op> {
        let op = match c {
            '+' => Op::Add,
            '-' => Op::Sub,
            '*' => Op::Mul,
            '/' => Op::Div,
            '^' => Op::Pow,
            '$' => Op::Root,
            _ => return None,
        };

        Some(op)
    }

    pub fn precedence(self) -> i32 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Pow | Op::Root => 3,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(x) => write!(f, "{}", x),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// Renders a token sequence as space separated text, e.g. `2 3 4 + *`.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}

enum Keyword {
    Root,
    Constant(f64),
}

// Checked in this order, so `root` and `tau` win over the `e`/`t` inside them.
static KEYWORDS: [(&str, Keyword); 4] = [
    ("root", Keyword::Root),
    ("tau", Keyword::Constant(consts::TAU)),
    ("pi", Keyword::Constant(consts::PI)),
    ("e", Keyword::Constant(consts::E)),
];

fn is_operator(c: char) -> bool {
    Op::from_char(c).is_some()
}

struct Lexer {
    chars: Vec<char>,
    index: usize,
    literal: String,
    tokens: Vec<Token>,
    // Paren nesting of the input, and the nesting each open negation started at.
    depth: usize,
    negations: Vec<usize>,
}

impl Lexer {
    fn new(line: &str) -> Lexer {
        Lexer {
            chars: line.chars().collect(),
            index: 0,
            literal: String::new(),
            tokens: vec![],
            depth: 0,
            negations: vec![],
        }
    }

    fn prev(&self) -> Option<char> {
        if self.index > 0 {
            self.chars.get(self.index - 1).cloned()
        } else {
            None
        }
    }

    fn starts_with(&self, word: &str) -> bool {
        let mut rest = self.chars[self.index..].iter();
        word.chars().all(|c| rest.next() == Some(&c))
    }

    fn is_sign(&self) -> bool {
        let after_root =
            self.literal.is_empty() && self.tokens.last() == Some(&Token::Operator(Op::Root));

        match self.prev() {
            None => true,
            Some(c) => is_operator(c) || c == '(' || after_root,
        }
    }

    fn flush_literal(&mut self) -> Result<(), EvalError> {
        if self.literal.is_empty() {
            return Ok(());
        }

        let literal = std::mem::take(&mut self.literal);

        // A sign without digits negates the next operand or group: `-x`
        // becomes `(-1*x)`, closed by `close_negations`.
        if literal == "-" {
            self.tokens.push(Token::LeftParen);
            self.tokens.push(Token::Number(-1.0));
            self.tokens.push(Token::Operator(Op::Mul));
            self.negations.push(self.depth);
            return Ok(());
        }

        if literal.matches('.').count() > 1 {
            raise!(EvalError::MalformedNumber, "{}", literal);
        }

        match literal.parse::<f64>() {
            Ok(x) => self.push_operand(x),
            Err(_) => raise!(EvalError::MalformedNumber(literal)),
        }

        Ok(())
    }

    fn push_operand(&mut self, value: f64) {
        self.tokens.push(Token::Number(value));
        self.close_negations();
    }

    fn close_negations(&mut self) {
        while let Some(&start) = self.negations.last() {
            if start < self.depth {
                break;
            }

            self.negations.pop();
            self.tokens.push(Token::RightParen);
        }
    }

    fn parse_keyword(&mut self) -> Result<bool, EvalError> {
        let (word, keyword) = match KEYWORDS.iter().find(|(word, _)| self.starts_with(word)) {
            Some(entry) => entry,
            None => return Ok(false),
        };

        let after_digit = self.prev().map_or(false, |c| c.is_ascii_digit());
        self.flush_literal()?;

        match keyword {
            Keyword::Root => self.tokens.push(Token::Operator(Op::Root)),
            Keyword::Constant(value) => {
                if after_digit {
                    self.tokens.push(Token::Operator(Op::Mul));
                }

                self.push_operand(*value);
            }
        }

        trace!("keyword '{}' at {}", word, self.index);
        self.index += word.len();
        Ok(true)
    }

    fn run(mut self) -> Result<Vec<Token>, EvalError> {
        while self.index < self.chars.len() {
            let c = self.chars[self.index];

            if c.is_ascii_digit() || c == '.' || (c == '-' && self.is_sign()) {
                self.literal.push(c);
                self.index += 1;
                continue;
            }

            if self.parse_keyword()? {
                continue;
            }

            self.index += 1;

            if c.is_alphabetic() {
                continue;
            }

            self.flush_literal()?;

            match c {
                '(' => {
                    self.depth += 1;
                    self.tokens.push(Token::LeftParen);
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.tokens.push(Token::RightParen);
                    self.close_negations();
                }
                c => match Op::from_char(c) {
                    Some(op) => self.tokens.push(Token::Operator(op)),
                    None => trace!("dropping unknown character {:?}", c),
                },
            }
        }

        self.flush_literal()?;

        self.depth = 0;
        self.close_negations();
        Ok(self.tokens)
    }
}

/// Splits a sanitized expression into numbers, operators and parentheses.
///
/// A `-` at the start of the input or right after an operator or `(` is a
/// sign and becomes part of the following number; a sign with no digits
/// after it negates the next operand or parenthesized group. The keywords
/// `root`, `tau`, `pi` and `e` are expanded in place; a constant directly
/// after a digit gets an implicit `*` in front of it (`2pi` is `2 * pi`).
pub fn tokenize(line: &str) -> Result<Vec<Token>, EvalError> {
    let tokens = Lexer::new(line).run()?;
    trace!("tokens: {}", format_tokens(&tokens));
    Ok(tokens)
}
