use crate::lexer::{Op, Token};
use std::error::Error;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A numeric literal with more than one `.`, or one that is not a number.
    MalformedNumber(String),
    DivisionByZero,
    /// An operator found fewer than two operands on the stack.
    StackUnderflow(Op),
    /// The number of values left once every token was consumed.
    UnbalancedResult(usize),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::MalformedNumber(x) => write!(f, "malformed number '{}'", x),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::StackUnderflow(op) => {
                write!(f, "missing operand for operator '{}'", op.symbol())
            }
            EvalError::UnbalancedResult(0) => write!(f, "empty expression"),
            EvalError::UnbalancedResult(n) => {
                write!(f, "expected a single result, {} values left", n)
            }
        }
    }
}

impl Error for EvalError {}

fn evaluate_binop(op: Op, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    let out = match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
        Op::Mul => lhs * rhs,
        Op::Div => {
            if rhs == 0.0 {
                raise!(EvalError::DivisionByZero);
            }

            lhs / rhs
        }
        Op::Pow => lhs.powf(rhs),
        Op::Root => rhs.powf(1.0 / lhs),
    };

    Ok(out)
}

/// Evaluates a postfix token sequence with an operand stack.
///
/// Parentheses left over from an unbalanced expression are skipped.
pub fn evaluate(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for &token in postfix {
        match token {
            Token::Number(x) => stack.push(x),
            Token::Operator(op) => {
                let (lhs, rhs) = match (stack.pop(), stack.pop()) {
                    (Some(rhs), Some(lhs)) => (lhs, rhs),
                    _ => raise!(EvalError::StackUnderflow(op)),
                };

                stack.push(evaluate_binop(op, lhs, rhs)?);
            }
            Token::LeftParen | Token::RightParen => continue,
        }
    }

    if stack.len() != 1 {
        raise!(EvalError::UnbalancedResult(stack.len()));
    }

    let result = stack[0];
    debug!("result: {}", result);
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::{evaluate, EvalError};
    use crate::lexer::{Op, Token};

    fn num(x: f64) -> Token {
        Token::Number(x)
    }

    fn op(op: Op) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn test_binops() {
        let cases = vec![
            (Op::Add, 7.0, 2.0, 9.0),
            (Op::Sub, 7.0, 2.0, 5.0),
            (Op::Mul, 7.0, 2.0, 14.0),
            (Op::Div, 7.0, 2.0, 3.5),
            (Op::Pow, 2.0, 10.0, 1024.0),
            (Op::Root, 3.0, 27.0, 3.0),
        ];

        for (o, a, b, want) in cases {
            let got = evaluate(&[num(a), num(b), op(o)]).unwrap();
            assert!((got - want).abs() < 1e-12, "{:?}: {} != {}", o, got, want);
        }
    }

    #[test]
    fn test_operand_order() {
        // the most recently pushed value is the right hand side
        assert_eq!(evaluate(&[num(1.0), num(3.0), op(Op::Sub)]), Ok(-2.0));
        let root = evaluate(&[num(2.0), num(16.0), op(Op::Root)]).unwrap();
        assert!((root - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_nested() {
        // 2 * (3 + 4)
        let postfix = [num(2.0), num(3.0), num(4.0), op(Op::Add), op(Op::Mul)];
        assert_eq!(evaluate(&postfix), Ok(14.0));
    }

    #[test]
    fn test_division_by_zero() {
        let postfix = [num(1.0), num(0.0), op(Op::Div)];
        assert_eq!(evaluate(&postfix), Err(EvalError::DivisionByZero));

        let postfix = [num(1.0), num(-0.0), op(Op::Div)];
        assert_eq!(evaluate(&postfix), Err(EvalError::DivisionByZero));

        let postfix = [num(0.0), num(1.0), op(Op::Div)];
        assert_eq!(evaluate(&postfix), Ok(0.0));
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            evaluate(&[op(Op::Add)]),
            Err(EvalError::StackUnderflow(Op::Add))
        );
        assert_eq!(
            evaluate(&[num(1.0), op(Op::Mul)]),
            Err(EvalError::StackUnderflow(Op::Mul))
        );
    }

    #[test]
    fn test_unbalanced_result() {
        assert_eq!(evaluate(&[]), Err(EvalError::UnbalancedResult(0)));
        assert_eq!(
            evaluate(&[num(1.0), num(2.0)]),
            Err(EvalError::UnbalancedResult(2))
        );
    }

    #[test]
    fn test_skips_parens() {
        let postfix = [num(2.0), num(3.0), Token::LeftParen, op(Op::Mul)];
        assert_eq!(evaluate(&postfix), Ok(6.0));
    }

    #[test]
    fn test_messages() {
        assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            EvalError::MalformedNumber("1.2.3".into()).to_string(),
            "malformed number '1.2.3'"
        );
        assert_eq!(
            EvalError::StackUnderflow(Op::Root).to_string(),
            "missing operand for operator '$'"
        );
        assert_eq!(EvalError::UnbalancedResult(0).to_string(), "empty expression");
        assert_eq!(
            EvalError::UnbalancedResult(3).to_string(),
            "expected a single result, 3 values left"
        );
    }
}
