use crate::lexer::{format_tokens, Token};
use tracing::{debug, trace};

fn stack_precedence(token: &Token) -> i32 {
    match token {
        Token::Operator(op) => op.precedence(),
        _ => 0,
    }
}

/// Reorders an infix token sequence into postfix order (shunting-yard).
///
/// Operators of equal precedence are popped before the new one is pushed,
/// so every operator is left associative: `2^3^2` becomes `2 3 ^ 2 ^`.
/// Unbalanced parentheses are tolerated: a `)` without a matching `(` just
/// empties the stack, and an unclosed `(` ends up in the output, where the
/// evaluator skips it.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = vec![];

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(op) => {
                while let Some(top) = stack.last() {
                    if stack_precedence(top) < op.precedence() {
                        break;
                    }

                    output.extend(stack.pop());
                }

                stack.push(token);
            }
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => output.push(top),
                    None => {
                        debug!("unmatched ')' in expression");
                        break;
                    }
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    trace!("postfix: {}", format_tokens(&output));
    output
}

#[cfg(test)]
mod test {
    use super::to_postfix;
    use crate::lexer::{format_tokens, tokenize};

    fn test_match(string: &str, expected: &str) {
        let tokens = tokenize(string).unwrap();
        assert_eq!(format_tokens(&to_postfix(&tokens)), expected);
    }

    #[test]
    fn test_precedence() {
        test_match("1+2*3", "1 2 3 * +");
        test_match("1*2+3", "1 2 * 3 +");
        test_match("1-2/3^4", "1 2 3 4 ^ / -");
        test_match("2^3*4", "2 3 ^ 4 *");
    }

    #[test]
    fn test_left_associative() {
        test_match("1-2-3", "1 2 - 3 -");
        test_match("8/4/2", "8 4 / 2 /");
        test_match("2^3^2", "2 3 ^ 2 ^");
        test_match("2root3^4", "2 3 $ 4 ^");
    }

    #[test]
    fn test_parens() {
        test_match("2*(3+4)", "2 3 4 + *");
        test_match("((1))", "1");
        test_match("(1+2)*(3-4)", "1 2 + 3 4 - *");
        test_match("2^(3^2)", "2 3 2 ^ ^");
    }

    #[test]
    fn test_unbalanced() {
        test_match("1+2)*3", "1 2 + 3 *");
        test_match("(1+2", "1 2 + (");
        test_match("2*(3", "2 3 ( *");
        test_match(")", "");
    }

    #[test]
    fn test_empty() {
        assert!(to_postfix(&[]).is_empty());
    }
}
