#[macro_use]
mod util;

pub mod eval;
pub mod lexer;
pub mod postfix;
pub mod sanitize;

pub use eval::{evaluate, EvalError};
pub use lexer::{format_tokens, tokenize, Op, Token};
pub use postfix::to_postfix;
pub use sanitize::sanitize;

use tracing::trace;

/// Runs a raw line of text through the whole pipeline: sanitize, tokenize,
/// convert to postfix and evaluate.
pub fn calculate(line: &str) -> Result<f64, EvalError> {
    let clean = sanitize(line);
    trace!("sanitized: {:?}", clean);

    let tokens = tokenize(&clean)?;
    evaluate(&to_postfix(&tokens))
}
