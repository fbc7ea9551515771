use std::io;
use std::process;

use clap::Parser;
use postfix_calc::{evaluate, format_tokens, sanitize, to_postfix, tokenize, EvalError};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[clap(version, about = "Evaluates an arithmetic expression via postfix notation")]
struct Args {
    #[clap(short, long, default_value = "5", help = "number of fractional digits to print")]
    precision: usize,
    #[clap(short = 't', long, action, help = "print the infix and postfix token streams")]
    show_tokens: bool,
    #[clap(short, long, action = clap::ArgAction::Count,
           help = "show more in logs, may be provided multiple times")]
    verbose: u8,
    #[clap(help = "the expression, read from stdin when omitted")]
    expr: Vec<String>,
}

fn print_box(title: &str, body: &str) {
    let width = title.chars().count().max(body.chars().count()) + 2;
    let rule = "─".repeat(width);

    println!("╭{}╮", rule);
    println!("│ {:<w$} │", title, w = width - 2);
    println!("├{}┤", rule);
    println!("│ {:<w$} │", body, w = width - 2);
    println!("╰{}╯", rule);
}

fn execute_line(line: &str, args: &Args) -> Result<f64, EvalError> {
    let tokens = tokenize(&sanitize(line))?;
    let postfix = to_postfix(&tokens);

    if args.show_tokens {
        print_box("Infix", &format_tokens(&tokens));
        print_box("Postfix", &format_tokens(&postfix));
    }

    evaluate(&postfix)
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let line = if args.expr.is_empty() {
        match read_line() {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: failed to read input: {}", err);
                process::exit(1);
            }
        }
    } else {
        args.expr.join(" ")
    };

    match execute_line(&line, &args) {
        Ok(x) => println!("Result: {:.*}", args.precision, x),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}
