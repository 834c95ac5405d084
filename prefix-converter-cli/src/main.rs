use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::info;
use prefix_converter::interpreter::error::{format_error, TokenizeError};
use prefix_converter::interpreter::syntax::call_tree::CallTree;
use prefix_converter::interpreter::{lexer, parser, tokens_to_string};
use std::process;

const DEFAULT_EXPRESSION: &str = "-1+(-2 +-5*+8.6)-3";

/// Converts an infix arithmetic expression into prefix order and prints it as nested calls
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, allow_hyphen_values = true)]
struct Arguments {
    /// The expression to convert, possibly split over several arguments
    expression: Vec<String>,

    /// Also print the prefix sequence as an indented tree
    #[clap(long)]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

impl Arguments {
    fn expression(&self) -> String {
        if self.expression.is_empty() {
            DEFAULT_EXPRESSION.to_string()
        } else {
            self.expression.join(" ")
        }
    }
}

fn main() {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let expression = args.expression();
    match run(&expression, args.tree) {
        Ok(report) => println!("{}", report),
        Err(error) => {
            eprintln!("{}", describe_error(&expression, &error));
            process::exit(1);
        }
    }
}

fn run(expression: &str, show_tree: bool) -> Result<String> {
    info!("converting {:?}", expression);
    let tokens = lexer::tokenize(expression)?;
    let token_trace = tokens_to_string(&tokens);
    let prefix_tokens = parser::to_prefix(tokens)?;
    let call_tree = CallTree::from_prefix(&prefix_tokens)?;

    let mut report = format!(
        "{}\n{}\n{}\n{}",
        expression,
        token_trace,
        tokens_to_string(&prefix_tokens),
        call_tree.to_call_text()?
    );
    if show_tree {
        report.push('\n');
        report.push_str(&call_tree.to_tree_view()?);
    }
    Ok(report)
}

fn describe_error(expression: &str, error: &anyhow::Error) -> String {
    match error.downcast_ref::<TokenizeError>() {
        Some(tokenize_error) => format_error(expression, tokenize_error),
        None => format!("could not render expression: {:#}", error),
    }
}
