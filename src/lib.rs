//! # lexiscript
//!
//! lexiscript is an interpreter for a family of small scripting languages that
//! share one grammar and one semantics but spell their keywords differently.
//! A [`Lexicon`] decides the spelling; [`run`] executes a program written with
//! it and returns the printed output together with the first error, if any.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{panic, thread};

use crate::{
    ast::{Position, Program},
    error::{Error, RuntimeError},
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse_program},
    lexicon::Lexicon,
    runtime::RunOptions,
};

/// The syntax tree.
///
/// Declares the `Expr` and `Statement` enums and the source positions they
/// carry. The tree is built once by the parser and only read by the
/// evaluator.
pub mod ast;
/// Error types for every phase of a run.
///
/// One module per phase: lexicon construction, tokenizing, parsing and
/// execution. The top-level [`Error`] is tagged with the phase that raised it
/// so that a malformed program can be told apart from one that failed while
/// running.
pub mod error;
/// The tokenizer, parser, evaluator and value model.
///
/// [`run`] wires these together; they are public for callers that need one
/// phase on its own.
pub mod interpreter;
/// Keyword lexicons.
///
/// A lexicon maps each grammar role to the word that spells it. It can be
/// built from an explicit map, loaded from JSON, or derived from a keyword
/// list shuffled with a seed.
pub mod lexicon;
/// Per-run configuration and the hooks a run talks to.
///
/// Defines the options a run is started with, the input source `ask` reads
/// from, and the interrupt flag that stops a run from another thread.
pub mod runtime;
/// Numeric helpers.
///
/// Lossless conversions between `i64`, `usize` and `f64`, index and slice
/// normalisation, and the float formatting the language prints with.
pub mod util;

/// Stack size for the thread a program runs on; deep recursion in the
/// program becomes deep recursion in the evaluator.
const RUN_STACK_SIZE: usize = 256 * 1024 * 1024;

/// The outcome of one run.
#[derive(Debug)]
pub struct Execution {
    /// Everything the program printed, including output produced before an
    /// error.
    pub output: String,
    /// `Ok(())` if the program ran to completion, otherwise the first error.
    pub result: Result<(), Error>,
}

impl Execution {
    /// The process exit status for this outcome: `0` on success, `1` on any
    /// error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.result.is_ok() { 0 } else { 1 }
    }
}

/// Tokenizes and parses a program without running it.
///
/// # Errors
/// Returns a lexical or parse error describing the first problem found.
///
/// # Examples
/// ```
/// use lexiscript::{lexicon::Lexicon, parse};
///
/// let program = parse("fn square(x) { ret x * x; } say square(4);", &Lexicon::default());
/// assert_eq!(program.unwrap().statements.len(), 2);
///
/// let error = parse("say (1;", &Lexicon::default()).unwrap_err();
/// assert!(error.to_string().starts_with("ParseError: "));
/// ```
pub fn parse(source: &str, lexicon: &Lexicon) -> Result<Program, Error> {
    let tokens = tokenize(source, lexicon)?;
    Ok(parse_program(&tokens)?)
}

/// Runs a program and returns its output and termination status.
///
/// The source is tokenized with `lexicon`, parsed, and executed in a fresh
/// context built from `options`. A program that fails to tokenize or parse
/// never starts, so its output is empty. A runtime error stops execution;
/// the output printed before it is kept.
///
/// The program runs on a dedicated thread with a large stack so that deeply
/// recursive programs hit the configured call-depth limit rather than the
/// native stack limit.
///
/// # Examples
/// ```
/// use lexiscript::{lexicon::Lexicon, run, runtime::RunOptions};
///
/// let execution = run("for i in 1 -> 3 { say i; }", &Lexicon::default(), RunOptions::default());
/// assert_eq!(execution.output, "123");
/// assert_eq!(execution.exit_code(), 0);
///
/// let execution = run("say 1; say 1 / 0;", &Lexicon::default(), RunOptions::default());
/// assert_eq!(execution.output, "1");
/// assert!(execution.result.is_err());
/// ```
#[must_use]
pub fn run(source: &str, lexicon: &Lexicon, options: RunOptions) -> Execution {
    thread::scope(|scope| {
        let worker = thread::Builder::new().name("lexiscript-run".to_string())
                                           .stack_size(RUN_STACK_SIZE)
                                           .spawn_scoped(scope, || execute(source, lexicon, options));
        match worker {
            Ok(handle) => handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)),
            Err(e) => {
                let error = RuntimeError::Io { details:  format!("Cannot start the interpreter thread: {e}."),
                                               position: Position::default(), };
                Execution { output: String::new(),
                            result: Err(error.into()), }
            },
        }
    })
}

fn execute(source: &str, lexicon: &Lexicon, options: RunOptions) -> Execution {
    let program = match parse(source, lexicon) {
        Ok(program) => program,
        Err(e) => {
            return Execution { output: String::new(),
                               result: Err(e), };
        },
    };

    let mut context = Context::new(options);
    let result = context.execute(&program).map_err(Error::from);
    Execution { output: context.take_output(),
                result }
}
