/// Executes a syntax tree and collects what it prints.
///
/// The evaluator walks the tree produced by the parser, executing statements
/// against an environment chain, evaluating expressions, calling user
/// functions and builtins, and appending printed text to the run's output.
///
/// # Responsibilities
/// - Executes statements and propagates `return` and exit as control flow.
/// - Implements operators, indexing, calls and loops.
/// - Reports runtime errors such as type mismatches or division by zero.
pub mod evaluator;
/// Turns source text into lexemes.
///
/// The tokenizer splits raw text into numbers, strings, identifiers,
/// operators and punctuation. Which words count as keywords is decided by the
/// lexicon it is given, never by a fixed table.
///
/// # Responsibilities
/// - Produces lexemes carrying their token and a 1-based line and column.
/// - Decodes string escapes and checks numeric literals.
/// - Skips whitespace and comments.
/// - Fails with a `LexError` on anything outside the language.
pub mod lexer;
/// Builds the syntax tree from lexemes.
///
/// A recursive-descent parser with one function per precedence level. One
/// grammar serves every lexicon: the parser only sees roles, never surface
/// spellings.
///
/// # Responsibilities
/// - Builds statements and expressions with their source positions.
/// - Stops at the first grammar violation with a `ParseError`.
/// - Desugars compound assignment and the bare `for` loop.
pub mod parser;
/// Runtime values.
///
/// Declares what a running program can hold: integers, floats, strings,
/// booleans, shared arrays, functions, builtins and file handles. It also
/// provides truthiness, equality, ordering and the printed form of every
/// value.
///
/// # Responsibilities
/// - Defines `Value` and the coercions operators and builtins rely on.
/// - Renders values the way the language prints them.
pub mod value;
