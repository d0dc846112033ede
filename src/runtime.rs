use std::{
    collections::VecDeque,
    io::BufRead,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Default bound on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Supplies lines to the `ask` builtin.
///
/// The prompt is handed to the source rather than written to the program's
/// output; an interactive source may show it, a scripted one ignores it.
pub trait InputSource: Send {
    /// Returns the next input line without its line terminator, or `None` at
    /// the end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Reads input lines from the process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(strip_line_terminator(line)),
        }
    }
}

/// A fixed queue of input lines, for tests and harness runs.
///
/// ## Example
/// ```
/// use lexiscript::runtime::{InputSource, ScriptedInput};
///
/// let mut input = ScriptedInput::from_text("first\nsecond\n");
///
/// assert_eq!(input.read_line("? ").as_deref(), Some("first"));
/// assert_eq!(input.read_line("? ").as_deref(), Some("second"));
/// assert_eq!(input.read_line("? "), None);
/// assert_eq!(input.prompts(), ["? ", "? ", "? "]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines:   VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Creates a source yielding `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { lines:   lines.into_iter().map(Into::into).collect(),
               prompts: Vec::new(), }
    }

    /// Creates a source yielding the lines of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// The prompts received so far, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front()
    }
}

fn strip_line_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// A flag that stops a running program from another thread.
///
/// The interpreter checks it before every statement and every loop iteration
/// and halts with an `Interrupted` error once it is set. Clones share the same
/// flag.
///
/// ## Example
/// ```
/// use lexiscript::runtime::Interrupt;
///
/// let interrupt = Interrupt::new();
/// let handle = interrupt.clone();
///
/// assert!(!interrupt.is_triggered());
/// handle.trigger();
/// assert!(interrupt.is_triggered());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Creates an untriggered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the run holding this flag to stop.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Tests whether the flag has been set.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-run configuration.
///
/// Everything a run depends on besides the source and the lexicon lives here,
/// so that two runs with equal options and no time or file builtins behave
/// identically.
pub struct RunOptions {
    /// Seed for `rand` and `randint`; `None` seeds from the operating system.
    pub seed:           Option<u64>,
    /// Directory relative file paths resolve against.
    pub workdir:        PathBuf,
    /// Where `ask` reads from.
    pub input:          Box<dyn InputSource>,
    /// Flag for stopping the run from outside.
    pub interrupt:      Interrupt,
    /// Bound on nested user-function calls.
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { seed:           None,
               workdir:        PathBuf::from("."),
               input:          Box::new(ScriptedInput::default()),
               interrupt:      Interrupt::new(),
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}

impl RunOptions {
    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the working directory for file builtins.
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Sets the input source for `ask`.
    #[must_use]
    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Shares an interrupt flag with the run.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Sets the bound on nested user-function calls.
    #[must_use]
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
