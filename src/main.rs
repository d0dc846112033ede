use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use clap::Parser;
use lexiscript::{
    lexicon::Lexicon,
    parse, run,
    runtime::{DEFAULT_MAX_CALL_DEPTH, Interrupt, RunOptions, ScriptedInput, StdinInput},
};

/// lexiscript runs programs written in any member of a family of scripting
/// languages that share one grammar but spell their keywords differently.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script file to execute.
    #[arg(required_unless_present = "dump_keywords")]
    file: Option<PathBuf>,

    /// Read the keyword spelling from a JSON object keyed by role name.
    #[arg(long, value_name = "JSON", conflicts_with = "keywords")]
    lexicon: Option<PathBuf>,

    /// Derive the keyword spelling by shuffling the words of this file with
    /// `--seed`.
    #[arg(long, value_name = "TXT", requires = "seed")]
    keywords: Option<PathBuf>,

    /// Seed for the keyword shuffle; also seeds `rand` and `randint`.
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for `rand` and `randint` only.
    #[arg(long)]
    random_seed: Option<u64>,

    /// Answer `ask` from the lines of this file instead of standard input.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory that relative file paths in the program resolve against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    workdir: PathBuf,

    /// Stop the program after this many seconds.
    #[arg(long, value_name = "SECS")]
    max_execution_time: Option<u64>,

    /// Maximum depth of nested function calls.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the syntax tree to standard error before running.
    #[arg(long)]
    show_ast: bool,

    /// Print the keyword mapping as JSON and exit.
    #[arg(long)]
    dump_keywords: bool,
}

fn main() {
    let args = Args::parse();

    let lexicon = load_lexicon(&args).unwrap_or_else(|message| {
                                         eprintln!("{message}");
                                         std::process::exit(1);
                                     });

    if args.dump_keywords {
        match lexicon.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("LexiconError: {e}");
                std::process::exit(1);
            },
        }
        return;
    }

    let Some(path) = &args.file else {
        eprintln!("No script file given.");
        std::process::exit(2);
    };
    let source = read_file(path);

    if args.show_ast
       && let Ok(program) = parse(&source, &lexicon)
    {
        eprintln!("{program:#?}");
    }

    let interrupt = Interrupt::new();
    if let Some(seconds) = args.max_execution_time {
        let timer = interrupt.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            timer.trigger();
        });
    }

    let mut options = RunOptions::default().with_workdir(&args.workdir)
                                           .with_interrupt(interrupt)
                                           .with_max_call_depth(args.max_call_depth);
    options = match &args.input {
        Some(input) => options.with_input(ScriptedInput::from_text(&read_file(input))),
        None => options.with_input(StdinInput),
    };
    if let Some(seed) = args.random_seed.or(args.seed) {
        options = options.with_seed(seed);
    }

    let execution = run(&source, &lexicon, options);

    let mut stdout = std::io::stdout().lock();
    if stdout.write_all(execution.output.as_bytes())
             .and_then(|()| stdout.flush())
             .is_err()
    {
        eprintln!("Failed to write the program output.");
    }

    if let Err(e) = &execution.result {
        eprintln!("{e}");
    }
    std::process::exit(execution.exit_code());
}

fn load_lexicon(args: &Args) -> Result<Lexicon, String> {
    let lexicon = if let Some(path) = &args.lexicon {
        Lexicon::load(path)
    } else if let Some(path) = &args.keywords {
        let text = fs::read_to_string(path).map_err(|_| {
                                               format!("Failed to read the keyword file '{}'.",
                                                       path.display())
                                           })?;
        let words = text.split_whitespace().collect::<Vec<_>>();
        Lexicon::from_keywords(&words, args.seed.unwrap_or_default())
    } else {
        Ok(Lexicon::default())
    };

    lexicon.map_err(|e| format!("LexiconError: {e}"))
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| {
                                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                          path.display());
                                std::process::exit(1);
                            })
}
