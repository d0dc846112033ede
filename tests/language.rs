use std::{
    collections::BTreeMap,
    fs,
    rc::Rc,
    thread,
    time::Duration,
};

use lexiscript::{
    Execution,
    error::Error,
    interpreter::{evaluator::core::Context, value::core::Value},
    lexicon::{Lexicon, Role},
    parse, run,
    runtime::{Interrupt, RunOptions, ScriptedInput},
};
use walkdir::WalkDir;

const TEST_SEED: u64 = 7;

#[test]
fn demo_programs_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "lx"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        let execution = run_default(&source);
        if let Err(e) = &execution.result {
            panic!("Demo {path:?} failed:\n{e}");
        }
        assert_eq!(execution.output, expected, "Demo {path:?} printed the wrong output");
    }

    assert!(count > 0, "No demo programs found in demos/");
}

fn run_default(src: &str) -> Execution {
    run(src, &Lexicon::default(), RunOptions::default().with_seed(TEST_SEED))
}

fn assert_output(src: &str, expected: &str) {
    let execution = run_default(src);
    if let Err(e) = &execution.result {
        panic!("Script failed: {e}\nOutput so far: {:?}", execution.output);
    }
    assert_eq!(execution.output, expected);
}

/// Asserts that the script fails with `kind` and returns whatever it printed
/// before failing.
fn assert_failure(src: &str, kind: &str) -> String {
    let execution = run_default(src);
    match &execution.result {
        Ok(()) => panic!("Script succeeded but was expected to fail with {kind}"),
        Err(e) => assert_eq!(failure_kind(e), kind, "Unexpected error: {e}"),
    }
    assert_eq!(execution.exit_code(), 1);
    execution.output
}

fn failure_kind(error: &Error) -> &'static str {
    match error {
        Error::Runtime(e) => e.kind(),
        other => other.category(),
    }
}

#[test]
fn arithmetic_and_numeric_tower() {
    assert_output("say 1 + 2 * 3, \" \", 7 / 2, \" \", 10 / 2;", "7 3.5 5.0");
    assert_output("say 7 % 3, \" \", -7 % 3, \" \", 7 % -3, \" \", 7.5 % 2;", "1 2 -2 1.5");
    assert_output("say 2 ** 10, \" \", 2 ** -1, \" \", 2 ** 3 ** 2;", "1024 0.5 512");
    assert_output("say 10 / 4, \" \", 2.0 * 3, \" \", 1 / 3;", "2.5 6.0 0.3333333333333333");
    assert_output("say 0.1 + 0.2, \" \", -(3), \" \", 1 + 2.5;", "0.30000000000000004 -3 3.5");
}

#[test]
fn arithmetic_errors() {
    assert_failure("say 1 / 0;", "DivideByZero");
    assert_failure("say 1 % 0;", "DivideByZero");
    assert_failure("x = 9223372036854775807; x = x + 1;", "Overflow");
    assert_failure("say 1 + \"a\";", "TypeMismatch");
    assert_failure("say [1] * 2;", "TypeMismatch");
}

#[test]
fn concatenation() {
    assert_output("say \"ab\" + \"cd\";", "abcd");
    assert_output("a = [1]; b = a + [2, 3]; say a, b;", "[1][1, 2, 3]");
}

#[test]
fn bitwise_and_ternary() {
    assert_output("say 1 < 2 ? \"y\" : \"n\", 6 & 3, 6 | 3, 6 ^ 3, 1 << 4, -16 >> 2, ~0;",
                  "y27516-4-1");
    assert_output("x = 5; say x > 3 ? x > 4 ? \"big\" : \"mid\" : \"small\";", "big");
    assert_failure("say 1 << 64;", "InvalidArgument");
    assert_failure("say 1 << -1;", "InvalidArgument");
    assert_failure("say 1.5 & 1;", "TypeMismatch");
}

#[test]
fn logic_short_circuits() {
    assert_output("fn boom() { say \"boom\"; ret true; } say false and boom(), true or boom();",
                  "falsetrue");
    assert_output("say not 0, not \"\", not [1], 1 and \"x\";", "truetruefalsetrue");
}

#[test]
fn equality_and_comparison() {
    assert_output("say 1 == 1.0, [1, 2] == [1, 2], \"a\" == 1, true == 1;",
                  "truetruefalsefalse");
    assert_output("say \"apple\" < \"banana\", 2 >= 2.0, 3 != 4;", "truetruetrue");
    assert_failure("say 1 < \"a\";", "TypeMismatch");
}

#[test]
fn ranges_run_in_both_directions() {
    assert_output("for i in 1 -> 3 { say(i); }", "123");
    assert_output("for i in 3 <- 1 { say(i); }", "321");
    assert_output("for i in 3 -> 1 { say i; } say \"done\";", "done");
    assert_failure("for i in 1 -> 2.5 { say i; }", "TypeMismatch");
}

#[test]
fn range_bounds_are_evaluated_once() {
    assert_output("n = 3; for i in 1 -> n { n = 10; say i; }", "123");
}

#[test]
fn slices_and_indexing() {
    assert_output("a = [10, 20, 30, 40]; say a[1:3], a[:-1], a[2:];",
                  "[20, 30][10, 20, 30][30, 40]");
    assert_output("say \"abcdef\"[1:3], \"abc\"[-100:100], [1, 2][5:];", "bcabc[]");
    assert_output("say [1, 2, 3][-1], \"abc\"[0];", "3a");
    assert_failure("say [1][5];", "IndexOutOfBounds");
    assert_failure("say [1][\"a\"];", "TypeMismatch");
    assert_failure("s = \"ab\"; s[0] = \"x\";", "TypeMismatch");
}

#[test]
fn assignment_forms() {
    assert_output("a = [1, 2]; a[1] *= 10; a[-2] = \"x\"; say a;", "['x', 20]");
    assert_output("x = 2; x += 3; x **= 2; x -= 5; x %= 7; say x;", "6");
    assert_output("x = 1; x = \"now a string\"; say x;", "now a string");
    assert_failure("1 = 2;", "ParseError");
}

#[test]
fn functions_are_lexically_scoped() {
    assert_output("fn square(x) { ret x * x; } say square(4);", "16");
    assert_output("fn nothing() { } say type(nothing());", "nil");
    assert_output("g = [1]; fn f() { array_push(g, 2); g = 5; ret g; } say f(), g;",
                  "5[1, 2]");
    assert_output("fn make() { base = 10; fn add(x) { ret base + x; } ret add; } say make()(5);",
                  "15");
}

#[test]
fn nested_functions_are_private() {
    let output = assert_failure("fn outer() { fn inner() { ret 1; } ret inner(); }\nsay outer();\nsay inner();",
                                "UndefinedIdentifier");
    assert_eq!(output, "1");
}

#[test]
fn exit_leaves_only_the_innermost_loop() {
    assert_output("for i in 1 -> 3 { for j in 1 -> 3 { if j == 2 { exit; } say j; } say i; }",
                  "111213");
    assert_output("i = 0; for { i += 1; if i == 3 { exit; } } say i;", "3");
    assert_output("i = 0; while { i += 1; if i == 4 { exit; } } say i;", "4");
}

#[test]
fn misplaced_control_transfers_fail() {
    assert_failure("ret 1;", "InvalidControlTransfer");
    assert_failure("exit;", "InvalidControlTransfer");
    assert_failure("fn f() { exit; } for i in 1 -> 2 { f(); }", "InvalidControlTransfer");
}

#[test]
fn arity_mismatch_has_no_side_effects() {
    let output =
        assert_failure("fn bump(a) { say \"ran\"; ret a; } say bump(1, 2);",
                       "ArityMismatch");
    assert_eq!(output, "");

    assert_failure("say len(1, 2);", "ArityMismatch");
    assert_failure("say rand(1);", "ArityMismatch");
}

#[test]
fn calling_a_non_function_fails() {
    assert_failure("x = 1; x();", "NotCallable");
    assert_failure("say \"text\"(1);", "NotCallable");
}

#[test]
fn unmatched_delimiters_produce_no_output() {
    let output = assert_failure("say 1;\nif true { say 2;", "ParseError");
    assert_eq!(output, "");

    let output = assert_failure("say 1; }", "ParseError");
    assert_eq!(output, "");
}

#[test]
fn lexical_errors() {
    assert_failure("say 1 @ 2;", "LexicalError");
    assert_failure("say 1.2.3;", "LexicalError");
    assert_failure("say 12ab;", "LexicalError");
    assert_failure("say 1.;", "LexicalError");
    assert_failure("say \"open;", "LexicalError");
    assert_failure("say \"\\q\";", "LexicalError");
    assert_failure("say 99999999999999999999;", "LexicalError");
    assert_failure("say 1; /* never closed", "LexicalError");
}

#[test]
fn strings_comments_and_escapes() {
    assert_output("say \"a\\tb\\\\n\";", "a\tb\\n");
    assert_output("// comment\nsay 1; /* block\n comment */ say 2;", "12");
    assert_output("say \"two\nlines\";", "two\nlines");
}

#[test]
fn conditionals() {
    assert_output("if { say \"always\"; }", "always");
    assert_output("x = 2; if x == 1 { say \"one\"; } else if x == 2 { say \"two\"; } else { say \"many\"; }",
                  "two");
    assert_output("if [] { say \"yes\"; } else { say \"no\"; }", "no");
}

#[test]
fn for_each_reads_the_live_array() {
    assert_output("a = [1, 2]; for x in a { if x < 4 { array_push(a, x + 2); } say x; }",
                  "12345");
    assert_output("for c in \"abc\" { say c, \".\"; }", "a.b.c.");
    assert_failure("for x in 5 { say x; }", "TypeMismatch");
}

#[test]
fn printed_forms() {
    assert_output("say [\"a\", 1.5, true, [2]];", "['a', 1.5, true, [2]]");
    assert_output("a = [1]; array_push(a, a); say a;", "[1, [...]]");
    assert_output("fn f() { } say f, \" \", len;", "<function f> <builtin len>");
}

#[test]
fn conversion_builtins() {
    assert_output("say int(\"42\") + 1, \" \", int(3.9), \" \", float(2), \" \", str(3) + \"x\";",
                  "43 3 2.0 3x");
    assert_output("say bool(0), bool(\"a\"), \" \", type([]), \" \", type(1.0), \" \", type(len);",
                  "falsetrue array float builtin");
    assert_failure("say int(\"x\");", "InvalidArgument");
}

#[test]
fn numeric_builtins() {
    assert_output("say round(2.5), round(3.5), \" \", round(3.14159, 2);", "24 3.14");
    assert_output("say floor(2.7), ceil(2.1), \" \", abs(-4), \" \", sqrt(16);", "23 4 4.0");
    assert_output("say min(3, 1, 2), max([4, 9, 2]), \" \", log2(8), \" \", log(100, 10);",
                  "19 3.0 2.0");
    assert_failure("say sqrt(-1);", "InvalidArgument");
    assert_failure("say max([]);", "InvalidArgument");
}

#[test]
fn string_builtins() {
    assert_output("say pos(\"hello\", \"l\"), pos(\"hello\", \"z\"), substr(\"hello\", 1, 3);",
                  "2-1ell");
    assert_output("say upper(\"ab\"), lower(\"CD\"), trim(\"  hi \"), replace(\"a-b-c\", \"-\", \"+\");",
                  "ABcdhia+b+c");
    assert_output("say str_split(\"a,b,c\", \",\"), str_join(\"-\", [\"x\", \"y\", 3]);",
                  "['a', 'b', 'c']x-y-3");
    assert_output("say chr(65), ord(\"a\"), len(\"héllo\");", "A975");
}

#[test]
fn array_mutators_preserve_identity() {
    assert_output("a = [3, 1, 2]; b = a;\n\
                   array_push(a, 0); array_sort(b); array_reverse(a); array_insert(b, 0, 9);\n\
                   say array_pop(a), \" \", array_remove(b, 2), \" \", a, \" \", array_pop(b, 0), \" \", a;",
                  "0 2 [9, 3, 1] 9 [3, 1]");
    assert_failure("a = [1]; array_remove(a, 5);", "InvalidArgument");
    assert_failure("a = [1, \"x\"]; array_sort(a);", "TypeMismatch");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_output("len = 3; say len;", "3");
}

#[test]
fn lexicon_independence() {
    let lexicon = Lexicon::from_json(r#"{
        "FUNCTION": "def", "RETURN": "give", "IF": "when", "ELSE": "otherwise",
        "FOR": "each", "IN": "over", "WHILE": "during", "EXIT": "stop",
        "PRINT": "show", "AND": "also", "OR": "either", "NOT": "never",
        "TRUE": "yes", "FALSE": "no"
    }"#).unwrap();

    let mamba = "fn fact(n) { if n <= 1 { ret 1; } ret n * fact(n - 1); }\n\
                 for i in 1 -> 5 { if i % 2 == 0 and not false { say fact(i), \" \"; } else { say i, \",\"; } }\n\
                 x = 0; while true { x += 1; if x > 3 { exit; } } say x;";
    let disguised = "def fact(n) { when n <= 1 { give 1; } give n * fact(n - 1); }\n\
                     each i over 1 -> 5 { when i % 2 == 0 also never no { show fact(i), \" \"; } otherwise { show i, \",\"; } }\n\
                     x = 0; during yes { x += 1; when x > 3 { stop; } } show x;";

    let a = run(mamba, &Lexicon::default(), RunOptions::default());
    let b = run(disguised, &lexicon, RunOptions::default());
    assert!(a.result.is_ok() && b.result.is_ok());
    assert_eq!(a.output, "1,2 3,24 5,4");
    assert_eq!(a.output, b.output);

    let execution = run("say = 5; show say;", &lexicon, RunOptions::default());
    assert_eq!(execution.output, "5");
}

#[test]
fn derived_lexicons_are_reproducible() {
    let words = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
                 "india", "juliet", "kilo", "lima", "mike", "november", "oscar", "papa"];
    let lexicon = Lexicon::from_keywords(&words, 99).unwrap();
    assert_eq!(lexicon, Lexicon::from_keywords(&words, 99).unwrap());

    let print = lexicon.surface(Role::Print);
    let source = format!("{print} 6 * 7;");
    assert_eq!(run(&source, &lexicon, RunOptions::default()).output, "42");
}

#[test]
fn invalid_lexicons_are_rejected() {
    let mut map = BTreeMap::new();
    for role in Role::ALL {
        map.insert(role, "same".to_string());
    }
    assert!(Lexicon::new(map.clone()).is_err());

    map.remove(&Role::Print);
    assert!(Lexicon::new(map).is_err());
    assert!(Lexicon::from_json("{\"FUNCTION\": 1}").is_err());
    assert!(Lexicon::from_json("not json").is_err());
}

#[test]
fn seeded_randomness_is_reproducible() {
    let src = "say rand(), \" \", randint(1, 100), \" \", randint(5, 5);";
    let first = run(src, &Lexicon::default(), RunOptions::default().with_seed(42));
    let second = run(src, &Lexicon::default(), RunOptions::default().with_seed(42));
    assert!(first.result.is_ok());
    assert_eq!(first.output, second.output);
    assert!(first.output.ends_with(" 5"));

    assert_output("for i in 1 -> 200 { r = randint(3, 5); x = rand(); \
                   if r < 3 or r > 5 or x < 0 or x >= 1 { say \"bad\"; } } say \"ok\";",
                  "ok");
    assert_failure("say randint(5, 1);", "InvalidArgument");
}

#[test]
fn time_is_a_float() {
    assert_output("say type(time()), time() > 1000000000;", "floattrue");
}

#[test]
fn runs_are_deterministic() {
    let src = "a = []; for i in 1 -> 20 { array_push(a, i * i % 7); } array_sort(a); say a;";
    assert_eq!(run_default(src).output, run_default(src).output);
}

#[test]
fn interrupt_halts_an_infinite_loop() {
    let interrupt = Interrupt::new();
    interrupt.trigger();
    let execution = run("say \"never\";",
                        &Lexicon::default(),
                        RunOptions::default().with_interrupt(interrupt));
    assert_eq!(execution.output, "");
    assert!(matches!(&execution.result, Err(e) if failure_kind(e) == "Interrupted"));

    let interrupt = Interrupt::new();
    let timer = interrupt.clone();
    let handle = thread::spawn(move || {
                     thread::sleep(Duration::from_millis(50));
                     timer.trigger();
                 });
    let execution = run("x = 0; while { x += 1; }",
                        &Lexicon::default(),
                        RunOptions::default().with_interrupt(interrupt));
    handle.join().unwrap();
    assert!(matches!(&execution.result, Err(e) if failure_kind(e) == "Interrupted"));
}

#[test]
fn recursion_limit_is_reported() {
    assert_failure("fn f(n) { ret f(n + 1); } f(0);", "RecursionLimit");

    let options = || RunOptions::default().with_max_call_depth(10);
    let src = "fn depth(n) { if n == 0 { ret 0; } ret depth(n - 1); }";
    let ok = run(&format!("{src} say depth(9);"), &Lexicon::default(), options());
    assert_eq!(ok.output, "0");
    let too_deep = run(&format!("{src} say depth(10);"), &Lexicon::default(), options());
    assert!(matches!(&too_deep.result, Err(e) if failure_kind(e) == "RecursionLimit"));
}

#[test]
fn ask_reads_scripted_input() {
    let options = RunOptions::default().with_input(ScriptedInput::new(["Ada", "  7 "]));
    let execution = run("name = ask(\"Name? \"); n = int(trim(ask())); say \"Hi \", name, \"!\", n * 2, ask() == \"\";",
                        &Lexicon::default(),
                        options);
    assert!(execution.result.is_ok());
    assert_eq!(execution.output, "Hi Ada!14true");
}

#[test]
fn files_are_written_read_and_closed_at_teardown() {
    let dir = std::env::temp_dir().join(format!("lexiscript-files-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let options = || RunOptions::default().with_workdir(&dir);

    let write = run("f = file(\"out.txt\", \"w\"); file_write(f, \"hello\\n\"); file_write(f, \"world\");",
                    &Lexicon::default(),
                    options());
    assert!(write.result.is_ok());
    assert_eq!(fs::read_to_string(dir.join("out.txt")).unwrap(), "hello\nworld");

    let append = run("f = file(\"out.txt\", \"a\"); file_write(f, \"!\"); file_close(f);",
                     &Lexicon::default(),
                     options());
    assert!(append.result.is_ok());

    let read = run("f = file(\"out.txt\", \"r\"); say file_readline(f), \"|\", file_read(f), \"|\", file_readline(f), \"|\", f; file_close(f);",
                   &Lexicon::default(),
                   options());
    assert!(read.result.is_ok());
    assert_eq!(read.output, "hello\n|world!||<file 1>");

    let twice = run("f = file(\"out.txt\", \"r\"); file_close(f); file_close(f);",
                    &Lexicon::default(),
                    options());
    assert!(matches!(&twice.result, Err(e) if failure_kind(e) == "Io"));

    let missing = run("f = file(\"missing.txt\", \"r\");", &Lexicon::default(), options());
    assert!(matches!(&missing.result, Err(e) if failure_kind(e) == "Io"));

    let mode = run("f = file(\"out.txt\", \"x\");", &Lexicon::default(), options());
    assert!(matches!(&mode.result, Err(e) if failure_kind(e) == "InvalidArgument"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn errors_render_with_their_category() {
    let execution = run_default("say 1;\nsay 1 / 0;");
    assert_eq!(execution.output, "1");
    let message = execution.result.unwrap_err().to_string();
    assert!(message.starts_with("RuntimeError: DivideByZero: Error on line 2"),
            "{message}");

    let message = run_default("say 1 @ 2;").result.unwrap_err().to_string();
    assert!(message.starts_with("LexicalError: "), "{message}");

    let message = run_default("say (1;").result.unwrap_err().to_string();
    assert!(message.starts_with("ParseError: "), "{message}");
}

#[test]
fn deep_nesting_is_a_parse_error() {
    let depth = 30_000;
    let parens = format!("say {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(assert_failure(&parens, "ParseError"), "");
    assert!(matches!(parse(&parens, &Lexicon::default()), Err(Error::Parse(_))));

    assert_failure(&format!("say {}1;", "-".repeat(depth)), "ParseError");
    assert_failure(&format!("say {}1;", "2 ** ".repeat(depth)), "ParseError");
    assert_failure(&format!("x = {}0{};", "[".repeat(depth), "]".repeat(depth)), "ParseError");
    assert_failure(&format!("{}say 1;{}", "if true { ".repeat(depth), "}".repeat(depth)),
                   "ParseError");

    let chain = format!("x = 3; if x == 0 {{ say 0; }}{} else {{ say x; }}",
                        (1..depth).map(|i| format!(" else if x == {i} {{ say {i}; }}"))
                                  .collect::<String>());
    assert_failure(&chain, "ParseError");

    let message = parse(&parens, &Lexicon::default()).unwrap_err().to_string();
    assert!(message.contains("Nesting exceeds the limit"), "{message}");

    assert_output(&format!("say {}1{};", "(".repeat(40), ")".repeat(40)), "1");
    assert_output(&format!("say {}1;", "- ".repeat(40)), "1");
}

#[test]
fn evaluation_depth_is_bounded_whatever_the_call_limit() {
    let options = RunOptions::default().with_max_call_depth(usize::MAX);
    let execution = run("fn down(n) { ret down(n + 1); } down(0);",
                        &Lexicon::default(),
                        options);
    assert!(matches!(&execution.result, Err(e) if failure_kind(e) == "RecursionLimit"),
            "{:?}",
            execution.result);
}

#[test]
fn self_referential_arrays_compare_and_print() {
    assert_output("a = [1]; array_push(a, a); b = [1]; array_push(b, b);\n\
                   say a == b, a == a, a != [1], \" \", a;",
                  "truetruetrue [1, [...]]");
    assert_output("a = [1]; array_push(a, a); b = [1]; array_push(b, b);\n\
                   array_remove(a, b); say a;",
                  "[1]");
    assert_output("a = [1]; b = [a]; array_push(a, b); c = [1]; d = [c]; array_push(c, d);\n\
                   say a == c, b == d, a == d;",
                  "truetruefalse");
}

#[test]
fn negative_integer_extremes() {
    assert_output("say -9223372036854775807 - 1;", "-9223372036854775808");
    assert_failure("say 9223372036854775808;", "LexicalError");
    assert_failure("say -9223372036854775808;", "LexicalError");
    assert_failure("x = -9223372036854775807 - 1; say -x;", "Overflow");
}

#[test]
fn teardown_releases_reference_cycles() {
    let lexicon = Lexicon::default();
    let mut context = Context::new(RunOptions::default().with_seed(TEST_SEED));

    let setup = parse("fn outer(n) {\n\
                           own = [n];\n\
                           array_push(own, own);\n\
                           fn inner() { ret own; }\n\
                           ret [own, inner];\n\
                       }\n\
                       keep = outer(1);\n\
                       fn global_fn() { ret keep; }\n\
                       loop = [0]; loop[0] = loop;",
                      &lexicon).unwrap();
    context.execute(&setup).unwrap();

    let Some(Value::Array(keep)) = context.global("keep") else {
        panic!("keep is not an array");
    };
    let (own, inner) = match keep.borrow().as_slice() {
        [Value::Array(own), Value::Function(inner)] => (Rc::downgrade(own), Rc::downgrade(inner)),
        other => panic!("unexpected contents {other:?}"),
    };
    let Some(Value::Array(looped)) = context.global("loop") else {
        panic!("loop is not an array");
    };
    let looped = Rc::downgrade(&looped);
    drop(keep);

    let forget = parse("keep = 0; loop = 0;", &lexicon).unwrap();
    context.execute(&forget).unwrap();
    assert!(own.upgrade().is_some(), "cycles outlive their last binding during a run");
    assert!(inner.upgrade().is_some());
    assert!(looped.upgrade().is_some());

    drop(context);
    assert!(own.upgrade().is_none());
    assert!(inner.upgrade().is_none());
    assert!(looped.upgrade().is_none());
}
