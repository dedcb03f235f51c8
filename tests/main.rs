use assert_matches::assert_matches;
use braid::{
    derive::*, prelude::*, Arg, Command, CommandLineParser, ConfigError, Opt, ParseError,
    RecordError, SharedOptions,
};
use rstest::rstest;
use std::path::PathBuf;

#[derive(Debug, PartialEq, FromRecord)]
struct Window {
    width: i32,
    height: i32,
}

#[derive(Debug, PartialEq, FromRecord)]
struct Fetch {
    url: String,
    #[braid(field = "max-retries")]
    retries: u8,
    headers: Vec<String>,
}

#[derive(Debug, FromRecord)]
struct Empty {}

#[derive(Debug, FromRecord)]
#[allow(dead_code)]
struct Mistyped {
    width: String,
}

fn window() -> impl Aggregate {
    Opt::<i32>::new("width").pattern("-w") | Opt::<i32>::new("height").pattern("-h")
}

#[test]
fn options_any_order() {
    // Setup
    let parser = window();

    // Execute
    let forward = parser.parse(&["-w=30", "-h=20"]).unwrap();
    let backward = parser.parse(&["-h=20", "-w=30"]).unwrap();

    // Verify
    assert_eq!(forward, backward);
    assert_eq!(
        Window::from_record(forward).unwrap(),
        Window {
            width: 30,
            height: 20
        }
    );
}

#[test]
fn options_missing() {
    // Setup
    let parser = window();

    // Execute
    let error = parser.parse(&["-h=20"]).unwrap_err();

    // Verify
    assert_eq!(
        error,
        ParseError::MissingOption {
            patterns: "-w".to_string()
        }
    );
}

#[rstest]
#[case(vec![], 1920)]
#[case(vec!["-w=10"], 10)]
fn option_default(#[case] tokens: Vec<&str>, #[case] expected: u32) {
    // Setup
    let parser = Opt::<u32>::new("width").pattern("-w").default_to(1920u32);

    // Execute
    let record = parser.parse(&tokens).unwrap();

    // Verify
    assert_eq!(record.get::<u32>("width"), Some(&expected));
}

#[rstest]
#[case(vec![], false)]
#[case(vec!["--flag"], true)]
#[case(vec!["--flag=false"], false)]
#[case(vec!["--flag=true"], true)]
fn option_flag(#[case] tokens: Vec<&str>, #[case] expected: bool) {
    // Setup
    let parser = Opt::<bool>::flag("flag").pattern("--flag");

    // Execute
    let record = parser.parse(&tokens).unwrap();

    // Verify
    assert_eq!(record.get::<bool>("flag"), Some(&expected));
}

#[test]
fn arguments_in_order() {
    // Setup
    let parser = Arg::<u32>::new("width") | Arg::<String>::new("username");

    // Execute
    let record = parser.parse(&["1920", "Foobar"]).unwrap();
    let error = parser.parse(&["Foobar", "1920"]).unwrap_err();

    // Verify
    assert_eq!(record.get::<u32>("width"), Some(&1920));
    assert_eq!(record.get::<String>("username"), Some(&"Foobar".to_string()));
    assert_eq!(
        error,
        ParseError::TypeConversion {
            text: "Foobar".to_string(),
            type_name: "u32".to_string()
        }
    );
}

#[rstest]
#[case("4", None)]
#[case("7", Some("must be even"))]
#[case("101", Some("must be under 100"))]
fn argument_checks(#[case] token: &str, #[case] expected: Option<&str>) {
    // Setup
    let parser = Arg::<u32>::new("n")
        .check(|n| *n < 100, "must be under 100")
        .check(|n| n % 2 == 0, "must be even");

    // Execute
    let result = parser.parse(&[token]);

    // Verify
    match expected {
        None => assert_eq!(result.unwrap().get::<u32>("n"), Some(&4)),
        Some(message) => {
            assert_matches!(result, Err(ParseError::Validation { target, text, message: m }) => {
                assert_eq!(target, "argument n");
                assert_eq!(text, token);
                assert_eq!(m, message);
            });
        }
    }
}

#[test]
fn arguments_with_options() {
    // Setup
    let parser = Arg::<String>::new("url")
        | Opt::<u8>::new("max-retries")
            .pattern("--max-retries")
            .default_to(3u8)
        | Opt::<Vec<String>>::new("headers")
            .pattern("-H")
            .default_to(Vec::<String>::default());

    // Execute
    let record = parser
        .parse(&["example.com", "-H=accept gzip", "--max-retries=5"])
        .unwrap();

    // Verify
    assert_eq!(
        Fetch::from_record(record).unwrap(),
        Fetch {
            url: "example.com".to_string(),
            retries: 5,
            headers: vec!["accept".to_string(), "gzip".to_string()],
        }
    );
}

#[test]
fn command_selector() {
    // Setup
    let parser = Command::new(
        "open-window",
        "Open a window.",
        Opt::<u32>::new("width").pattern("-w"),
    ) | Command::new(
        "fetch-url",
        "Fetch a url.",
        Opt::<String>::new("url").pattern("--url"),
    );

    // Execute
    let selection = parser.parse(&["fetch-url", "--url=x"]).unwrap();
    let error = parser.parse(&["bogus"]).unwrap_err();

    // Verify
    assert_eq!(selection.variant(), 1);
    assert_eq!(selection.command(), Some("fetch-url"));
    assert_eq!(
        selection.record().get::<String>("url"),
        Some(&"x".to_string())
    );
    assert_eq!(
        error,
        ParseError::UnrecognizedCommand {
            token: "bogus".to_string()
        }
    );
}

#[test]
fn command_nested() {
    // Setup
    let parser = Command::new(
        "remote",
        "Manage remotes.",
        Command::new("add", "Add a remote.", Arg::<String>::new("name"))
            | Command::new("rm", "Remove a remote.", Arg::<String>::new("name")),
    ) | Command::new("status", "Show the status.", Opt::<bool>::flag("short").pattern("-s"));

    // Execute
    let selection = parser.parse(&["remote", "add", "x"]).unwrap();
    let error = parser.parse(&["remote", "mv", "x"]).unwrap_err();

    // Verify
    assert_eq!(selection.variant(), 0);
    assert_eq!(selection.command(), Some("remote"));
    assert_matches!(selection.nested(), Some(nested) => {
        assert_eq!(nested.variant(), 0);
        assert_eq!(nested.command(), Some("add"));
        assert_eq!(nested.record().get::<String>("name"), Some(&"x".to_string()));
    });
    assert_eq!(
        error,
        ParseError::UnrecognizedCommand {
            token: "mv".to_string()
        }
    );
}

#[test]
fn command_shared_options() {
    // Setup
    let parser = SharedOptions::new(Opt::<PathBuf>::new("config").pattern("-c"))
        | Command::new("run", "Run.", Arg::<String>::new("target"))
        | Command::new("stop", "Stop.", Arg::<String>::new("target"));

    // Execute
    let (shared, selection) = parser
        .parse(&["-c=/etc/braid", "stop", "all"])
        .unwrap()
        .into_parts();

    // Verify
    assert_eq!(
        shared.get::<PathBuf>("config"),
        Some(&PathBuf::from("/etc/braid"))
    );
    assert_eq!(selection.variant(), 1);
    assert_eq!(
        selection.record().get::<String>("target"),
        Some(&"all".to_string())
    );
}

#[test]
fn command_implicit() {
    // Setup
    let parser = Command::new("run", "Run.", Arg::<String>::new("target"))
        | Opt::<bool>::flag("version").pattern("--version");

    // Execute
    let explicit = parser.parse(&["run", "x"]).unwrap();
    let implicit = parser.parse(&["--version"]).unwrap();

    // Verify
    assert_eq!(parser.variants().len(), 2);
    assert_eq!(explicit.variant(), 0);
    assert_eq!(explicit.command(), Some("run"));
    assert_eq!(implicit.variant(), 1);
    assert_eq!(implicit.command(), None);
    assert_eq!(implicit.record().get::<bool>("version"), Some(&true));
}

#[test]
fn command_implicit_same_schema() {
    // Setup
    let parser = Command::new("run", "Run.", Arg::<String>::new("target"))
        | Arg::<String>::new("target");

    // Execute
    let selection = parser.parse(&["x"]).unwrap();

    // Verify
    assert_eq!(parser.variants().len(), 1);
    assert_eq!(selection.variant(), 0);
    assert_eq!(selection.command(), None);
}

#[test]
fn derive_empty() {
    // Setup
    let record = Opt::<bool>::flag("verbose")
        .pattern("-v")
        .parse(&[])
        .unwrap();

    // Execute
    let result = Empty::from_record(record);

    // Verify
    assert!(result.is_ok());
}

#[test]
fn derive_missing_field() {
    // Setup
    let record = Opt::<i32>::new("width")
        .pattern("-w")
        .parse(&["-w=1"])
        .unwrap();

    // Execute
    let error = Window::from_record(record).unwrap_err();

    // Verify
    assert_eq!(
        error,
        RecordError::MissingField {
            field: "height".to_string()
        }
    );
}

#[test]
fn derive_mismatched_type() {
    // Setup
    let record = Opt::<i32>::new("width")
        .pattern("-w")
        .parse(&["-w=1"])
        .unwrap();

    // Execute
    let error = Mistyped::from_record(record).unwrap_err();

    // Verify
    assert_matches!(error, RecordError::TypeMismatch { field, .. } => {
        assert_eq!(field, "width");
    });
}

#[test]
fn program_parse_tokens() {
    // Setup
    let parser = CommandLineParser::new("window", window())
        .about("Opens a window.")
        .build_parser()
        .unwrap();

    // Execute
    let record = parser.parse_tokens(&["-h=20", "-w=30"]).unwrap();
    let failure = parser.parse_tokens(&["-w=wide", "-h=20"]).unwrap_err();
    let help = parser.parse_tokens(&["--help"]).unwrap_err();

    // Verify
    assert_eq!(record.get::<i32>("width"), Some(&30));
    assert_eq!(failure, 1);
    assert_eq!(help, 0);
    assert!(parser.help().starts_with("usage: window\n\nOpens a window.\n\n"));
}

#[test]
fn program_declared_help() {
    // Setup
    let parser = CommandLineParser::new(
        "program",
        Opt::<bool>::flag("help").pattern("--help"),
    )
    .build_parser()
    .unwrap();

    // Execute
    let record = parser.parse_tokens(&["--help"]).unwrap();

    // Verify
    assert_eq!(record.get::<bool>("help"), Some(&true));
}

#[test]
fn program_invalid_declaration() {
    // Setup
    let clp = CommandLineParser::new(
        "program",
        Command::new("run", "Run.", Arg::<String>::new("target"))
            | Command::new("run", "Run again.", Arg::<String>::new("target")),
    );

    // Execute
    let error = clp.build_parser().err().unwrap();

    // Verify
    assert_eq!(
        error,
        ConfigError::DuplicateCommand {
            name: "run".to_string()
        }
    );
}
