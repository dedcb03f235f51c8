use braid::{Arg, Command, CommandLineParser, Opt, SharedOptions};

fn main() {
    let parser = CommandLineParser::new(
        "browser",
        SharedOptions::new(
            Opt::<bool>::flag("verbose")
                .pattern("-v")
                .pattern("--verbose")
                .help("Report progress."),
        ) | Command::new(
            "open-window",
            "Open a window.",
            Opt::<u32>::new("width").pattern("-w").default_to(1920u32),
        ) | Command::new(
            "fetch-url",
            "Fetch a url.",
            Arg::<String>::new("url").help("The url to fetch."),
        ),
    )
    .about("A tiny browser.")
    .build();

    let (shared, selection) = parser.parse().into_parts();

    if shared.get::<bool>("verbose") == Some(&true) {
        println!("Selected variant {}.", selection.variant());
    }

    match selection.command() {
        Some("open-window") => {
            println!("Width: {:?}", selection.record().get::<u32>("width"));
        }
        Some("fetch-url") => {
            println!("Url: {:?}", selection.record().get::<String>("url"));
        }
        _ => unreachable!("every command is named"),
    }
}
