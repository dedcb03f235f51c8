use braid::{derive::*, prelude::*, CommandLineParser, Opt};

#[derive(Debug, FromRecord)]
struct Window {
    width: u32,
    height: u32,
    fullscreen: bool,
}

fn main() {
    let parser = CommandLineParser::new(
        "window",
        Opt::<u32>::new("width")
            .pattern("-w")
            .pattern("--width")
            .help("The window width.")
            .default_to(1920u32)
            | Opt::<u32>::new("height")
                .pattern("-h")
                .pattern("--height")
                .help("The window height.")
                .default_to(1080u32)
            | Opt::<bool>::flag("fullscreen")
                .pattern("--fullscreen")
                .help("Open the window fullscreen."),
    )
    .about("Opens a window.")
    .build();

    match Window::from_record(parser.parse()) {
        Ok(window) => println!("{window:?}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
