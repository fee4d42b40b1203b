//! Command-line interface for the makefile parser
//!
//! Parses a makefile and prints the model as a YAML (or JSON) snapshot, or
//! loads a previously emitted snapshot and round-trips it through the
//! parser.
//!
//! Usage:
//!   makeparse `<path>` [--format yaml|json]   - Parse a makefile, print the model
//!   makeparse `<path>` --from-yaml            - Treat the input as a snapshot document

use clap::{Arg, ArgAction, Command};
use make_parser::make::ast::snapshot::ModelSnapshot;
use make_parser::make::functions::STANDARD_FUNCTIONS;
use make_parser::make::loader::MakefileLoader;
use make_parser::make::model::makefile::Makefile;

fn main() {
    env_logger::init();

    let matches = Command::new("makeparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting makefiles as structured data")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the makefile (or snapshot with --from-yaml)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["yaml", "json"])
                .default_value("yaml"),
        )
        .arg(
            Arg::new("from-yaml")
                .long("from-yaml")
                .help("Treat the input as a model snapshot instead of makefile text")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let format = matches.get_one::<String>("format").expect("has a default");

    let makefile = if matches.get_flag("from-yaml") {
        load_snapshot(path)
    } else {
        MakefileLoader::from_path(path)
            .and_then(|loader| loader.parse())
            .unwrap_or_else(|error| {
                eprintln!("{}", error);
                std::process::exit(1);
            })
    };

    for warning in &makefile.warnings {
        eprintln!("warning: {}", warning);
    }

    let snapshot = ModelSnapshot::from_makefile(&makefile);
    let rendered = render(&snapshot, format).unwrap_or_else(|error| {
        eprintln!("Error formatting output: {}", error);
        std::process::exit(1);
    });
    print!("{}", rendered);
}

fn render(snapshot: &ModelSnapshot, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => {
            let mut text = serde_json::to_string_pretty(snapshot)?;
            text.push('\n');
            Ok(text)
        }
        _ => Ok(serde_yaml::to_string(snapshot)?),
    }
}

fn load_snapshot(path: &str) -> Makefile {
    let text = std::fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("{}: {}", path, error);
        std::process::exit(1);
    });
    let snapshot: ModelSnapshot = serde_yaml::from_str(&text).unwrap_or_else(|error| {
        eprintln!("{}: invalid snapshot: {}", path, error);
        std::process::exit(1);
    });
    snapshot.parse(&STANDARD_FUNCTIONS).unwrap_or_else(|error| {
        eprintln!("{}", error);
        std::process::exit(1);
    })
}
