use clap::{Parser, Subcommand};
use htmpl::print::{to_json, to_sexp};
use serde::Serialize;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "htmpl")]
#[command(about = "htmpl - syntax trees for HTML with Django-style template tags")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse .html files and print their syntax trees
    Parse {
        /// Path to an .html file or directory
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,

        /// Read from stdin
        #[arg(long)]
        stdin: bool,

        /// Output the tree and diagnostics as JSON
        #[arg(long)]
        json: bool,

        /// Print only diagnostics, no tree
        #[arg(long)]
        errors_only: bool,
    },
}

#[derive(Serialize)]
struct JsonReport {
    tree: htmpl::print::JsonNode,
    errors: Vec<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    start: u32,
    end: u32,
}

struct Output {
    json: bool,
    errors_only: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            stdin,
            json,
            errors_only,
        } => {
            let output = Output { json, errors_only };
            if stdin {
                parse_stdin(&output);
            } else if let Some(path) = file {
                parse_path(&path, &output);
            } else {
                eprintln!("Error: provide a file/directory or use --stdin");
                std::process::exit(1);
            }
        }
    }
}

fn parse_stdin(output: &Output) {
    let mut source = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error: failed to read stdin: {err}");
        std::process::exit(1);
    }
    let error_count = parse_source(&source, output);
    if error_count > 0 {
        std::process::exit(1);
    }
}

fn parse_path(path: &Path, output: &Output) {
    if path.is_file() {
        if path.extension().is_none_or(|ext| ext != "html") {
            let err = htmpl::Error::NotATemplate {
                path: path.to_path_buf(),
            };
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        let start = Instant::now();
        let error_count = parse_file(path, output);
        print_summary(1, error_count, start.elapsed());
        if error_count > 0 {
            std::process::exit(1);
        }
    } else if path.is_dir() {
        parse_directory(path, output);
    } else {
        eprintln!("Error: {} does not exist", path.display());
        std::process::exit(1);
    }
}

fn parse_directory(dir: &Path, output: &Output) {
    let start = Instant::now();
    let mut file_count = 0;
    let mut error_count = 0;

    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
    {
        file_count += 1;
        error_count += parse_file(entry.path(), output);
    }

    if file_count == 0 {
        eprintln!("No .html files found in {}", dir.display());
        std::process::exit(1);
    }

    print_summary(file_count, error_count, start.elapsed());
    if error_count > 0 {
        std::process::exit(1);
    }
}

fn parse_file(path: &Path, output: &Output) -> usize {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(source) => {
            let err = htmpl::Error::Read {
                path: path.to_path_buf(),
                source,
            };
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    println!("{}:", path.display());
    parse_source(&source, output)
}

fn parse_source(source: &str, output: &Output) -> usize {
    let parse = htmpl::parse(source);
    let root = parse.syntax();

    if output.json {
        let report = JsonReport {
            tree: to_json(&root),
            errors: parse
                .errors()
                .iter()
                .map(|e| JsonError {
                    message: e.message.clone(),
                    start: e.range.start().into(),
                    end: e.range.end().into(),
                })
                .collect(),
        };
        match serde_json::to_string(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: failed to serialize report: {err}");
                std::process::exit(1);
            }
        }
        return parse.errors().len();
    }

    if !output.errors_only {
        println!("{}", to_sexp(&root));
    }
    for error in parse.errors() {
        let start: u32 = error.range.start().into();
        let end: u32 = error.range.end().into();
        println!("  error [{start}..{end}]: {}", error.message);
    }
    parse.errors().len()
}

fn print_summary(files: usize, errors: usize, elapsed: std::time::Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let files_word = if files == 1 { "file" } else { "files" };
    let line = if errors == 0 {
        format!("Parsed {files} {files_word} in {time_str}")
    } else {
        format!("Parsed {files} {files_word} in {time_str}, {errors} syntax errors")
    };

    if is_tty {
        eprintln!("\n\x1b[1m{line}\x1b[0m");
    } else {
        eprintln!("\n{line}");
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{micros}μs")
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
