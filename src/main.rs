//! Template Matcher CLI
//!
//! Usage:
//!   template-matcher [OPTIONS] <TEMPLATE> [INPUT]
//!
//! Options:
//!   -r, --rules <FILE>    Rules file binding function names (TOML format)
//!   -c, --context <FILE>  Context values for field references (TOML format)
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use template_matcher::{Config, Error, Matcher, Rules, Value};

#[derive(Parser)]
#[command(name = "template-matcher")]
#[command(about = "Validate text input against a template-shaped pattern")]
struct Cli {
    /// Template file
    template: PathBuf,

    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Rules file binding function names to extractors/validators (TOML)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Context values for field references like {{.Host}} (TOML)
    #[arg(short, long)]
    context: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Load rules
    let rules = match &cli.rules {
        Some(path) => match Rules::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading rules '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Rules::default(),
    };

    let template = match fs::read_to_string(&cli.template) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading template '{}': {}", cli.template.display(), e);
            std::process::exit(1);
        }
    };

    // Read input from file or stdin
    let input = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading input '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            if io::stdin().is_terminal() {
                eprintln!("No input file given and stdin is a terminal.");
                eprintln!("Pipe input text in, or pass an input file as the second argument.");
                std::process::exit(1);
            }
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            buffer
        }
    };

    let context = match &cli.context {
        Some(path) => match load_context(path) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error loading context '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Value::Null,
    };

    let config = Config::new().with_delimiters(rules.delimiters);
    let matcher = match Matcher::with_config(&template, rules.registry, config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e.format(&template, &cli.template.display().to_string()));
            std::process::exit(1);
        }
    };

    match matcher.run(&input, &context) {
        Ok(output) => print!("{}", output),
        Err(Error::Compile(e)) => {
            eprintln!("{}", e.format(&template, &cli.template.display().to_string()));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_context(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let parsed: toml::Value = toml::from_str(&content)?;
    Ok(Value::from(parsed))
}
