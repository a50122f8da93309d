use std::io::{self, Read};

use clap::Parser as ClapParser;
use pathlang::{to_json, to_json_pretty, Path, Value};

#[derive(ClapParser)]
#[command(name = "pathlang")]
#[command(about = "Run a path query over a JSON document")]
#[command(version)]
struct Cli {
    /// The query to execute
    query: String,

    /// JSON input (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Only validate syntax, don't execute
    #[arg(long)]
    syntax_only: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::parse(&cli.query)?;
    if cli.syntax_only {
        println!("Syntax is valid");
        return Ok(());
    }

    let input = match cli.input {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err("No input provided. Use --input or pipe JSON to stdin.".into()),
    };

    let document: serde_json::Value = serde_json::from_str(&input)?;
    let root = Value::from_json(&document).lift();
    let result = path.run(root.as_ref())?;

    if cli.pretty {
        println!("{}", to_json_pretty(&result));
    } else {
        println!("{}", to_json(&result));
    }
    Ok(())
}
