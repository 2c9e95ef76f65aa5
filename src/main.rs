use restyle::{CodeModel, apply_directives};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.verbose);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        let mut source = std::error::Error::source(err.as_ref());
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

struct CliConfig {
    model_path: String,
    directives_path: String,
    output_path: Option<String>,
    verbose: bool,
}

fn run(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut model: CodeModel = serde_json::from_str(&read_input(&config.model_path)?)?;
    let directives: Vec<Value> = serde_json::from_str(&read_input(&config.directives_path)?)?;

    let log = apply_directives(&mut model, &directives)?;
    tracing::info!(changes = log.len(), "directives applied");

    let rendered = serde_json::to_string_pretty(&model)?;
    match &config.output_path {
        Some(path) => fs::write(path, rendered + "\n")?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "restyle=debug" } else { "restyle=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut model_path: Option<String> = None;
    let mut directives_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut verbose = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("restyle {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "--model" | "-m" => {
                let value = args.next().ok_or_else(|| "error: --model expects a path".to_string())?;
                model_path = Some(value);
            }
            "--directives" | "-d" => {
                let value =
                    args.next().ok_or_else(|| "error: --directives expects a path".to_string())?;
                directives_path = Some(value);
            }
            "--output" | "-o" => {
                let value = args.next().ok_or_else(|| "error: --output expects a path".to_string())?;
                output_path = Some(value);
            }
            other => return Err(format!("error: unrecognized argument `{other}` (see --help)")),
        }
    }

    Ok(CliConfig {
        model_path: model_path.ok_or_else(|| "error: --model is required (see --help)".to_string())?,
        directives_path: directives_path
            .ok_or_else(|| "error: --directives is required (see --help)".to_string())?,
        output_path,
        verbose,
    })
}

fn print_help() {
    println!(
        "restyle - directive-driven renaming for generated API surfaces

Usage: restyle --model <FILE> --directives <FILE> [options]

Options:
  -m, --model <FILE>       model JSON to rewrite (`-` for stdin)
  -d, --directives <FILE>  JSON array of directive records (`-` for stdin)
  -o, --output <FILE>      write the rewritten model here (default: stdout)
  -v, --verbose            log one line per mutation to stderr
  -h, --help               show this help
  -V, --version            show version"
    );
}
