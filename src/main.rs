use clap::{Parser as ClapParser, Subcommand};
use searchql::ParseOptions;
use searchql::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "searchql")]
#[command(about = "searchql - parse search expressions into structured queries")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject queries longer than this many characters
    #[arg(long, global = true, env = "SEARCHQL_MAX_LENGTH")]
    max_length: Option<usize>,

    /// Deepest allowed nesting of conditions
    #[arg(long, global = true, env = "SEARCHQL_MAX_DEPTH", default_value_t = 32)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print it as JSON
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the query
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of a query
    Tokens {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print a query in canonical form
    Format {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'searchql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let limits = ParseOptions {
        max_input_length: cli.max_length,
        max_nesting_depth: cli.max_depth,
    };

    let result = match cli.command {
        Commands::Check {
            query,
            pretty,
            syntax_only,
        } => run_check(query, pretty, syntax_only, limits),
        Commands::Tokens { query } => run_tokens(query),
        Commands::Format { query } => read_query(query)
            .and_then(|q| cli::execute_format(&q, &limits))
            .map(|text| println!("{}", text)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "searchql=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    query: Option<String>,
    pretty: bool,
    syntax_only: bool,
    limits: ParseOptions,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        syntax_only,
        limits,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_tokens(query: Option<String>) -> Result<(), CliError> {
    for token in cli::execute_tokens(&read_query(query)?)? {
        println!("{:>4}  {:<12} {}", token.cursor, token.kind, token.value);
    }
    Ok(())
}
