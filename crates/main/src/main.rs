use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};

use quote_composer::builder::PdfBuilder;
use quote_composer::documents::{self, compose_quote, DocumentKind, QuoteData};
use quote_composer::fonts::FONTS_DIR_ENV;
use quote_composer::model::Document;
use quote_composer::output::{timestamped_path, DocumentWriter};
use quote_composer::style::StyleRegistry;
use quote_composer::text::to_text;
use quote_composer::variables::template_fields;

const DEFAULT_OUTPUT_DIR: &str = "output";

/// Generates insurance quotes and policy templates as PDF files.
///
/// Fonts are looked up in `--fonts-dir`, the `QUOTE_COMPOSER_FONTS_DIR`
/// environment variable, `assets/fonts`, and then the system font folders.
#[derive(Parser)]
#[command(author, version, about = "Generate insurance quotes and policy templates")]
struct Cli {
    /// Company name shown instead of the sample one.
    #[arg(long, global = true)]
    company: Option<String>,

    /// Output file; defaults to `output/<name>_<timestamp>.pdf`.
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// Print a plain-text preview instead of writing a PDF.
    #[arg(long, global = true)]
    text: bool,

    /// Directory holding the LiberationSans font files.
    #[arg(long, global = true, env = FONTS_DIR_ENV)]
    fonts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the detailed quote, optionally from a JSON data file.
    Quote {
        /// JSON file deserialized into the quote data.
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Render the short quote.
    #[command(name = "basic-quote", aliases = ["basic_quote", "basic"])]
    BasicQuote,

    /// Render the fillable quote template.
    #[command(name = "quote-template", aliases = ["quote_template"])]
    QuoteTemplate,

    /// Render the policy template.
    #[command(name = "policy-template", aliases = ["policy_template"])]
    PolicyTemplate {
        /// Render the variant with conditional sections.
        #[arg(long)]
        conditional: bool,
    },

    /// List the fields a document expects from its data.
    Fields {
        /// Document kind, e.g. `conditional-policy-template`.
        kind: DocumentKind,
    },

    /// Render every document under a timestamped name.
    #[command(name = "run-all", aliases = ["run_all", "all"])]
    RunAll {
        /// Directory that receives the generated files.
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let company = cli.company.as_deref();
    let today = Local::now().date_naive();

    let (kind, document) = match &cli.command {
        Commands::Quote { data: Some(path) } => {
            let json = fs::read_to_string(path)?;
            let mut data: QuoteData = serde_json::from_str(&json)?;
            if let Some(company) = company {
                data.company.name = company.to_owned();
            }
            let styles = StyleRegistry::insurance();
            (DocumentKind::Quote, compose_quote(&styles, &data, today)?)
        }
        Commands::Quote { data: None } => compose(DocumentKind::Quote, company)?,
        Commands::BasicQuote => compose(DocumentKind::BasicQuote, company)?,
        Commands::QuoteTemplate => compose(DocumentKind::QuoteTemplate, company)?,
        Commands::PolicyTemplate { conditional: false } => {
            compose(DocumentKind::PolicyTemplate, company)?
        }
        Commands::PolicyTemplate { conditional: true } => {
            compose(DocumentKind::ConditionalPolicyTemplate, company)?
        }
        Commands::Fields { kind } => {
            let (_, document) = compose(*kind, company)?;
            for field in template_fields(&document) {
                let presence = if field.required { "required" } else { "optional" };
                println!("{}\t{}\t{}", field.path, presence, field.kind.name());
            }
            return Ok(());
        }
        Commands::RunAll { output_dir } => {
            let written = documents::generate_all(output_dir, &writer(cli))?;
            for path in written {
                println!("Generated {}", path.display());
            }
            return Ok(());
        }
    };
    log::debug!("composed {kind} with {} blocks", document.blocks().len());

    if cli.text {
        print!("{}", to_text(&document));
        return Ok(());
    }

    let path = match &cli.output {
        Some(path) => path.clone(),
        None => timestamped_path(DEFAULT_OUTPUT_DIR, kind.stem()),
    };
    let path = writer(cli).save(&document, path)?;
    println!("Generated {}", path.display());
    Ok(())
}

fn compose(
    kind: DocumentKind,
    company: Option<&str>,
) -> quote_composer::Result<(DocumentKind, Document)> {
    let document = documents::compose(kind, company, Local::now().date_naive())?;
    Ok((kind, document))
}

fn writer(cli: &Cli) -> DocumentWriter {
    let builder = PdfBuilder::new().with_font_dir(cli.fonts_dir.clone());
    DocumentWriter::new(builder).with_create_dirs(true)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
