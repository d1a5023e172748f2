//! resumake CLI - résumé preview and export tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumake::export::{ExportOptions, ExportOutcome, Exporter};
use resumake::registry::{CategoryFilter, StyleLoader, TemplateRegistry};
use resumake::storage::DEFAULT_KEY;
use resumake::{
    render, FileStore, FormSnapshot, JsonFormat, PreviewSession, RenderOptions, ResumeRecord,
    StateStore, Validator,
};

#[derive(Parser)]
#[command(name = "resumake")]
#[command(version)]
#[command(about = "Preview, print and export résumés from form data", long_about = None)]
struct Cli {
    /// Directory holding saved résumés
    #[arg(long, global = true, env = "RESUMAKE_STORE_DIR", default_value = ".resumake")]
    store_dir: PathBuf,

    /// Key of the saved résumé
    #[arg(long, global = true, default_value = DEFAULT_KEY)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

/// Where the résumé comes from.
#[derive(clap::Args)]
struct Input {
    /// Input JSON file (saved state when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input is a form snapshot rather than a saved record
    #[arg(long)]
    form: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the HTML preview
    Preview {
        #[command(flatten)]
        input: Input,

        /// Template id
        #[arg(short, long, env = "RESUMAKE_TEMPLATE", default_value = "template-01")]
        template: String,

        /// Render a standalone print page
        #[arg(short, long)]
        print: bool,

        /// Leave out the profile image
        #[arg(long)]
        no_images: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export to a PDF document
    Export {
        #[command(flatten)]
        input: Input,

        /// Template id
        #[arg(short, long, env = "RESUMAKE_TEMPLATE", default_value = "template-01")]
        template: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,

        /// Author recorded in the document
        #[arg(long)]
        author: Option<String>,
    },

    /// List available templates
    Templates {
        /// Category tab
        #[arg(short, long, value_enum, default_value = "all")]
        category: CategoryArg,
    },

    /// Print the record or its layout tree as JSON
    Json {
        #[command(flatten)]
        input: Input,

        /// Print the layout tree for this template instead of the record
        #[arg(long, value_name = "TEMPLATE")]
        tree: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Check field formats
    Validate {
        #[command(flatten)]
        input: Input,
    },

    /// Render the template gallery
    Thumbnails {
        #[command(flatten)]
        input: Input,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Save a résumé to the store
    Save {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is a form snapshot rather than a saved record
        #[arg(long)]
        form: bool,
    },

    /// Save the bundled sample résumé to the store
    Sample,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    All,
    Minimal,
    Modern,
    Corporate,
    Creative,
    Tech,
    Ats,
}

impl CategoryArg {
    fn filter(self) -> CategoryFilter {
        let id = match self {
            CategoryArg::All => "all",
            CategoryArg::Minimal => "minimal",
            CategoryArg::Modern => "modern",
            CategoryArg::Corporate => "corporate",
            CategoryArg::Creative => "creative",
            CategoryArg::Tech => "tech",
            CategoryArg::Ats => "ats",
        };
        id.parse().unwrap_or(CategoryFilter::All)
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let store = FileStore::new(&cli.store_dir);
    let key = cli.key.as_str();

    let result = match cli.command {
        Commands::Preview {
            input,
            template,
            print,
            no_images,
            output,
        } => cmd_preview(&input, &store, key, &template, print, no_images, output.as_deref()),
        Commands::Export {
            input,
            template,
            output,
            no_compress,
            author,
        } => cmd_export(&input, &store, key, &template, &output, no_compress, author),
        Commands::Templates { category } => cmd_templates(category),
        Commands::Json {
            input,
            tree,
            compact,
            output,
        } => cmd_json(&input, &store, key, tree.as_deref(), compact, output.as_deref()),
        Commands::Validate { input } => cmd_validate(&input, &store, key),
        Commands::Thumbnails { input, output } => {
            cmd_thumbnails(&input, &store, key, output.as_deref())
        }
        Commands::Save { input, form } => cmd_save(&input, form, &store, key),
        Commands::Sample => cmd_sample(&store, key),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_file(path: &Path, form: bool) -> Result<ResumeRecord, Box<dyn std::error::Error>> {
    let record = if form {
        resumake::load_form(path)?
    } else {
        resumake::load_record(path)?
    };
    Ok(record)
}

fn read_input(
    input: &Input,
    store: &FileStore,
    key: &str,
) -> Result<ResumeRecord, Box<dyn std::error::Error>> {
    match &input.input {
        Some(path) => read_file(path, input.form),
        None => store.load(key).ok_or_else(|| {
            format!(
                "No saved résumé '{}' in {}; pass a FILE or run `resumake save` first",
                key,
                store.dir().display()
            )
            .into()
        }),
    }
}

/// Open a session on `record` with `template` active.
///
/// An unknown template id falls back to the default template.
fn open_session(record: &ResumeRecord, template: &str, options: RenderOptions) -> PreviewSession {
    let mut session = PreviewSession::new(options);
    if let Err(e) = session.select_variant(template) {
        log::warn!("Template selection failed: {}", e);
    }
    let form = FormSnapshot::from_record(record);
    if let Err(e) = session.on_form_change(&form) {
        log::warn!("Preview failed: {}", e);
    }
    session
}

fn write_or_print(text: &str, output: Option<&Path>) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_preview(
    input: &Input,
    store: &FileStore,
    key: &str,
    template: &str,
    print: bool,
    no_images: bool,
    output: Option<&Path>,
) -> CmdResult {
    let record = read_input(input, store, key)?;
    let options = RenderOptions::new().with_images(!no_images);
    let session = open_session(&record, template, options);

    let html = if print {
        session.print_markup()?
    } else {
        session.markup().to_string()
    };
    write_or_print(&html, output)
}

fn cmd_export(
    input: &Input,
    store: &FileStore,
    key: &str,
    template: &str,
    output: &Path,
    no_compress: bool,
    author: Option<String>,
) -> CmdResult {
    let record = read_input(input, store, key)?;

    let mut options = ExportOptions::new().with_compression(!no_compress);
    if let Some(author) = author {
        options = options.with_author(author);
    }
    let exporter = Exporter::with_defaults(options);

    let mut registry = TemplateRegistry::new();
    if let Err(e) = registry.set_active(template) {
        log::warn!("{}; using {}", e, registry.active_id());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Exporting with {}...", registry.active().display_name));

    let outcome = exporter.export(&record, registry.active_id());
    pb.finish_and_clear();

    match outcome? {
        ExportOutcome::Done(doc) => {
            fs::create_dir_all(output)?;
            let path = doc.save_in(output)?;
            println!(
                "{} {} ({} bytes)",
                "Exported".green().bold(),
                path.display(),
                doc.bytes.len()
            );
        }
        ExportOutcome::Busy => {
            println!("{}", "An export is already running".yellow());
        }
    }
    Ok(())
}

fn cmd_templates(category: CategoryArg) -> CmdResult {
    let registry = TemplateRegistry::new();
    let filter = category.filter();
    let mut styles = StyleLoader::new();

    println!("{} ({})", "Templates".cyan().bold(), filter.label());
    println!("{}", "─".repeat(48).dimmed());

    for variant in registry.filter(filter) {
        let marker = if variant.id == registry.active_id() {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let style = styles.ensure(variant).unwrap_or("(shared)");
        println!(
            "{} {:<12} {:<20} {:<10} {}",
            marker,
            variant.id,
            variant.display_name,
            variant.category.id(),
            style.dimmed()
        );
    }
    Ok(())
}

fn cmd_json(
    input: &Input,
    store: &FileStore,
    key: &str,
    tree: Option<&str>,
    compact: bool,
    output: Option<&Path>,
) -> CmdResult {
    let record = read_input(input, store, key)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = match tree {
        Some(template) => render::to_json(&resumake::layout(&record, template), format)?,
        None => render::to_json(&record, format)?,
    };
    write_or_print(&json, output)
}

fn cmd_validate(input: &Input, store: &FileStore, key: &str) -> CmdResult {
    let record = read_input(input, store, key)?;
    let validator = Validator::new()?;
    let issues = validator.validate_record(&record);

    if !record.has_name() {
        println!(
            "{} {}",
            "!".yellow().bold(),
            "fullName: required before export or print".yellow()
        );
    }

    if issues.is_empty() {
        println!("{}", "All fields look valid".green().bold());
        return Ok(());
    }

    for issue in &issues {
        println!("{} {}: {}", "✗".red().bold(), issue.field.bold(), issue.message);
    }
    Err(format!("{} invalid field(s)", issues.len()).into())
}

fn cmd_thumbnails(
    input: &Input,
    store: &FileStore,
    key: &str,
    output: Option<&Path>,
) -> CmdResult {
    let record = read_input(input, store, key)?;
    let session = open_session(&record, resumake::DEFAULT_VARIANT, RenderOptions::new());

    let cards: Vec<String> = session
        .thumbnails()
        .into_iter()
        .map(|t| t.markup)
        .collect();
    let html = format!("<div class=\"template-gallery\">{}</div>", cards.join(""));
    write_or_print(&html, output)
}

fn cmd_save(input: &Path, form: bool, store: &FileStore, key: &str) -> CmdResult {
    let record = read_file(input, form)?;
    store.save(key, &record)?;
    println!(
        "{} '{}' in {}",
        "Saved".green().bold(),
        key,
        store.dir().display()
    );
    Ok(())
}

fn cmd_sample(store: &FileStore, key: &str) -> CmdResult {
    let record = ResumeRecord::sample()?;
    store.save(key, &record)?;
    println!(
        "{} sample résumé for {} as '{}' in {}",
        "Saved".green().bold(),
        record.personal.full_name,
        key,
        store.dir().display()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resumake".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Résumé preview and export tool");
    println!();
    println!("Templates: {}", resumake::TEMPLATES.len());
    println!("License: MIT");
}
