use careform::{
    CareformError, FilesystemTemplateSource, MergeEngine, MissingPlaceholderPolicy,
    NormalizerConfig, OUTPUT_FILENAME, SectionTexts, StrategyKind, inspect_placeholders,
    list_fields, load_profile,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Merge care planning sections into the My Voice guide")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge three sections into a template
    Merge(MergeArgs),
    /// List the AcroForm fields of a PDF
    Fields {
        pdf: PathBuf,
        /// Print the fields as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show where a profile's placeholders occur in a template
    Inspect {
        template: PathBuf,
        #[arg(long, default_value = "placeholders")]
        profile: String,
        /// Print the sightings as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Built-in profile (fillable, placeholders, annotated) or a JSON profile path
    #[arg(long, default_value = "fillable")]
    profile: String,

    /// Directory the profile's template is loaded from
    #[arg(long, default_value = ".")]
    template_dir: PathBuf,

    /// Force a strategy the profile declares
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<StrategyKind>,

    #[arg(long, conflicts_with = "beliefs_file")]
    beliefs: Option<String>,
    #[arg(long)]
    beliefs_file: Option<PathBuf>,

    #[arg(long, conflicts_with = "values_file")]
    values: Option<String>,
    #[arg(long)]
    values_file: Option<PathBuf>,

    #[arg(long, conflicts_with = "wishes_file")]
    wishes: Option<String>,
    #[arg(long)]
    wishes_file: Option<PathBuf>,

    #[arg(short, long, default_value = OUTPUT_FILENAME)]
    output: PathBuf,

    /// Leave sections whose placeholder is absent unmodified instead of failing
    #[arg(long, default_value_t = false)]
    allow_missing_placeholders: bool,

    /// Reject sections that are blank
    #[arg(long, default_value_t = false)]
    require_all: bool,
}

fn parse_strategy(value: &str) -> Result<StrategyKind, String> {
    match value {
        "field_fill" | "field-fill" => Ok(StrategyKind::FieldFill),
        "byte_substitute" | "byte-substitute" => Ok(StrategyKind::ByteSubstitute),
        "annotate_layout" | "annotate-layout" => Ok(StrategyKind::AnnotateLayout),
        other => Err(format!("unknown strategy '{}'", other)),
    }
}

fn section_text(inline: Option<String>, file: Option<&Path>) -> Result<String, CareformError> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Ok(String::new()),
    }
}

fn run_merge(args: MergeArgs) -> Result<(), CareformError> {
    let mut profile = load_profile(&args.profile)?;
    if args.strategy.is_some() {
        profile.strategy = args.strategy;
    }
    if args.allow_missing_placeholders {
        profile.missing_placeholders = MissingPlaceholderPolicy::Warn;
    }

    let texts = SectionTexts::new(
        section_text(args.beliefs, args.beliefs_file.as_deref())?,
        section_text(args.values, args.values_file.as_deref())?,
        section_text(args.wishes, args.wishes_file.as_deref())?,
    );

    let engine = MergeEngine::new(FilesystemTemplateSource::new(&args.template_dir))
        .with_normalizer(NormalizerConfig {
            require_all_sections: args.require_all,
            ..Default::default()
        });
    let sections = engine.validate(&texts)?;

    info!("Merging with profile '{}'", profile.name);
    let output = engine.merge_from_source(&profile, &sections)?;
    fs::write(&args.output, &output.bytes)?;

    println!(
        "Wrote {} ({} pages, {} bytes, {})",
        args.output.display(),
        output.page_count,
        output.bytes.len(),
        output.strategy
    );
    for truncation in &output.report.truncations {
        println!(
            "  warning: {} truncated from {} to {} bytes",
            truncation.section, truncation.encoded_len, truncation.kept_len
        );
    }
    for section in &output.report.missing {
        println!("  warning: no placeholder for {}, left unchanged", section);
    }
    for section in &output.report.overflowed {
        println!("  warning: {} runs past the bottom of its page", section);
    }
    Ok(())
}

fn run_fields(pdf: &Path, json: bool) -> Result<(), CareformError> {
    let doc = lopdf::Document::load_mem(&fs::read(pdf)?)?;
    let fields = list_fields(&doc)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }
    if fields.is_empty() {
        println!("{} has no form fields", pdf.display());
    }
    for field in fields {
        match field.max_len {
            Some(max) => println!("{} ({}, max {} chars)", field.name, field.kind.as_str(), max),
            None => println!("{} ({})", field.name, field.kind.as_str()),
        }
    }
    Ok(())
}

fn run_inspect(template: &Path, profile: &str, json: bool) -> Result<(), CareformError> {
    let profile = load_profile(profile)?;
    let bytes = fs::read(template)?;
    let sightings = inspect_placeholders(&bytes, &profile)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&sightings)?);
        return Ok(());
    }
    for sighting in sightings {
        let status = if !sighting.raw_offsets.is_empty() {
            "patchable"
        } else if sighting.is_compressed_only() {
            "compressed, not patchable"
        } else {
            "absent"
        };
        println!(
            "{}: {} raw occurrence(s), pages {:?} ({})",
            sighting.section,
            sighting.raw_offsets.len(),
            sighting.pages,
            status
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Merge(args) => run_merge(args),
        Command::Fields { pdf, json } => run_fields(&pdf, json),
        Command::Inspect {
            template,
            profile,
            json,
        } => run_inspect(&template, &profile, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
