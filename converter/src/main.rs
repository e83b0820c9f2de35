//! Graphdata CLI - Convert category CSVs to a graph-node dataset
//!
//! ```bash
//! graphdata convert                    # data/*.csv -> public/data/graphData.json
//! graphdata save edited.json           # Replace the dataset with an edited copy
//! graphdata categories                 # Show the built-in category schemas
//! graphdata parse data/PEOPLE.csv      # Debug: dump parsed rows as JSON
//! ```

use clap::{Parser, Subcommand};
use graphdata::transform::schema::load_categories;
use graphdata::{
    convert, default_categories, handle_save, parse_csv_file, ConvertOptions, PipelineError,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "graphdata")]
#[command(about = "Convert category CSV files into a graph-node dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert all category CSVs into the dataset and report
    Convert {
        /// Directory containing the category CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Dataset output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report output file
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// JSON file of category schemas replacing the built-in ones
        #[arg(short, long)]
        categories: Option<PathBuf>,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,
    },

    /// Show the built-in category schemas
    Categories,

    /// Replace the dataset with a complete edited copy
    Save {
        /// Submitted dataset JSON file
        input: PathBuf,

        /// Dataset file to overwrite
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            data_dir,
            output,
            report,
            categories,
        } => cmd_convert(data_dir, output, report, categories),

        Commands::Parse { input } => cmd_parse(&input),

        Commands::Categories => cmd_categories(),

        Commands::Save { input, output } => cmd_save(&input, output),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    categories: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::from_env()?;
    if let Some(dir) = data_dir {
        options.data_dir = dir;
    }
    if let Some(path) = output {
        options.output_path = path;
    }
    if let Some(path) = report {
        options.report_path = path;
    }
    if let Some(path) = categories {
        options.categories = load_categories(&path)?;
    }

    eprintln!("📂 Data directory: {}", options.data_dir.display());

    match convert(&options) {
        Ok(result) => {
            eprintln!("\n✨ Done! {}", result.report.summary());
            Ok(())
        }
        Err(PipelineError::DuplicateIds { ids, report }) => {
            eprintln!("\n❌ {} duplicate id(s), nothing was written:", ids.len());
            for skipped in report
                .skipped_rows
                .iter()
                .filter(|s| s.reason.starts_with("duplicate id"))
            {
                eprintln!("   - {} row {}: {}", skipped.source, skipped.row_number, skipped.reason);
            }
            Err(PipelineError::DuplicateIds { ids, report }.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_parse(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file(input)?;
    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} rows", result.rows.len());

    // Sorted keys for stable output
    let rows: Vec<BTreeMap<&String, &String>> =
        result.rows.iter().map(|row| row.iter().collect()).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn cmd_categories() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&default_categories())?);
    Ok(())
}

fn cmd_save(input: &Path, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let destination = match output {
        Some(path) => path,
        None => ConvertOptions::from_env()?.output_path,
    };
    eprintln!("💾 Saving {} -> {}", input.display(), destination.display());

    let body = fs::read(input)?;
    let response = handle_save("POST", &body, &destination);
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if response.is_success() {
        Ok(())
    } else {
        Err(format!("save rejected with status {}", response.status).into())
    }
}
