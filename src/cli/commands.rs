use crate::config::RegistryConfig;
use crate::error::{PkgsheetError, PkgsheetResult};
use crate::package::PackagePresenceChecker;
use crate::sheet::{GeneratorOptions, SheetFormat, SheetReader, SpreadsheetGenerator};
use colored::Colorize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path argument meaning stdin or stdout
const STDIO: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Execute the has-package command; returns whether the package is installed
pub fn has_package(name: String, config: RegistryConfig, verbose: bool) -> PkgsheetResult<bool> {
    let registry = config.build()?;
    if verbose {
        eprintln!("{}", format!("🔍 Registry: {}", registry.describe()).cyan());
    }

    let checker = PackagePresenceChecker::new(registry);
    match checker.distribution(&name)? {
        Some(dist) => {
            let version = dist.version.as_deref().unwrap_or("unknown version");
            println!(
                "{} {} {} is installed",
                "✅".green(),
                dist.name.bright_blue().bold(),
                version
            );
            if verbose {
                if let Some(location) = &dist.location {
                    println!("   Location: {}", location.display());
                }
            }
            Ok(true)
        }
        None => {
            println!(
                "{} {} is not installed",
                "❌".red(),
                name.bright_blue().bold()
            );
            Ok(false)
        }
    }
}

/// Execute the generate command
pub fn generate(
    input: PathBuf,
    output: PathBuf,
    sheet_name: String,
    format: Option<SheetFormat>,
    verbose: bool,
) -> PkgsheetResult<()> {
    let data = if is_stdio(&input) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(&input)?
    };

    if verbose {
        eprintln!(
            "{}",
            format!("📖 Read {} bytes of JSON", data.len()).cyan()
        );
    }

    // Explicit --format wins, then the output extension, then .ods
    let format = format
        .or_else(|| SheetFormat::from_path(&output))
        .unwrap_or_default();
    if verbose {
        eprintln!(
            "{}",
            format!(
                "📄 Output format: .{} ({})",
                format.extension(),
                format.mime_type()
            )
            .cyan()
        );
    }

    let generator = SpreadsheetGenerator::with_options(GeneratorOptions { sheet_name, format });

    if is_stdio(&output) {
        let bytes = generator.generate(&data)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    } else {
        generator.generate_to_path(&data, &output)?;
        eprintln!(
            "{} Wrote {}",
            "✅".green(),
            output.display().to_string().bold()
        );
    }

    Ok(())
}

/// Execute the inspect command: print each sheet as JSON
pub fn inspect(file: PathBuf, records: bool) -> PkgsheetResult<()> {
    let mut reader = if is_stdio(&file) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        SheetReader::from_bytes(&buf)?
    } else {
        SheetReader::open(&file)?
    };

    let mut sheets = Map::new();
    for sheet_name in reader.sheet_names() {
        let content = if records {
            reader.read_records(&sheet_name)?
        } else {
            reader.read_rows(&sheet_name)?
        };
        sheets.insert(sheet_name, content);
    }

    let text = serde_json::to_string_pretty(&Value::Object(sheets))
        .map_err(|e| PkgsheetError::Read(format!("Failed to render JSON: {}", e)))?;
    println!("{}", text);
    Ok(())
}
