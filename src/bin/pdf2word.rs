//! Convert extractor output to plain text or DOCX
//!
//! Reads a JSON dump of per-page extractor/OCR output, reconstructs the
//! document layout and writes the result.
//!
//! Usage:
//!   cargo run --bin pdf2word -- pages.json
//!   cargo run --features office --bin pdf2word -- pages.json --docx out.docx --text out.txt
//!
//! Input format:
//!   { "pages": [
//!       { "kind": "digital", "page_height": 792, "items": [ ... ] },
//!       { "kind": "scanned", "text": "OCR text\nper line" },
//!       { "kind": "auto", "page_height": 792, "items": [ ... ], "ocr_text": "..." }
//!   ] }
//!
//! `auto` pages are classified by their native text length and fall back to
//! `ocr_text` when they look scanned.

use pdf_restructure::error::Result;
use pdf_restructure::layout::{OcrPage, RawItem, RawPage};
use pdf_restructure::{Conversion, Converter, LayoutConfig, PageContent};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDocument {
    pages: Vec<InputPage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum InputPage {
    Digital(RawPage),
    Scanned(OcrPage),
    Auto {
        #[serde(default)]
        items: Vec<RawItem>,
        #[serde(alias = "pageHeight")]
        page_height: f64,
        #[serde(default)]
        ocr_text: Option<String>,
    },
}

struct CliConfig {
    input: PathBuf,
    config: Option<PathBuf>,
    text_out: Option<PathBuf>,
    docx_out: Option<PathBuf>,
    title: Option<String>,
    json: bool,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> std::result::Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut config = None;
        let mut text_out = None;
        let mut docx_out = None;
        let mut title = None;
        let mut json = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "--text" | "--docx" | "--title" => {
                    let flag = args[i].clone();
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or_else(|| format!("{} needs a value", flag))?
                        .clone();
                    match flag.as_str() {
                        "--config" => config = Some(PathBuf::from(value)),
                        "--text" => text_out = Some(PathBuf::from(value)),
                        "--docx" => docx_out = Some(PathBuf::from(value)),
                        _ => title = Some(value),
                    }
                },
                "--json" => json = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Err(usage(&args[0])),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option {}\n{}", other, usage(&args[0])));
                },
                other => input = Some(PathBuf::from(other)),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| usage(&args[0]))?;
        Ok(Self {
            input,
            config,
            text_out,
            docx_out,
            title,
            json,
            verbose,
        })
    }
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <pages.json> [--config layout.json] [--text out.txt] [--docx out.docx] \
         [--title TITLE] [--json] [--verbose]",
        program
    )
}

fn route_pages(input: InputDocument, config: &LayoutConfig) -> Result<Vec<PageContent>> {
    input
        .pages
        .into_iter()
        .enumerate()
        .map(|(idx, page)| match page {
            InputPage::Digital(raw) => Ok(PageContent::Digital(raw)),
            InputPage::Scanned(ocr) => Ok(PageContent::Scanned(ocr)),
            InputPage::Auto {
                items,
                page_height,
                ocr_text,
            } => PageContent::route(RawPage::new(items, page_height), config.text_threshold, || {
                if ocr_text.is_none() {
                    log::warn!("page {} looks scanned but has no OCR text", idx + 1);
                }
                Ok(OcrPage::new(ocr_text.unwrap_or_default()))
            }),
        })
        .collect()
}

#[cfg(feature = "office")]
fn build_docx(conversion: &Conversion, title: Option<&str>) -> Result<Vec<u8>> {
    let mut writer = pdf_restructure::converters::DocxWriter::new();
    if let Some(title) = title {
        writer = writer.with_title(title);
    }
    writer.write(&conversion.elements)
}

#[cfg(not(feature = "office"))]
fn build_docx(_conversion: &Conversion, _title: Option<&str>) -> Result<Vec<u8>> {
    Err(pdf_restructure::Error::Docx(
        "DOCX output requires building with the `office` feature".to_string(),
    ))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Write every output or none of them.
///
/// Each file is staged next to its target and renamed into place only after
/// all staged writes succeeded. On failure, staged files and any targets
/// already renamed are removed.
fn write_outputs(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let temp_path = staging_path(path);
        if let Err(e) = fs::write(&temp_path, bytes) {
            let _ = fs::remove_file(&temp_path);
            discard(&staged, &[]);
            return Err(e.into());
        }
        staged.push((temp_path, *path));
    }

    let mut placed: Vec<&Path> = Vec::with_capacity(staged.len());
    for (idx, (temp_path, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp_path, path) {
            discard(&staged[idx..], &placed);
            return Err(e.into());
        }
        placed.push(path);
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)], placed: &[&Path]) {
    for (temp_path, _) in staged {
        let _ = fs::remove_file(temp_path);
    }
    for path in placed {
        log::warn!("removing {} after a failed write", path.display());
        let _ = fs::remove_file(path);
    }
}

fn run(cli: &CliConfig) -> Result<()> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let input: InputDocument = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;
    let pages = route_pages(input, &config)?;
    log::info!("{}: {} pages", cli.input.display(), pages.len());

    let conversion = Converter::new(config).convert(&pages)?;

    // Build everything before touching the filesystem so a failure leaves no partial output.
    let docx = match &cli.docx_out {
        Some(_) => Some(build_docx(&conversion, cli.title.as_deref())?),
        None => None,
    };

    let mut outputs: Vec<(&Path, &[u8])> = Vec::new();
    if let (Some(path), Some(bytes)) = (&cli.docx_out, &docx) {
        outputs.push((path.as_path(), bytes.as_slice()));
    }
    if let Some(path) = &cli.text_out {
        outputs.push((path.as_path(), conversion.plain_text.as_bytes()));
    }
    write_outputs(&outputs)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&conversion.elements)?);
    } else if cli.text_out.is_none() && cli.docx_out.is_none() {
        println!("{}", conversion.plain_text);
    }

    Ok(())
}

fn main() {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        },
    };

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outputs_places_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("out.docx");
        let text = dir.path().join("out.txt");

        write_outputs(&[(docx.as_path(), &b"PK"[..]), (text.as_path(), &b"hello"[..])]).unwrap();

        assert_eq!(fs::read(&docx).unwrap(), b"PK");
        assert_eq!(fs::read_to_string(&text).unwrap(), "hello");
        assert!(!staging_path(&docx).exists());
        assert!(!staging_path(&text).exists());
    }

    #[test]
    fn test_failed_text_write_leaves_no_docx() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("out.docx");
        let text = dir.path().join("missing").join("out.txt");

        let result = write_outputs(&[(docx.as_path(), &b"PK"[..]), (text.as_path(), &b"hello"[..])]);

        assert!(result.is_err());
        assert!(!docx.exists());
        assert!(!staging_path(&docx).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_staging_path_is_a_sibling() {
        let path = Path::new("/tmp/report.docx");
        assert_eq!(staging_path(path), PathBuf::from("/tmp/report.docx.partial"));
    }
}
