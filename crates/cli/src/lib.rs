mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mushaf_model::{remap_text, ChapterIndex, ChapterRecord, MADINAH_PAGE_COUNT};
use pdf_engine::{OpenSource, PdfEngine, RenderRequest};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use storage::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "quran-unix-cli")]
#[command(about = "Quran Unix command-line tools")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the mushaf in the desktop reader.
    Open {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// 1-based page to open at.
        #[arg(long)]
        page: Option<u32>,
    },
    /// Print page count and geometry of a mushaf PDF as JSON.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the surah shown on a 1-based page.
    Surah {
        #[arg(value_name = "PAGE")]
        page: u32,
        #[arg(long)]
        json: bool,
    },
    /// List surahs whose name or number matches a query.
    Search {
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
        /// Treat the query as typed on a Latin keyboard and remap it to Arabic.
        #[arg(long)]
        remap: bool,
    },
    /// Render a page to PNG.
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 2.0)]
        scale: f32,
        /// Invert colours as the reader does in dark mode.
        #[arg(long)]
        dark: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the saved reader settings.
    Settings {
        #[arg(long, value_name = "DIR", env = "QURAN_UNIX_CONFIG_DIR")]
        config_dir: Option<PathBuf>,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    path: String,
    page_count: u32,
    /// True when the page count matches the built-in chapter table.
    madinah_layout: bool,
    page_size_pt: PageSizeOutput,
}

#[derive(Debug, Serialize)]
struct PageSizeOutput {
    width: f32,
    height: f32,
}

#[derive(Debug, Serialize)]
struct SettingsOutput {
    path: String,
    last_page: u32,
    dark_mode: bool,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Open { file, page } => run_open(file.as_deref(), page),
        Commands::Info { file } => run_info(&file),
        Commands::Surah { page, json } => run_surah(page, json),
        Commands::Search { query, remap } => run_search(&query, remap),
        Commands::Render { file, page, scale, dark, output } => {
            run_render(&file, page, scale, dark, output.as_deref())
        }
        Commands::Settings { config_dir } => run_settings(config_dir),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn chapter_index() -> Result<&'static ChapterIndex> {
    ChapterIndex::standard().context("built-in chapter table is invalid")
}

fn chapter_row(record: &ChapterRecord) -> String {
    format!("{}\t{}\t{}", record.number, record.name, record.start_page)
}

fn run_open(file: Option<&Path>, page: Option<u32>) -> Result<()> {
    if let Some(file) = file {
        ensure_pdf_exists(file)?;
    }

    let mut args: Vec<OsString> = Vec::new();
    if let Some(file) = file {
        args.push("--pdf".into());
        args.push(file.as_os_str().to_owned());
    }
    if let Some(page) = page {
        args.push("--page".into());
        args.push(page.to_string().into());
    }

    if std::env::var_os("QURAN_UNIX_TEST_NO_SPAWN").is_some() {
        let rendered: Vec<String> =
            args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect();
        println!("open:{}", rendered.join(" "));
        return Ok(());
    }

    let reader_bin =
        std::env::var_os("QURAN_UNIX_APP_BIN").unwrap_or_else(|| OsString::from("quran-unix"));
    tracing::info!(bin = %reader_bin.to_string_lossy(), "launching reader");

    let status =
        Command::new(reader_bin).args(&args).status().context("failed to launch desktop reader")?;

    if !status.success() {
        anyhow::bail!("desktop reader exited with status {status}");
    }

    Ok(())
}

fn run_info(file: &Path) -> Result<()> {
    ensure_pdf_exists(file)?;

    let mut engine = open_engine()?;
    let handle = engine.open(OpenSource::from(file)).context("failed to open PDF")?;

    let page_count = engine.page_count(handle)?;
    let size = engine.page_size(handle, 0)?;
    if page_count != MADINAH_PAGE_COUNT {
        tracing::warn!(page_count, "surah lookups assume {MADINAH_PAGE_COUNT} pages");
    }

    let info = InfoOutput {
        path: file.display().to_string(),
        page_count,
        madinah_layout: page_count == MADINAH_PAGE_COUNT,
        page_size_pt: PageSizeOutput { width: size.width_pt, height: size.height_pt },
    };
    println!("{}", serde_json::to_string_pretty(&info)?);

    engine.close(handle)?;
    Ok(())
}

fn run_surah(page: u32, json: bool) -> Result<()> {
    if page == 0 {
        anyhow::bail!("PAGE is 1-based and must be >= 1");
    }

    let record = chapter_index()?.resolve_chapter(page);

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", chapter_row(record));
    }

    Ok(())
}

fn run_search(query: &str, remap: bool) -> Result<()> {
    let query = if remap { remap_text(query) } else { query.to_owned() };
    let matches = chapter_index()?.filter_by_query(&query);
    tracing::debug!(query = %query, matches = matches.len(), "search");

    if matches.is_empty() {
        anyhow::bail!("no surah matches {query:?}");
    }

    for (_, record) in matches {
        println!("{}", chapter_row(record));
    }

    Ok(())
}

fn run_render(
    file: &Path,
    page: u32,
    scale: f32,
    dark: bool,
    output: Option<&Path>,
) -> Result<()> {
    ensure_pdf_exists(file)?;

    if page == 0 {
        anyhow::bail!("--page is 1-based and must be >= 1");
    }

    let mut engine = open_engine()?;
    let handle = engine.open(OpenSource::from(file)).context("failed to open PDF")?;

    let image = engine
        .render_page(handle, RenderRequest::page(page - 1, scale, dark))
        .context("failed to render page")?;

    let output =
        output.map(ToOwned::to_owned).unwrap_or_else(|| default_render_output(file, page, dark));

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    image
        .save(&output)
        .with_context(|| format!("failed to write image to {}", output.display()))?;

    println!("{}", output.display());

    engine.close(handle)?;

    Ok(())
}

fn run_settings(config_dir: Option<PathBuf>) -> Result<()> {
    let store = SettingsStore::resolve(config_dir).context("failed to locate settings")?;
    let settings = store.load_or_default();

    let payload = SettingsOutput {
        path: store.settings_path().display().to_string(),
        last_page: settings.last_page,
        dark_mode: settings.dark_mode,
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// pdfium when the CLI is built with the `pdfium` feature, otherwise the
/// geometry-only engine, which renders blank framed pages.
fn open_engine() -> Result<Box<dyn PdfEngine>> {
    #[cfg(feature = "pdfium")]
    {
        pdf_engine::preferred_engine().context("failed to load the PDF renderer")
    }

    #[cfg(not(feature = "pdfium"))]
    {
        Ok(Box::new(pdf_engine::default_engine()))
    }
}

fn ensure_pdf_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}

fn default_render_output(file: &Path, page: u32, dark: bool) -> PathBuf {
    let stem = file.file_stem().and_then(|name| name.to_str()).unwrap_or("page");
    let suffix = if dark { "-dark" } else { "" };

    file.with_file_name(format!("{stem}-page-{page}{suffix}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        let output = default_render_output(Path::new("/books/mushaf.pdf"), 3, false);
        assert_eq!(output, PathBuf::from("/books/mushaf-page-3.png"));

        let dark = default_render_output(Path::new("mushaf.pdf"), 12, true);
        assert_eq!(dark, PathBuf::from("mushaf-page-12-dark.png"));
    }

    #[cfg(not(feature = "pdfium"))]
    #[test]
    fn headless_build_renders_blank_pages_at_page_size() {
        use lopdf::{dictionary, Document, Object};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 300.into(), 500.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize");

        let mut engine = open_engine().expect("engine");
        let handle = engine.open(OpenSource::Bytes(bytes)).expect("open");
        let image = engine.render_page(handle, RenderRequest::page(0, 1.0, false)).expect("render");

        assert_eq!(image.dimensions(), (300, 500));
        assert_eq!(image.get_pixel(150, 250).0, [255, 255, 255, 255]);
    }

    #[test]
    fn chapter_row_is_tab_separated() {
        let record = chapter_index().expect("table").resolve_chapter(50);
        assert_eq!(chapter_row(record), "3\tآل عمران\t50");
    }
}
