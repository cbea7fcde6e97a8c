//! droptree CLI Binary
//!
//! Renders a directory or a ZIP archive as a tree.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use droptree::{LabelStyle, Session, TreeError, TreeResult, ViewerConfig, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ASCII tree text
    Text,
    /// Nested JSON objects
    Json,
    /// Interactive rows, honoring the expansion state
    Rows,
}

#[derive(Debug, Parser)]
#[command(name = "droptree", version, about = "Show a directory or ZIP archive as a tree")]
struct Cli {
    /// Directory or .zip archive to show
    path: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix names with folder/file glyphs
    #[arg(long)]
    icons: bool,

    /// Start with every directory collapsed (affects --format rows)
    #[arg(long)]
    collapsed: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the archive size ceiling
    #[arg(long)]
    max_archive_bytes: Option<u64>,

    /// Print the contents of this file (canonical path inside the tree)
    #[arg(long)]
    show: Option<String>,
}

impl Cli {
    fn viewer_config(&self) -> TreeResult<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if self.icons {
            config.label_style = LabelStyle::Icons;
        }
        if self.collapsed {
            config.collapsed_by_default = true;
        }
        if let Some(max) = self.max_archive_bytes {
            config.max_archive_bytes = max;
        }
        Ok(config)
    }
}

async fn run(cli: Cli) -> TreeResult<()> {
    let config = cli.viewer_config()?;
    logging::init(&config.logging)?;

    let style = config.label_style;
    let mut session = Session::new(config);
    session.load_path(&cli.path).await?;
    let Some(tree) = session.tree() else {
        return Err(TreeError::NotFound(cli.path.display().to_string()));
    };

    if let Some(file) = &cli.show {
        let data = tree.read_file(file).await?;
        std::io::stdout().lock().write_all(&data)?;
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        OutputFormat::Text => {
            writeln!(stdout, "{}", droptree::render_text(tree.root(), style))?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(tree.root())
                .map_err(|e| TreeError::Io(e.to_string()))?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Rows => {
            for row in session.rows() {
                writeln!(stdout, "{}", row.to_line())?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
