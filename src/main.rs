use clap::Parser;
use folio::{PipelineError, RendererBuilder};
use std::path::PathBuf;

/// Renders a DocBook-style book to PDF.
#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Args {
    /// Input XML document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// JSON render configuration (fonts, text defaults, page setup)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory that image references resolve against
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = RendererBuilder::new();
    if let Some(config) = &args.config {
        builder = builder.with_config_file(config)?;
    }
    if let Some(dir) = args.base_dir {
        builder = builder.with_base_dir(dir);
    }
    let renderer = builder.build()?;

    let diagnostics = renderer.render_file(&args.input, &args.output)?;
    for diagnostic in &diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    println!("Successfully generated {}", args.output.display());
    Ok(())
}
