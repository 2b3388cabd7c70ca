use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use middlegen_generator::{
    CustomizerRegistry, DirectoryEmitter, GenerateRequest, Generator, ManifestLoader,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Interface type to decorate, e.g. Service
    #[arg(value_name = "TYPE", required_unless_present = "list")]
    pub type_name: Option<String>,

    /// Name of the func(T) T middleware type
    #[arg(value_name = "MIDDLEWARE", required_unless_present = "list")]
    pub middleware: Option<String>,

    /// Registered customizer to apply (see --list)
    #[arg(value_name = "CUSTOMIZER", required_unless_present = "list")]
    pub customizer: Option<String>,

    /// Package directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Type manifest file name (overrides config)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Omit the generated-code header
    #[arg(long)]
    pub no_header: bool,
}

pub fn generate(args: GenerateArgs, registry: &CustomizerRegistry, cwd: &Path) -> Result<()> {
    let (Some(type_name), Some(middleware), Some(customizer)) =
        (args.type_name, args.middleware, args.customizer)
    else {
        return Err(anyhow!("Expected TYPE, MIDDLEWARE and CUSTOMIZER"));
    };

    let config = Config::load(cwd)?;
    let mut options = config.generate_options();
    if args.no_header {
        options.header = false;
    }

    let manifest = args
        .manifest
        .unwrap_or_else(|| config.manifest.clone());
    let loader = ManifestLoader::with_file_name(manifest);
    let generator = Generator::with_options(registry, &loader, options);

    let request = GenerateRequest::new(cwd.join(&args.dir), type_name, middleware, customizer);
    let file = generator.generate(&request)?;

    if args.stdout {
        print!("{}", file.render());
        return Ok(());
    }

    let out_dir = match args.out_dir {
        Some(dir) => cwd.join(dir),
        None => config.get_out_dir(cwd),
    };
    info!(out_dir = %out_dir.display(), "Writing middleware");
    let path = generator.write(&file, &DirectoryEmitter::new(&out_dir))?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        request.type_name,
        path.display()
    );
    Ok(())
}
