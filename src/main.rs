use log::error;
use std::env;
use std::process::ExitCode;

use cookidoo_import::{
    format_import_summary, format_preview, import_recipe, preview_recipe, CookidooClient,
    ImportConfig, ImportError,
};

const USAGE: &str = "Usage: cookidoo-import [--preview] <url>";

async fn run(url: &str, preview: bool) -> Result<String, ImportError> {
    let config = ImportConfig::load()?;

    if preview {
        let recipe = preview_recipe(url, &config).await?;
        return Ok(format_preview(&recipe));
    }

    let mut client = CookidooClient::from_config(&config)?;
    let (recipe, result) = import_recipe(url, &mut client, config.locale()).await?;
    Ok(format_import_summary(&recipe, &result))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let preview = args.iter().any(|arg| arg == "--preview");
    let Some(url) = args.iter().find(|arg| !arg.starts_with("--")) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(url, preview).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import of {} failed: {}", url, e);
            eprintln!("Unable to import {url}: {e}");
            ExitCode::FAILURE
        }
    }
}
