use std::path::Path;

use anyhow::Result;
use clap::{App, Arg};
use tracing_subscriber::EnvFilter;

use tattle::build::build_site;
use tattle::config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = App::new("tattle")
        .about("Builds tag pages, legacy-URL redirects, and a slug index for the blog")
        .arg(
            Arg::with_name("project")
                .help("Directory to search for tattle.yaml (defaults to the current directory)")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true)
                .help("The site's output directory"),
        )
        .get_matches();

    let project = Path::new(matches.value_of("project").unwrap_or("."));
    let output = Path::new(matches.value_of("output").unwrap_or_default());

    let config = Config::from_directory(project)?;
    build_site(&config, output)?;
    Ok(())
}
