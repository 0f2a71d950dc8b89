use std::{
    io::{stdout, BufWriter},
    path::{Path, PathBuf},
};

use clap::Parser;
use img_src_lister::{
    extractor::{run, Options, INPUT_PATH},
    image::Scope,
};
use url::Url;

/// Lists the `src` and `srcset` of every `<img>` in `index.html`.
#[derive(Parser)]
struct Opts {
    /// Also list `<source>` elements inside `<picture>`.
    #[arg(long)]
    include_sources: bool,
    /// Write a JSON report of srcset candidates and their issues to this file.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Resolve candidate URLs in the report against this URL.
    #[arg(long, requires = "report")]
    base_url: Option<Url>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let options = Options {
        scope: if opts.include_sources {
            Scope::ImagesAndSources
        } else {
            Scope::Images
        },
        report: opts.report,
        base_url: opts.base_url,
    };
    run(
        Path::new(INPUT_PATH),
        &options,
        BufWriter::new(stdout().lock()),
    )?;
    Ok(())
}
