use std::{
    borrow::Cow,
    fmt::Display,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use img_src_lister_utils::regex;
use lazy_format::lazy_format;
use log::{debug, info, warn};
use scraper::Html;
use url::Url;

use crate::{
    image::{self, ImageElement, Scope},
    report::Report,
};

/// The HTML file that is listed, relative to the working directory.
pub const INPUT_PATH: &str = "index.html";

/// Printed in place of an attribute that does not exist.
pub const ABSENT: &str = "None";

#[derive(Debug, Default)]
pub struct Options {
    pub scope: Scope,
    /// Where to write the JSON audit report, if anywhere.
    pub report: Option<PathBuf>,
    pub base_url: Option<Url>,
}

pub fn load(path: &Path) -> anyhow::Result<Html> {
    let bytes = fs_err::read(path).with_context(|| format!("Could not read {path:?}"))?;
    debug!("Read {} bytes from {path:?}", bytes.len());
    Ok(Html::parse_document(&decode(&bytes)))
}

/// Picks the encoding from the BOM, then from a `<meta>` charset declaration, then UTF-8.
pub fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    prescan_meta_charset(&bytes[..bytes.len().min(1024)]).unwrap_or(UTF_8)
}

fn prescan_meta_charset(head: &[u8]) -> Option<&'static Encoding> {
    // Declarations are ASCII, so a lossy view of the head is enough to find them.
    let head = String::from_utf8_lossy(head);
    let captures = regex!(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?\s*([A-Za-z0-9_:.+-]+)"#)
        .captures(&head)?;
    let encoding = Encoding::for_label(captures[1].as_bytes())?;
    // A declaration readable as ASCII cannot be UTF-16.
    Some(match encoding {
        e if e == UTF_16LE || e == UTF_16BE => UTF_8,
        e if e == X_USER_DEFINED => WINDOWS_1252,
        e => e,
    })
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    // A BOM wins over the sniffed encoding and is stripped.
    let (text, encoding, had_errors) = sniff_encoding(bytes).decode(bytes);
    debug!("Decoded as {}", encoding.name());
    if had_errors {
        warn!("Malformed {} sequences were replaced", encoding.name());
    }
    text
}

fn attr(value: Option<&str>) -> impl Display + '_ {
    lazy_format!(match (value) {
        Some(value) => ("{}", value),
        None => ("{}", ABSENT),
    })
}

/// `<index> <src> || <srcset>`
pub fn format_line(index: usize, element: &ImageElement) -> impl Display + '_ {
    let src = attr(element.src.as_deref());
    let srcset = attr(element.srcset.as_deref());
    lazy_format!("{index} {src} || {srcset}")
}

pub fn write_listing<W: Write>(mut writer: W, elements: &[ImageElement]) -> io::Result<()> {
    for (index, element) in elements.iter().enumerate() {
        writeln!(writer, "{}", format_line(index, element))?;
    }
    writer.flush()
}

pub fn run<W: Write>(path: &Path, options: &Options, writer: W) -> anyhow::Result<Vec<ImageElement>> {
    let html = load(path)?;
    let elements = image::select(&html, options.scope);
    debug!("Found {} image elements", elements.len());
    write_listing(writer, &elements).context("Failed to write the listing")?;

    if let Some(report_path) = &options.report {
        let report = Report::build(path, &elements, options.base_url.as_ref());
        report.log_issues();
        report.save(report_path)?;
        info!(
            "Wrote report on {} elements with {} issues to {report_path:?}",
            report.images.len(),
            report.issue_count()
        );
    }
    Ok(elements)
}
