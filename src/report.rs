use std::path::{Path, PathBuf};

use img_src_lister_utils::fs_json_util::write_json;
use itertools::Itertools;
use log::warn;
use serde::Serialize;
use url::Url;

use crate::{
    image::{ImageElement, ImageTag},
    srcset::{self, src_is_malformed, Issue},
};

#[derive(Debug, Serialize)]
pub struct Report {
    pub input: PathBuf,
    pub images: Vec<ImageReport>,
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub index: usize,
    pub tag: ImageTag,
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub src_malformed: bool,
    pub candidates: Vec<CandidateReport>,
}

#[derive(Debug, Serialize)]
pub struct CandidateReport {
    pub raw: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Url>,
    pub descriptor: Option<String>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn build(input: &Path, elements: &[ImageElement], base: Option<&Url>) -> Self {
        let images = elements
            .iter()
            .enumerate()
            .map(|(index, element)| ImageReport::build(index, element, base))
            .collect();
        Self {
            input: input.to_owned(),
            images,
        }
    }

    /// Malformed `src`s plus the issues of every candidate.
    pub fn issue_count(&self) -> usize {
        self.images
            .iter()
            .map(|image| {
                usize::from(image.src_malformed)
                    + image
                        .candidates
                        .iter()
                        .map(|c| c.issues.len())
                        .sum::<usize>()
            })
            .sum()
    }

    pub fn log_issues(&self) {
        for image in &self.images {
            if image.src_malformed {
                warn!(
                    "#{} <{}>: src {:?} contains a space or a comma",
                    image.index,
                    image.tag,
                    image.src.as_deref().unwrap_or_default()
                );
            }
            for candidate in image.candidates.iter().filter(|c| !c.issues.is_empty()) {
                warn!(
                    "#{} <{}>: candidate {:?}: {}",
                    image.index,
                    image.tag,
                    candidate.raw,
                    candidate.issues.iter().join(",")
                );
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        write_json(path.as_ref(), self)
    }
}

impl ImageReport {
    fn build(index: usize, element: &ImageElement, base: Option<&Url>) -> Self {
        let resolve = |url: &str| base.and_then(|base| base.join(url).ok());
        let from_src = element
            .src
            .iter()
            .filter(|src| !src.is_empty())
            .map(|src| CandidateReport {
                raw: src.clone(),
                url: src.clone(),
                resolved: resolve(src),
                descriptor: None,
                issues: vec![],
            });
        let from_srcset = element
            .srcset
            .as_deref()
            .map(srcset::parse)
            .unwrap_or_default()
            .into_iter()
            .map(|candidate| CandidateReport {
                issues: candidate.issues(),
                resolved: resolve(&candidate.url),
                raw: candidate.raw,
                url: candidate.url,
                descriptor: candidate.descriptor,
            });
        Self {
            index,
            tag: element.tag,
            src: element.src.clone(),
            srcset: element.srcset.clone(),
            src_malformed: element.src.as_deref().is_some_and(src_is_malformed),
            candidates: from_src.chain(from_srcset).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;
    use url::Url;

    use super::Report;
    use crate::{
        image::{ImageElement, ImageTag},
        srcset::Issue,
    };

    fn element(tag: ImageTag, src: Option<&str>, srcset: Option<&str>) -> ImageElement {
        ImageElement {
            tag,
            src: src.map(ToOwned::to_owned),
            srcset: srcset.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn src_comes_first_then_srcset() {
        let elements = [element(
            ImageTag::Img,
            Some("a.png"),
            Some("a.png 1x, b.png 2x"),
        )];
        let report = Report::build(Path::new("index.html"), &elements, None);
        let urls = report.images[0]
            .candidates
            .iter()
            .map(|c| (c.url.as_str(), c.descriptor.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            [("a.png", None), ("a.png", Some("1x")), ("b.png", Some("2x"))]
        );
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn counts_issues() {
        let elements = [
            element(ImageTag::Img, Some("my photo.jpg"), None),
            element(ImageTag::Source, None, Some("x.webp, y.webp 2x, z w.webp 3x")),
            element(ImageTag::Img, None, None),
        ];
        let report = Report::build(Path::new("index.html"), &elements, None);
        assert!(report.images[0].src_malformed);
        assert_eq!(
            report.images[1]
                .candidates
                .iter()
                .map(|c| c.issues.clone())
                .collect::<Vec<_>>(),
            [
                vec![Issue::MissingOrInvalidDescriptor],
                vec![],
                vec![Issue::ContainsSpace],
            ]
        );
        assert!(report.images[2].candidates.is_empty());
        assert_eq!(report.issue_count(), 3);
    }

    #[test]
    fn resolves_against_base() {
        let base = Url::parse("https://shop.example/products/index.html").unwrap();
        let elements = [element(
            ImageTag::Img,
            Some("/img/a.png"),
            Some("thumb.png 1x"),
        )];
        let report = Report::build(Path::new("index.html"), &elements, Some(&base));
        let resolved = report.images[0]
            .candidates
            .iter()
            .map(|c| c.resolved.as_ref().map(Url::as_str))
            .collect::<Vec<_>>();
        assert_eq!(
            resolved,
            [
                Some("https://shop.example/img/a.png"),
                Some("https://shop.example/products/thumb.png"),
            ]
        );
    }

    #[test]
    fn empty_src_is_not_a_candidate() {
        let base = Url::parse("https://shop.example/").unwrap();
        let elements = [element(ImageTag::Img, Some(""), Some("a.png 1x"))];
        let report = Report::build(Path::new("index.html"), &elements, Some(&base));
        let image = &report.images[0];
        assert_eq!(image.src.as_deref(), Some(""));
        assert!(!image.src_malformed);
        assert_eq!(image.candidates.len(), 1);
        assert_eq!(image.candidates[0].url, "a.png");
        assert_eq!(
            image.candidates[0].resolved.as_ref().map(Url::as_str),
            Some("https://shop.example/a.png")
        );
    }

    #[test]
    fn json_shape() {
        let elements = [element(ImageTag::Img, None, Some("a.png 1x"))];
        let report = Report::build(Path::new("index.html"), &elements, None);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "input": "index.html",
                "images": [{
                    "index": 0,
                    "tag": "img",
                    "src": null,
                    "srcset": "a.png 1x",
                    "src_malformed": false,
                    "candidates": [{
                        "raw": "a.png 1x",
                        "url": "a.png",
                        "descriptor": "1x",
                        "issues": [],
                    }],
                }],
            })
        );
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = Report::build(Path::new("index.html"), &[], None);
        report.save(&path).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs_err::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, json!({ "input": "index.html", "images": [] }));
    }
}
