use img_src_lister_utils::selector;
use scraper::{ElementRef, Html};
use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImageTag {
    Img,
    Source,
}

/// Which elements are listed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Scope {
    /// Only `<img>`.
    #[default]
    Images,
    /// `<img>` and the `<source>` children of `<picture>`, interleaved in document order.
    ImagesAndSources,
}

/// An image element with the attributes we care about.
///
/// `None` means the attribute does not exist, which is different from `Some("")`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageElement {
    pub tag: ImageTag,
    pub src: Option<String>,
    pub srcset: Option<String>,
}

impl ImageElement {
    /// Returns `None` if `element` is neither `<img>` nor `<source>`.
    pub fn from_element(element: ElementRef) -> Option<Self> {
        let value = element.value();
        let tag = value.name().parse().ok()?;
        Some(Self {
            tag,
            src: value.attr("src").map(ToOwned::to_owned),
            srcset: value.attr("srcset").map(ToOwned::to_owned),
        })
    }
}

pub fn select(html: &Html, scope: Scope) -> Vec<ImageElement> {
    let selector = match scope {
        Scope::Images => selector!("img"),
        Scope::ImagesAndSources => selector!("img, picture > source"),
    };
    html.select(selector)
        .filter_map(ImageElement::from_element)
        .collect()
}
