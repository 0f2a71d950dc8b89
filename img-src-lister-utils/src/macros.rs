/// A CSS selector compiled once per call site.
#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use $crate::once_cell::sync::Lazy;
        use $crate::scraper::Selector;
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}

/// A regex compiled once per call site.
#[macro_export]
macro_rules! regex {
    ($e: expr) => {{
        use $crate::once_cell::sync::Lazy;
        use $crate::regex::Regex;
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new($e).unwrap());
        &*PATTERN
    }};
}
