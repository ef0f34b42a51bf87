use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Selector};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid CSS selector '{}': {}", css, e))
}

/// First descendant of `scope` matching `css`, if any.
pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    Ok(found)
}

/// All descendants of `scope` matching `css`, in document order.
pub fn all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).collect();
    Ok(found)
}

/// Like [`first`], but a missing element is a fatal lookup failure.
pub fn require<'a>(scope: ElementRef<'a>, css: &str, what: &str) -> Result<ElementRef<'a>> {
    first(scope, css)?.with_context(|| format!("Missing required {} ('{}')", what, css))
}

/// Text of `inner` inside `region`; `""` when either is absent.
pub fn optional_text(scope: ElementRef<'_>, region: &str, inner: &str) -> Result<String> {
    let Some(region_el) = first(scope, region)? else {
        return Ok(String::new());
    };
    Ok(first(region_el, inner)?.map(text).unwrap_or_default())
}

/// Concatenated text content, trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn strip_whitespace(s: &str) -> String {
    s.split_whitespace().collect()
}

/// First whitespace-separated token, or `""` for blank input.
pub fn first_token(s: &str) -> String {
    s.split_whitespace().next().unwrap_or("").to_string()
}
