//! Link discovery on CMS pages
//!
//! The CMS site is not parsed as HTML. Links are located by searching for
//! fixed markers in a lowercased copy of the page; because ASCII lowercasing
//! keeps byte offsets, the link text itself is sliced from the original.

/// Link to the newest ICD-10 CM release page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLink {
    pub href: String,
    /// Leading year of the link text, e.g. `2025` from `2025 ICD-10-CM`
    pub year: String,
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}

/// Scan one `<li>` item bounded by `li_end` for an ICD-10 CM link
fn release_in_item(page: &str, lower: &str, li_start: usize, li_end: usize) -> Option<ReleaseLink> {
    let item_start = find_from(lower, "<a href=\"", li_start).filter(|&i| i <= li_end)?;
    let item_end = find_from(lower, "</a>", item_start).filter(|&i| i <= li_end)?;

    let href_start = find_from(lower, "\"", item_start)? + 1;
    let href_end = find_from(lower, "\"", href_start).filter(|&i| i <= item_end)?;

    let text_start = find_from(lower, ">", item_start)? + 1;
    let text_end = find_from(lower, "<", text_start).filter(|&i| i <= item_end)?;

    let text = &lower[text_start..text_end];
    if !(text.contains("icd-10") && text.contains("cm")) {
        return None;
    }

    let year = page[text_start..text_end]
        .split(|c: char| c == '-' || c.is_whitespace())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();
    Some(ReleaseLink {
        href: page[href_start..href_end].to_string(),
        year,
    })
}

/// Find the first ICD-10 CM item in the first `<ul class="menu">` list
pub fn find_release_link(page: &str) -> Option<ReleaseLink> {
    let lower = page.to_ascii_lowercase();
    let menu_start = lower.find("<ul class=\"menu\">")?;
    let menu_end = find_from(&lower, "</ul>", menu_start)?;

    let mut li_start = find_from(&lower, "<li", menu_start).filter(|&i| i <= menu_end)?;
    loop {
        let li_end = find_from(&lower, "</li>", li_start)?;
        if let Some(link) = release_in_item(page, &lower, li_start, li_end) {
            return Some(link);
        }
        li_start = find_from(&lower, "<li", li_end).filter(|&i| i <= menu_end)?;
    }
}

/// Find the quoted link immediately preceding the text "tabular order"
pub fn find_tabular_order_link(page: &str) -> Option<String> {
    let lower = page.to_ascii_lowercase();
    let text_loc = lower.find("tabular order")?;
    let tag_end = lower[..text_loc].rfind('"')?;
    let tag_start = lower[..tag_end].rfind('"')? + 1;
    let href = &page[tag_start..tag_end];
    if href.is_empty() {
        None
    } else {
        Some(href.to_string())
    }
}
