//! Case-insensitive substring filtering of list screens.
//!
//! Filtering always runs against the in-memory full list of the latest
//! completed fetch, never against a server response, and never reorders or
//! mutates it.

/// Returns the records whose designated field contains `query`, ignoring case.
///
/// An empty query keeps every record. Order is preserved.
///
/// # Examples
///
/// ```
/// use safenet::app::filter::filter;
///
/// let districts = vec!["Kollam", "Kottayam", "Idukki"];
/// assert_eq!(filter(&districts, "ko", |d| *d), vec!["Kollam", "Kottayam"]);
/// assert_eq!(filter(&districts, "", |d| *d), districts);
/// ```
pub fn filter<T, F>(items: &[T], query: &str, field: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| field(*item).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Character range `(start, end)` of the first case-insensitive match of
/// `query` in `text`, for highlighting. `None` for an empty query or no match.
///
/// Indices count `char`s, matching how the renderer slices text.
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }

    let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    // Lowercasing can change char counts; only highlight when it did not.
    if haystack.len() != text.chars().count() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}
