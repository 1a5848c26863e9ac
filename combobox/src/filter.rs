//! Option filtering by search text.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::option::SelectOption;

/// How the search box narrows the option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Case-insensitive substring match on the label; original order kept.
    #[default]
    Substring,
    /// Fuzzy match on the label via nucleo; best matches first.
    Fuzzy,
}

/// Indices into `options` of the entries matching `query`.
///
/// An empty query matches everything in original order.
pub fn filter_options(options: &[SelectOption], query: &str, mode: FilterMode) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }
    match mode {
        FilterMode::Substring => substring_filter(options, query),
        FilterMode::Fuzzy => fuzzy_filter(options, query),
    }
}

fn substring_filter(options: &[SelectOption], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.label.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

fn fuzzy_filter(options: &[SelectOption], query: &str) -> Vec<usize> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut scored: Vec<(usize, u32)> = options
        .iter()
        .enumerate()
        .filter_map(|(index, opt)| {
            let haystack = Utf32Str::new(&opt.label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (index, score))
        })
        .collect();

    // Stable sort keeps original order among equal scores.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(index, _)| index).collect()
}
