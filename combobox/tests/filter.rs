use combobox::{FilterMode, SelectOption, filter_options};

fn options(labels: &[&str]) -> Vec<SelectOption> {
    labels.iter().map(|l| SelectOption::simple(*l)).collect()
}

#[test]
fn test_substring_filter() {
    let opts = options(&["Apple", "Banana"]);
    assert_eq!(filter_options(&opts, "ap", FilterMode::Substring), vec![0]);
}

#[test]
fn test_substring_is_case_insensitive() {
    let opts = options(&["Apple", "PINEAPPLE", "Banana"]);
    assert_eq!(filter_options(&opts, "APP", FilterMode::Substring), vec![0, 1]);
}

#[test]
fn test_empty_query_matches_all_in_order() {
    let opts = options(&["c", "a", "b"]);
    assert_eq!(filter_options(&opts, "", FilterMode::Fuzzy), vec![0, 1, 2]);
}

#[test]
fn test_substring_matches_label_not_value() {
    let opts = vec![SelectOption::new("usd", "US Dollar"), SelectOption::new("eur", "Euro")];
    assert!(filter_options(&opts, "usd", FilterMode::Substring).is_empty());
    assert_eq!(filter_options(&opts, "dollar", FilterMode::Substring), vec![0]);
}

#[test]
fn test_fuzzy_matches_scattered_letters() {
    let opts = options(&["Net 30", "Due on receipt", "Net 60"]);
    let hits = filter_options(&opts, "dor", FilterMode::Fuzzy);
    assert_eq!(hits, vec![1]);
    // Substring mode would not find it.
    assert!(filter_options(&opts, "dor", FilterMode::Substring).is_empty());
}

#[test]
fn test_no_match_is_empty() {
    let opts = options(&["Apple"]);
    assert!(filter_options(&opts, "zz", FilterMode::Substring).is_empty());
    assert!(filter_options(&opts, "zz", FilterMode::Fuzzy).is_empty());
}
