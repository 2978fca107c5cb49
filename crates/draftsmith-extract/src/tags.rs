/// Deduplicated union of two tag lists, first-seen order, blanks dropped.
pub fn merge_tags<I, J>(extracted: I, extra: J) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    J: IntoIterator<Item = String>,
{
    let mut merged: Vec<String> = Vec::new();
    for tag in extracted.into_iter().chain(extra) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !merged.iter().any(|t| t == tag) {
            merged.push(tag.to_string());
        }
    }
    merged
}
