use folio_dom::BaseDocument;

/// Estimated minutes needed to read `text`, rounded up
pub fn estimate_minutes(text: &str, words_per_minute: usize) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1))
}

/// Write the reading time of `content` into `#readingTimeValue`, if both exist.
/// Returns the estimate.
pub fn install(doc: &mut BaseDocument, content: Option<usize>, words_per_minute: usize) -> Option<usize> {
    let content = content?;
    let output = doc.get_element_by_id("readingTimeValue")?;
    let minutes = estimate_minutes(&doc.text_content(content), words_per_minute);
    doc.mutate().set_text_content(output, &minutes.to_string());
    Some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_partial_minutes() {
        assert_eq!(estimate_minutes("", 225), 0);
        assert_eq!(estimate_minutes("  one  ", 225), 1);
        let text = "word ".repeat(450);
        assert_eq!(estimate_minutes(&text, 225), 2);
        let text = "word ".repeat(451);
        assert_eq!(estimate_minutes(&text, 225), 3);
    }
}
