use std::fmt;

use folio_dom::{Attribute, BaseDocument, Range, RangeError};

/// Highlight colours offered by the tooltip. Any other `data-color` value is
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Other(String),
}

impl HighlightColor {
    pub fn as_str(&self) -> &str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Blue => "blue",
            HighlightColor::Other(name) => name,
        }
    }

    /// The class given to the wrapper, e.g. `highlight-green`
    pub fn class_name(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.as_str())
    }
}

impl From<&str> for HighlightColor {
    fn from(value: &str) -> Self {
        match value {
            "yellow" => HighlightColor::Yellow,
            "green" => HighlightColor::Green,
            "blue" => HighlightColor::Blue,
            other => HighlightColor::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline formatting offered by the tooltip's format buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatAction {
    /// Wrap the selection in `<em>`
    Italic,
    /// A format this page does not implement. Only hides the tooltip.
    Other(String),
}

impl From<&str> for FormatAction {
    fn from(value: &str) -> Self {
        match value {
            "italic" => FormatAction::Italic,
            other => FormatAction::Other(other.to_string()),
        }
    }
}

/// How the selected contents end up inside the wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStrategy {
    /// Both boundaries share a parent once boundary text is split, so the covered
    /// run of siblings moves into the wrapper as-is.
    SimpleWrap,
    /// An element straddles a boundary. The contents are extracted (cloning the
    /// straddling elements) and the wrapper is inserted where the range collapsed.
    FragmentRewrap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// There was no non-collapsed selection. Nothing changed.
    NoSelection,
    /// The selection now lives inside `wrapper` and has been cleared
    Applied {
        strategy: WrapStrategy,
        wrapper: usize,
    },
    /// A format with no DOM effect was requested
    Ignored,
    /// The selection could not be wrapped. The document and selection are untouched.
    Failed(RangeError),
}

impl ApplyOutcome {
    pub fn wrapper(&self) -> Option<usize> {
        match self {
            ApplyOutcome::Applied { wrapper, .. } => Some(*wrapper),
            _ => None,
        }
    }
}

/// Pick the strategy for wrapping `range`
pub fn choose_strategy(doc: &BaseDocument, range: &Range) -> WrapStrategy {
    if doc.has_partially_contained_element(range) {
        WrapStrategy::FragmentRewrap
    } else {
        WrapStrategy::SimpleWrap
    }
}

/// Wrap the current selection in `<span class="{prefix}{color}">` and clear the
/// selection.
pub fn apply_highlight(doc: &mut BaseDocument, color: &HighlightColor, prefix: &str) -> ApplyOutcome {
    let class = color.class_name(prefix);
    wrap_selection(doc, "span", vec![Attribute::new("class", class)])
}

/// Run a format action on the current selection
pub fn apply_format(doc: &mut BaseDocument, format: &FormatAction) -> ApplyOutcome {
    match format {
        FormatAction::Italic => wrap_selection(doc, "em", Vec::new()),
        FormatAction::Other(_) => ApplyOutcome::Ignored,
    }
}

/// Move the selected contents into a new `tag` element and clear the selection
pub fn wrap_selection(doc: &mut BaseDocument, tag: &str, attrs: Vec<Attribute>) -> ApplyOutcome {
    let Some(range) = doc.selection_range().filter(|range| !range.is_collapsed()) else {
        return ApplyOutcome::NoSelection;
    };

    match wrap_range(doc, range, tag, attrs) {
        Ok((strategy, wrapper)) => {
            doc.clear_selection();
            #[cfg(feature = "tracing")]
            tracing::debug!(?strategy, wrapper, "wrapped selection in <{tag}>");
            ApplyOutcome::Applied { strategy, wrapper }
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("could not wrap selection: {err}");
            ApplyOutcome::Failed(err)
        }
    }
}

fn wrap_range(
    doc: &mut BaseDocument,
    range: Range,
    tag: &str,
    attrs: Vec<Attribute>,
) -> Result<(WrapStrategy, usize), RangeError> {
    // Nothing may change before the range is known to be valid
    doc.validate_range(&range)?;
    let strategy = choose_strategy(doc, &range);

    let mut mutr = doc.mutate();
    let wrapper = mutr.create_html_element(tag, attrs);
    let wrapped = match strategy {
        WrapStrategy::SimpleWrap => mutr.surround_in_place(range, wrapper),
        WrapStrategy::FragmentRewrap => mutr.extract_contents(range).and_then(|(fragment, point)| {
            mutr.append_children(wrapper, &[fragment]);
            mutr.remove_and_drop_node(fragment);
            mutr.insert_at_point(point, wrapper)
        }),
    };
    if let Err(err) = wrapped {
        mutr.remove_node_if_unparented(wrapper);
        return Err(err);
    }

    // Splitting text at the range boundaries can leave empty text nodes behind
    if let Some(parent) = mutr.doc.get_node(wrapper).and_then(|node| node.parent) {
        mutr.remove_empty_text_nodes(parent);
    }

    Ok((strategy, wrapper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_parse_and_name_classes() {
        assert_eq!(HighlightColor::from("green"), HighlightColor::Green);
        assert_eq!(
            HighlightColor::from("pink"),
            HighlightColor::Other("pink".to_string())
        );
        assert_eq!(HighlightColor::Yellow.class_name("highlight-"), "highlight-yellow");
        assert_eq!(HighlightColor::from("pink").to_string(), "pink");
        assert_eq!(FormatAction::from("italic"), FormatAction::Italic);
    }
}
