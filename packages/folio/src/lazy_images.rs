//! Deferred image loading: `img[data-src]` receive their `src` once the host
//! reports that they intersect the viewport.

use folio_dom::{BaseDocument, SelectorError};
use folio_traits::IntersectionEvent;

const FADE_IN_CLASS: &str = "fade-in";

#[derive(Debug, Default)]
pub struct LazyImages {
    observed: Vec<usize>,
}

impl LazyImages {
    pub fn install(doc: &BaseDocument) -> Result<Self, SelectorError> {
        Ok(LazyImages {
            observed: doc.query_selector_all("img[data-src]")?.to_vec(),
        })
    }

    /// Images the host should report intersections for
    pub fn observed(&self) -> &[usize] {
        &self.observed
    }

    /// Intersection observer callback. Each image is loaded at most once.
    pub fn on_intersection(&mut self, doc: &mut BaseDocument, entry: &IntersectionEvent) {
        if !entry.is_intersecting {
            return;
        }
        let Some(index) = self.observed.iter().position(|id| *id == entry.target) else {
            return;
        };
        self.observed.remove(index);

        let Some(src) = doc
            .get_node(entry.target)
            .and_then(|node| node.element_data()?.data("src"))
            .map(str::to_string)
        else {
            return;
        };
        let mut mutr = doc.mutate();
        mutr.set_attribute(entry.target, "src", &src);
        mutr.add_class(entry.target, FADE_IN_CLASS);
    }
}
