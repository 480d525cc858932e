use crate::BaseDocument;
use crate::node::NodeData;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl BaseDocument {
    /// Serialize the node and its subtree as HTML (`Element.outerHTML`)
    pub fn outer_html(&self, node_id: usize) -> String {
        let mut output = String::new();
        self.write_outer_html(node_id, &mut output);
        output
    }

    /// Serialize the children of the node as HTML (`Element.innerHTML`)
    pub fn inner_html(&self, node_id: usize) -> String {
        let mut output = String::new();
        if let Some(node) = self.get_node(node_id) {
            for &child_id in &node.children {
                self.write_outer_html(child_id, &mut output);
            }
        }
        output
    }

    pub fn write_outer_html(&self, node_id: usize, writer: &mut String) {
        let Some(node) = self.get_node(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document | NodeData::Fragment => {
                for &child_id in &node.children {
                    self.write_outer_html(child_id, writer);
                }
            }
            NodeData::Comment => {}
            NodeData::Text(data) => {
                writer.push_str(&html_escape::encode_text(&data.content));
            }
            NodeData::Element(data) => {
                writer.push('<');
                writer.push_str(&data.name.local);

                for attr in data.attrs() {
                    writer.push(' ');
                    writer.push_str(&attr.name.local);
                    writer.push_str("=\"");
                    writer.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
                    writer.push('"');
                }
                writer.push('>');

                if VOID_ELEMENTS.contains(&data.tag()) {
                    return;
                }

                for &child_id in &node.children {
                    self.write_outer_html(child_id, writer);
                }

                writer.push_str("</");
                writer.push_str(&data.name.local);
                writer.push('>');
            }
        }
    }
}
