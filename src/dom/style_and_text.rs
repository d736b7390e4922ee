use super::*;

impl Dom {
    pub(crate) fn style_get(&self, node_id: NodeId, property: &str) -> String {
        let Some(element) = self.element(node_id) else {
            return String::new();
        };
        let name = css_property_name(property);
        parse_style_declarations(element.attrs.get("style").map(String::as_str))
            .into_iter()
            .find(|(prop, _)| prop == &name)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    /// Writing an empty value removes the declaration, like assigning `""`
    /// to a `CSSStyleDeclaration` property.
    pub(crate) fn style_set(&mut self, node_id: NodeId, property: &str, value: &str) -> bool {
        let name = css_property_name(property);
        let Some(element) = self.element_mut(node_id) else {
            return false;
        };

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == &name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }

        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        true
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let Some(node) = self.nodes.get(node_id.0) else {
            return String::new();
        };
        match &node.node_type {
            NodeType::Document | NodeType::Element(_) => node
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            NodeType::Text(text) => text.clone(),
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> bool {
        if self.element(node_id).is_none() {
            return false;
        }
        for child in std::mem::take(&mut self.nodes[node_id.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        true
    }
}
