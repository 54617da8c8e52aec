use std::path::Path;

use anyhow::{Context as _, anyhow};
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::document::{ControlSurface, Presentation};

/// A parsed HTML document.
///
/// Clones share the same tree, so one page can serve as both the
/// presentation and the control surface of a controller.
#[derive(Clone)]
pub struct HtmlPage {
    document: NodeRef,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let html =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Ok(Self::parse(&html))
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize page")?;
        String::from_utf8(out).context("page html not utf-8")
    }

    /// Number of elements matching `selector`.
    pub fn count(&self, selector: &str) -> usize {
        self.document
            .select(selector)
            .map(|nodes| nodes.count())
            .unwrap_or(0)
    }

    fn element(&self, selector: &str) -> Option<NodeDataRef<ElementData>> {
        self.document.select_first(selector).ok()
    }

    fn by_id(&self, id: &str) -> Option<NodeDataRef<ElementData>> {
        self.element(&format!("#{id}"))
    }
}

impl Presentation for HtmlPage {
    fn has_marker(&self, marker: &str) -> bool {
        let Some(body) = self.element("body") else {
            return false;
        };
        let attrs = body.attributes.borrow();
        attrs
            .get("class")
            .map(|classes| classes.split_whitespace().any(|c| c == marker))
            .unwrap_or(false)
    }

    fn set_marker(&mut self, marker: &str, present: bool) {
        let Some(body) = self.element("body") else {
            tracing::debug!("document has no body; marker not set");
            return;
        };
        let mut attrs = body.attributes.borrow_mut();
        let mut classes: Vec<String> = attrs
            .get("class")
            .unwrap_or("")
            .split_whitespace()
            .filter(|c| *c != marker)
            .map(str::to_string)
            .collect();
        if present {
            classes.push(marker.to_string());
        }

        if classes.is_empty() {
            attrs.remove("class");
        } else {
            attrs.insert("class", classes.join(" "));
        }
    }

    fn language(&self) -> Option<String> {
        let root = self.element("html")?;
        let attrs = root.attributes.borrow();
        let lang = attrs.get("lang")?;
        if lang.is_empty() {
            None
        } else {
            Some(lang.to_string())
        }
    }
}

impl ControlSurface for HtmlPage {
    fn has_element(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    fn prepend_to_anchor(
        &mut self,
        anchors: &[&str],
        markup: &str,
    ) -> anyhow::Result<Option<String>> {
        let Some((selector, anchor)) = anchors
            .iter()
            .find_map(|selector| self.element(selector).map(|node| (*selector, node)))
        else {
            return Ok(None);
        };

        let fragment = kuchiki::parse_html().one(markup);
        let body = fragment
            .select_first("body")
            .map_err(|()| anyhow!("control markup did not parse into a body"))?;
        let nodes: Vec<NodeRef> = body.as_node().children().collect();
        for node in nodes.into_iter().rev() {
            anchor.as_node().prepend(node);
        }

        Ok(Some(selector.to_string()))
    }

    fn set_label(&mut self, id: &str, text: &str, title: &str) -> bool {
        let Some(element) = self.by_id(id) else {
            return false;
        };
        let node = element.as_node();
        let children: Vec<NodeRef> = node.children().collect();
        for child in children {
            child.detach();
        }
        node.append(NodeRef::new_text(text));
        element
            .attributes
            .borrow_mut()
            .insert("title", title.to_string());
        true
    }

    fn action_of(&self, id: &str) -> Option<String> {
        let element = self.by_id(id)?;
        let attrs = element.attributes.borrow();
        attrs.get("data-action").map(str::to_string)
    }
}
