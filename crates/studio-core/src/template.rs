//! Template catalog: author-defined starting layouts.
//!
//! Templates are static data (JSON) with concrete pages and elements. The
//! built-in catalog is compiled into the binary; hosts may also load their
//! own catalog with [`TemplateCatalog::from_json`].

use crate::model::Page;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

const BUILTIN_JSON: &str = include_str!("../assets/templates.json");

static BUILTIN: LazyLock<TemplateCatalog> = LazyLock::new(|| {
    TemplateCatalog::from_json(BUILTIN_JSON).unwrap_or_else(|err| {
        log::error!("built-in template catalog is invalid: {err}");
        TemplateCatalog::default()
    })
});

/// A named predefined layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Artboard size; the document keeps its own when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    pub pages: Vec<Page>,
}

impl Template {
    /// Check structural rules the loader relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.pages.is_empty() {
            return Err(format!("template '{}' has no pages", self.id));
        }
        let mut page_ids = HashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id) {
                return Err(format!(
                    "template '{}' repeats page id '{}'",
                    self.id, page.id
                ));
            }
            let mut element_ids = HashSet::new();
            for el in &page.elements {
                if !element_ids.insert(el.id) {
                    return Err(format!(
                        "template '{}' page '{}' repeats element id '{}'",
                        self.id, page.id, el.id
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Lightweight listing entry for template pickers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub page_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// The catalog shipped with the editor.
    pub fn builtin() -> &'static TemplateCatalog {
        &BUILTIN
    }

    /// Parse and validate a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let templates: Vec<Template> =
            serde_json::from_str(json).map_err(|e| format!("template catalog: {e}"))?;
        Self::new(templates)
    }

    pub fn new(templates: Vec<Template>) -> Result<Self, String> {
        let mut ids = HashSet::new();
        for t in &templates {
            t.validate()?;
            if !ids.insert(t.id.as_str()) {
                return Err(format!("duplicate template id '{}'", t.id));
            }
        }
        Ok(Self { templates })
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates belonging to a category, ignoring ASCII case.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Template> {
        self.templates
            .iter()
            .filter(move |t| t.category.eq_ignore_ascii_case(category))
    }

    pub fn summaries(&self) -> Vec<TemplateSummary<'_>> {
        self.templates
            .iter()
            .map(|t| TemplateSummary {
                id: &t.id,
                name: &t.name,
                category: &t.category,
                page_count: t.pages.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = TemplateCatalog::from_json(BUILTIN_JSON).unwrap();
        assert!(catalog.len() >= 5);
        let classic = catalog.get("classic-elegance").unwrap();
        assert_eq!(classic.name, "Classic Elegance");
        assert_eq!(classic.pages.len(), 2);
        assert_eq!(classic.tone, Some(Tone::Classical));
    }

    #[test]
    fn rejects_template_without_pages() {
        let json = r#"[{"id":"empty","name":"Empty","category":"Menu","pages":[]}]"#;
        let err = TemplateCatalog::from_json(json).unwrap_err();
        assert!(err.contains("no pages"), "{err}");
    }

    #[test]
    fn rejects_duplicate_element_ids_on_one_page() {
        let json = r##"[{"id":"dup","name":"Dup","category":"Menu","pages":[
            {"id":"p","label":"P","backgroundColor":"#FFF","elements":[
                {"id":"a","x":0,"y":0,"width":1,"height":1,"style":{"type":"shape"}},
                {"id":"a","x":0,"y":0,"width":1,"height":1,"style":{"type":"shape"}}
            ]}
        ]}]"##;
        let err = TemplateCatalog::from_json(json).unwrap_err();
        assert!(err.contains("repeats element id"), "{err}");
    }

    #[test]
    fn same_element_id_on_different_pages_is_fine() {
        let json = r##"[{"id":"ok","name":"Ok","category":"Menu","pages":[
            {"id":"p1","label":"P1","backgroundColor":"#FFF","elements":[
                {"id":"a","x":0,"y":0,"width":1,"height":1,"style":{"type":"shape"}}]},
            {"id":"p2","label":"P2","backgroundColor":"#FFF","elements":[
                {"id":"a","x":0,"y":0,"width":1,"height":1,"style":{"type":"shape"}}]}
        ]}]"##;
        assert!(TemplateCatalog::from_json(json).is_ok());
    }

    #[test]
    fn filter_by_category() {
        let catalog = TemplateCatalog::builtin();
        let names: Vec<&str> = catalog
            .by_category("save the date")
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Garden Party"]);
    }
}
