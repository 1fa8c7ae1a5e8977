//! Gallery page rendering.
//!
//! The server only knows the [`PageRenderer`] seam; [`TemplateRenderer`] is the
//! stock HTML implementation backed by an embedded minijinja template.

use crate::classes::ClassInfo;
use crate::error::RenderError;
use crate::pager::{page_count, PageRequest, Window};
use crate::view_model::{Summary, ViewModel, ViewObject};
use minijinja::Environment;
use serde::Serialize;

const GALLERY_TEMPLATE: &str = "gallery.html";

/// One rendered window of the gallery
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPage<'a> {
    pub classes: &'a [ClassInfo],
    pub objects: &'a [ViewObject],
    pub is_last_page: bool,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
    pub summary: &'a Summary,
}

impl<'a> GalleryPage<'a> {
    pub fn new(model: &'a ViewModel, request: PageRequest, window: Window) -> Self {
        let total = model.objects.len();
        let last = page_count(total, request.limit);
        let page = request.page.min(last);
        Self {
            classes: &model.classes,
            objects: window.slice(&model.objects),
            is_last_page: window.is_last_page,
            page,
            limit: request.limit,
            total,
            prev_page: (page > 1).then(|| page - 1),
            next_page: (!window.is_last_page).then(|| page + 1),
            summary: &model.summary,
        }
    }
}

/// Turns a gallery page into a response body
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &GalleryPage<'_>) -> Result<String, RenderError>;

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}

pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Compiles the embedded gallery template
    pub fn new() -> Result<Self, RenderError> {
        Self::with_source(include_str!("../templates/gallery.html"))
    }

    pub fn with_source(source: &'static str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(GALLERY_TEMPLATE, source)?;
        Ok(Self { env })
    }
}

impl PageRenderer for TemplateRenderer {
    fn render(&self, page: &GalleryPage<'_>) -> Result<String, RenderError> {
        let template = self.env.get_template(GALLERY_TEMPLATE)?;
        Ok(template.render(page)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::ClassSet;
    use crate::color::ColorStrategy;
    use crate::input::{InputObject, Scores};
    use crate::pager::window;
    use crate::view_model::ViewModelBuilder;

    fn model(n: usize) -> ViewModel {
        let classes = ClassSet::new(vec!["cat".into(), "dog".into()]);
        let objects = (0..n)
            .map(|i| InputObject {
                id: None,
                file_path: format!("/pets/{}.png", i),
                class: 1,
                label: Some((i % 2) as i64),
                scores: Scores::PerClass(vec![0.25, 0.75]),
            })
            .collect();
        ViewModelBuilder::new(&ColorStrategy::default())
            .build(&classes, objects)
            .unwrap()
    }

    #[test]
    fn test_page_navigation() {
        let model = model(5);
        let request = PageRequest { page: 2, limit: 2 };
        let page = GalleryPage::new(&model, request, window(5, 2, 2));
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.next_page, Some(3));

        let request = PageRequest { page: 40, limit: 2 };
        let page = GalleryPage::new(&model, request, window(5, 40, 2));
        assert_eq!(page.page, 3);
        assert!(page.is_last_page);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(2));
    }

    #[test]
    fn test_template_renders_window() {
        let model = model(3);
        let renderer = TemplateRenderer::new().unwrap();
        let request = PageRequest { page: 1, limit: 2 };
        let html = renderer
            .render(&GalleryPage::new(&model, request, window(3, 1, 2)))
            .unwrap();

        assert!(html.contains(r#"data-id="0.png""#));
        assert!(html.contains(r#"data-id="1.png""#));
        assert!(!html.contains(r#"data-id="2.png""#));
        assert!(html.contains("75.0%"));
        assert!(html.contains("?page=2&amp;limit=2"));
    }

    #[test]
    fn test_template_escapes_names() {
        let classes = ClassSet::new(vec!["cat & <dog>".into()]);
        let objects = vec![InputObject {
            id: None,
            file_path: "/a.png".into(),
            class: 0,
            label: None,
            scores: Scores::Single(0.5),
        }];
        let model = ViewModelBuilder::new(&ColorStrategy::default())
            .build(&classes, objects)
            .unwrap();
        let html = TemplateRenderer::new()
            .unwrap()
            .render(&GalleryPage::new(
                &model,
                PageRequest::default(),
                window(1, 1, 20),
            ))
            .unwrap();
        assert!(!html.contains("cat & <dog>"));
        assert!(html.contains("cat &amp; &lt;dog&gt;"));
    }

    #[test]
    fn test_broken_template_rejected() {
        assert!(TemplateRenderer::with_source("{% for x in %}").is_err());
    }
}
