//! Embedded HTML templates
//!
//! Templates are compiled into the binary and registered with a minijinja
//! environment once at startup. Autoescaping is on for every `.html`
//! template; rendered markdown is marked safe in `page.html`.

use minijinja::Environment;
use once_cell::sync::OnceCell;
use serde::Serialize;

use mdwiki_core::Page;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("page.html", include_str!("../templates/page.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Title of the index page
pub const INDEX_TITLE: &str = "Wiki home";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Path of a page under `/wiki/`, percent-encoding the name.
pub fn page_path(name: &str) -> String {
    format!("/wiki/{}", urlencoding::encode(name))
}

#[derive(Debug, Serialize)]
pub struct PageLink {
    pub name: String,
    pub href: String,
}

/// Context for `index.html`
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub title: &'static str,
    pub pages: Vec<PageLink>,
}

impl IndexView {
    pub fn new(names: Vec<String>) -> Self {
        let pages = names
            .into_iter()
            .map(|name| PageLink {
                href: page_path(&name),
                name,
            })
            .collect();

        Self {
            title: INDEX_TITLE,
            pages,
        }
    }
}

/// Context for `page.html`
#[derive(Debug, Serialize)]
pub struct PageView {
    pub title: String,
    pub id: i64,
    /// `"yes"` or `"no"`, echoed back by the edit form
    pub new_page: &'static str,
    pub raw_content: String,
    /// Rendered HTML, inserted without escaping
    pub content: String,
    pub timestamp: String,
}

impl PageView {
    pub fn new(page: Page, content: String, timestamp: String) -> Self {
        Self {
            new_page: if page.is_new() { "yes" } else { "no" },
            title: page.name,
            id: page.id,
            raw_content: page.content,
            content,
            timestamp,
        }
    }
}

/// Context for `error.html`
#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
}

static SHARED: OnceCell<Templates> = OnceCell::new();

/// Process-wide template registry, compiled on first use.
pub fn shared() -> Result<&'static Templates, TemplateError> {
    SHARED.get_or_try_init(Templates::new)
}

/// Template registry
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Register all embedded templates.
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render_index(&self, view: &IndexView) -> Result<String, TemplateError> {
        self.render("index.html", view)
    }

    pub fn render_page(&self, view: &PageView) -> Result<String, TemplateError> {
        self.render("page.html", view)
    }

    pub fn render_error(&self, view: &ErrorView) -> Result<String, TemplateError> {
        self.render("error.html", view)
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
