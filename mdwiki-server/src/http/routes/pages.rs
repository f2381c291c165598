//! Wiki page endpoints
//!
//! GET  /             index of all pages
//! GET  /wiki/{page}  render a page (placeholder when it does not exist)
//! POST /save         insert or update a page
//! POST /create       jump to a (possibly new) page by name
//! POST /delete       delete a page

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::instrument;

use mdwiki_core::{markdown, Page, PageName};

use crate::db::PageRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{parse_page_id, ValidPageName, WikiForm};
use crate::http::server::AppState;
use crate::templates::{page_path, IndexView, PageView};

/// Edit form posted from a page
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markdown: String,
    /// `"yes"` when the page has not been stored yet
    #[serde(default, rename = "newPage")]
    pub new_page: String,
}

impl SaveForm {
    fn is_new(&self) -> bool {
        self.new_page == "yes"
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: String,
}

/// GET / - list all pages
#[instrument(skip_all)]
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let names = PageRepo::new(&state.pool).all_names().await?;
    let html = state.templates.render_index(&IndexView::new(names))?;
    Ok(Html(html))
}

/// GET /wiki/{page} - render a page
#[instrument(skip_all, fields(page = %name))]
async fn show_page(
    State(state): State<Arc<AppState>>,
    ValidPageName(name): ValidPageName,
) -> Result<Html<String>, ApiError> {
    let page = PageRepo::new(&state.pool)
        .find_by_name(&name)
        .await?
        .unwrap_or_else(|| Page::placeholder(&name));

    let content = markdown::render(&page.content, state.markdown);
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();

    let html = state
        .templates
        .render_page(&PageView::new(page, content, timestamp))?;
    Ok(Html(html))
}

/// POST /save - create or update a page, then show it
#[instrument(skip_all, fields(title = %form.title, new_page = %form.new_page))]
async fn save_page(
    State(state): State<Arc<AppState>>,
    WikiForm(form): WikiForm<SaveForm>,
) -> Result<Redirect, ApiError> {
    let repo = PageRepo::new(&state.pool);

    let name = if form.is_new() {
        let name = PageName::new(&form.title)?;
        repo.create(&name, &form.markdown).await?.name
    } else {
        let id = parse_page_id(&form.id)?;
        repo.save(id, &form.markdown).await?
    };

    tracing::info!(page = %name, "page saved");
    Ok(Redirect::to(&page_path(&name)))
}

/// POST /create - go to the named page; blank names go back home
#[instrument(skip_all, fields(name = %form.name))]
async fn create_page(WikiForm(form): WikiForm<CreateForm>) -> Result<Redirect, ApiError> {
    if form.name.trim().is_empty() {
        return Ok(Redirect::to("/"));
    }

    let name = PageName::new(&form.name)?;
    Ok(Redirect::to(&page_path(name.as_str())))
}

/// POST /delete - remove a page, then go home
#[instrument(skip_all, fields(id = %form.id))]
async fn delete_page(
    State(state): State<Arc<AppState>>,
    WikiForm(form): WikiForm<DeleteForm>,
) -> Result<Redirect, ApiError> {
    let id = parse_page_id(&form.id)?;

    if PageRepo::new(&state.pool).delete(id).await? {
        tracing::info!(id, "page deleted");
    } else {
        tracing::warn!(id, "delete requested for unknown page");
    }

    Ok(Redirect::to("/"))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/wiki/{page}", get(show_page))
        .route("/save", post(save_page))
        .route("/create", post(create_page))
        .route("/delete", post(delete_page))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use tower::ServiceExt;

    use crate::db::PageRepo;
    use crate::http::test_support::{body_string, get, location, post_form, test_app};
    use mdwiki_core::PageName;

    #[tokio::test]
    async fn index_lists_sorted_pages() {
        let (app, pool) = test_app().await;
        let repo = PageRepo::new(&pool);
        for n in ["Beta", "Alpha"] {
            repo.create(&PageName::new(n).unwrap(), "").await.unwrap();
        }

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );

        let body = body_string(response).await;
        assert!(body.contains("Wiki home"));
        let alpha = body.find("/wiki/Alpha").unwrap();
        let beta = body.find("/wiki/Beta").unwrap();
        assert!(alpha < beta);
    }

    #[tokio::test]
    async fn missing_page_renders_placeholder() {
        let (app, _pool) = test_app().await;

        let response = app.oneshot(get("/wiki/Nothing%20here")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<h1>Nothing here</h1>"));
        assert!(body.contains("<p>This page is empty</p>"));
        assert!(body.contains(r#"name="newPage" value="yes""#));
        assert!(body.contains(r#"name="id" value="-1""#));
    }

    #[tokio::test]
    async fn existing_page_renders_markdown() {
        let (app, pool) = test_app().await;
        PageRepo::new(&pool)
            .create(&PageName::new("Home").unwrap(), "# Welcome\n\n**bold**")
            .await
            .unwrap();

        let response = app.oneshot(get("/wiki/Home")).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("<h1>Welcome</h1>"));
        assert!(body.contains("<strong>bold</strong>"));
        assert!(body.contains(r#"name="newPage" value="no""#));
        assert!(body.contains(r#"action="/delete""#));
    }

    #[tokio::test]
    async fn overlong_page_name_is_400() {
        let (app, _pool) = test_app().await;
        let uri = format!("/wiki/{}", "a".repeat(300));

        let response = app.oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn undecodable_page_name_is_400() {
        let (app, _pool) = test_app().await;

        let response = app.oneshot(get("/wiki/%FF")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_string(response).await;
        assert!(!body.contains("cannot be empty"));
    }

    #[tokio::test]
    async fn dot_only_title_is_rejected() {
        let (app, pool) = test_app().await;

        let response = app
            .oneshot(post_form("/save", "id=-1&title=..&markdown=x&newPage=yes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(PageRepo::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_new_page_inserts_and_redirects() {
        let (app, pool) = test_app().await;

        let response = app
            .oneshot(post_form(
                "/save",
                "id=-1&title=Getting+started&markdown=%23+Hi&newPage=yes",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/wiki/Getting%20started");

        let page = PageRepo::new(&pool)
            .find_by_name(&PageName::new("Getting started").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.content, "# Hi");
    }

    #[tokio::test]
    async fn save_existing_page_updates_by_id() {
        let (app, pool) = test_app().await;
        let repo = PageRepo::new(&pool);
        let page = repo
            .create(&PageName::new("Notes").unwrap(), "old")
            .await
            .unwrap();

        let body = format!("id={}&title=Notes&markdown=new+text&newPage=no", page.id);
        let response = app.oneshot(post_form("/save", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/wiki/Notes");

        let page = repo
            .find_by_name(&PageName::new("Notes").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.content, "new text");
    }

    #[tokio::test]
    async fn save_duplicate_new_page_is_409() {
        let (app, pool) = test_app().await;
        PageRepo::new(&pool)
            .create(&PageName::new("Home").unwrap(), "x")
            .await
            .unwrap();

        let response = app
            .oneshot(post_form("/save", "id=-1&title=Home&markdown=y&newPage=yes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn save_unknown_id_is_404() {
        let (app, _pool) = test_app().await;

        let response = app
            .oneshot(post_form("/save", "id=99&title=Ghost&markdown=y&newPage=no"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn save_with_bad_id_is_400() {
        let (app, _pool) = test_app().await;

        let response = app
            .oneshot(post_form("/save", "id=abc&title=X&markdown=y&newPage=no"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_redirects_to_page() {
        let (app, pool) = test_app().await;

        let response = app
            .oneshot(post_form("/create", "name=My+Page"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/wiki/My%20Page");

        // nothing is stored until the page is saved
        assert_eq!(PageRepo::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_with_blank_name_goes_home() {
        let (app, _pool) = test_app().await;

        for body in ["name=", "name=+++", ""] {
            let response = app.clone().oneshot(post_form("/create", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/");
        }
    }

    #[tokio::test]
    async fn create_with_slash_is_400() {
        let (app, _pool) = test_app().await;

        let response = app
            .oneshot(post_form("/create", "name=a%2Fb"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_removes_and_redirects_home() {
        let (app, pool) = test_app().await;
        let repo = PageRepo::new(&pool);
        let page = repo
            .create(&PageName::new("Temp").unwrap(), "x")
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_form("/delete", &format!("id={}", page.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(repo.count().await.unwrap(), 0);

        // deleting again still lands on the index
        let response = app
            .oneshot(post_form("/delete", &format!("id={}", page.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn form_without_content_type_is_400() {
        let (app, _pool) = test_app().await;
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/delete")
            .body(axum::body::Body::from("id=1"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
