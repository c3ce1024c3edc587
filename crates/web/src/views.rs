//! Page view-models and template rendering.
//!
//! Each page has its own Askama template struct carrying exactly the data
//! its template reads. Templates live in `templates/` and are compiled into
//! the binary, so a missing or malformed template is a build error.

use askama::Template;
use axum::response::Html;
use common::User;

use crate::error::WebError;

/// Renders a page into an HTML response body.
pub fn render<T: Template>(page: &T) -> Result<Html<String>, WebError> {
    Ok(Html(page.render()?))
}

/// Display shape of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: String,
    pub created_at: String,
}

impl UserRow {
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// First letter of the name, shown when there is no image.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            image: user.image,
            created_at: user.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Home page with the create form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
}

impl Default for IndexPage {
    fn default() -> Self {
        Self {
            title: "Create user",
        }
    }
}

/// Listing of every stored user.
#[derive(Template)]
#[template(path = "read.html")]
pub struct ReadPage {
    pub title: &'static str,
    pub users: Vec<UserRow>,
}

impl ReadPage {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            title: "All users",
            users: users.into_iter().map(UserRow::from).collect(),
        }
    }
}

/// Edit form for a single user.
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPage {
    pub title: &'static str,
    pub user: UserRow,
}

impl EditPage {
    pub fn new(user: User) -> Self {
        Self {
            title: "Edit user",
            user: user.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: &'static str,
    pub status: u16,
    pub message: String,
}

impl ErrorPage {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            title: "Error",
            status,
            message: message.into(),
        }
    }
}
