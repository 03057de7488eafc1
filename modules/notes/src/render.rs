//! Rendering of notes into markup.
//!
//! [`render`] is the pure data step: the board fetches, then hands the notes
//! to it and keeps the resulting [`ViewState`]. [`Templates`] turns view
//! state into HTML through tera with autoescaping on.

use notes_types::{NoteKey, ServerNote};
use serde::Serialize;
use tera::{Context, Tera};

const BASE_T: &str = include_str!("../views/base.html");
const LIST_T: &str = include_str!("../views/list.html");
const PAGE_T: &str = include_str!("../views/page.html");
const DETAIL_T: &str = include_str!("../views/detail.html");
const MESSAGE_T: &str = include_str!("../views/message.html");

/// One entry of the visible list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub heading: String,
    pub body: String,
    pub key: Option<NoteKey>,
}

/// The visible note list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    items: Vec<ListItem>,
}

/// Values shown in the note form
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState {
    pub title: String,
    pub content: String,
}

/// Build the list view for `notes`, one item per note in the given order
pub fn render(notes: &[ServerNote]) -> ViewState {
    ViewState {
        items: notes
            .iter()
            .map(|note| ListItem {
                heading: note.name.clone(),
                body: note.content.clone(),
                key: note.key(),
            })
            .collect(),
    }
}

impl ViewState {
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// The page templates, parsed once at startup
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_T),
            ("list.html", LIST_T),
            ("page.html", PAGE_T),
            ("detail.html", DETAIL_T),
            ("message.html", MESSAGE_T),
        ])?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera })
    }

    /// `<li>` markup for every item of `view`
    pub fn list(&self, view: &ViewState) -> Result<String, tera::Error> {
        if view.is_empty() {
            return Ok(String::new());
        }

        let mut context = Context::new();
        context.insert("items", view.items());
        self.tera.render("list.html", &context)
    }

    /// Full page: prompt, notices, the note form and the list
    pub fn page(
        &self,
        form: &FormState,
        prompt: Option<&str>,
        notices: &[String],
        view: &ViewState,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("form", form);
        context.insert("prompt", &prompt);
        context.insert("notices", notices);
        context.insert("items", view.items());
        self.tera.render("page.html", &context)
    }

    /// Single-note page
    pub fn detail(&self, note: &ServerNote) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("name", &note.name);
        context.insert("content", &note.content);
        context.insert("created_at", &note.created_at);
        context.insert("updated_at", &note.updated_at);
        self.tera.render("detail.html", &context)
    }

    /// Page with a single message, used for missing notes and store failures
    pub fn message(&self, message: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("message", message);
        self.tera.render("message.html", &context)
    }
}
