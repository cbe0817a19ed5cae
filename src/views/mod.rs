pub mod form;
pub mod pages;

use serde::Serialize;

use crate::query::{QueryError, RowSet, Value};

pub use form::SearchForm;
pub use pages::Page;

/// One dashboard page: a title and independently fetched sections.
#[derive(Debug, Serialize)]
pub struct View {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(flatten)]
    pub content: Content,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Metrics { metrics: Vec<Metric> },
    Table { rows: RowSet },
    BarChart { bars: Vec<Bar> },
    Message { text: String },
    Error { message: String },
}

#[derive(Debug, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl View {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            caption: None,
            sections: Vec::new(),
        }
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|section| match &section.content {
            Content::Error { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl Section {
    pub fn new(heading: Option<&str>, content: Content) -> Self {
        Self {
            heading: heading.map(str::to_string),
            content,
        }
    }

    pub fn table(heading: Option<&str>, rows: RowSet) -> Self {
        Self::new(heading, Content::Table { rows })
    }

    pub fn message(heading: Option<&str>, text: &str) -> Self {
        Self::new(heading, Content::Message { text: text.to_string() })
    }

    /// Inline error for a failed fetch, e.g. "Error fetching data: ...".
    pub fn error(heading: Option<&str>, prefix: &str, error: &QueryError) -> Self {
        Self::new(
            heading,
            Content::Error {
                message: format!("{prefix}: {error}"),
            },
        )
    }
}

/// One bar per row, labelled by `label_column`, sized by `value_column`.
/// Rows whose value is not numeric are skipped.
pub fn bars(rows: &RowSet, label_column: &str, value_column: &str) -> Vec<Bar> {
    rows.rows()
        .filter_map(|row| {
            let label = row.get(label_column)?.to_string();
            let value = row.get(value_column)?.as_f64()?;
            Some(Bar { label, value })
        })
        .collect()
}
