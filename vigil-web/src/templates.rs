use askama::Template;

/// Outcome banner rendered above the upload form.
pub struct StatusView {
    /// "success" or "error"; doubles as the banner CSS class.
    pub kind: &'static str,
    pub message: String,
}

impl StatusView {
    pub fn success(message: String) -> Self {
        Self { kind: "success", message }
    }

    pub fn error(message: String) -> Self {
        Self { kind: "error", message }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub status: Option<StatusView>,
}
