use crate::constants::DEFAULT_PAGE_TITLE;
use crate::ports::ListView;
use html_escape::encode_text;
use tracing::instrument;

/// Wraps a mounted list view in a standalone, styled HTML page.
#[derive(Debug)]
pub struct HtmlPresenter {
    title: String,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    #[instrument(level = "debug", skip_all, fields(rows = view.rows().len()))]
    pub fn render(&self, view: &ListView) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            margin: 0;
            background-color: #f5f5f5;
        }}
        .notes {{
            display: flex;
            height: 100vh;
        }}
        .notes__sidebar {{
            border-right: 2px solid #dddddd;
            flex-shrink: 0;
            overflow-y: auto;
            padding: 1em;
            width: 300px;
        }}
        .notes__add {{
            background: #009578;
            border: none;
            border-radius: 7px;
            color: #ffffff;
            cursor: pointer;
            font-size: 1.25em;
            font-weight: bold;
            margin-bottom: 1em;
            padding: 0.75em 0;
            width: 100%;
        }}
        .notes__list-item {{
            cursor: pointer;
        }}
        .notes__list-item--selected {{
            background: #eeeeee;
            border-radius: 7px;
            font-weight: bold;
        }}
        .notes__small-title,
        .notes__small-updated {{
            padding: 10px;
        }}
        .notes__small-title {{
            font-size: 1.2em;
        }}
        .notes__small-body {{
            padding: 0 10px;
        }}
        .notes__small-updated {{
            color: #aaaaaa;
            font-style: italic;
            text-align: right;
        }}
        .notes__preview {{
            display: flex;
            flex-direction: column;
            flex-grow: 1;
            padding: 2em 3em;
        }}
        .notes__title,
        .notes__body {{
            border: none;
            outline: none;
            width: 100%;
        }}
        .notes__title {{
            font-size: 3em;
            font-weight: bold;
        }}
        .notes__body {{
            flex-grow: 1;
            font-size: 1.2em;
            line-height: 1.5;
            margin-top: 2em;
            resize: none;
        }}
    </style>
</head>
<body>
{view}</body>
</html>"#,
            title = encode_text(&self.title),
            view = view.html(),
        )
    }
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}
