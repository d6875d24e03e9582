use crate::render::card::{HEIGHT, WIDTH};
use crate::routes::Route;

/// Values interpolated into the social preview page.
#[derive(Debug, Clone)]
pub struct PreviewMeta<'a> {
    /// Absolute origin, or empty for relative links.
    pub base_url: &'a str,
    pub date: &'a str,
    pub tz: &'a str,
    pub days: i64,
}

impl PreviewMeta<'_> {
    pub fn image_url(&self) -> String {
        format!(
            "{}{}?tz={}",
            self.base_url,
            Route::incident_png_path(self.date),
            urlencoding::encode(self.tz)
        )
    }

    pub fn page_url(&self) -> String {
        format!(
            "{}{}?tz={}",
            self.base_url,
            Route::incident_preview_path(self.date),
            urlencoding::encode(self.tz)
        )
    }

    fn title(&self) -> String {
        let unit = if self.days == 1 { "day" } else { "days" };
        format!("{} {unit} without incident", self.days)
    }

    fn description(&self) -> String {
        format!("Last incident on {} ({}).", self.date, self.tz)
    }
}

pub fn preview_page(meta: &PreviewMeta<'_>) -> String {
    let title = escape(&meta.title());
    let description = escape(&meta.description());
    let image = escape(&meta.image_url());
    let url = escape(&meta.page_url());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:type" content="website">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:url" content="{url}">
<meta property="og:image" content="{image}">
<meta property="og:image:width" content="{WIDTH}">
<meta property="og:image:height" content="{HEIGHT}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="{title}">
<meta name="twitter:image" content="{image}">
</head>
<body>
<img src="{image}" width="{WIDTH}" height="{HEIGHT}" alt="{title}">
</body>
</html>
"#
    )
}

pub fn landing_page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Days without incident</title>
</head>
<body>
<h1>Days without incident</h1>
<p>Fixed count:</p>
<ul>
<li><a href="/4-days-without-incident.png">/4-days-without-incident.png</a></li>
<li><a href="/42-days-without-incident.png">/42-days-without-incident.png</a></li>
</ul>
<p>Counted from the last incident (optional <code>tz</code>, default America/Chicago):</p>
<ul>
<li><a href="/2022-06-09-last-incident.png?tz=America/Chicago">/2022-06-09-last-incident.png?tz=America/Chicago</a></li>
<li><a href="/2022-06-09-last-incident-preview?tz=America/Chicago">/2022-06-09-last-incident-preview?tz=America/Chicago</a></li>
<li><a href="/2022-06-09-last-incident.json?tz=Europe/London">/2022-06-09-last-incident.json?tz=Europe/London</a></li>
</ul>
</body>
</html>
"#
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
