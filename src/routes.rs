/// File-name routes served under `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `{digits}-days-without-incident.png`
    DaysPng(String),
    /// `{YYYY-MM-DD}-last-incident.png`
    IncidentPng(String),
    /// `{YYYY-MM-DD}-last-incident-preview`
    IncidentPreview(String),
    /// `{YYYY-MM-DD}-last-incident.json`
    IncidentJson(String),
}

const DAYS_PNG: &str = "-days-without-incident.png";
const INCIDENT_PNG: &str = "-last-incident.png";
const INCIDENT_PREVIEW: &str = "-last-incident-preview";
const INCIDENT_JSON: &str = "-last-incident.json";

impl Route {
    /// Matches the shape only. Calendar validity is checked when the date is resolved.
    pub fn parse(file: &str) -> Option<Self> {
        if let Some(n) = file.strip_suffix(DAYS_PNG) {
            return is_digits(n).then(|| Route::DaysPng(n.to_string()));
        }

        let dated = |suffix: &str| file.strip_suffix(suffix).filter(|d| is_date_shaped(d)).map(str::to_string);
        dated(INCIDENT_PNG)
            .map(Route::IncidentPng)
            .or_else(|| dated(INCIDENT_PREVIEW).map(Route::IncidentPreview))
            .or_else(|| dated(INCIDENT_JSON).map(Route::IncidentJson))
    }

    pub fn incident_png_path(date: &str) -> String {
        format!("/{date}{INCIDENT_PNG}")
    }

    pub fn incident_preview_path(date: &str) -> String {
        format!("/{date}{INCIDENT_PREVIEW}")
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `\d{4}-\d{2}-\d{2}`
fn is_date_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_count() {
        assert_eq!(Route::parse("4-days-without-incident.png"), Some(Route::DaysPng("4".into())));
        assert_eq!(Route::parse("0012-days-without-incident.png"), Some(Route::DaysPng("0012".into())));
        assert_eq!(Route::parse("-days-without-incident.png"), None);
        assert_eq!(Route::parse("-4-days-without-incident.png"), None);
        assert_eq!(Route::parse("4x-days-without-incident.png"), None);
    }

    #[test]
    fn parses_dated_routes() {
        assert_eq!(Route::parse("2022-06-09-last-incident.png"), Some(Route::IncidentPng("2022-06-09".into())));
        assert_eq!(
            Route::parse("2022-06-09-last-incident-preview"),
            Some(Route::IncidentPreview("2022-06-09".into()))
        );
        assert_eq!(Route::parse("2022-06-09-last-incident.json"), Some(Route::IncidentJson("2022-06-09".into())));
    }

    #[test]
    fn date_shape_is_strict() {
        assert_eq!(Route::parse("2022-6-9-last-incident.png"), None);
        assert_eq!(Route::parse("22-06-09-last-incident.png"), None);
        assert_eq!(Route::parse("2022/06/09-last-incident.png"), None);
        // Shape is fine; the calendar check happens later.
        assert_eq!(Route::parse("2022-13-45-last-incident.png"), Some(Route::IncidentPng("2022-13-45".into())));
    }

    #[test]
    fn unknown_files_do_not_match() {
        assert_eq!(Route::parse("favicon.ico"), None);
        assert_eq!(Route::parse("2022-06-09-last-incident.gif"), None);
        assert_eq!(Route::parse(""), None);
    }

    #[test]
    fn builds_paths() {
        assert_eq!(Route::incident_png_path("2022-06-09"), "/2022-06-09-last-incident.png");
        assert_eq!(Route::incident_preview_path("2022-06-09"), "/2022-06-09-last-incident-preview");
    }
}
