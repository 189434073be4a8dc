//! Query string extraction.

use ghreport_common::{GhReportError, Result};
use percent_encoding::percent_decode_str;
use regex::Regex;

/// Returns the decoded value of the first `name` parameter in `url`.
///
/// - `Ok(None)` when the parameter is absent.
/// - `Ok(Some(""))` when it is present without a value (`?name` or `?name=`).
/// - Otherwise `+` becomes a space and the value is percent-decoded as UTF-8.
///
/// `name` is matched literally. The fragment is not excluded from the
/// search, so `#x&name=v` also matches. Malformed escapes and invalid UTF-8
/// are errors.
pub fn parameter_by_name(name: &str, url: &str) -> Result<Option<String>> {
    let pattern = format!("[?&]{}(=([^&#]*)|&|#|$)", regex::escape(name));
    let regex = Regex::new(&pattern)
        .map_err(|e| GhReportError::query(format!("cannot build matcher: {e}"), name))?;

    let Some(captures) = regex.captures(url) else {
        return Ok(None);
    };

    let raw = match captures.get(2) {
        Some(value) if !value.as_str().is_empty() => value.as_str(),
        _ => return Ok(Some(String::new())),
    };

    decode_component(&raw.replace('+', " "))
        .map(Some)
        .map_err(|message| GhReportError::query(message, name))
}

fn decode_component(value: &str) -> std::result::Result<String, String> {
    let bytes = value.as_bytes();
    for (i, _) in value.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(format!("malformed escape at byte {i} in '{value}'"));
        }
    }

    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| format!("decoded value is not UTF-8: {e}"))
}

/// Repository named by the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// `owner` parameter.
    pub owner: Option<String>,
    /// `repo` parameter.
    pub repo: Option<String>,
}

impl QueryParams {
    /// Reads `owner` and `repo` from `url`. Missing parameters are not an error.
    pub fn from_url(url: &str) -> Result<Self> {
        Ok(Self {
            owner: parameter_by_name("owner", url)?,
            repo: parameter_by_name("repo", url)?,
        })
    }

    /// Label shown on the page, `owner / repo`, with `null` for a missing part.
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            self.owner.as_deref().unwrap_or("null"),
            self.repo.as_deref().unwrap_or("null")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_value() {
        let url = "http://localhost/report.html?owner=acme&repo=widget";
        assert_eq!(parameter_by_name("owner", url).unwrap().as_deref(), Some("acme"));
        assert_eq!(parameter_by_name("repo", url).unwrap().as_deref(), Some("widget"));
    }

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let url = "http://localhost/?owner=&repo";
        assert_eq!(parameter_by_name("owner", url).unwrap(), Some(String::new()));
        assert_eq!(parameter_by_name("repo", url).unwrap(), Some(String::new()));
        assert_eq!(parameter_by_name("branch", url).unwrap(), None);
    }

    #[test]
    fn test_value_stops_at_ampersand_and_fragment() {
        let url = "http://localhost/?owner=acme#section&repo=widget";
        assert_eq!(parameter_by_name("owner", url).unwrap().as_deref(), Some("acme"));
        assert_eq!(parameter_by_name("repo", url).unwrap().as_deref(), Some("widget"));
    }

    #[test]
    fn test_name_must_match_whole_key() {
        let url = "http://localhost/?owners=many&xrepo=1";
        assert_eq!(parameter_by_name("owner", url).unwrap(), None);
        assert_eq!(parameter_by_name("repo", url).unwrap(), None);
    }

    #[test]
    fn test_first_match_wins() {
        let url = "http://localhost/?owner=first&owner=second";
        assert_eq!(parameter_by_name("owner", url).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_plus_and_percent_decoding() {
        let url = "http://localhost/?repo=hello+world%21&owner=caf%C3%A9%2Bco";
        assert_eq!(parameter_by_name("repo", url).unwrap().as_deref(), Some("hello world!"));
        assert_eq!(parameter_by_name("owner", url).unwrap().as_deref(), Some("café+co"));
    }

    #[test]
    fn test_regex_metacharacters_match_literally() {
        let url = "http://localhost/?filter[]=a&f.o=b";
        assert_eq!(parameter_by_name("filter[]", url).unwrap().as_deref(), Some("a"));
        assert_eq!(parameter_by_name("f.o", url).unwrap().as_deref(), Some("b"));
        assert_eq!(parameter_by_name("f?o", url).unwrap(), None);
        assert_eq!(parameter_by_name("filter[x]", url).unwrap(), None);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(parameter_by_name("owner", "?owner=%zz").is_err());
        assert!(parameter_by_name("owner", "?owner=abc%").is_err());
        assert!(parameter_by_name("owner", "?owner=%FF").is_err());
    }

    #[test]
    fn test_query_params_label() {
        let params = QueryParams::from_url("http://localhost/?owner=acme&repo=widget").unwrap();
        assert_eq!(params.label(), "acme / widget");

        let params = QueryParams::from_url("http://localhost/").unwrap();
        assert_eq!(params, QueryParams::default());
        assert_eq!(params.label(), "null / null");

        let params = QueryParams::from_url("http://localhost/?owner=&repo=x").unwrap();
        assert_eq!(params.label(), " / x");
    }
}
