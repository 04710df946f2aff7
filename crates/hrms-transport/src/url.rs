//! URL assembly: path-parameter substitution and query-string construction.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// Matches both placeholder styles the endpoint catalogue uses:
/// `:id` (word-bounded) and `{id}`.
static PATH_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)\b|\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .expect("path parameter pattern is valid")
});

/// Substitutes path parameters and appends the query string.
///
/// Placeholders without a supplied parameter are left untouched; parameter
/// values are percent-encoded. Query rules: `null` values are skipped,
/// arrays repeat the key, objects are JSON-stringified, scalars are
/// stringified.
pub fn build_url(url: &str, path_params: &[(String, String)], query: &[(String, Value)]) -> String {
    let mut final_url = substitute_path_params(url, path_params);

    let query_string = encode_query(query);
    if !query_string.is_empty() {
        final_url.push(if final_url.contains('?') { '&' } else { '?' });
        final_url.push_str(&query_string);
    }

    final_url
}

fn substitute_path_params(url: &str, path_params: &[(String, String)]) -> String {
    if path_params.is_empty() {
        return url.to_string();
    }
    PATH_PARAM_RE
        .replace_all(url, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match path_params.iter().find(|(key, _)| key == name) {
                Some((_, value)) => urlencoding::encode(value).into_owned(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn encode_query(query: &[(String, Value)]) -> String {
    let mut pairs: Vec<String> = Vec::new();
    for (key, value) in query {
        match value {
            Value::Null => continue,
            Value::Array(items) => {
                for item in items {
                    push_pair(&mut pairs, key, item);
                }
            }
            other => push_pair(&mut pairs, key, other),
        }
    }
    pairs.join("&")
}

fn push_pair(pairs: &mut Vec<String>, key: &str, value: &Value) {
    let rendered = match value {
        Value::String(s) => s.clone(),
        // Objects (and anything non-scalar) travel JSON-stringified.
        other => other.to_string(),
    };
    pairs.push(format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(&rendered)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_colon_style_path_param() {
        let url = build_url("/employees/:id", &params(&[("id", "42")]), &[]);
        assert_eq!(url, "/employees/42");
    }

    #[test]
    fn test_brace_style_path_param() {
        let url = build_url("/roles/{roleId}/grants", &params(&[("roleId", "7")]), &[]);
        assert_eq!(url, "/roles/7/grants");
    }

    #[test]
    fn test_colon_param_is_word_bounded() {
        // `:id` must not eat into `:idx`.
        let url = build_url("/a/:id/:idx", &params(&[("id", "1"), ("idx", "2")]), &[]);
        assert_eq!(url, "/a/1/2");
    }

    #[test]
    fn test_path_param_values_are_encoded() {
        let url = build_url("/search/:term", &params(&[("term", "a b/c")]), &[]);
        assert_eq!(url, "/search/a%20b%2Fc");
    }

    #[test]
    fn test_unmatched_placeholder_left_untouched() {
        let url = build_url("/employees/:id", &params(&[("other", "x")]), &[]);
        assert_eq!(url, "/employees/:id");
    }

    #[test]
    fn test_query_scalars_and_nulls() {
        let url = build_url(
            "/employees",
            &[],
            &[
                ("page".to_string(), json!(2)),
                ("active".to_string(), json!(true)),
                ("skip".to_string(), Value::Null),
                ("name".to_string(), json!("Ann Lee")),
            ],
        );
        assert_eq!(url, "/employees?page=2&active=true&name=Ann%20Lee");
    }

    #[test]
    fn test_query_arrays_repeat_the_key() {
        let url = build_url(
            "/employees",
            &[],
            &[("dept".to_string(), json!(["eng", "sales"]))],
        );
        assert_eq!(url, "/employees?dept=eng&dept=sales");
    }

    #[test]
    fn test_query_objects_are_json_stringified() {
        let url = build_url(
            "/employees",
            &[],
            &[("filter".to_string(), json!({"dept": "eng"}))],
        );
        assert_eq!(url, "/employees?filter=%7B%22dept%22%3A%22eng%22%7D");
    }

    #[test]
    fn test_query_appends_with_ampersand_when_url_has_query() {
        let url = build_url("/employees?limit=5", &[], &[("page".to_string(), json!(1))]);
        assert_eq!(url, "/employees?limit=5&page=1");
    }

    #[test]
    fn test_no_query_leaves_url_untouched() {
        assert_eq!(build_url("/employees", &[], &[]), "/employees");
    }
}
