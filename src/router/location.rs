use std::borrow::Cow;

/// A navigation target: normalized path plus the full path it was requested as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    full_path: String,
    query: Option<String>,
}

impl Location {
    /// Parse `/path?query#fragment`. A missing leading slash is added and trailing
    /// slashes on the path are ignored for matching.
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        let full_path = if target.starts_with('/') {
            target.to_string()
        } else {
            format!("/{}", target)
        };

        let without_fragment = full_path.split('#').next().unwrap_or_default();
        let (raw_path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (without_fragment, None),
        };
        let trimmed = raw_path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed }.to_string();

        Location {
            path,
            full_path,
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// First value of query parameter `key`, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query
            .as_deref()?
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(k, _)| decode(k) == key)
            .map(|(_, v)| decode(v).into_owned())
    }
}

fn decode(raw: &str) -> Cow<'_, str> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Encode a query value the way browsers leave paths readable: everything reserved is
/// escaped except `/`.
pub fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).replace("%2F", "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_query() {
        let loc = Location::parse("/login?redirect=/dashboard");
        assert_eq!(loc.path(), "/login");
        assert_eq!(loc.full_path(), "/login?redirect=/dashboard");
        assert_eq!(loc.query_param("redirect").as_deref(), Some("/dashboard"));
        assert_eq!(loc.query_param("other"), None);
    }

    #[test]
    fn normalizes_slashes_and_fragments() {
        assert_eq!(Location::parse("dashboard/").path(), "/dashboard");
        assert_eq!(Location::parse("/").path(), "/");
        assert_eq!(Location::parse("").path(), "/");
        assert_eq!(Location::parse("/dashboard#top").path(), "/dashboard");
    }

    #[test]
    fn encoded_values_round_trip() {
        let target = "/dashboard?tab=a b&x=1";
        let loc = Location::parse(&format!("/login?redirect={}", encode_query_value(target)));
        assert_eq!(loc.query_param("redirect").as_deref(), Some(target));
    }

    #[test]
    fn encoding_keeps_slashes() {
        assert_eq!(encode_query_value("/dashboard"), "/dashboard");
        assert_eq!(encode_query_value("/a?b=c"), "/a%3Fb%3Dc");
    }
}
