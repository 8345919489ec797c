use byteshop_db::NewApp;

/// Decoded `key=value` pairs from a query string and/or form body
///
/// Repeated keys are kept; lookups return the first value, and anything that
/// cannot be decoded is treated as absent rather than rejected.
#[derive(Debug, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Parse url-encoded input, yielding no pairs if it is malformed
    #[must_use]
    pub fn parse(input: &[u8]) -> Self {
        let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(input)
            .unwrap_or_else(|e| {
                tracing::debug!("Ignoring undecodable parameters: {}", e);
                Vec::new()
            });
        Self { pairs }
    }

    /// Parse an optional query string
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        query.map_or_else(Self::default, |query| Self::parse(query.as_bytes()))
    }

    /// Append `other` after these pairs, so existing keys keep precedence
    #[must_use]
    pub fn chain(mut self, other: Self) -> Self {
        self.pairs.extend(other.pairs);
        self
    }

    /// First value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or an empty string
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }
}

/// Fields of `POST /upload`
///
/// Any missing field is treated as an empty string.
#[derive(Debug)]
pub struct UploadForm {
    pub name: String,
    pub description: String,
    pub identifier: String,
    pub source: String,
}

impl From<&Params> for UploadForm {
    fn from(params: &Params) -> Self {
        Self {
            name: params.get_or_empty("name"),
            description: params.get_or_empty("description"),
            identifier: params.get_or_empty("identifier"),
            source: params.get_or_empty("source"),
        }
    }
}

impl From<UploadForm> for NewApp {
    fn from(form: UploadForm) -> Self {
        Self {
            identifier: form.identifier,
            name: form.name,
            description: form.description,
            source: form.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_keep_first_value() {
        let params = Params::parse(b"name=a&name=b&source=x%20%2B%201");
        assert_eq!(params.get("name"), Some("a"));
        assert_eq!(params.get("source"), Some("x + 1"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_query_takes_precedence_over_body() {
        let params = Params::from_query(Some("identifier=from-query"))
            .chain(Params::parse(b"identifier=from-body&name=body"));

        let form = UploadForm::from(&params);
        assert_eq!(form.identifier, "from-query");
        assert_eq!(form.name, "body");
        assert_eq!(form.description, "");
    }

    #[test]
    fn test_odd_input_never_fails() {
        let inputs: [&[u8]; 6] = [b"", b"&&&", b"=", b"novalue", b"%zz=1", b"\xff\xfe=1"];
        for input in inputs {
            let form = UploadForm::from(&Params::parse(input));
            assert_eq!(form.source, "");
        }
        assert!(Params::from_query(None).get("identifier").is_none());
    }
}
