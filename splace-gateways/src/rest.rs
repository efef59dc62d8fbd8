//! Row queries in the URL syntax of the REST interface.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const PATH_REST: &str = "/rest/v1";

// Operators and list syntax must stay readable for the backend
const VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b':')
    .remove(b'"');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: &'static str,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            params: vec![],
        }
    }

    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns.to_owned())
    }

    pub fn eq(self, column: &str, value: impl AsRef<str>) -> Self {
        self.param(column, format!("eq.{}", quoted(value.as_ref())))
    }

    /// Case-insensitive substring match.
    pub fn ilike(self, column: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().replace('*', "");
        self.param(column, format!("ilike.*{value}*"))
    }

    pub fn in_list<I, T>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let list = values
            .into_iter()
            .map(|v| quoted(v.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.param(column, format!("in.({list})"))
    }

    pub fn order_desc(self, column: &str) -> Self {
        self.param("order", format!("{column}.desc"))
    }

    pub fn limit(self, limit: usize) -> Self {
        self.param("limit", limit.to_string())
    }

    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{base_url}{PATH_REST}/{}", self.table);
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, VALUE));
        }
        url
    }

    fn param(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_owned(), value));
        self
    }
}

pub fn table_url(base_url: &str, table: &str) -> String {
    format!("{base_url}{PATH_REST}/{table}")
}

// Values with reserved characters have to be quoted
fn quoted(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ':']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}
