//! Property sources
//!
//! A [`PropertySource`] is the flat key/value map that contracts are bound
//! against. Values may already be native (`PropertyValue::Double(249.0)`) or
//! textual (`"249.0"`); the binder converts text on demand.
//!
//! Sources can be built in code or loaded from `.properties`, JSON, YAML and
//! TOML documents. Nested tables in structured documents are flattened into
//! dotted keys (`engine: { threshold: 300 }` → `engine.threshold`).

use std::collections::hash_map;
use std::collections::HashMap;
use std::path::Path;

use propbind_core::{Error, PropertyValue, Result};

/// Flat string-keyed property map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySource {
    properties: HashMap<String, PropertyValue>,
}

impl PropertySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a property, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, PropertyValue> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Parse `.properties` text
    ///
    /// A key ends at the first unescaped `=`, `:` or whitespace; `key=value`,
    /// `key: value` and `key value` are equivalent. Lines starting with `#`
    /// or `!` are comments. A line ending in an odd number of backslashes
    /// continues on the next line, whose leading whitespace is dropped. The
    /// escapes `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded; any other
    /// escaped character stands for itself. Unescaped trailing whitespace is
    /// trimmed from values. A key with nothing after it has an empty value.
    /// Every value is textual.
    pub fn from_properties_str(text: &str) -> Result<Self> {
        let mut source = Self::new();
        let mut lines = text.lines();

        while let Some(line) = lines.next() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = line.to_string();
            while has_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_property_line(&logical)?;
            if key.is_empty() {
                return Err(Error::SourceParse(format!(
                    "line \"{}\" has no property key",
                    logical
                )));
            }

            source.insert(key, value);
        }

        Ok(source)
    }

    /// Parse a JSON object
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::SourceParse(e.to_string()))?;

        let serde_json::Value::Object(map) = value else {
            return Err(Error::SourceParse(
                "JSON property source must be an object".to_string(),
            ));
        };

        let mut source = Self::new();
        for (key, value) in map {
            flatten_json(&mut source, key, value)?;
        }
        Ok(source)
    }

    /// Parse a YAML mapping
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| Error::SourceParse(e.to_string()))?;

        let mut source = Self::new();
        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, value) in map {
                    flatten_yaml(&mut source, yaml_key(&key)?, value)?;
                }
            }
            // an empty document
            serde_yaml::Value::Null => {}
            _ => {
                return Err(Error::SourceParse(
                    "YAML property source must be a mapping".to_string(),
                ))
            }
        }
        Ok(source)
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| Error::SourceParse(e.to_string()))?;

        let mut source = Self::new();
        for (key, value) in table {
            flatten_toml(&mut source, key, value)?;
        }
        Ok(source)
    }

    /// Load from a file, choosing the format by extension
    ///
    /// Supported: `.properties`, `.json`, `.yaml`/`.yml`, `.toml`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::SourceParse(e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let source = match extension.as_str() {
            "properties" => Self::from_properties_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            other => {
                return Err(Error::SourceParse(format!(
                    "unsupported property source format '{}' ({})",
                    other,
                    path.display()
                )))
            }
        };

        tracing::debug!(
            path = %path.display(),
            properties = source.len(),
            "Loaded property source"
        );
        Ok(source)
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = Self::new();
        source.extend(iter);
        source
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> Extend<(K, V)> for PropertySource {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl From<HashMap<String, PropertyValue>> for PropertySource {
    fn from(properties: HashMap<String, PropertyValue>) -> Self {
        Self { properties }
    }
}

fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn unescape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<Option<char>> {
    let decoded = match chars.next() {
        None => return Ok(None),
        Some('t') => '\t',
        Some('n') => '\n',
        Some('r') => '\r',
        Some('f') => '\u{0c}',
        Some('u') => {
            let hex: String = chars.by_ref().take(4).collect();
            u32::from_str_radix(&hex, 16)
                .ok()
                .filter(|_| hex.len() == 4)
                .and_then(char::from_u32)
                .ok_or_else(|| Error::SourceParse(format!("malformed \\u escape \"\\u{}\"", hex)))?
        }
        Some(other) => other,
    };
    Ok(Some(decoded))
}

fn split_property_line(line: &str) -> Result<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    let mut separated = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => key.extend(unescape(&mut chars)?),
            '=' | ':' => {
                separated = true;
                break;
            }
            c if c.is_whitespace() => break,
            c => key.push(c),
        }
    }

    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    if !separated && chars.next_if(|c| *c == '=' || *c == ':').is_some() {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    let mut value = String::new();
    // length up to the last character that is not unescaped whitespace
    let mut kept = 0;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                value.extend(unescape(&mut chars)?);
                kept = value.len();
            }
            c => {
                value.push(c);
                if !c.is_whitespace() {
                    kept = value.len();
                }
            }
        }
    }
    value.truncate(kept);

    Ok((key, value))
}

fn nested_key(prefix: &str, key: &str) -> String {
    format!("{}.{}", prefix, key)
}

fn unsupported(key: &str, what: &str) -> Error {
    Error::SourceParse(format!("property \"{}\" is {}, only scalars are supported", key, what))
}

fn flatten_json(source: &mut PropertySource, key: String, value: serde_json::Value) -> Result<()> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            for (child, value) in map {
                flatten_json(source, nested_key(&key, &child), value)?;
            }
        }
        Value::Bool(b) => {
            source.insert(key, b);
        }
        Value::Number(n) => {
            let value = match n.as_i64() {
                Some(i) => PropertyValue::Long(i),
                None => PropertyValue::Double(
                    n.as_f64()
                        .ok_or_else(|| unsupported(&key, "out of range"))?,
                ),
            };
            source.insert(key, value);
        }
        Value::String(s) => {
            source.insert(key, s);
        }
        Value::Array(_) => return Err(unsupported(&key, "an array")),
        Value::Null => return Err(unsupported(&key, "null")),
    }
    Ok(())
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::SourceParse(format!(
            "unsupported YAML key {:?}",
            other
        ))),
    }
}

fn flatten_yaml(source: &mut PropertySource, key: String, value: serde_yaml::Value) -> Result<()> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            for (child, value) in map {
                flatten_yaml(source, nested_key(&key, &yaml_key(&child)?), value)?;
            }
        }
        Value::Bool(b) => {
            source.insert(key, b);
        }
        Value::Number(n) => {
            let value = match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => PropertyValue::Long(i),
                (None, Some(f)) => PropertyValue::Double(f),
                (None, None) => return Err(unsupported(&key, "out of range")),
            };
            source.insert(key, value);
        }
        Value::String(s) => {
            source.insert(key, s);
        }
        Value::Sequence(_) => return Err(unsupported(&key, "a sequence")),
        Value::Null => return Err(unsupported(&key, "null")),
        Value::Tagged(_) => return Err(unsupported(&key, "a tagged value")),
    }
    Ok(())
}

fn flatten_toml(source: &mut PropertySource, key: String, value: toml::Value) -> Result<()> {
    use toml::Value;

    match value {
        Value::Table(table) => {
            for (child, value) in table {
                flatten_toml(source, nested_key(&key, &child), value)?;
            }
        }
        Value::Boolean(b) => {
            source.insert(key, b);
        }
        Value::Integer(i) => {
            source.insert(key, i);
        }
        Value::Float(f) => {
            source.insert(key, f);
        }
        Value::String(s) => {
            source.insert(key, s);
        }
        Value::Datetime(dt) => {
            source.insert(key, dt.to_string());
        }
        Value::Array(_) => return Err(unsupported(&key, "an array")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_and_lookup() {
        let source = PropertySource::new()
            .with("vendor.name", "FooBar")
            .with("engine.threshold", 249.0f64);

        assert_eq!(source.len(), 2);
        assert!(source.contains_key("vendor.name"));
        assert_eq!(source.get("engine.threshold"), Some(&PropertyValue::Double(249.0)));
        assert_eq!(source.get("missing"), None);
    }

    #[test]
    fn test_from_iterator() {
        let source: PropertySource = vec![("a", 1i32), ("b", 2i32)].into_iter().collect();
        assert_eq!(source.get("b"), Some(&PropertyValue::Integer(2)));
    }

    #[test]
    fn test_properties_format() {
        let text = "\
# engine settings
engine-threshold = 300.5
vendor-name: FooBar
! legacy comment
   enabled=true
empty-value
";
        let source = PropertySource::from_properties_str(text).unwrap();

        assert_eq!(source.len(), 4);
        assert_eq!(source.get("engine-threshold"), Some(&PropertyValue::from("300.5")));
        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
        assert_eq!(source.get("enabled"), Some(&PropertyValue::from("true")));
        assert_eq!(source.get("empty-value"), Some(&PropertyValue::from("")));
    }

    #[test]
    fn test_properties_whitespace_separator() {
        let source =
            PropertySource::from_properties_str("vendor-name FooBar\nengine-threshold   = 300").unwrap();

        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
        assert_eq!(source.get("engine-threshold"), Some(&PropertyValue::from("300")));
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_properties_line_continuation() {
        let text = "vendor-name = Foo\\\n    Bar\nhosts = a,\\\n  b,\\\n  c\n";
        let source = PropertySource::from_properties_str(text).unwrap();

        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
        assert_eq!(source.get("hosts"), Some(&PropertyValue::from("a,b,c")));
    }

    #[test]
    fn test_properties_even_backslashes_do_not_continue() {
        let source = PropertySource::from_properties_str("path = C:\\\\\nnext = 1").unwrap();

        assert_eq!(source.get("path"), Some(&PropertyValue::from("C:\\")));
        assert_eq!(source.get("next"), Some(&PropertyValue::from("1")));
    }

    #[test]
    fn test_properties_escapes() {
        let text = "key\\ with\\:separators = tab\\there\nsymbol = \\u00e9t\\u00E9\ntrailing = value\\ \n";
        let source = PropertySource::from_properties_str(text).unwrap();

        assert_eq!(
            source.get("key with:separators"),
            Some(&PropertyValue::from("tab\there"))
        );
        assert_eq!(source.get("symbol"), Some(&PropertyValue::from("été")));
        assert_eq!(source.get("trailing"), Some(&PropertyValue::from("value ")));
    }

    #[test]
    fn test_properties_malformed_unicode_escape() {
        assert!(matches!(
            PropertySource::from_properties_str("symbol = \\u00zz"),
            Err(Error::SourceParse(_))
        ));
    }

    #[test]
    fn test_properties_missing_key() {
        assert!(matches!(
            PropertySource::from_properties_str("= value"),
            Err(Error::SourceParse(_))
        ));
    }

    #[test]
    fn test_json_flattening() {
        let source = PropertySource::from_json_str(
            r#"{"engine": {"threshold": 300.0, "cylinders": 8}, "vendor-name": "FooBar", "enabled": true}"#,
        )
        .unwrap();

        assert_eq!(source.get("engine.threshold"), Some(&PropertyValue::Double(300.0)));
        assert_eq!(source.get("engine.cylinders"), Some(&PropertyValue::Long(8)));
        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
        assert_eq!(source.get("enabled"), Some(&PropertyValue::Boolean(true)));
    }

    #[test]
    fn test_json_rejects_arrays_and_non_objects() {
        assert!(PropertySource::from_json_str(r#"{"hosts": ["a", "b"]}"#).is_err());
        assert!(PropertySource::from_json_str(r#"{"host": null}"#).is_err());
        assert!(PropertySource::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_yaml_flattening() {
        let yaml = "
engine:
  threshold: 300.5
  cylinders: 8
vendor-name: FooBar
";
        let source = PropertySource::from_yaml_str(yaml).unwrap();

        assert_eq!(source.get("engine.threshold"), Some(&PropertyValue::Double(300.5)));
        assert_eq!(source.get("engine.cylinders"), Some(&PropertyValue::Long(8)));
        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
        assert!(PropertySource::from_yaml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_rejects_sequences() {
        assert!(PropertySource::from_yaml_str("hosts:\n  - a\n  - b\n").is_err());
    }

    #[test]
    fn test_toml_flattening() {
        let toml = r#"
vendor-name = "FooBar"

[engine]
threshold = 300.0
cylinders = 8
"#;
        let source = PropertySource::from_toml_str(toml).unwrap();

        assert_eq!(source.get("engine.threshold"), Some(&PropertyValue::Double(300.0)));
        assert_eq!(source.get("engine.cylinders"), Some(&PropertyValue::Long(8)));
        assert_eq!(source.get("vendor-name"), Some(&PropertyValue::from("FooBar")));
    }

    #[test]
    fn test_from_file_dispatch() {
        let mut file = tempfile::Builder::new().suffix(".properties").tempfile().unwrap();
        writeln!(file, "engine-threshold=300.0").unwrap();

        let source = PropertySource::from_file(file.path()).unwrap();
        assert_eq!(source.get("engine-threshold"), Some(&PropertyValue::from("300.0")));
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            PropertySource::from_file("/nonexistent/engine.properties"),
            Err(Error::FileNotFound(_))
        ));

        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            PropertySource::from_file(file.path()),
            Err(Error::SourceParse(_))
        ));
    }
}
