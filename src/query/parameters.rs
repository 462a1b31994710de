// MIT License
//
// Copyright (c) 2020 Jonathon Davis
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
use std::fmt::{self, Display};
use log::trace;
use serde::Serialize;
use serde_json::Value;
use crate::query::QueryParameter;
use crate::{Error, Result};

/// An insertion ordered collection of query parameters. Parameters that are not
/// consumed by a template are written out in the order they were added.
/// # Example
/// ```
/// use rest_uri::QueryParameters;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search { make: &'static str, year: u16, used: Option<bool> }
///
/// let params = QueryParameters::from_object(&Search { make: "Aston Martin", year: 1964, used: None }).unwrap();
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.to_string(), "make=Aston%20Martin&year=1964&used=");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    params: Vec<QueryParameter>,
}

impl QueryParameters {
    pub fn new() -> Self {
        QueryParameters { params: Vec::new() }
    }

    /// Reads every field of a serializable struct or map, in declaration order, as
    /// one parameter. Strings are taken verbatim, numbers and booleans use their
    /// string form, `None` becomes an empty value and an array of scalars becomes
    /// one parameter per element. A source that serializes to `null` fails with
    /// `Error::NullArgument`.
    pub fn from_object<T: Serialize + ?Sized>(source: &T) -> Result<Self> {
        let fields = match serde_json::to_value(source)? {
            Value::Object(fields) => fields,
            Value::Null => return Err(Error::NullArgument("source")),
            other => return Err(Error::UnsupportedSource(kind(&other))),
        };
        let mut params = QueryParameters::new();
        for (key, value) in fields {
            match value {
                Value::Array(items) => {
                    for item in items {
                        let item = scalar(&key, item)?;
                        params.add(key.as_str(), &item)?;
                    }
                }
                value => {
                    let value = scalar(&key, value)?;
                    params.add(key, &value)?;
                }
            }
        }
        trace!("read {} query parameters from source", params.len());
        Ok(params)
    }

    /// Builds a collection from key value pairs, each value is percent encoded
    /// # Example
    /// ```
    /// use rest_uri::QueryParameters;
    ///
    /// let params = QueryParameters::from_pairs(vec![("page", "2"), ("sort", "make desc")]).unwrap();
    /// assert_eq!(params.to_string(), "page=2&sort=make%20desc");
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut params = QueryParameters::new();
        for (key, value) in pairs {
            params.add(key, value.as_ref())?;
        }
        Ok(params)
    }

    /// Appends a parameter, the value is percent encoded before it is stored
    pub fn add<K: Into<String>>(&mut self, key: K, value: &str) -> Result<()> {
        self.params.push(QueryParameter::new(key, value)?);
        Ok(())
    }

    /// Removes the first parameter equal to `param`, returns false if none was found
    pub fn remove(&mut self, param: &QueryParameter) -> bool {
        match self.params.iter().position(|p| p == param) {
            Some(index) => {
                self.params.remove(index);
                true
            }
            None => false,
        }
    }

    /// The first parameter whose key matches `name` ignoring case
    pub fn get(&self, name: &str) -> Option<&QueryParameter> {
        self.params.iter().find(|p| p.is_named(name))
    }

    /// Removes and returns the first parameter whose key matches `name` ignoring case
    /// # Example
    /// ```
    /// use rest_uri::QueryParameters;
    ///
    /// let mut params = QueryParameters::from_pairs(vec![("Name", "Foo"), ("page", "1")]).unwrap();
    /// let name = params.take("name").unwrap();
    /// assert!(name.value() == "Foo");
    /// assert_eq!(params.to_string(), "page=1");
    /// assert!(params.take("name").is_none());
    /// ```
    pub fn take(&mut self, name: &str) -> Option<QueryParameter> {
        let index = self.params.iter().position(|p| p.is_named(name))?;
        Some(self.params.remove(index))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryParameter> {
        self.params.iter()
    }
}

// Renders a single field value for a query string
fn scalar(key: &str, value: Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => Err(Error::UnsupportedValue(key.to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

/// Writes `key1=value1&key2=value2`, an empty collection writes nothing
impl Display for QueryParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", param)?;
        }
        Ok(())
    }
}

impl IntoIterator for QueryParameters {
    type Item = QueryParameter;
    type IntoIter = std::vec::IntoIter<QueryParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryParameters {
    type Item = &'a QueryParameter;
    type IntoIter = std::slice::Iter<'a, QueryParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[cfg(test)]
#[derive(Serialize)]
struct Car {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Surname")]
    surname: Option<String>,
    year: u32,
}

#[test]
fn test_from_object_keeps_declaration_order() {
    let car = Car { name: "Foo".into(), surname: Some("Bar Baz".into()), year: 2012 };
    let params = QueryParameters::from_object(&car).unwrap();
    let keys: Vec<&str> = params.iter().map(|p| p.key()).collect();
    assert_eq!(keys, vec!["Name", "Surname", "year"]);
    assert_eq!(params.to_string(), "Name=Foo&Surname=Bar%20Baz&year=2012");
}

#[test]
fn test_from_object_null_source() {
    let car: Option<Car> = None;
    assert!(matches!(QueryParameters::from_object(&car), Err(Error::NullArgument("source"))));
    assert!(matches!(QueryParameters::from_object(&()), Err(Error::NullArgument(_))));
}

#[test]
fn test_from_object_unsupported() {
    assert!(matches!(QueryParameters::from_object("text"), Err(Error::UnsupportedSource("a string"))));
    let nested = serde_json::json!({ "filter": { "make": "bmw" } });
    match QueryParameters::from_object(&nested) {
        Err(Error::UnsupportedValue(key)) => assert_eq!(key, "filter"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_from_object_sequence() {
    let source = serde_json::json!({ "tag": ["red", "fast"], "limit": 5 });
    let params = QueryParameters::from_object(&source).unwrap();
    assert_eq!(params.to_string(), "tag=red&tag=fast&limit=5");
}

#[test]
fn test_from_object_none_field_is_empty() {
    let car = Car { name: "Foo".into(), surname: None, year: 1 };
    let params = QueryParameters::from_object(&car).unwrap();
    assert!(params.get("surname").unwrap().value() == "");
}

#[test]
fn test_empty_display() {
    assert_eq!(QueryParameters::new().to_string(), "");
}

#[test]
fn test_remove() {
    let mut params = QueryParameters::from_pairs(vec![("a", "1"), ("b", "2"), ("a", "1")]).unwrap();
    let first = QueryParameter::new("a", "1").unwrap();
    assert!(params.remove(&first));
    assert_eq!(params.to_string(), "b=2&a=1");
    assert!(params.remove(&first));
    assert!(!params.remove(&first));
    assert_eq!(params.len(), 1);
}

#[test]
fn test_get_ignores_case() {
    let params = QueryParameters::from_pairs(vec![("Surname", "Smith")]).unwrap();
    assert!(params.get("SURNAME").is_some());
    assert!(params.get("name").is_none());
}

#[test]
fn test_from_pairs_empty_key() {
    assert!(matches!(QueryParameters::from_pairs(vec![("", "x")]), Err(Error::EmptyKey)));
}
