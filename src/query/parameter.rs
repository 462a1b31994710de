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
use crate::encoding::{encode, PercentEncodedStr};
use crate::{Error, Result};

/// Compares two names using unicode lowercase folding
pub(crate) fn names_match(lhs: &str, rhs: &str) -> bool {
    lhs.chars().flat_map(char::to_lowercase).eq(rhs.chars().flat_map(char::to_lowercase))
}

/// A single `key=value` entry of a query string. The value is percent encoded when
/// the parameter is created, the key is encoded when the parameter is written out.
/// # Example
/// ```
/// use rest_uri::QueryParameter;
///
/// let param = QueryParameter::new("Name", "Rust Lang").unwrap();
/// assert_eq!(param.key(), "Name");
/// assert_eq!(param.value().inner(), "Rust%20Lang");
/// assert!(param.value() == "Rust Lang");
/// assert!(param.is_named("name"));
/// assert_eq!(param.to_string(), "Name=Rust%20Lang");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    key: String,
    value: String,
}

impl QueryParameter {
    pub fn new<K: Into<String>>(key: K, value: &str) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(QueryParameter { key, value: encode(value).into_owned() })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> PercentEncodedStr<'_> {
        PercentEncodedStr::new(&self.value)
    }

    /// Case-insensitive match against the key
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.key, name)
    }

    /// Splits the parameter into its key and its encoded value
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", encode(&self.key), self.value)
    }
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[test]
fn test_empty_key() {
    assert!(matches!(QueryParameter::new("", "value"), Err(Error::EmptyKey)));
}

#[test]
fn test_empty_value() {
    let param = QueryParameter::new("key", "").unwrap();
    assert_eq!(param.to_string(), "key=");
}

#[test]
fn test_key_is_encoded_on_display() {
    let param = QueryParameter::new("first name", "a&b").unwrap();
    assert_eq!(param.key(), "first name");
    assert_eq!(param.to_string(), "first%20name=a%26b");
}

#[test]
fn test_names_match() {
    assert!(names_match("Surname", "surname"));
    assert!(names_match("ÄPFEL", "äpfel"));
    assert!(!names_match("name", "names"));
}

#[test]
fn test_into_parts() {
    let (key, value) = QueryParameter::new("q", "x y").unwrap().into_parts();
    assert_eq!(key, "q");
    assert_eq!(value, "x%20y");
}
