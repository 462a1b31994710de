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
use std::fmt::Display;
use http::Uri;
use crate::query::QueryParameters;
use crate::template::Resolver;
use crate::Result;

impl Resolver {
    /// Joins a base address and a resolved template with a single `/`. Any trailing
    /// slash on the base address is dropped, errors from resolving the template are
    /// returned as is.
    pub fn build(&self, base_uri: &str, template: &str, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<String> {
        let resolved = self.resolve(template, id, params)?;
        Ok(format!("{}/{}", base_uri.trim_end_matches('/'), resolved))
    }

    /// Same as `build` but parses the result into a `http::Uri`
    /// # Example
    /// ```
    /// use rest_uri::template::Resolver;
    ///
    /// let uri = Resolver::default()
    ///     .build_uri("https://example.com", "api/cars/{id}", Some(&42), None)
    ///     .unwrap();
    /// assert_eq!(uri.host(), Some("example.com"));
    /// assert_eq!(uri.path(), "/api/cars/42");
    /// ```
    pub fn build_uri(&self, base_uri: &str, template: &str, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<Uri> {
        Ok(self.build(base_uri, template, id, params)?.parse::<Uri>()?)
    }
}

/// Builds the request uri for a base address and a template with the default options
/// # Example
/// ```
/// use rest_uri::{build, query_params};
///
/// let params = query_params!{ "Name" => "Foo", "page" => 2 }.unwrap();
/// let uri = build("https://example.com", "/API/Cars?name={name}", None, Some(params)).unwrap();
/// assert_eq!(uri, "https://example.com/api/cars?name=foo&page=2");
/// ```
pub fn build(base_uri: &str, template: &str, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<String> {
    Resolver::default().build(base_uri, template, id, params)
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[test]
fn test_build_joins_with_slash() {
    assert_eq!(build("http://localhost:8080", "api/cars", None, None).unwrap(), "http://localhost:8080/api/cars");
    assert_eq!(build("http://localhost:8080/", "/api/cars/{id}/", Some(&5), None).unwrap(), "http://localhost:8080/api/cars/5");
}

#[test]
fn test_build_propagates_errors() {
    use crate::Error;
    let params = QueryParameters::from_pairs(vec![("Name", "Foo")]).unwrap();
    match build("http://localhost", "api/cars?name={name}&surname={surname}", None, Some(params)) {
        Err(Error::InsufficientParameters(name)) => assert_eq!(name, "surname"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_build_uri_query() {
    let params = QueryParameters::from_pairs(vec![("Make", "Aston Martin")]).unwrap();
    let uri = Resolver::default().build_uri("https://example.com", "api/cars", None, Some(params)).unwrap();
    assert_eq!(uri.query(), Some("make=aston%20martin"));
}

#[test]
fn test_build_uri_invalid() {
    use crate::Error;
    let result = Resolver::default().build_uri("https://exa mple.com", "api", None, None);
    assert!(matches!(result, Err(Error::InvalidUri(_))));
}
