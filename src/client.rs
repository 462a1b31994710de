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
use std::marker::PhantomData;
use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, Request, Uri};
use log::debug;
use serde::Serialize;
use crate::query::QueryParameters;
use crate::template::{ResolveOptions, Resolver};
use crate::{Error, Result};

/// Builds the `http::Request`s of a REST resource whose entities are of type `T`.
/// Nothing is sent, the requests can be handed to any client that speaks the
/// http crate's types.
/// # Example
/// ```
/// use http::{HeaderValue, Method};
/// use http::header::HeaderName;
/// use rest_uri::client::RestResource;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Car { make: String }
///
/// let cars = RestResource::<Car>::new("https://Example.com/", "api/cars/{id}")
///     .with_header(HeaderName::from_static("x-api-key"), HeaderValue::from_static("secret"))
///     .require_https();
///
/// let request = cars.get(Some(&42), None).unwrap();
/// assert_eq!(request.method(), Method::GET);
/// assert_eq!(request.uri(), "https://example.com/api/cars/42");
/// assert_eq!(request.headers()["x-api-key"], "secret");
///
/// let request = cars.put(&42, &Car { make: "BMW".into() }).unwrap();
/// assert_eq!(request.body().as_ref(), br#"{"make":"BMW"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct RestResource<T> {
    base_uri: String,
    template: String,
    resolver: Resolver,
    headers: HeaderMap,
    require_https: bool,
    entity: PhantomData<fn() -> T>,
}

impl<T: Serialize> RestResource<T> {
    /// The base address is lowercased and stripped of trailing slashes
    pub fn new(base_uri: &str, template: &str) -> Self {
        RestResource {
            base_uri: base_uri.trim_end_matches('/').to_lowercase(),
            template: template.to_string(),
            resolver: Resolver::default(),
            headers: HeaderMap::new(),
            require_https: false,
            entity: PhantomData,
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.resolver = Resolver::new(options);
        self
    }

    /// Adds a header to every request, replacing any earlier value for the name
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Refuse to build requests for anything but `https` uris
    pub fn require_https(mut self) -> Self {
        self.require_https = true;
        self
    }

    pub fn uri(&self, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<Uri> {
        let uri = self.resolver.build_uri(&self.base_uri, &self.template, id, params)?;
        if self.require_https && uri.scheme_str() != Some("https") {
            debug!("rejected insecure uri {}", uri);
            return Err(Error::InsecureScheme(uri.to_string()));
        }
        Ok(uri)
    }

    pub fn get(&self, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<Request<Bytes>> {
        self.request(Method::GET, self.uri(id, params)?, Bytes::new())
    }

    pub fn post(&self, item: &T) -> Result<Request<Bytes>> {
        let body = serde_json::to_vec(item)?;
        self.json_request(Method::POST, self.uri(None, None)?, body)
    }

    pub fn put(&self, id: &dyn Display, item: &T) -> Result<Request<Bytes>> {
        let body = serde_json::to_vec(item)?;
        self.json_request(Method::PUT, self.uri(Some(id), None)?, body)
    }

    pub fn delete(&self, id: &dyn Display) -> Result<Request<Bytes>> {
        self.request(Method::DELETE, self.uri(Some(id), None)?, Bytes::new())
    }

    fn json_request(&self, method: Method, uri: Uri, body: Vec<u8>) -> Result<Request<Bytes>> {
        let mut request = self.request(method, uri, Bytes::from(body))?;
        request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(request)
    }

    fn request(&self, method: Method, uri: Uri, body: Bytes) -> Result<Request<Bytes>> {
        let mut request = Request::builder().method(method).uri(uri).body(body)?;
        request.headers_mut().extend(self.headers.clone());
        Ok(request)
    }
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[cfg(test)]
#[derive(Serialize)]
struct Car {
    make: String,
    year: u16,
}

#[cfg(test)]
fn cars() -> RestResource<Car> {
    RestResource::new("HTTPS://Cars.Example.com//", "api/cars/{id}")
}

#[test]
fn test_get_with_query() -> anyhow::Result<()> {
    let params = QueryParameters::from_pairs(vec![("Detail", "Full")])?;
    let request = cars().get(Some(&3), Some(params))?;
    assert_eq!(request.method(), Method::GET);
    assert_eq!(request.uri(), "https://cars.example.com/api/cars/3?detail=full");
    assert!(request.body().is_empty());
    Ok(())
}

#[test]
fn test_post_requires_collection_template() {
    let request = RestResource::<Car>::new("https://cars.example.com", "api/cars")
        .post(&Car { make: "BMW".into(), year: 2001 })
        .unwrap();
    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.uri(), "https://cars.example.com/api/cars");
    assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(request.body().as_ref(), br#"{"make":"BMW","year":2001}"#);

    // the item template needs an identifier which post never supplies
    let result = cars().post(&Car { make: "BMW".into(), year: 2001 });
    assert!(matches!(result, Err(Error::MissingIdentifier)));
}

#[test]
fn test_put_and_delete() {
    let request = cars().put(&8, &Car { make: "Audi".into(), year: 1999 }).unwrap();
    assert_eq!(request.method(), Method::PUT);
    assert_eq!(request.uri(), "https://cars.example.com/api/cars/8");

    let request = cars().delete(&8).unwrap();
    assert_eq!(request.method(), Method::DELETE);
    assert_eq!(request.uri(), "https://cars.example.com/api/cars/8");
    assert!(request.headers().get(CONTENT_TYPE).is_none());
}

#[test]
fn test_headers_are_attached() {
    let resource = cars()
        .with_header(HeaderName::from_static("x-api-key"), HeaderValue::from_static("one"))
        .with_header(HeaderName::from_static("x-api-key"), HeaderValue::from_static("two"));
    let request = resource.delete(&1).unwrap();
    assert_eq!(request.headers().get_all("x-api-key").iter().count(), 1);
    assert_eq!(request.headers()["x-api-key"], "two");
}

#[test]
fn test_require_https() {
    let resource = RestResource::<Car>::new("http://cars.example.com", "api/cars/{id}").require_https();
    match resource.get(Some(&1), None) {
        Err(Error::InsecureScheme(uri)) => assert_eq!(uri, "http://cars.example.com/api/cars/1"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(cars().require_https().get(Some(&1), None).is_ok());
}

#[test]
fn test_with_options() {
    let resource = RestResource::<Car>::new("https://cars.example.com", "api/Cars/{key}")
        .with_options(ResolveOptions::default().id_placeholder("key").preserve_case());
    let request = resource.get(Some(&"AB"), None).unwrap();
    assert_eq!(request.uri(), "https://cars.example.com/api/Cars/AB");
}
