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
use log::{debug, trace};
use crate::query::{names_match, QueryParameters};
use crate::template::{tokens, TemplateToken};
use crate::{Error, Result};

/// Settings for a `Resolver`. Options are passed in explicitly when the resolver
/// is created, there is no global configuration.
/// # Example
/// ```
/// use rest_uri::template::{ResolveOptions, Resolver};
///
/// let resolver = Resolver::new(ResolveOptions::default()
///     .id_placeholder("key")
///     .preserve_case());
/// let path = resolver.resolve("Api/Cars/{key}", Some(&"AB12"), None).unwrap();
/// assert_eq!(path, "Api/Cars/AB12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    id_placeholder: String,
    lowercase: bool,
}

impl ResolveOptions {
    /// Name of the placeholder bound to the identifier, `id` by default
    pub fn id_placeholder<S: Into<String>>(mut self, name: S) -> Self {
        self.id_placeholder = name.into();
        self
    }

    /// Keep the case of the template, the substituted values and the query string
    pub fn preserve_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    pub fn id(&self) -> &str {
        &self.id_placeholder
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions { id_placeholder: "id".to_string(), lowercase: true }
    }
}

/// Resolves uri templates against an identifier and a set of query parameters
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        Resolver { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Trims surrounding slashes and, unless case is preserved, lowercases the template
    pub fn normalize(&self, template: &str) -> String {
        let trimmed = template.trim_matches('/');
        if self.options.lowercase {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }

    /// Substitutes every `{placeholder}` in the template. The identifier placeholder
    /// always binds to `id` and keeps its case, every other placeholder consumes the
    /// parameter with the same name (ignoring case). Parameters left over are appended
    /// as the query string, after a `?`, or after a `&` when the resolved template
    /// already carries a query.
    ///
    /// A name that appears more than once is bound once and every occurrence receives
    /// the same value.
    /// # Example
    /// ```
    /// use rest_uri::template::Resolver;
    /// use rest_uri::QueryParameters;
    ///
    /// let resolver = Resolver::default();
    /// let params = QueryParameters::from_pairs(vec![("Make", "BMW"), ("Page", "2")]).unwrap();
    /// let path = resolver.resolve("/api/{make}/cars/{id}/", Some(&7), Some(params)).unwrap();
    /// assert_eq!(path, "api/bmw/cars/7?page=2");
    /// ```
    pub fn resolve(&self, template: &str, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<String> {
        let template = self.normalize(template);
        let mut params = params.unwrap_or_default();
        trace!("resolving template `{}` with {} parameters", template, params.len());

        let found = tokens(&template).collect::<Result<Vec<TemplateToken<'_>>>>()?;
        let mut names: Vec<&str> = Vec::new();
        for token in &found {
            if !names.iter().any(|name| names_match(name, token.name())) {
                names.push(token.name());
            }
        }

        let available = usize::from(id.is_some()) + params.len();
        if available < names.len() {
            return Err(self.first_unbound(&names, id.is_some(), &params));
        }

        let mut bindings: Vec<(&str, String)> = Vec::with_capacity(names.len());
        for name in names {
            let value = self.bind(name, id, &mut params)?;
            // the identifier is written exactly as given, only parameter values are folded
            let value = if self.is_id(name) { value } else { self.fold(value) };
            bindings.push((name, value));
        }

        let mut path = String::with_capacity(template.len());
        let mut last = 0;
        for token in &found {
            path.push_str(&template[last..token.position()]);
            if let Some((_, value)) = bindings.iter().find(|(name, _)| names_match(name, token.name())) {
                path.push_str(value);
            }
            last = token.position() + token.len();
        }
        path.push_str(&template[last..]);

        if !params.is_empty() {
            let separator = if path.contains('?') { '&' } else { '?' };
            path.push(separator);
            path.push_str(&self.fold(params.to_string()));
        }
        trace!("resolved `{}`", path);
        Ok(path)
    }

    fn is_id(&self, name: &str) -> bool {
        names_match(name, &self.options.id_placeholder)
    }

    fn bind(&self, name: &str, id: Option<&dyn Display>, params: &mut QueryParameters) -> Result<String> {
        if self.is_id(name) {
            return match id {
                Some(id) => Ok(id.to_string()),
                None => {
                    debug!("placeholder `{}` needs an identifier but none was supplied", name);
                    Err(Error::MissingIdentifier)
                }
            };
        }
        match params.take(name) {
            Some(param) => Ok(param.into_parts().1),
            None => {
                debug!("no query parameter matches placeholder `{}`", name);
                Err(Error::InsufficientParameters(name.to_string()))
            }
        }
    }

    // Names the first placeholder that has nothing to bind to. Only called once the
    // count check failed, so `names` is not empty and some name is unbound.
    fn first_unbound(&self, names: &[&str], has_id: bool, params: &QueryParameters) -> Error {
        let (last, rest) = (names[names.len() - 1], &names[..names.len() - 1]);
        for name in rest {
            if self.is_id(name) {
                if !has_id {
                    return Error::MissingIdentifier;
                }
            } else if params.get(name).is_none() {
                return Error::InsufficientParameters(name.to_string());
            }
        }
        // distinct names bind to distinct values, so when every earlier name has one the last cannot
        if self.is_id(last) {
            Error::MissingIdentifier
        } else {
            Error::InsufficientParameters(last.to_string())
        }
    }

    fn fold(&self, value: String) -> String {
        if self.options.lowercase {
            value.to_lowercase()
        } else {
            value
        }
    }
}

/// Resolves a template with the default options
/// # Example
/// ```
/// use rest_uri::template::resolve;
///
/// assert_eq!(resolve("api/cars/{id}", Some(&42), None).unwrap(), "api/cars/42");
/// assert!(resolve("api/cars?name={name}", None, None).is_err());
/// ```
pub fn resolve(template: &str, id: Option<&dyn Display>, params: Option<QueryParameters>) -> Result<String> {
    Resolver::default().resolve(template, id, params)
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
fn pairs(pairs: Vec<(&str, &str)>) -> Option<QueryParameters> {
    Some(QueryParameters::from_pairs(pairs).unwrap())
}

#[test]
fn test_no_placeholders() {
    assert_eq!(resolve("api/cars", None, None).unwrap(), "api/cars");
    assert_eq!(resolve("/API/Cars/", Some(&3), None).unwrap(), "api/cars");
}

#[test]
fn test_no_placeholders_appends_all_parameters() {
    let path = resolve("api/cars", Some(&3), pairs(vec![("Foo", "fooVal"), ("Bar", "x y")])).unwrap();
    assert_eq!(path, "api/cars?foo=fooval&bar=x%20y");
}

#[test]
fn test_id_placeholder() {
    assert_eq!(resolve("api/cars/{id}", Some(&42), None).unwrap(), "api/cars/42");
    assert_eq!(resolve("api/cars/{ID}", Some(&"x"), None).unwrap(), "api/cars/x");
}

#[test]
fn test_id_keeps_its_case() {
    assert_eq!(resolve("api/cars/{id}", Some(&"AB12"), None).unwrap(), "api/cars/AB12");
    let path = resolve("API/Cars/{id}", Some(&"AB12"), pairs(vec![("Make", "BMW")])).unwrap();
    assert_eq!(path, "api/cars/AB12?make=bmw");
}

#[test]
fn test_unconsumed_object_is_folded() {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Filter {
        #[serde(rename = "Foo")]
        foo: &'static str,
    }

    let params = QueryParameters::from_object(&Filter { foo: "fooVal" }).unwrap();
    assert_eq!(resolve("api/cars", None, Some(params)).unwrap(), "api/cars?foo=fooval");
}

#[test]
fn test_missing_last_placeholder() {
    match resolve("{make}/{id}", None, pairs(vec![("make", "bmw")])) {
        Err(Error::MissingIdentifier) => (),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_id_takes_precedence_over_parameter() {
    let path = resolve("api/cars/{id}", Some(&7), pairs(vec![("id", "3")])).unwrap();
    assert_eq!(path, "api/cars/7?id=3");
}

#[test]
fn test_missing_identifier() {
    assert!(matches!(resolve("api/cars/{id}", None, None), Err(Error::MissingIdentifier)));
    // a parameter named id passes the count check but never binds to the identifier
    assert!(matches!(resolve("api/cars/{id}", None, pairs(vec![("id", "3")])), Err(Error::MissingIdentifier)));
}

#[test]
fn test_named_placeholder() {
    init_logger();
    let path = resolve("api/cars?name={name}", None, pairs(vec![("Name", "Foo")])).unwrap();
    assert_eq!(path, "api/cars?name=foo");
}

#[test]
fn test_missing_named_placeholder() {
    init_logger();
    let result = resolve("api/cars?name={name}&surname={surname}", None, pairs(vec![("Name", "Foo")]));
    match result {
        Err(Error::InsufficientParameters(name)) => assert_eq!(name, "surname"),
        other => panic!("unexpected {:?}", other),
    }
    match resolve("api/cars?name={name}", None, None) {
        Err(Error::InsufficientParameters(name)) => assert_eq!(name, "name"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_missing_placeholder_after_count_check() {
    let result = resolve("api/{make}/{model}", None, pairs(vec![("make", "bmw"), ("year", "2001")]));
    match result {
        Err(Error::InsufficientParameters(name)) => assert_eq!(name, "model"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_duplicate_placeholders_share_a_value() {
    let path = resolve("{make}/{model}/{make}", None, pairs(vec![("Make", "BMW"), ("model", "M3")])).unwrap();
    assert_eq!(path, "bmw/m3/bmw");
}

#[test]
fn test_remaining_parameters_join_existing_query() {
    let path = resolve("api/cars?name={name}", None, pairs(vec![("name", "Foo"), ("page", "2")])).unwrap();
    assert_eq!(path, "api/cars?name=foo&page=2");
}

#[test]
fn test_values_are_not_rescanned() {
    let path = resolve("a/{first}/{second}", Some(&"{second}"), pairs(vec![("first", "{second}"), ("second", "2")])).unwrap();
    assert_eq!(path, "a/%7bsecond%7d/2");
}

#[test]
fn test_resolving_twice_is_a_no_op() {
    let once = resolve("api/cars/{id}", Some(&42), pairs(vec![("Name", "Foo Bar")])).unwrap();
    let twice = resolve(&once, None, None).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_preserve_case() {
    let resolver = Resolver::new(ResolveOptions::default().preserve_case());
    let path = resolver.resolve("Api/{Make}", None, pairs(vec![("make", "BMW"), ("Page", "Two")])).unwrap();
    assert_eq!(path, "Api/BMW?Page=Two");
}

#[test]
fn test_custom_id_placeholder() {
    let resolver = Resolver::new(ResolveOptions::default().id_placeholder("carId"));
    let path = resolver.resolve("cars/{carid}/{id}", Some(&9), pairs(vec![("id", "1")])).unwrap();
    assert_eq!(path, "cars/9/1");
}

#[test]
fn test_malformed_template() {
    assert!(matches!(resolve("api/{id", Some(&1), None), Err(Error::MalformedTemplate { .. })));
    assert!(matches!(resolve("api/{}", Some(&1), None), Err(Error::EmptyPlaceholder(_))));
}
