//! The engine's read-only view of one inbound request.
//!
//! The hosting HTTP layer builds a [`RequestView`] from its native request
//! type and hands it to the dispatcher. Only the pieces the binding pipeline
//! needs are carried: the verb, the query multimap, the declared content
//! type, and a one-shot body reader.

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Maximum repeated values per query name before heap allocation.
/// Nearly all query parameters appear once; repeats are rare.
pub const MAX_INLINE_VALUES: usize = 2;

/// Stack-allocated value list for one query parameter name.
pub type ValueVec = SmallVec<[String; MAX_INLINE_VALUES]>;

/// Multi-valued query parameter map: name → ordered values, mirroring how
/// query strings allow repeated keys.
pub type QueryMap = HashMap<String, ValueVec>;

/// Parse the query-string portion of a request target into a [`QueryMap`].
///
/// Everything after the first `?` is percent-decoded with
/// `url::form_urlencoded`; repeated names accumulate their values in
/// occurrence order. A name with no `=` contributes an empty-string value,
/// which still counts as present for acceptance checks.
#[must_use]
pub fn parse_query_string(target: &str) -> QueryMap {
    let mut map = QueryMap::new();
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            map.entry(k.to_string()).or_default().push(v.to_string());
        }
    }
    map
}

/// The subset of an inbound HTTP request the dispatch engine consumes.
///
/// Supplied per request by the hosting layer; the engine never writes to it
/// apart from consuming the body reader, which is read at most once by the
/// single mapper that needs it.
pub struct RequestView {
    method: Method,
    query: QueryMap,
    content_type: Option<String>,
    body: Option<Box<dyn Read + Send>>,
}

impl fmt::Debug for RequestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestView")
            .field("method", &self.method)
            .field("query", &self.query)
            .field("content_type", &self.content_type)
            .field("body", &self.body.as_ref().map(|_| "<reader>"))
            .finish()
    }
}

impl RequestView {
    /// Build a view from already-parsed parts.
    #[must_use]
    pub fn new(
        method: Method,
        query: QueryMap,
        content_type: Option<String>,
        body: Option<Box<dyn Read + Send>>,
    ) -> Self {
        RequestView {
            method,
            query,
            content_type,
            body,
        }
    }

    /// Build a view from a request target such as `/vendor?id=7`, parsing
    /// the query string portion.
    #[must_use]
    pub fn from_target(
        method: Method,
        target: &str,
        content_type: Option<String>,
        body: Option<Box<dyn Read + Send>>,
    ) -> Self {
        Self::new(method, parse_query_string(target), content_type, body)
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Whether the named query parameter is present as a key.
    ///
    /// Presence is what acceptance checks test; an empty-string value still
    /// counts as present.
    #[inline]
    #[must_use]
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query.contains_key(name)
    }

    /// First value of the named query parameter. Later values for the same
    /// name are ignored by the binding pipeline.
    #[inline]
    #[must_use]
    pub fn first_query_value(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Take the body reader. Returns `None` on the second call; the body
    /// stream is readable exactly once.
    pub fn take_body(&mut self) -> Option<Box<dyn Read + Send>> {
        self.body.take()
    }
}
