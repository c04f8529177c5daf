/// Free-form `key=value` parameters appended to a topic after `?`.
///
/// Entries keep the order in which they first appear in the topic. When a key
/// occurs more than once the last value wins and the key keeps its first
/// position. Keys and values are taken verbatim, no percent-decoding is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    properties: Vec<(String, String)>,
}

impl PropertyBag {
    /// Split a topic into its base path and property bag.
    ///
    /// Only the first `?` separates base path and query. A single `/` directly
    /// in front of that `?` is not part of the base path, so
    /// `event/tenant/device/?a=b` has the base path `event/tenant/device`.
    /// A topic without `?` is returned unchanged with an empty bag.
    ///
    /// # Examples
    /// ```
    /// use mqtt_adapter::mqtt::PropertyBag;
    ///
    /// let (base, bag) = PropertyBag::split("event/tenant/device/?param1=value1&param2=value2");
    /// assert_eq!(base, "event/tenant/device");
    /// assert_eq!(bag.get("param1"), Some("value1"));
    /// assert_eq!(bag.get("param2"), Some("value2"));
    /// ```
    pub fn split(topic: &str) -> (&str, PropertyBag) {
        match topic.split_once('?') {
            None => (topic, PropertyBag::default()),
            Some((base, query)) => {
                let base = base.strip_suffix('/').unwrap_or(base);
                (base, PropertyBag::from_query(query))
            }
        }
    }

    /// Parse a query string of `&`-separated `key=value` pairs.
    ///
    /// A pair without `=` yields the key with an empty value; pairs with an
    /// empty key are skipped. The value is everything after the first `=`.
    pub fn from_query(query: &str) -> Self {
        let mut bag = PropertyBag::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key.is_empty() {
                continue;
            }
            bag.insert(key, value);
        }

        bag
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.properties.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the bag as a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append the bag to a base path, the inverse of [`PropertyBag::split`].
    pub fn append_to(&self, base: &str) -> String {
        if self.is_empty() {
            base.to_string()
        } else {
            format!("{base}/?{}", self.to_query_string())
        }
    }
}
