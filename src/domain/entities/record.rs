use serde::ser::{Serialize, SerializeMap, Serializer};

/// One sanitized data row: normalized field name -> value, in header order.
///
/// Inserting a key that already exists replaces its value but keeps the
/// position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key.into(), value.into());
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut record = Record::new();
        record.insert("qty".into(), "1".into());
        record.insert("name".into(), "Widget".into());
        record.insert("qty".into(), "2".into());

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["qty", "name"]);
        assert_eq!(record.get("qty"), Some("2"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn serializes_as_object_in_insertion_order() {
        let record: Record = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&record).expect("record should serialize");
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }
}
