//! Tokenizer output: detected subcommand plus option values by key

use indexmap::IndexMap;

/// Keys recognised as a help request.
pub const HELP_KEYS: [&str; 2] = ["h", "help"];

/// Option keys (without dash prefix) mapped to their raw values.
///
/// Keys keep the position of their first occurrence. Reopening a key clears
/// its values but does not move it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    subcommand: Option<String>,
    entries: IndexMap<String, Vec<String>>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subcommand(mut self, name: impl Into<String>) -> Self {
        self.subcommand = Some(name.into());
        self
    }

    /// Set `key` to `values`, replacing any earlier values for it.
    pub fn with_option<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        self.open(&key);
        for value in values {
            self.append(&key, value.into());
        }
        self
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    pub(crate) fn set_subcommand(&mut self, name: String) {
        self.subcommand = Some(name);
    }

    /// Start (or restart) accumulation for `key`.
    pub fn open(&mut self, key: &str) {
        self.entries.entry(key.to_string()).or_default().clear();
    }

    /// Append a value to `key`, opening it if needed.
    pub fn append(&mut self, key: &str, value: String) {
        self.entries.entry(key.to_string()).or_default().push(value);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn wants_help(&self) -> bool {
        HELP_KEYS.iter().any(|k| self.contains_key(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_reopened_key_when_iterating_then_keeps_first_position_and_resets_values() {
        let mut parsed = ParsedArgs::new();
        parsed.open("a");
        parsed.append("a", "1".into());
        parsed.open("b");
        parsed.open("a");
        parsed.append("a", "2".into());

        let entries: Vec<_> = parsed.iter().collect();
        assert_eq!(
            entries,
            vec![("a", &["2".to_string()][..]), ("b", &[][..])]
        );
    }

    #[test]
    fn given_help_key_when_checking_then_wants_help() {
        assert!(ParsedArgs::new().with_option("h", Vec::<String>::new()).wants_help());
        assert!(ParsedArgs::new().with_option("help", ["x"]).wants_help());
        assert!(!ParsedArgs::new().with_option("hello", ["x"]).wants_help());
    }

    #[test]
    fn given_many_distinct_keys_when_opening_then_each_stays_reachable_in_order() {
        let mut parsed = ParsedArgs::new();
        for i in 0..40_000 {
            let key = format!("k{}", i);
            parsed.open(&key);
            parsed.append(&key, i.to_string());
        }

        assert_eq!(parsed.len(), 40_000);
        assert_eq!(parsed.keys().nth(39_999), Some("k39999"));
        assert_eq!(parsed.get("k20000"), Some(&["20000".to_string()][..]));
    }
}
