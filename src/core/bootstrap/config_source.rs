use std::collections::HashMap;

/// Anything that can hand out named string values at start-up.
///
/// Lookups take `&self`, so resolving a config can never change the source
/// it was resolved from.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads `key` and treats blank values the same as missing ones.
pub fn non_blank(source: &impl ConfigSource, key: &str) -> Option<String> {
    source.get(key).filter(|value| !value.trim().is_empty())
}
