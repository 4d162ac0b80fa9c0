use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::Result;
use crate::fields::Field;
use crate::model::UuidMode;

pub const TIMESTAMP_KEYWORD: &str = "timestamp";
pub const UUID_KEYWORD: &str = "uuid";

/// Builds a field from `(field name, directive body)`.
pub type KeywordConstructor = Arc<dyn Fn(&str, &str) -> Result<Field> + Send + Sync>;

/// Reserved directive names and the constructors behind them.
#[derive(Clone, Default)]
pub struct KeywordRegistry {
    constructors: BTreeMap<String, KeywordConstructor>,
}

impl KeywordRegistry {
    /// Registry holding the built-in `timestamp` and `uuid` keywords.
    pub fn new(uuid_mode: UuidMode) -> Self {
        let mut registry = Self::default();
        registry.register(TIMESTAMP_KEYWORD, |name: &str, _body: &str| {
            Ok(Field::Timestamp {
                name: name.to_string(),
            })
        });
        registry.register(UUID_KEYWORD, move |name: &str, _body: &str| {
            Ok(Field::Uuid {
                name: name.to_string(),
                mode: uuid_mode,
            })
        });
        registry
    }

    /// Bind `keyword` to `constructor`, replacing any previous binding.
    pub fn register<F>(&mut self, keyword: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&str, &str) -> Result<Field> + Send + Sync + 'static,
    {
        self.constructors
            .insert(keyword.into(), Arc::new(constructor));
        self
    }

    /// Merge `overrides` into this registry; overrides win on collision.
    pub fn merge(&mut self, overrides: KeywordRegistry) {
        self.constructors.extend(overrides.constructors);
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.constructors.contains_key(keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Build the field for `name` when `body` is a registered keyword.
    pub fn construct(&self, name: &str, body: &str) -> Option<Result<Field>> {
        self.constructors
            .get(body)
            .map(|constructor| constructor(name, body))
    }
}

impl fmt::Debug for KeywordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}
