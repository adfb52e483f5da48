//! Wire format of the remote `/keys` endpoint

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogBuilder, LanguageInfo, TranslationEntry, TranslationStatus};

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogPayload {
    keys: Vec<KeyRecord>,
    languages: Vec<LanguageRecord>,
}

#[derive(Debug, Deserialize)]
struct KeyRecord {
    key: String,
    #[serde(deserialize_with = "object_or_empty_array")]
    translations: HashMap<String, TranslationRecord>,
}

#[derive(Debug, Deserialize)]
struct TranslationRecord {
    value: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct LanguageRecord {
    code: String,
    name: String,
    is_source: SourceFlag,
    #[serde(default)]
    minecraft_head: Option<String>,
}

/// `is_source` arrives as 0/1, occasionally as a string or boolean.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceFlag {
    Flag(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SourceFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Int(n) => *n == 1,
            Self::Float(f) => (*f - 1.0).abs() < f64::EPSILON,
            Self::Text(s) => s.trim() == "1",
        }
    }
}

/// Some backends encode an empty map as `[]`.
fn object_or_empty_array<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, TranslationRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(HashMap<String, TranslationRecord>),
        List(Vec<serde::de::IgnoredAny>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(list) if list.is_empty() => Ok(HashMap::new()),
        MapOrList::List(_) => Err(de::Error::custom(
            "translations must be an object keyed by language code",
        )),
    }
}

impl CatalogPayload {
    /// Records repeating a key merge into one entry; later values win per language.
    pub(crate) fn into_catalog(self) -> Catalog {
        let builder = self
            .keys
            .into_iter()
            .fold(CatalogBuilder::default(), |builder, record| {
                let key = record.key;
                record
                    .translations
                    .into_iter()
                    .fold(builder.key(key.clone()), |builder, (code, t)| {
                        let entry =
                            TranslationEntry::new(t.value, TranslationStatus::from_wire(&t.status));
                        builder.entry(key.clone(), code, entry)
                    })
            });

        self.languages
            .into_iter()
            .fold(builder, |builder, record| {
                let mut language = LanguageInfo::new(record.code, record.name);
                if record.is_source.is_set() {
                    language = language.as_default();
                }
                if let Some(head) = record.minecraft_head {
                    language = language.with_avatar_ref(head);
                }
                builder.language(language)
            })
            .build()
    }
}
