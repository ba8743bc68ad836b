// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

const DEFAULT_LANG: &str = "en";

// Catálogos embutidos no binário
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("he", include_str!("../../locales/he.json")),
];

/// Mensagens de erro traduzidas, indexadas por idioma e código.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("catálogo de mensagens '{}' inválido", lang))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs })
    }

    /// Traduz `key` para `lang`, caindo para inglês e, por fim, para a própria chave.
    /// Placeholders no formato `{nome}` são substituídos por `args`.
    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, String)]) -> String {
        let template = self
            .catalogs
            .get(lang)
            .and_then(|c| c.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string());

        args.iter().fold(template, |msg, (name, value)| {
            msg.replace(&format!("{{{}}}", name), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_then_key() {
        let store = I18nStore::load().unwrap();

        assert_eq!(
            store.translate("fr", "class_not_found", &[]),
            store.translate("en", "class_not_found", &[])
        );
        assert_eq!(store.translate("en", "no_such_key", &[]), "no_such_key");
    }

    #[test]
    fn hebrew_catalog_covers_every_english_key() {
        let store = I18nStore::load().unwrap();
        let en = &store.catalogs["en"];
        let he = &store.catalogs["he"];
        for key in en.keys() {
            assert!(he.contains_key(key), "missing hebrew message for {}", key);
        }
    }
}
