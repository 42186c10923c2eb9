//! Built-in language profiles
//!
//! Profiles shipped with shiori are embedded TOML files, compiled on request.

use crate::error::{CoreError, Result};
use crate::language::parser::ParserCatalog;
use crate::language::profile::LanguageProfile;

struct Embedded {
    code: &'static str,
    aliases: &'static [&'static str],
    toml: &'static str,
}

const EMBEDDED: &[Embedded] = &[
    Embedded {
        code: "en",
        aliases: &["english"],
        toml: include_str!("../../configs/languages/english.toml"),
    },
    Embedded {
        code: "ja",
        aliases: &["japanese"],
        toml: include_str!("../../configs/languages/japanese.toml"),
    },
    Embedded {
        code: "ja-mecab",
        aliases: &["japanese-mecab"],
        toml: include_str!("../../configs/languages/japanese-mecab.toml"),
    },
    Embedded {
        code: "zh",
        aliases: &["chinese"],
        toml: include_str!("../../configs/languages/chinese.toml"),
    },
    Embedded {
        code: "zh-jieba",
        aliases: &["chinese-jieba"],
        toml: include_str!("../../configs/languages/chinese-jieba.toml"),
    },
    Embedded {
        code: "ar",
        aliases: &["arabic"],
        toml: include_str!("../../configs/languages/arabic.toml"),
    },
];

/// Codes of all built-in profiles
pub fn builtin_codes() -> impl Iterator<Item = &'static str> {
    EMBEDDED.iter().map(|e| e.code)
}

/// Load a built-in profile by code or alias using the built-in parser catalog
pub fn builtin(code: &str) -> Result<LanguageProfile> {
    builtin_with(code, &ParserCatalog::builtin()?)
}

/// Load a built-in profile, resolving parser references in `catalog`
pub fn builtin_with(code: &str, catalog: &ParserCatalog) -> Result<LanguageProfile> {
    let wanted = code.to_lowercase();
    let embedded = EMBEDDED
        .iter()
        .find(|e| e.code == wanted || e.aliases.contains(&wanted.as_str()))
        .ok_or_else(|| CoreError::configuration(format!("unknown language code: {code}")))?;

    LanguageProfile::from_toml_str(embedded.toml, catalog).map_err(|e| {
        CoreError::configuration(format!("failed to load built-in profile '{code}': {e}"))
    })
}
