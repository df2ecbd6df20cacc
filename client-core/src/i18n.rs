//! 多语言引导：启动时加载内置词典并确定当前语言
//!
//! 语言选择顺序：持久化的用户偏好 -> 配置的默认语言 -> `en`。
//! 全局实例只初始化一次，运行期间只读。

use crate::constants::i18n::{FALLBACK_LANGUAGE, LANG_KEY, SUPPORTED_LANGUAGES};
use crate::error::{BackupError, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

const DICTIONARIES: [(&str, &str); 5] = [
    ("zh", include_str!("../locales/zh.toml")),
    ("tw", include_str!("../locales/tw.toml")),
    ("en", include_str!("../locales/en.toml")),
    ("ru", include_str!("../locales/ru.toml")),
    ("ms", include_str!("../locales/ms.toml")),
];

static LOCALIZER: OnceCell<Localizer> = OnceCell::new();

type Dictionary = HashMap<String, String>;

/// 语言偏好的持久化存储
pub trait LocaleStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, language: &str) -> Result<()>;
}

/// 保存在 TOML 文件中的语言偏好（`lang = "zh"`）
#[derive(Debug, Clone)]
pub struct FileLocaleStore {
    path: PathBuf,
}

impl FileLocaleStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LocaleStore for FileLocaleStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let table: toml::Table = toml::from_str(&content)?;
        Ok(table
            .get(LANG_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    fn save(&self, language: &str) -> Result<()> {
        let mut table = toml::Table::new();
        table.insert(LANG_KEY.to_string(), toml::Value::String(language.to_string()));
        fs::write(&self.path, toml::to_string(&table)?)?;
        Ok(())
    }
}

/// 内存中的语言偏好
#[derive(Debug, Default)]
pub struct MemoryLocaleStore {
    value: Mutex<Option<String>>,
}

impl MemoryLocaleStore {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: Mutex::new(value.map(str::to_string)),
        }
    }
}

impl LocaleStore for MemoryLocaleStore {
    fn load(&self) -> Result<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|e| BackupError::locale(e.to_string()))?;
        Ok(value.clone())
    }

    fn save(&self, language: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| BackupError::locale(e.to_string()))?;
        *value = Some(language.to_string());
        Ok(())
    }
}

pub fn is_supported(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// 按 偏好 -> 默认 -> `en` 的顺序选出当前语言
pub fn select_language(preference: Option<&str>, default: &str) -> &'static str {
    [preference, Some(default)]
        .into_iter()
        .flatten()
        .find_map(|tag| SUPPORTED_LANGUAGES.iter().copied().find(|s| *s == tag))
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// 把 TOML 表展开为 `section.key` 形式的扁平词典
fn flatten(prefix: &str, table: &toml::Table, out: &mut Dictionary) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Table(t) => flatten(&full, t, out),
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}

fn load_dictionaries() -> Result<HashMap<&'static str, Dictionary>> {
    let mut dictionaries = HashMap::new();
    for (language, source) in DICTIONARIES {
        let table: toml::Table = toml::from_str(source)
            .map_err(|e| BackupError::locale(format!("{language} 词典解析失败: {e}")))?;
        let mut dictionary = Dictionary::new();
        flatten("", &table, &mut dictionary);
        dictionaries.insert(language, dictionary);
    }
    Ok(dictionaries)
}

/// 翻译器
pub struct Localizer {
    active: &'static str,
    dictionaries: HashMap<&'static str, Dictionary>,
    store: Box<dyn LocaleStore>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// 加载词典并读取一次语言偏好
    ///
    /// 偏好读取失败时记录警告并按默认语言继续。
    pub fn new(store: Box<dyn LocaleStore>, default_language: &str) -> Result<Self> {
        let dictionaries = load_dictionaries()?;

        let preference = match store.load() {
            Ok(preference) => preference,
            Err(e) => {
                warn!("读取语言偏好失败，使用默认语言: {}", e);
                None
            }
        };
        if let Some(ref tag) = preference {
            if !is_supported(tag) {
                warn!("忽略不支持的语言偏好: {}", tag);
            }
        }

        let active = select_language(preference.as_deref(), default_language);
        debug!("当前语言: {}", active);

        Ok(Self {
            active,
            dictionaries,
            store,
        })
    }

    pub fn active(&self) -> &'static str {
        self.active
    }

    /// 查找翻译，依次回退到 `en` 和键名本身
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        [self.active, FALLBACK_LANGUAGE]
            .into_iter()
            .filter_map(|language| self.dictionaries.get(language))
            .find_map(|dictionary| dictionary.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// 查找翻译并替换 `{name}` 占位符
    pub fn t_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// 保存新的语言偏好，当前进程的语言不变
    pub fn set_preference(&self, language: &str) -> Result<()> {
        if !is_supported(language) {
            return Err(BackupError::locale(format!("不支持的语言: {language}")));
        }
        self.store.save(language)
    }
}

/// 初始化全局翻译器，重复调用返回已有实例
pub fn init(store: Box<dyn LocaleStore>, default_language: &str) -> Result<&'static Localizer> {
    LOCALIZER.get_or_try_init(|| Localizer::new(store, default_language))
}

pub fn get() -> Option<&'static Localizer> {
    LOCALIZER.get()
}

/// 全局翻译，未初始化时返回键名
pub fn t(key: &str) -> String {
    get()
        .map(|localizer| localizer.t(key).to_string())
        .unwrap_or_else(|| key.to_string())
}

pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    match get() {
        Some(localizer) => localizer.t_args(key, args),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn localizer(preference: Option<&str>, default: &str) -> Localizer {
        Localizer::new(Box::new(MemoryLocaleStore::new(preference)), default).unwrap()
    }

    #[test]
    fn test_selection_chain() {
        assert_eq!(select_language(Some("ru"), "zh"), "ru");
        assert_eq!(select_language(None, "zh"), "zh");
        assert_eq!(select_language(Some("de"), "tw"), "tw");
        assert_eq!(select_language(Some("de"), "fr"), "en");
        assert_eq!(select_language(None, ""), "en");
    }

    #[test]
    fn test_all_dictionaries_share_keys() {
        let dictionaries = load_dictionaries().unwrap();
        assert_eq!(dictionaries.len(), SUPPORTED_LANGUAGES.len());

        let en = &dictionaries["en"];
        for language in SUPPORTED_LANGUAGES {
            let dictionary = &dictionaries[language];
            for key in en.keys() {
                assert!(dictionary.contains_key(key), "{language} 缺少 {key}");
            }
        }
    }

    #[test]
    fn test_translation_fallbacks() {
        let zh = localizer(Some("zh"), "en");
        assert_eq!(zh.active(), "zh");
        assert_eq!(zh.t("common.done"), "完成");
        assert_eq!(zh.t("no.such.key"), "no.such.key");

        let ms = localizer(None, "ms");
        assert_eq!(ms.t("common.done"), "Selesai");
        assert_eq!(
            ms.t_args("backup.records_deleted", &[("count", "3")]),
            "3 rekod telah dipadam"
        );
    }

    #[test]
    fn test_preference_saved_for_next_start() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lang.toml");

        let first = Localizer::new(Box::new(FileLocaleStore::new(&path)), "en").unwrap();
        assert_eq!(first.active(), "en");
        first.set_preference("tw").unwrap();
        // 当前进程不切换
        assert_eq!(first.active(), "en");

        let second = Localizer::new(Box::new(FileLocaleStore::new(&path)), "en").unwrap();
        assert_eq!(second.active(), "tw");

        assert!(matches!(
            second.set_preference("klingon").unwrap_err(),
            BackupError::Locale(_)
        ));
    }

    #[test]
    fn test_unreadable_preference_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lang.toml");
        fs::write(&path, "lang = [not toml").unwrap();

        let localizer = Localizer::new(Box::new(FileLocaleStore::new(&path)), "ru").unwrap();
        assert_eq!(localizer.active(), "ru");
    }

    #[test]
    fn test_global_initialized_once() {
        let first = init(Box::new(MemoryLocaleStore::new(Some("zh"))), "en").unwrap();
        let second = init(Box::new(MemoryLocaleStore::new(Some("ru"))), "en").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.active(), "zh");
        assert_eq!(t("common.done"), "完成");
    }
}
