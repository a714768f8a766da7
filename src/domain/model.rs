use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::OnceLock;

/// 頁面模板中可被填入內容的錨點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    ProfileName,
    ProfileTagline,
    ProfileLocation,
    ProfileHeadshot,
    ProfileLinks,
    AboutContent,
    Publications,
    ServiceList,
    FooterYear,
}

impl Anchor {
    /// The `data-*` attribute that marks this anchor in the template.
    pub fn attribute(&self) -> &'static str {
        match self {
            Anchor::ProfileName => "data-profile-name",
            Anchor::ProfileTagline => "data-profile-tagline",
            Anchor::ProfileLocation => "data-profile-location",
            Anchor::ProfileHeadshot => "data-profile-headshot",
            Anchor::ProfileLinks => "data-profile-links",
            Anchor::AboutContent => "data-about-content",
            Anchor::Publications => "data-publications",
            Anchor::ServiceList => "data-service-list",
            Anchor::FooterYear => "data-footer-year",
        }
    }

    pub fn selector(&self) -> String {
        format!("[{}]", self.attribute())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tagline: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub headshot: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub cv: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub links: Vec<ProfileLink>,
}

/// 個人頁的外部連結，label 與 url 缺一即被略過
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileLink {
    #[serde(deserialize_with = "required_string")]
    pub label: String,
    #[serde(deserialize_with = "required_string")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublicationSet {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub publications: Vec<PublicationEntry>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub preprints: Vec<PublicationEntry>,
}

impl PublicationSet {
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty() && self.preprints.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublicationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string_seq")]
    pub authors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub links: Vec<PublicationLink>,
}

impl PublicationEntry {
    /// URL of the first link, which the title points at.
    pub fn primary_url(&self) -> Option<&str> {
        self.links.first().and_then(|link| link.url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublicationLink {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceList {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub items: Vec<String>,
}

/// 跨 pipeline 共享的狀態：站主名稱只寫入一次
#[derive(Debug, Default)]
pub struct SiteState {
    owner_name: OnceLock<String>,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the owner name. Empty names and second writes are ignored.
    pub fn publish_owner_name(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.owner_name.set(name.to_string()).is_ok()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.get().map(String::as_str)
    }
}

fn non_empty(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(non_empty).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(non_empty))
}

fn required_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    non_empty(value).ok_or_else(|| serde::de::Error::custom("expected a non-empty string"))
}

fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => match n.as_f64() {
            // 2024.0 這類整數值的浮點數照整數輸出
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(format!("{}", f as i64))
            }
            _ => Some(n.to_string()),
        },
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

// 非陣列視為空；無法解析的元素直接略過
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string_seq(deserializer)?.unwrap_or_default())
}

fn lenient_string_seq<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
