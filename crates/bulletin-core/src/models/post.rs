use serde::{Deserialize, Deserializer, Serialize};

use super::tag::normalize_tags;
use super::{id_string, opt_id_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "tag_names")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<PostAuthor>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "likeCount", default)]
    pub like_count: i64,
    #[serde(rename = "dislikeCount", default)]
    pub dislike_count: i64,
    #[serde(rename = "commentCount", default)]
    pub comment_count: i64,
    #[serde(rename = "scrapCount", default)]
    pub scrap_count: i64,
}

impl Post {
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_slug)
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or("Anonymous")
    }
}

/// Author of a post or comment. The backend sends either a bare display
/// name or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAuthor {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl<'de> Deserialize<'de> for PostAuthor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Full {
            #[serde(default, deserialize_with = "opt_id_string")]
            id: Option<String>,
            #[serde(rename = "displayName", alias = "name")]
            display_name: String,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Full(Full),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(display_name) => PostAuthor { id: None, display_name },
            Raw::Full(full) => PostAuthor {
                id: full.id,
                display_name: full.display_name,
            },
        })
    }
}

/// Tags arrive as plain names or as `{id, name}` objects.
fn tag_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Tag { name: String },
    }

    let raw = Option::<Vec<Raw>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|r| match r {
            Raw::Name(name) | Raw::Tag { name } => name,
        })
        .collect())
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = match category {
            Category::All => None,
            other => Some(other.slug().to_string()),
        };
        self
    }

    /// Set the tags, trimmed and de-duplicated.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Post title must not be blank".to_string());
        }
        Ok(())
    }
}

/// Body of `PATCH /posts/{id}`. `tags`, when set, replaces the post's tags.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = Some(normalize_tags(tags));
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if matches!(self.title.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err("Post title must not be blank".to_string());
        }
        Ok(())
    }
}

/// Board categories shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Humanity,
    StartUp,
    Programming,
    Planning,
    Marketing,
    Design,
    SelfDevelopment,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::All,
        Category::Humanity,
        Category::StartUp,
        Category::Programming,
        Category::Planning,
        Category::Marketing,
        Category::Design,
        Category::SelfDevelopment,
    ];

    /// Value sent to and received from the backend. `All` has no slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::All => "",
            Category::Humanity => "humanity",
            Category::StartUp => "start-up",
            Category::Programming => "programming",
            Category::Planning => "planning",
            Category::Marketing => "marketing",
            Category::Design => "design",
            Category::SelfDevelopment => "self-development",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Humanity => "Humanities",
            Category::StartUp => "Start-ups",
            Category::Programming => "IT & Programming",
            Category::Planning => "Service Planning",
            Category::Marketing => "Marketing",
            Category::Design => "Design & Illustration",
            Category::SelfDevelopment => "Self-development",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL.iter().copied().find(|c| c.slug().eq_ignore_ascii_case(slug))
    }
}
