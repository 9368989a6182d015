use serde::{Deserialize, Serialize};

/// Content category assigned to a page once per distillation run.
///
/// Variant order is the canonical table order: classifier ties resolve to the
/// earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
#[derive(Default)]
pub enum ContentCategory {
    /// Wire stories, press coverage, dated reporting.
    News = 0,
    /// Long-form analysis and features.
    Article = 1,
    /// Personal or first-person posts.
    Blog = 2,
    /// Sign-up, login and data-entry pages.
    Form = 3,
    /// Menus, sitemaps and link hubs.
    Navigation = 4,
    /// Product listings and shop pages.
    ECommerce = 5,
    /// Lessons, tutorials and reference material.
    Educational = 6,
    /// Nothing matched.
    #[default]
    Unknown = 7,
}

impl ContentCategory {
    /// Number of categories.
    pub const COUNT: usize = 8;

    /// All categories in canonical order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::News,
        Self::Article,
        Self::Blog,
        Self::Form,
        Self::Navigation,
        Self::ECommerce,
        Self::Educational,
        Self::Unknown,
    ];

    /// Position in the canonical table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Article => "article",
            Self::Blog => "blog",
            Self::Form => "form",
            Self::Navigation => "navigation",
            Self::ECommerce => "e_commerce",
            Self::Educational => "educational",
            Self::Unknown => "unknown",
        }
    }

    /// Human-facing label used in section markers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Article => "Article",
            Self::Blog => "Blog",
            Self::Form => "Form",
            Self::Navigation => "Navigation",
            Self::ECommerce => "Shop",
            Self::Educational => "Lesson",
            Self::Unknown => "Page",
        }
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "news" => Ok(Self::News),
            "article" => Ok(Self::Article),
            "blog" => Ok(Self::Blog),
            "form" => Ok(Self::Form),
            "navigation" | "nav" => Ok(Self::Navigation),
            "e_commerce" | "ecommerce" | "shop" => Ok(Self::ECommerce),
            "educational" | "education" => Ok(Self::Educational),
            "unknown" => Ok(Self::Unknown),
            _ => Err(anyhow::anyhow!("unknown content category: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_index() {
        for (i, category) in ContentCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(
            "E-Commerce".parse::<ContentCategory>().ok(),
            Some(ContentCategory::ECommerce)
        );
        assert_eq!(
            "nav".parse::<ContentCategory>().ok(),
            Some(ContentCategory::Navigation)
        );
        assert!("recipe".parse::<ContentCategory>().is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ContentCategory::ECommerce).expect("should serialize");
        assert_eq!(json, "\"e_commerce\"");
    }
}
