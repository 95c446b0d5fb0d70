use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Politics,
    Business,
    Technology,
    Sports,
    Health,
    Education,
    Environment,
    Crime,
    General,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Politics,
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Health,
        Category::Education,
        Category::Environment,
        Category::Crime,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Environment => "Environment",
            Category::Crime => "Crime",
            Category::General => "General",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Politics => "🏛️",
            Category::Business => "💼",
            Category::Technology => "💻",
            Category::Sports => "⚽",
            Category::Health => "🏥",
            Category::Education => "📚",
            Category::Environment => "🌿",
            Category::Crime => "⚖️",
            Category::General => "📰",
        }
    }

    /// Bootstrap contextual class used for the category badge.
    pub fn badge_color(self) -> &'static str {
        match self {
            Category::Politics | Category::Health => "danger",
            Category::Business | Category::Environment => "success",
            Category::Technology => "info",
            Category::Sports => "warning",
            Category::Education => "primary",
            Category::Crime => "dark",
            Category::General => "secondary",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked top to bottom; within a row keywords are checked left to right.
/// Earlier rows win when several match.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Politics,
        &[
            "government", "election", "president", "minister", "parliament", "political",
            "party", "vote", "democracy", "policy", "senate", "congress", "prime minister",
            "cabinet", "diplomat", "treaty", "legislation", "opposition", "ruling",
            "constitution", "coup",
        ],
    ),
    (
        Category::Business,
        &[
            "economy", "market", "stock", "trade", "business", "company", "bank", "finance",
            "investment", "gdp", "inflation", "startup", "revenue", "profit", "loss",
            "industry", "export", "import", "currency", "oil", "price", "fund", "billion",
            "million",
        ],
    ),
    (
        Category::Technology,
        &[
            "technology", "tech", "ai", "artificial intelligence", "software", "internet",
            "cyber", "digital", "app", "smartphone", "computer", "robot", "data", "hack",
            "social media", "startup", "innovation", "satellite", "space", "electric", "ev",
            "tesla", "google", "apple",
        ],
    ),
    (
        Category::Sports,
        &[
            "cricket", "football", "soccer", "tennis", "basketball", "sport", "olympic",
            "tournament", "championship", "match", "player", "team", "fifa", "ipl", "league",
            "coach", "athlete", "medal", "race", "hockey", "baseball", "rugby", "golf",
            "swimming", "boxing",
        ],
    ),
    (
        Category::Health,
        &[
            "health", "hospital", "doctor", "medicine", "disease", "virus", "vaccine", "covid",
            "cancer", "mental health", "drug", "treatment", "pandemic", "epidemic", "patient",
            "surgery", "medical", "who", "diabetes", "nutrition", "fitness", "wellness",
            "pharmacy",
        ],
    ),
    (
        Category::Education,
        &[
            "education", "school", "university", "student", "teacher", "college", "learning",
            "exam", "degree", "scholarship", "course", "academic", "research", "study",
            "campus", "graduate", "literacy", "curriculum", "tuition", "admission",
            "professor", "faculty",
        ],
    ),
    (
        Category::Environment,
        &[
            "climate", "environment", "pollution", "global warming", "flood", "earthquake",
            "storm", "weather", "forest", "wildlife", "ocean", "carbon", "emission",
            "renewable", "solar", "drought", "fire", "plastic", "recycling", "green",
            "sustainability", "nature",
        ],
    ),
    (
        Category::Crime,
        &[
            "crime", "police", "arrest", "murder", "theft", "fraud", "corruption", "court",
            "judge", "prison", "sentence", "terror", "attack", "violence", "protest", "riot",
            "shooting", "robbery", "investigation", "drug trafficking", "smuggling", "accused",
        ],
    ),
];

pub fn detect_category(title: &str, summary: &str) -> Category {
    let text = format!("{title} {summary}").to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| contains_at_word_start(&text, keyword))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Substring match that must begin a word, so "sport" matches "sportsman"
/// but "app" does not match "happened".
fn contains_at_word_start(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(idx, _)| {
        text[..idx]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric())
    })
}
