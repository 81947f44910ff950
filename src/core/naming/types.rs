use std::collections::BTreeMap;
use std::fmt;

/// Renaming mode: episodic content or a single feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Series,
    Film,
}

impl Mode {
    pub fn from_film_flag(film: bool) -> Self {
        if film { Mode::Film } else { Mode::Series }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Series => f.write_str("series"),
            Mode::Film => f.write_str("film"),
        }
    }
}

/// Named capture groups the formatter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Year,
    Episode,
    EpisodeTitle,
    Scene,
}

impl Field {
    /// Capture group name used in input regexes.
    pub fn group_name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Year => "year",
            Field::Episode => "ep",
            Field::EpisodeTitle => "eptitle",
            Field::Scene => "scene",
        }
    }

    /// Resolve a template placeholder, case-insensitively. Group names are accepted as aliases.
    pub fn from_placeholder(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "title" => Some(Field::Title),
            "year" => Some(Field::Year),
            "episode" | "ep" => Some(Field::Episode),
            "episodetitle" | "eptitle" => Some(Field::EpisodeTitle),
            "scene" => Some(Field::Scene),
            _ => None,
        }
    }
}

/// Raw values captured from a filename, keyed by capture group name.
///
/// A group that did not participate in the match is absent; a group that matched
/// the empty string is present with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: BTreeMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of a known field, or `""` when it was not captured.
    pub fn get(&self, field: Field) -> &str {
        self.get_named(field.group_name()).unwrap_or("")
    }

    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
    pub scene: bool,
    pub series_year: bool,
}

/// Toggles applied while turning a [`FieldMap`] into a [`Release`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub uppercase_episode: bool,
}

/// Fallback values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub title: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    pub title: String,
    pub year: String,
    pub episode: String,
    pub episode_title: String,
    pub scene: String,
    pub options: ReleaseOptions,
}

impl Release {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Year => &self.year,
            Field::Episode => &self.episode,
            Field::EpisodeTitle => &self.episode_title,
            Field::Scene => &self.scene,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Empty,
    PathSeparator,
    NulByte,
    Reserved,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Empty => f.write_str("name is empty"),
            Issue::PathSeparator => f.write_str("name contains a path separator"),
            Issue::NulByte => f.write_str("name contains a NUL byte"),
            Issue::Reserved => f.write_str("name is a reserved path component"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<Issue>,
}
