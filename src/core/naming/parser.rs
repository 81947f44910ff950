use regex::Regex;
use tracing::debug;

use super::types::{FieldMap, Mode};
use crate::config::Config;
use crate::utils::{Error, OsirisResult};

/// Where the input pattern comes from, in precedence order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSource<'a> {
    pub regex: Option<&'a str>,
    pub preset: Option<&'a str>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// Pick the input pattern for `mode`: explicit regex, then preset, then the configured default.
pub fn resolve_pattern<'a>(
    mode: Mode,
    source: PatternSource<'a>,
    config: &'a Config,
) -> OsirisResult<&'a str> {
    if let Some(re) = non_empty(source.regex) {
        return Ok(re);
    }
    if let Some(name) = source.preset {
        return lookup_preset(mode, name, config);
    }
    non_empty(config.regex.for_mode(mode)).ok_or(Error::MissingRegex { mode })
}

pub fn lookup_preset<'a>(mode: Mode, name: &str, config: &'a Config) -> OsirisResult<&'a str> {
    config
        .regex
        .custom
        .for_mode(mode)
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::UnknownPreset {
            mode,
            name: name.to_string(),
        })
}

pub fn compile_pattern(pattern: &str) -> OsirisResult<Regex> {
    let re = Regex::new(pattern)?;
    debug!(
        "Compiled input pattern with groups: {:?}",
        re.capture_names().flatten().collect::<Vec<_>>()
    );
    Ok(re)
}

/// Apply `re` once to `input` and collect every named group that participated in the match.
pub fn extract_fields(re: &Regex, input: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    let Some(caps) = re.captures(input) else {
        debug!("Pattern did not match '{}'", input);
        return fields;
    };

    for name in re.capture_names().flatten() {
        if let Some(m) = caps.name(name) {
            fields.insert(name, m.as_str());
        }
    }

    debug!("Extracted from '{}': {:?}", input, fields);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::types::Field;

    const SERIES_RE: &str =
        r"^(?P<title>.+?)\.(?P<ep>[Ss]\d+[Ee]\d+)(?:\.(?P<eptitle>.+?))?\.(?P<scene>[^.]+)$";

    fn config_with_presets() -> Config {
        let mut config = Config::default();
        config.regex.series = Some("series-default".to_string());
        config
            .regex
            .custom
            .series
            .insert("anime".to_string(), "anime-re".to_string());
        config
            .regex
            .custom
            .film
            .insert("remux".to_string(), "remux-re".to_string());
        config
    }

    #[test]
    fn extracts_all_named_groups() {
        let re = compile_pattern(SERIES_RE).unwrap();
        let fields = extract_fields(&re, "Show.Name.S01E02.Episode.Title.GROUP");

        assert_eq!(fields.len(), 4);
        assert_eq!(fields.get(Field::Title), "Show.Name");
        assert_eq!(fields.get(Field::Episode), "S01E02");
        assert_eq!(fields.get(Field::EpisodeTitle), "Episode.Title");
        assert_eq!(fields.get(Field::Scene), "GROUP");
        assert_eq!(fields.get(Field::Year), "");
        assert!(!fields.contains("year"));
    }

    #[test]
    fn unmatched_optional_group_is_absent() {
        let re = compile_pattern(SERIES_RE).unwrap();
        let fields = extract_fields(&re, "Show.S01E02.GROUP");

        assert!(!fields.contains("eptitle"));
        assert_eq!(fields.get(Field::EpisodeTitle), "");
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn empty_match_is_present() {
        let re = compile_pattern(r"^(?P<title>[^-]*)-(?P<scene>.*)$").unwrap();
        let fields = extract_fields(&re, "Title-");

        assert!(fields.contains("scene"));
        assert_eq!(fields.get_named("scene"), Some(""));
    }

    #[test]
    fn first_match_only() {
        let re = compile_pattern(r"(?P<year>\d{4})").unwrap();
        let fields = extract_fields(&re, "Film.1999.Remaster.2015");
        assert_eq!(fields.get(Field::Year), "1999");
    }

    #[test]
    fn unknown_groups_are_kept() {
        let re = compile_pattern(r"^(?P<title>\w+)\.(?P<quality>\d+p)$").unwrap();
        let fields = extract_fields(&re, "Film.1080p");
        assert_eq!(fields.get_named("quality"), Some("1080p"));
        assert_eq!(fields.get(Field::Title), "Film");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn no_match_yields_empty_map() {
        let re = compile_pattern(SERIES_RE).unwrap();
        assert!(extract_fields(&re, "nothing here").is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = compile_pattern(r"(?P<title>.+").unwrap_err();
        assert!(matches!(err, Error::InvalidRegex(_)));
    }

    #[test]
    fn explicit_regex_wins() {
        let config = config_with_presets();
        let source = PatternSource {
            regex: Some("cli-re"),
            preset: Some("anime"),
        };
        assert_eq!(resolve_pattern(Mode::Series, source, &config).unwrap(), "cli-re");
    }

    #[test]
    fn preset_is_looked_up_per_mode() {
        let config = config_with_presets();
        let series = PatternSource {
            regex: None,
            preset: Some("anime"),
        };
        assert_eq!(resolve_pattern(Mode::Series, series, &config).unwrap(), "anime-re");

        let err = resolve_pattern(Mode::Film, series, &config).unwrap_err();
        match err {
            Error::UnknownPreset { mode, name } => {
                assert_eq!(mode, Mode::Film);
                assert_eq!(name, "anime");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn preset_lookup_is_exact() {
        let config = config_with_presets();
        assert!(lookup_preset(Mode::Series, "Anime", &config).is_err());
    }

    #[test]
    fn falls_back_to_configured_default() {
        let config = config_with_presets();
        let source = PatternSource {
            regex: Some(""),
            preset: None,
        };
        assert_eq!(
            resolve_pattern(Mode::Series, source, &config).unwrap(),
            "series-default"
        );
    }

    #[test]
    fn missing_regex_is_an_error() {
        let config = config_with_presets();
        let err = resolve_pattern(Mode::Film, PatternSource::default(), &config).unwrap_err();
        assert!(matches!(err, Error::MissingRegex { mode: Mode::Film }));
    }
}
