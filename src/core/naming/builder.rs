use super::types::{Field, FieldMap, NormalizeOptions, Overrides, Release, ReleaseOptions};

/// Dots become spaces, then the result is trimmed.
pub fn normalize_title<S: AsRef<str>>(s: S) -> String {
    s.as_ref().replace('.', " ").trim().to_string()
}

/// Like [`normalize_title`], but a dot touching a digit on either side is kept,
/// so tags such as `DDP5.1` or `H.264` survive.
pub fn normalize_scene<S: AsRef<str>>(s: S) -> String {
    let chars: Vec<char> = s.as_ref().chars().collect();
    let mut out = String::with_capacity(chars.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch != '.' {
            out.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        let splits = matches!(
            (before, after),
            (Some(b), Some(a)) if !b.is_ascii_digit() && !a.is_ascii_digit()
        );
        out.push(if splits { ' ' } else { '.' });
    }

    out.trim().to_string()
}

pub fn normalize_episode<S: AsRef<str>>(s: S, opts: NormalizeOptions) -> String {
    let ep = s.as_ref().trim();
    if opts.uppercase_episode {
        ep.to_uppercase()
    } else {
        ep.to_string()
    }
}

fn fallback(extracted: String, override_value: Option<&str>) -> String {
    if !extracted.is_empty() {
        return extracted;
    }
    override_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or(extracted)
}

/// Normalize extracted fields into a [`Release`]. Overrides only fill fields left empty by extraction.
pub fn build_release(
    fields: &FieldMap,
    overrides: &Overrides,
    normalize: NormalizeOptions,
    options: ReleaseOptions,
) -> Release {
    let title = normalize_title(fields.get(Field::Title));
    let year = fields.get(Field::Year).trim().to_string();

    Release {
        title: fallback(title, overrides.title.as_deref()),
        year: fallback(year, overrides.year.as_deref()),
        episode: normalize_episode(fields.get(Field::Episode), normalize),
        episode_title: normalize_title(fields.get(Field::EpisodeTitle)),
        scene: normalize_scene(fields.get(Field::Scene)),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        let mut map = FieldMap::new();
        for (k, v) in pairs {
            map.insert(*k, *v);
        }
        map
    }

    #[test]
    fn title_dots_become_spaces() {
        assert_eq!(normalize_title("Show.Name."), "Show Name");
        assert_eq!(normalize_title("  Mr..Robot "), "Mr  Robot");
    }

    #[test]
    fn scene_keeps_numeric_dots() {
        assert_eq!(normalize_scene("WEB.DDP5.1.H.264-GROUP"), "WEB DDP5.1.H.264-GROUP");
        assert_eq!(normalize_scene("AAC2.0.x264"), "AAC2.0.x264");
        assert_eq!(normalize_scene("1080p.BluRay.x264"), "1080p BluRay x264");
        assert_eq!(normalize_scene("a.b.c"), "a b c");
        assert_eq!(normalize_scene(".GROUP."), ".GROUP.");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["Show.Name..", " .x.", "Episode.Title", "a..b"] {
            let once = normalize_title(input);
            assert_eq!(normalize_title(&once), once);
        }
        for input in ["WEB.DDP5.1.H.264-GROUP", "..x..", "2.0.AAC", " GROUP. "] {
            let once = normalize_scene(input);
            assert_eq!(normalize_scene(&once), once);
        }
    }

    #[test]
    fn episode_case_is_a_toggle() {
        let upper = NormalizeOptions { uppercase_episode: true };
        assert_eq!(normalize_episode(" s01e02 ", upper), "S01E02");
        assert_eq!(normalize_episode(" s01e02 ", NormalizeOptions::default()), "s01e02");
    }

    #[test]
    fn extracted_title_wins_over_override() {
        let overrides = Overrides {
            title: Some("Bar".to_string()),
            year: Some("1999".to_string()),
        };
        let release = build_release(
            &fields(&[("title", "Foo"), ("year", "2020")]),
            &overrides,
            NormalizeOptions::default(),
            ReleaseOptions::default(),
        );
        assert_eq!(release.title, "Foo");
        assert_eq!(release.year, "2020");
    }

    #[test]
    fn override_fills_empty_fields() {
        let overrides = Overrides {
            title: Some("Bar".to_string()),
            year: None,
        };
        let release = build_release(
            &fields(&[("title", " . "), ("ep", "S01E01")]),
            &overrides,
            NormalizeOptions::default(),
            ReleaseOptions::default(),
        );
        assert_eq!(release.title, "Bar");
        assert_eq!(release.year, "");
        assert_eq!(release.episode, "S01E01");
    }

    #[test]
    fn empty_override_is_ignored() {
        let overrides = Overrides {
            title: Some("  ".to_string()),
            year: Some(String::new()),
        };
        let release = build_release(
            &FieldMap::new(),
            &overrides,
            NormalizeOptions::default(),
            ReleaseOptions::default(),
        );
        assert_eq!(release.title, "");
        assert_eq!(release.year, "");
    }

    #[test]
    fn builds_full_release() {
        let options = ReleaseOptions {
            scene: true,
            series_year: false,
        };
        let release = build_release(
            &fields(&[
                ("title", "Show.Name"),
                ("ep", "s01e02"),
                ("eptitle", "Episode.Title."),
                ("scene", "WEB.x264-GROUP"),
            ]),
            &Overrides::default(),
            NormalizeOptions { uppercase_episode: true },
            options,
        );
        assert_eq!(
            release,
            Release {
                title: "Show Name".to_string(),
                year: String::new(),
                episode: "S01E02".to_string(),
                episode_title: "Episode Title".to_string(),
                scene: "WEB x264-GROUP".to_string(),
                options,
            }
        );
    }
}
