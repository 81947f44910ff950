use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, error, warn};

use crate::cli::{toggle, Cli};
use crate::config::Config;
use crate::core::fs::{display_name, file_stem_lossy, plan_rename, rename_file};
use crate::core::naming::{
    build_release, compile_pattern, extract_fields, resolve_pattern, template_for,
    validate_rendered_name, FieldMap, Mode, NormalizeOptions, Overrides, PatternSource,
    ReleaseOptions, Template,
};
use crate::utils::{Error, OsirisResult};

/// Everything needed to turn an input path into its new path, resolved once per run.
#[derive(Debug)]
pub struct Renamer {
    mode: Mode,
    pattern: Regex,
    template: Template,
    overrides: Overrides,
    normalize: NormalizeOptions,
    options: ReleaseOptions,
}

impl Renamer {
    /// Merge CLI values over config values. Fails before any file is touched when the
    /// pattern is missing or invalid, or the template does not parse.
    pub fn from_settings(cli: &Cli, config: &Config) -> OsirisResult<Self> {
        let mode = Mode::from_film_flag(cli.film);

        let source = PatternSource {
            regex: cli.regex.as_deref(),
            preset: cli.preset.as_deref(),
        };
        let pattern = compile_pattern(resolve_pattern(mode, source, config)?)?;

        let configured = match cli.template.as_deref() {
            Some(t) if !t.trim().is_empty() => Some(t),
            _ => config.templates.for_mode(mode),
        };
        let template = Template::parse(template_for(mode, configured))?;
        debug!("Using {} template '{}'", mode, template);

        let options = ReleaseOptions {
            scene: toggle(cli.scene, cli.no_scene)
                .or(config.scene)
                .unwrap_or(false),
            series_year: toggle(cli.series_year, cli.no_series_year)
                .or(config.series_year)
                .unwrap_or(false),
        };
        let normalize = NormalizeOptions {
            uppercase_episode: toggle(cli.uppercase_episode, cli.no_uppercase_episode)
                .or(config.uppercase_episode)
                .unwrap_or(false),
        };

        Ok(Self {
            mode,
            pattern,
            template,
            overrides: Overrides {
                title: cli.title.clone(),
                year: cli.year.clone(),
            },
            normalize,
            options,
        })
    }

    fn extract(&self, path: &Path) -> FieldMap {
        extract_fields(&self.pattern, &file_stem_lossy(path))
    }

    fn render_fields(&self, fields: &FieldMap) -> String {
        let release = build_release(fields, &self.overrides, self.normalize, self.options);
        self.template.render(&release, self.mode)
    }

    /// Rendered name for `path`, without directory or extension.
    pub fn render_name(&self, path: &Path) -> String {
        self.render_fields(&self.extract(path))
    }

    /// New path for `path`. The rendered name is validated before the path is built.
    pub fn propose(&self, path: &Path) -> OsirisResult<PathBuf> {
        let fields = self.extract(path);
        let rendered = self.render_fields(&fields);
        let validation = validate_rendered_name(&rendered);
        if !validation.valid {
            return Err(Error::InvalidName {
                path: path.to_path_buf(),
                issues: validation.issues,
            });
        }

        let target = plan_rename(path, &rendered);
        if fields.is_empty() {
            warn!(
                "Nothing extracted from '{}', renaming to '{}'",
                display_name(path),
                display_name(&target)
            );
        }
        Ok(target)
    }
}

/// Process every file in input order. Stops at the first failure unless `keep_going` is set.
pub fn run(cli: &Cli, config: &Config) -> OsirisResult<()> {
    let renamer = Renamer::from_settings(cli, config)?;

    let total = cli.filenames.len();
    let mut failed = 0;
    for path in &cli.filenames {
        match process_file(&renamer, path, cli) {
            Ok(()) => {}
            Err(e) if cli.keep_going => {
                error!("{e}");
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failed > 0 {
        return Err(Error::Incomplete { failed, total });
    }
    Ok(())
}

fn process_file(renamer: &Renamer, path: &Path, cli: &Cli) -> OsirisResult<()> {
    let target = renamer.propose(path)?;

    if !cli.silent {
        super::common::print_rename(path, &target);
    }
    if cli.dryrun {
        debug!("Dry-run enabled: skipping rename of '{}'", path.display());
        return Ok(());
    }
    rename_file(path, &target)
}
