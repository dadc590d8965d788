//! `check` command: report how extra public directories resolved.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::{
    host::HostPaths,
    public::{Dropped, PublicDirs, ResolvedOption},
};

/// Everything `check --json` prints.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub paths: &'a HostPaths,
    pub options: &'a [ResolvedOption],
    pub dropped: &'a [Dropped],
}

impl<'a> CheckReport<'a> {
    pub fn new(dirs: &'a PublicDirs) -> Self {
        Self {
            paths: dirs.paths(),
            options: dirs.options(),
            dropped: dirs.dropped(),
        }
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("public:  {}\n", self.paths.public.display()));
        out.push_str(&format!("output:  {}\n", self.paths.output.display()));

        for option in self.options {
            out.push_str(&format!(
                "{} [{}] {} ({}, log {})\n",
                "ok".green(),
                option.index,
                option.directory.display(),
                option.copy_phase,
                option.log_level.as_str()
            ));
        }
        for dropped in self.dropped {
            out.push_str(&format!(
                "{} [{}] {}: {}\n",
                "dropped".red(),
                dropped.index,
                dropped.entry,
                dropped.reason
            ));
        }

        out
    }
}

/// Print the report. Fails when any entry was dropped.
pub fn check_dirs(dirs: &PublicDirs, json: bool) -> Result<()> {
    let report = CheckReport::new(dirs);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_plain());
    }

    if !report.dropped.is_empty() {
        bail!(
            "{} of {} entries dropped",
            report.dropped.len(),
            report.dropped.len() + report.options.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtraPublicConfig;
    use std::fs;
    use tempfile::TempDir;

    fn setup(dirs: &str) -> (TempDir, PublicDirs) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("custom")).unwrap();
        let paths = HostPaths {
            root: dir.path().to_path_buf(),
            output: dir.path().join("dist"),
            public: dir.path().join("public"),
        };
        let table: toml::Table = toml::from_str(&format!("dirs = {dirs}")).unwrap();
        let config = ExtraPublicConfig {
            strict: false,
            dirs: table["dirs"].as_array().unwrap().clone(),
        };
        let public = PublicDirs::setup(&config, &paths).unwrap();
        (dir, public)
    }

    #[test]
    fn test_check_passes_when_all_resolve() {
        let (_dir, dirs) = setup(r#"["custom"]"#);
        assert!(check_dirs(&dirs, true).is_ok());
    }

    #[test]
    fn test_check_fails_on_dropped() {
        let (_dir, dirs) = setup(r#"["custom", "missing"]"#);
        let err = check_dirs(&dirs, false).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 entries dropped");
    }

    #[test]
    fn test_json_shape() {
        let (dir, dirs) = setup(r#"[{ dir = "custom", copy = "after", log = true }, 7]"#);
        let json = serde_json::to_value(CheckReport::new(&dirs)).unwrap();

        let option = &json["options"][0];
        assert_eq!(option["index"], 0);
        assert_eq!(option["copy_phase"], "after");
        assert_eq!(option["log_level"], "minimal");
        assert_eq!(
            option["directory"],
            dir.path().join("custom").to_str().unwrap()
        );
        assert_eq!(json["dropped"][0]["index"], 1);
        assert_eq!(json["dropped"][0]["entry"], "7");
    }

    #[test]
    fn test_plain_lists_both() {
        owo_colors::set_override(false);
        let (_dir, dirs) = setup(r#"["custom", "missing"]"#);
        let text = CheckReport::new(&dirs).render_plain();
        assert!(text.contains("ok [0]"));
        assert!(text.contains("dropped [1] \"missing\""));
    }
}
