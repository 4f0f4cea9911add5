//! Starter content for an empty module repository.
//!
//! The workspace only ever sees a list of [`SeedModule`]s. Where they come
//! from (a manifest directory or the built-in starter set) is decided here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::SEED_MANIFEST_FILE;

/// A module definition waiting to be added to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedModule {
    /// Display label
    pub name: String,
    /// Raw markup
    pub code: String,
}

impl SeedModule {
    /// Creates a seed entry, trimming surrounding whitespace from the markup.
    pub fn new(name: impl Into<String>, code: &str) -> Self {
        Self {
            name: name.into(),
            code: code.trim().to_string(),
        }
    }
}

/// `manifest.json` layout: `{"modules": [{"name": "...", "file": "..."}]}`.
#[derive(Debug, Deserialize)]
struct SeedManifest {
    #[serde(default)]
    modules: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    file: String,
}

/// Loads seed modules listed in `<dir>/manifest.json`.
///
/// Each entry's file is read relative to `dir`. Entries whose file cannot be
/// read are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the manifest is missing or cannot be parsed.
pub fn from_manifest(dir: &Path) -> Result<Vec<SeedModule>> {
    let manifest_path = dir.join(SEED_MANIFEST_FILE);
    let content = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read seed manifest: {}", manifest_path.display()))?;
    let manifest: SeedManifest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed manifest: {}", manifest_path.display()))?;

    let mut seeded = Vec::with_capacity(manifest.modules.len());
    for entry in manifest.modules {
        let path = dir.join(&entry.file);
        match fs::read_to_string(&path) {
            Ok(html) => seeded.push(SeedModule::new(entry.name, &html)),
            Err(e) => warn!("Skipping seed module '{}' ({}): {}", entry.name, path.display(), e),
        }
    }

    Ok(seeded)
}

/// Resolves the seed: manifest directory first, built-in starter set as fallback.
///
/// The fallback is used when no directory is given, the manifest cannot be
/// loaded, or it yields no modules.
pub fn resolve(dir: Option<&Path>) -> Vec<SeedModule> {
    if let Some(dir) = dir {
        match from_manifest(dir) {
            Ok(seeded) if !seeded.is_empty() => {
                debug!("Seeding {} modules from {}", seeded.len(), dir.display());
                return seeded;
            }
            Ok(_) => warn!("Seed manifest in {} listed no readable modules", dir.display()),
            Err(e) => warn!("{:#}; using built-in starter modules", e),
        }
    }

    inline_starter()
}

/// Built-in starter modules: header, hero, headline + CTA, footer.
#[must_use]
pub fn inline_starter() -> Vec<SeedModule> {
    vec![
        SeedModule::new(
            "Header - Wrapper + Preheader + Logo",
            r#"
<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width">
<title>{{emailTitle}}</title>
<style>
body { margin:0; padding:0; background:#f5f6fa; }
a { color: {{brandColor}}; }
</style>
</head>
<body style="margin:0; padding:0; background:#f5f6fa;">
<div style="display:none; font-size:0; line-height:0; max-height:0; overflow:hidden;">{{preheaderText}}</div>
<table width="100%" cellpadding="0" cellspacing="0" role="presentation" style="background:#f5f6fa; padding:24px 0;">
  <tr><td align="center">
    <table class="container" width="600" cellpadding="0" cellspacing="0" role="presentation" style="width:600px; background:#ffffff; font-family:Arial, sans-serif;">
      <tr><td align="left" style="padding:20px 28px;">
        <a href="{{brandHomeUrl}}"><img src="{{logoUrl}}" alt="Logo" width="140" style="height:auto;"></a>
      </td></tr>
"#,
        ),
        SeedModule::new(
            "Hero - Full Image",
            r#"
<tr><td align="center" style="padding:0;">
  <img src="{{heroImageUrl}}" alt="{{heroAlt}}" width="600" style="width:100%; height:auto;">
</td></tr>
"#,
        ),
        SeedModule::new(
            "Section - Headline + Subhead + CTA",
            r#"
<tr><td align="center" style="padding:32px 28px;">
  <div style="font-size:28px; color:#111827; font-weight:bold; padding-bottom:8px;">{{headlineText}}</div>
  <div style="font-size:16px; color:#6b7280; padding-bottom:20px;">{{subheadText}}</div>
  <a href="{{ctaURL}}" style="display:inline-block; background:{{ctaColor}}; color:#ffffff; text-decoration:none; padding:12px 20px;">{{ctaText}}</a>
</td></tr>
"#,
        ),
        SeedModule::new(
            "Footer - Legal + Close",
            r#"
      <tr><td align="center" style="padding:20px 28px; font-size:12px; color:#6b7280;">
        {{legalText}}<br><a href="{{unsubscribeUrl}}">Unsubscribe</a>
      </td></tr>
    </table>
  </td></tr>
</table>
</body>
</html>
"#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_placeholders;
    use tempfile::TempDir;

    #[test]
    fn test_inline_starter_is_trimmed_and_has_placeholders() {
        let starter = inline_starter();
        assert_eq!(starter.len(), 4);
        for module in &starter {
            assert_eq!(module.code, module.code.trim());
            assert!(!extract_placeholders(&module.code).is_empty());
        }
        assert_eq!(
            extract_placeholders(&starter[1].code),
            vec!["heroImageUrl", "heroAlt"]
        );
    }

    #[test]
    fn test_from_manifest_reads_files_and_skips_missing() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("hero.html"), "\n<img src='{{url}}'>\n")?;
        fs::write(
            temp.path().join(SEED_MANIFEST_FILE),
            r#"{"modules": [
                {"name": "Hero", "file": "hero.html"},
                {"name": "Ghost", "file": "missing.html"}
            ]}"#,
        )?;

        let seeded = from_manifest(temp.path())?;
        assert_eq!(seeded, vec![SeedModule::new("Hero", "<img src='{{url}}'>")]);
        Ok(())
    }

    #[test]
    fn test_from_manifest_missing_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(from_manifest(temp.path()).is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_inline() -> Result<()> {
        assert_eq!(resolve(None), inline_starter());

        let temp = TempDir::new()?;
        assert_eq!(resolve(Some(temp.path())), inline_starter());

        fs::write(temp.path().join(SEED_MANIFEST_FILE), r#"{"modules": []}"#)?;
        assert_eq!(resolve(Some(temp.path())), inline_starter());
        Ok(())
    }

    #[test]
    fn test_resolve_prefers_manifest() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("a.html"), "<p>{{a}}</p>")?;
        fs::write(
            temp.path().join(SEED_MANIFEST_FILE),
            r#"{"modules": [{"name": "A", "file": "a.html"}]}"#,
        )?;

        let seeded = resolve(Some(temp.path()));
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].name, "A");
        Ok(())
    }
}
