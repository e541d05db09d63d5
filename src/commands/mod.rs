//! CLI commands for archgen

use std::fmt::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::config::{Layout, ProjectPaths, ScaffoldConfig};
use crate::fs::LocalFilesystem;
use crate::manifest::{Entry, EntryKind, PathManifest};
use crate::scaffold::{GroupReport, ProgressSink, RunReport, Scaffolder};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Generate the layout in the current working directory
pub fn generate(config: &ScaffoldConfig) -> Result<()> {
    let paths =
        ProjectPaths::from_current_dir(config).context("Failed to read current directory")?;
    generate_at(paths, config)?;
    Ok(())
}

/// Generate the layout for an already resolved project
pub fn generate_at(paths: ProjectPaths, config: &ScaffoldConfig) -> Result<RunReport> {
    println!();
    println!("{}", "🏗️  Flutter Clean Architecture Generator".blue());
    println!();

    let manifest = PathManifest::builtin().context("Built-in manifest is invalid")?;
    let scaffolder = Scaffolder::new(LocalFilesystem, paths).dry_run(config.dry_run);

    let mut progress = ConsoleProgress {
        dry_run: config.dry_run,
    };
    let report = scaffolder.run(&manifest, &mut progress)?;

    print_summary(&report);
    Ok(report)
}

/// Prints one line per labelled group
struct ConsoleProgress {
    dry_run: bool,
}

impl ProgressSink for ConsoleProgress {
    fn group_completed(&mut self, report: &GroupReport) {
        let Some(label) = &report.label else {
            return;
        };
        let verb = if self.dry_run { "Would create" } else { "Created" };
        println!("{} {} {}", "✓".green(), verb, label);
    }
}

fn print_summary(report: &RunReport) {
    println!();
    if report.dry_run {
        println!("{}", "Dry run complete, nothing was written.".yellow());
    } else if report.is_noop() {
        println!("{}", "✅ Architecture already in place, nothing to do.".green());
    } else {
        println!("{}", "✅ Architecture generated successfully!".green());
    }
    println!();
    let location = if report.dry_run {
        "Structure would be created in"
    } else {
        "Structure created in"
    };
    println!(
        "{}",
        format!("📁 {}: {}", location, report.display_root).blue()
    );
    println!(
        "   {} directories, {} files {}, {} already present",
        report.created_dirs(),
        report.created_files(),
        if report.dry_run { "to create" } else { "created" },
        report.existing()
    );
    println!();
}

#[derive(Serialize)]
struct TreeOutput<'a> {
    root: String,
    layout: Layout,
    entries: &'a [Entry],
}

/// Print the manifest for a layout without touching the filesystem
pub fn tree(layout: Layout, format: OutputFormat) -> Result<()> {
    let manifest = PathManifest::builtin().context("Built-in manifest is invalid")?;
    print!("{}", render_tree(&manifest, layout, format)?);
    Ok(())
}

/// Render the manifest as it would be laid out under `layout`
pub fn render_tree(manifest: &PathManifest, layout: Layout, format: OutputFormat) -> Result<String> {
    let root = format!("{}/", layout.relative_root().display());

    match format {
        OutputFormat::Json => {
            let entries = manifest.entries();
            let output = TreeOutput {
                root,
                layout,
                entries: &entries,
            };
            Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
        }
        OutputFormat::Summary => {
            let mut out = String::new();
            writeln!(out, "{}", root.bold())?;
            for group in &manifest.groups {
                let title = group.label.as_deref().unwrap_or(&group.name);
                writeln!(out)?;
                writeln!(out, "{}", title.blue())?;
                for entry in group.entries() {
                    writeln!(out, "  {}", render_entry(&root, &entry))?;
                }
            }
            writeln!(out)?;
            writeln!(
                out,
                "{} directories, {} files",
                manifest.directory_count(),
                manifest.file_count()
            )?;
            Ok(out)
        }
    }
}

fn render_entry(root: &str, entry: &Entry) -> String {
    match entry.kind {
        EntryKind::Directory => format!("{}{}/", root, entry.path),
        EntryKind::File => format!("{}{}", root, entry.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entry_marks_directories() {
        let dir = Entry {
            kind: EntryKind::Directory,
            path: "core/utils".to_string(),
        };
        let file = Entry {
            kind: EntryKind::File,
            path: "main.dart".to_string(),
        };
        assert_eq!(render_entry("lib/", &dir), "lib/core/utils/");
        assert_eq!(render_entry("src/lib/", &file), "src/lib/main.dart");
    }

    #[test]
    fn test_render_tree_json_under_src_layout() {
        let manifest = PathManifest::builtin().unwrap();
        let out = render_tree(&manifest, Layout::Src, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["root"], "src/lib/");
        assert_eq!(json["layout"], "src");

        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 36 + 58);
        assert_eq!(entries[0], serde_json::json!({"kind": "directory", "path": "app"}));
        assert_eq!(
            entries[entries.len() - 1],
            serde_json::json!({"kind": "file", "path": "main.dart"})
        );
    }

    #[test]
    fn test_render_tree_summary_under_src_layout() {
        let manifest = PathManifest::builtin().unwrap();
        let out = render_tree(&manifest, Layout::Src, OutputFormat::Summary).unwrap();

        assert!(out.contains("  src/lib/core/utils/\n"));
        assert!(out.contains("  src/lib/features/auth/domain/usecases/login.dart\n"));
        assert!(out.contains("  src/lib/main.dart\n"));
        assert!(!out.contains("  lib/"));
        assert!(out.ends_with("36 directories, 58 files\n"));
    }
}
