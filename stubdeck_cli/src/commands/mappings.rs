//! One-shot mapping commands (ls, show, create, edit, rm, save, reset, export, open)

use crate::api::{HttpApi, MappingApi};
use crate::deck::{delete_prompt, replace_response, CreateForm, RESET_PROMPT, SAVED_STATUS};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use stubdeck_common::listing::{render_page, EMPTY_MESSAGE};
use stubdeck_common::{pretty_json, ListView, MappingRow};

/// List all mappings
pub async fn list(api: &HttpApi) -> Result<()> {
    let list = api.list().await.context("Failed to load mappings")?;
    let view = ListView::from_mappings(&list.mappings);

    if view.is_empty() {
        println!("{}", EMPTY_MESSAGE);
        println!();
        println!("Create one with: stubdeck create --url /hello --body hi");
        return Ok(());
    }

    for line in table_lines(view.rows()) {
        println!("{}", line);
    }
    println!();
    println!("{}", style(format!("Loaded {} mappings", view.len())).dim());

    Ok(())
}

/// Print one mapping
pub async fn show(api: &HttpApi, id: &str) -> Result<()> {
    let mapping = api
        .get(id)
        .await
        .with_context(|| format!("Failed to load mapping {}", id))?;
    println!("{}", pretty_json(&mapping.into_value()));
    Ok(())
}

/// Create a mapping from command-line fields
pub async fn create(api: &HttpApi, form: CreateForm) -> Result<()> {
    let payload = form
        .to_payload()
        .map_err(|e| anyhow!("Create failed: {}", e))?;
    api.create(&payload)
        .await
        .map_err(|e| anyhow!("Create failed: {}", e))?;

    let summary = payload.request.url.to_string();
    cliclack::log::success(format!(
        "Created mapping {} {}",
        style(&payload.request.method).cyan(),
        style(summary).green()
    ))?;
    Ok(())
}

/// Replace a mapping's response
pub async fn edit(api: &HttpApi, id: &str, response: &str) -> Result<()> {
    let draft = read_json_arg(response)?;
    replace_response(api, id, &draft)
        .await
        .map_err(|e| anyhow!("Update failed: {}", e))?;
    cliclack::log::success(format!("Updated {}", style(id).cyan()))?;
    Ok(())
}

/// Delete a mapping after confirmation
pub async fn remove(api: &HttpApi, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&delete_prompt(id))? {
        println!("Delete cancelled.");
        return Ok(());
    }

    api.delete(id)
        .await
        .map_err(|e| anyhow!("Delete failed: {}", e))?;
    cliclack::log::success(format!("Deleted {}", style(id).cyan()))?;
    Ok(())
}

/// Ask the backend to write mappings to files
///
/// Always reports success; a failed request is only logged.
pub async fn save(api: &HttpApi) -> Result<()> {
    if let Err(e) = api.save().await {
        tracing::debug!("Save request failed: {}", e);
    }
    cliclack::log::success(SAVED_STATUS)?;
    Ok(())
}

/// Clear in-memory mappings after confirmation
pub async fn reset(api: &HttpApi, yes: bool) -> Result<()> {
    if !yes && !confirm(RESET_PROMPT)? {
        println!("Reset cancelled.");
        return Ok(());
    }

    api.reset()
        .await
        .map_err(|e| anyhow!("Reset failed: {}", e))?;
    cliclack::log::success("Reset complete.")?;
    Ok(())
}

/// Write the mappings page as a standalone HTML document
pub async fn export(api: &HttpApi, out: Option<PathBuf>) -> Result<()> {
    let list = api.list().await.context("Failed to load mappings")?;
    let view = ListView::from_mappings(&list.mappings);
    let now = Utc::now();

    let path = out.unwrap_or_else(|| default_export_path(&now));
    let html = render_page(&view, &export_status(view.len(), &now));
    write_file(&path, &html)?;

    cliclack::log::success(format!(
        "Exported {} mappings to {}",
        view.len(),
        style(path.display()).cyan()
    ))?;
    Ok(())
}

/// Open the server-rendered mappings page in the browser
pub fn open_page(page_url: &str) -> Result<()> {
    if let Err(e) = open::that(page_url) {
        tracing::debug!("Failed to open browser: {}", e);
        cliclack::log::warning("Could not open browser automatically")?;
        cliclack::log::info(format!("Please visit: {}", style(page_url).cyan()))?;
    } else {
        cliclack::log::success(format!("Opened {}", style(page_url).cyan()))?;
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let answer = cliclack::confirm(prompt).initial_value(false).interact()?;
    Ok(answer)
}

/// Inline JSON, or `@path` to read it from a file
fn read_json_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file {}", path)),
        None => Ok(arg.to_string()),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create export directory")?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn default_export_path(now: &DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!("stubdeck-mappings-{}.html", now.format("%Y%m%d-%H%M%S")))
}

fn export_status(count: usize, now: &DateTime<Utc>) -> String {
    format!(
        "Loaded {} mappings (exported {})",
        count,
        now.format("%Y-%m-%d %H:%M UTC")
    )
}

fn table_lines(rows: &[MappingRow]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<38} {:<28} {:<8} {:<40}", "ID", "NAME", "METHOD", "URL"),
        "-".repeat(116),
    ];
    for row in rows {
        lines.push(format!(
            "{:<38} {:<28} {:<8} {:<40}",
            row.id.as_deref().unwrap_or("-"),
            truncate(&row.name, 26),
            row.method,
            truncate(&row.url, 40)
        ));
    }
    lines
}

/// Truncate string with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
