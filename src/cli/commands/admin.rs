use std::path::Path;

use serde_json::Value;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::catalog::commission_disclosure;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{Coded, FeeItem, LivingCostCategory, LivingCostEntry, School};
use crate::services::{
    ContentService, DashboardService, LivingCostService, SchoolService, CONTENT_KEYS,
};
use crate::utils::persistence::read_json;

use super::ParsedArgs;

const ADMIN_SCHOOLS_USAGE: &str = "admin-schools [--status draft|published]";
const LIVING_SET_USAGE: &str = "living-set <city> <category> <low> <mid> <high> [notes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Back-office totals for schools and consultations",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "admin-schools",
            "List every school, drafts included",
            ADMIN_SCHOOLS_USAGE,
            cmd_admin_schools,
        ),
        CommandEntry::new("publish", "Publish a school", "publish <slug>", cmd_publish),
        CommandEntry::new("unpublish", "Hide a school from listings", "unpublish <slug>", cmd_unpublish),
        CommandEntry::new("feature", "Mark or unmark a featured school", "feature <slug> on|off", cmd_feature),
        CommandEntry::new(
            "school-import",
            "Add a school from a JSON file, or update the one with the same slug",
            "school-import <file.json>",
            cmd_school_import,
        ),
        CommandEntry::new(
            "fees-import",
            "Replace a school's fee schedule from a JSON array",
            "fees-import <slug> <file.json>",
            cmd_fees_import,
        ),
        CommandEntry::new(
            "living-set",
            "Insert or replace a city's living-cost row",
            LIVING_SET_USAGE,
            cmd_living_set,
        ),
        CommandEntry::new(
            "living-remove",
            "Delete a city's living-cost row",
            "living-remove <city> <category>",
            cmd_living_remove,
        ),
        CommandEntry::new(
            "content",
            "Show or edit homepage content blocks",
            "content [key] [--set JSON | --reset yes]",
            cmd_content,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let counts = DashboardService::counts(&context.directory);
    output_section("管理后台");
    io::print_field("学校总数", counts.schools, 10);
    io::print_field("已发布", counts.published_schools, 10);
    io::print_field("草稿", counts.draft_schools(), 10);
    io::print_field("咨询总数", counts.consultations, 10);
    io::print_field("待处理咨询", counts.pending_consultations, 10);
    Ok(())
}

fn cmd_admin_schools(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["status"])?;
    let published = match parsed.flag("status") {
        None | Some("all") => None,
        Some("draft") => Some(false),
        Some("published") => Some(true),
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown status `{}`; usage: {}",
                other, ADMIN_SCHOOLS_USAGE
            )))
        }
    };
    let schools: Vec<&School> = DashboardService::all_schools(&context.directory)
        .into_iter()
        .filter(|school| published.map_or(true, |wanted| school.is_published == wanted))
        .collect();

    output_section(format!("All schools ({})", schools.len()));
    if schools.is_empty() {
        io::print_info("No schools.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Slug"),
        TableColumn::left("学校名称").max(24),
        TableColumn::left("类型"),
        TableColumn::left("地区"),
        TableColumn::left("佣金").max(24),
        TableColumn::left("状态"),
    ]);
    for school in schools {
        let state = if school.is_published { "已发布" } else { "草稿" };
        table.push(vec![
            school.id.to_string(),
            school.slug.clone(),
            school.name_zh.clone(),
            school.school_type.label().to_string(),
            school.region(),
            commission_disclosure(school).unwrap_or_else(|| "—".to_string()),
            state.to_string(),
        ]);
    }
    io::print_table(&table);
    Ok(())
}

fn set_published(context: &mut ShellContext, args: &[&str], published: bool) -> CommandResult {
    let usage = if published { "publish <slug>" } else { "unpublish <slug>" };
    let parsed = ParsedArgs::parse(args, &[])?;
    let slug = parsed.require(0, usage)?;
    let id = SchoolService::id_for_slug(&context.directory, slug)?;
    SchoolService::set_published(&mut context.directory, id, published)?;
    context.persist()?;
    let state = if published { "published" } else { "unpublished" };
    io::print_success(format!("`{}` {}.", slug, state));
    Ok(())
}

fn cmd_publish(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    set_published(context, args, true)
}

fn cmd_unpublish(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    set_published(context, args, false)
}

fn cmd_feature(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let slug = parsed.require(0, "feature <slug> on|off")?;
    let featured = match parsed.positional(1).unwrap_or("on") {
        "on" | "yes" => true,
        "off" | "no" => false,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "expected on or off, got `{}`",
                other
            )))
        }
    };
    let id = SchoolService::id_for_slug(&context.directory, slug)?;
    SchoolService::set_featured(&mut context.directory, id, featured)?;
    context.persist()?;
    io::print_success(format!("`{}` featured: {}.", slug, featured));
    Ok(())
}

fn cmd_school_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let path = parsed.require(0, "school-import <file.json>")?;
    let school: School = read_json(Path::new(path))?;
    let slug = school.slug.clone();
    match context.directory.school_by_slug(&slug).map(|existing| existing.id) {
        Some(id) => {
            SchoolService::edit(&mut context.directory, id, school)?;
            io::print_success(format!("Updated `{}`.", slug));
        }
        None => {
            let id = SchoolService::add(&mut context.directory, school)?;
            io::print_success(format!("Added `{}` as #{}.", slug, id));
        }
    }
    context.persist()
}

fn cmd_fees_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let slug = parsed.require(0, "fees-import <slug> <file.json>")?;
    let path = parsed.require(1, "fees-import <slug> <file.json>")?;
    let id = SchoolService::id_for_slug(&context.directory, slug)?;
    let fees: Vec<FeeItem> = read_json(Path::new(path))?;
    let count = fees.len();
    SchoolService::replace_fees(&mut context.directory, id, fees)?;
    context.persist()?;
    io::print_success(format!("Replaced fees of `{}` ({} items).", slug, count));
    Ok(())
}

fn parse_amount(raw: &str) -> Result<i64, CommandError> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))
}

fn cmd_living_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let city = parsed.require(0, LIVING_SET_USAGE)?;
    let category = LivingCostCategory::parse_code(parsed.require(1, LIVING_SET_USAGE)?)?;
    let low = parse_amount(parsed.require(2, LIVING_SET_USAGE)?)?;
    let mid = parse_amount(parsed.require(3, LIVING_SET_USAGE)?)?;
    let high = parse_amount(parsed.require(4, LIVING_SET_USAGE)?)?;
    let mut entry = LivingCostEntry::new(city, category, low, mid, high);
    if let Some(notes) = parsed.rest(5) {
        entry = entry.with_notes(notes);
    }
    if !entry.tiers_ordered() {
        io::print_warning("Tier amounts are not in low ≤ mid ≤ high order.");
    }
    LivingCostService::upsert(&mut context.directory, entry)?;
    context.persist()?;
    io::print_success(format!("{} / {} saved.", city, category.label()));
    Ok(())
}

fn cmd_living_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let city = parsed.require(0, "living-remove <city> <category>")?;
    let category = LivingCostCategory::parse_code(parsed.require(1, "living-remove <city> <category>")?)?;
    LivingCostService::remove(&mut context.directory, city, category)?;
    context.persist()?;
    io::print_success(format!("{} / {} removed.", city, category.label()));
    Ok(())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn cmd_content(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["set", "reset"])?;
    let Some(key) = parsed.positional(0) else {
        output_section("Site content");
        for key in CONTENT_KEYS {
            let stored = context.directory.site_content.contains_key(key);
            let source = if stored { "custom" } else { "default" };
            io::print_info(format!("  {:<24} {}", key, source));
        }
        return Ok(());
    };

    if let Some(raw) = parsed.flag("set") {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| CommandError::InvalidArguments(format!("invalid JSON: {}", err)))?;
        ContentService::set(&mut context.directory, key, value)?;
        context.persist()?;
        io::print_success(format!("`{}` updated.", key));
        return Ok(());
    }
    if parsed.flag("reset").is_some() {
        ContentService::reset(&mut context.directory, key)?;
        context.persist()?;
        io::print_success(format!("`{}` reset to default.", key));
        return Ok(());
    }

    let value = ContentService::get(&context.directory, key)?;
    output_section(key);
    io::print_info(pretty(&value));
    Ok(())
}
