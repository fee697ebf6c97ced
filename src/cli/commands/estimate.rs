use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{highlight, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::{format_cny, format_jpy, yen_per_unit};
use crate::domain::{Coded, HousingType, LifestyleTier};
use crate::services::{EstimateQuery, EstimateService, LivingCostService};

use super::ParsedArgs;

const ESTIMATE_USAGE: &str =
    "estimate <slug> <city> [--housing dormitory|apartment] [--lifestyle low|mid|high] [--months N]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "estimate",
            "Estimate total study costs for a school and city",
            ESTIMATE_USAGE,
            cmd_estimate,
        )
        .with_aliases(&["calc"]),
        CommandEntry::new("cities", "List cities with living-cost data", "cities", cmd_cities),
        CommandEntry::new("living", "Show a city's monthly living costs", "living <city>", cmd_living),
        CommandEntry::new("rate", "Show or set the JPY→CNY rate", "rate [value]", cmd_rate),
    ]
}

fn cmd_estimate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["housing", "lifestyle", "months"])?;
    let slug = parsed.require(0, ESTIMATE_USAGE)?;
    let city = parsed.require(1, ESTIMATE_USAGE)?;

    let mut query = EstimateQuery::new(slug, city);
    query.housing_type = match parsed.flag("housing") {
        Some(raw) => HousingType::parse_code(raw)?,
        None => context.config.default_housing,
    };
    query.lifestyle_tier = match parsed.flag("lifestyle") {
        Some(raw) => LifestyleTier::parse_code(raw)?,
        None => context.config.default_lifestyle,
    };
    query.duration_months = parsed
        .parsed_flag::<i32>("months")?
        .unwrap_or(context.config.default_duration_months);

    let estimate = EstimateService::estimate(&context.directory, &context.estimator(), &query)?;
    let result = &estimate.result;

    output_section(format!(
        "{} · {} · {} · {}",
        estimate.school.name_zh,
        estimate.city,
        estimate.housing_type.label(),
        estimate.lifestyle_tier.label()
    ));
    let width = 10;
    io::print_field("学费", format_jpy(result.tuition_total), width);
    io::print_field(
        "生活费",
        format!(
            "{} ({} × {}个月)",
            format_jpy(result.living_total),
            format_jpy(result.monthly_living_total),
            result.duration_months
        ),
        width,
    );
    io::print_field("合计", highlight(&format_jpy(result.grand_total)), width);
    io::print_field(
        "人民币约",
        format!(
            "{} (1元 ≈ ¥{})",
            format_cny(result.grand_total_secondary),
            yen_per_unit(context.config.exchange_rate)
        ),
        width,
    );

    if result.monthly_breakdown.is_empty() {
        io::print_warning(format!("No living-cost data for `{}`.", estimate.city));
        io::print_hint("Use `cities` to see which cities have data.");
        return Ok(());
    }
    output_section("每月生活费明细");
    let mut table = Table::new(vec![TableColumn::left("类别"), TableColumn::right("每月")]);
    for item in &result.monthly_breakdown {
        table.push(vec![item.label.clone(), format_jpy(item.monthly_amount)]);
    }
    io::print_table(&table);
    Ok(())
}

fn cmd_cities(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let cities = LivingCostService::cities(&context.directory);
    if cities.is_empty() {
        io::print_info("No living-cost data.");
    } else {
        io::print_info(cities.join("  "));
    }
    Ok(())
}

fn cmd_living(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let city = parsed.require(0, "living <city>")?;
    let rows = LivingCostService::for_city(&context.directory, city);
    if rows.is_empty() {
        io::print_warning(format!("No living-cost data for `{}`.", city));
        return Ok(());
    }
    output_section(format!("{} 每月生活费", city));
    let mut table = Table::new(vec![
        TableColumn::left("类别"),
        TableColumn::right(LifestyleTier::Low.label()),
        TableColumn::right(LifestyleTier::Mid.label()),
        TableColumn::right(LifestyleTier::High.label()),
        TableColumn::left("备注").max(30),
    ]);
    for row in rows {
        table.push(vec![
            row.category.label().to_string(),
            format_jpy(row.monthly_low),
            format_jpy(row.monthly_mid),
            format_jpy(row.monthly_high),
            row.notes_zh.clone().unwrap_or_default(),
        ]);
    }
    io::print_table(&table);
    Ok(())
}

fn cmd_rate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        io::print_info(format!(
            "1 JPY = {} CNY (1元 ≈ ¥{})",
            context.config.exchange_rate,
            yen_per_unit(context.config.exchange_rate)
        ));
        return Ok(());
    };
    let rate: f64 = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid rate `{}`", raw)))?;
    let mut updated = context.config.clone();
    updated.exchange_rate = rate;
    updated.validate()?;
    context.config = updated;
    context.persist_config()?;
    io::print_success(format!("Exchange rate set to {}.", rate));
    Ok(())
}
