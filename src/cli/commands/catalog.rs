use crate::catalog::{
    self, commission_disclosure, comparison_table, fee_table, first_year_total, AddOutcome,
    SchoolFilters, SortOrder,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::{format_jpy, format_percentage};
use crate::domain::{Coded, Displayable, School, SchoolType};
use crate::errors::DirectoryError;

use super::ParsedArgs;

const SCHOOLS_USAGE: &str =
    "schools [--type T] [--prefecture P] [--search Q] [--tag T] [--sort S] [--page N]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("schools", "List published schools", SCHOOLS_USAGE, cmd_schools)
            .with_aliases(&["ls"]),
        CommandEntry::new("featured", "Show featured schools", "featured", cmd_featured),
        CommandEntry::new("show", "Show one school in detail", "show <slug>", cmd_show),
        CommandEntry::new("search", "Quick search by name or place", "search <text>", cmd_search),
        CommandEntry::new("fees", "Show a school's fee table", "fees <slug>", cmd_fees),
        CommandEntry::new(
            "compare",
            "Manage the comparison list (max 4)",
            "compare [add|remove <slug> | clear | show]",
            cmd_compare,
        ),
    ]
}

fn cmd_schools(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["type", "prefecture", "search", "tag", "sort", "page"])?;
    let mut filters = SchoolFilters {
        page_size: context.config.page_size,
        ..SchoolFilters::default()
    };
    if let Some(raw) = parsed.flag("type").filter(|raw| !raw.eq_ignore_ascii_case("all")) {
        filters.school_type = Some(SchoolType::parse_code(raw)?);
    }
    if let Some(raw) = parsed.flag("sort") {
        filters.sort = SortOrder::parse_code(raw)?;
    }
    if let Some(page) = parsed.parsed_flag::<usize>("page")? {
        filters.page = page;
    }
    if let Some(prefecture) = parsed.flag("prefecture") {
        filters = filters.with_prefecture(prefecture);
    }
    if let Some(tag) = parsed.flag("tag") {
        filters = filters.with_tag(tag);
    }
    if let Some(query) = parsed.flag("search") {
        filters = filters.with_search(query);
    }

    let page = catalog::list_schools(&context.directory, &filters);
    output_section(format!(
        "Schools ({} found, page {}/{}, {})",
        page.total,
        page.page,
        page.total_pages.max(1),
        filters.sort.label()
    ));
    if page.schools.is_empty() {
        io::print_info("No schools match the filters.");
        return Ok(());
    }
    io::print_table(&school_table(&page.schools));
    Ok(())
}

fn school_table(schools: &[School]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Slug"),
        TableColumn::left("名称").max(28),
        TableColumn::left("类型"),
        TableColumn::left("地区"),
        TableColumn::right("首年学费"),
        TableColumn::right("升学率"),
    ]);
    for school in schools {
        table.push(vec![
            school.slug.clone(),
            school.name_zh.clone(),
            school.school_type.label().to_string(),
            school.region(),
            format_jpy(first_year_total(&school.fees)),
            format_percentage(school.university_acceptance_rate),
        ]);
    }
    table
}

fn cmd_featured(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let schools = catalog::featured(&context.directory);
    output_section("Featured schools");
    if schools.is_empty() {
        io::print_info("No featured schools.");
    } else {
        io::print_table(&school_table(&schools));
    }
    Ok(())
}

fn require_school(context: &ShellContext, slug: &str) -> Result<School, CommandError> {
    catalog::find_by_slug(&context.directory, slug)
        .ok_or_else(|| DirectoryError::SchoolNotFound(slug.to_string()).into())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "有"
    } else {
        "无"
    }
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let school = require_school(context, parsed.require(0, "show <slug>")?)?;

    output_section(school.display_label());
    let width = 12;
    io::print_field("类型", school.school_type.label(), width);
    io::print_field("地区", or_dash(Some(school.region()).filter(|r| !r.is_empty())), width);
    io::print_field("地址", or_dash(school.address_ja.clone()), width);
    if let Some(station) = &school.nearest_station {
        let walk = school
            .walking_minutes
            .map(|minutes| format!(" (步行{}分钟)", minutes))
            .unwrap_or_default();
        io::print_field("最近车站", format!("{station}{walk}"), width);
    }
    io::print_field("创立年份", or_dash(school.established_year), width);
    io::print_field("总定员", or_dash(school.total_capacity), width);
    io::print_field("班级人数", or_dash(school.class_size_avg), width);
    io::print_field("中国学生比例", format_percentage(school.chinese_ratio), width);
    io::print_field("N1合格率", format_percentage(school.jlpt_n1_pass_rate), width);
    io::print_field("N2合格率", format_percentage(school.jlpt_n2_pass_rate), width);
    io::print_field("升学率", format_percentage(school.university_acceptance_rate), width);
    io::print_field(
        "宿舍/签证/打工",
        format!(
            "{} / {} / {}",
            yes_no(school.has_dormitory),
            yes_no(school.has_visa_support),
            yes_no(school.has_part_time_support)
        ),
        width,
    );
    if !school.enrollment_periods.is_empty() {
        io::print_field("入学时期", school.enrollment_periods.join("、"), width);
    }
    if !school.tags.is_empty() {
        io::print_field("标签", school.tags.join(" · "), width);
    }
    if let Some(commission) = commission_disclosure(&school) {
        io::print_field("佣金", commission, width);
    }
    if let Some(website) = &school.website {
        io::print_field("网站", website, width);
    }
    if let Some(description) = &school.description_zh {
        io::print_info("");
        io::print_info(description);
    }

    if !school.courses.is_empty() {
        output_section("课程");
        let mut table = Table::new(vec![
            TableColumn::left("课程"),
            TableColumn::right("期间"),
            TableColumn::right("周课时"),
            TableColumn::left("时段"),
            TableColumn::left("对象"),
        ]);
        for course in &school.courses {
            table.push(vec![
                course.name_zh.clone(),
                or_dash(course.duration_months.map(|months| format!("{months}个月"))),
                or_dash(course.hours_per_week),
                or_dash(course.schedule_type.map(|schedule| schedule.label())),
                or_dash(course.target_level.clone()),
            ]);
        }
        io::print_table(&table);
    }
    print_fees(&school);
    Ok(())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "—".to_string(), |value| value.to_string())
}

fn print_fees(school: &School) {
    output_section("费用");
    let fees = fee_table(&school.fees);
    if fees.is_empty() {
        io::print_info("No fee information.");
        return;
    }
    let mut table = Table::new(vec![
        TableColumn::left("项目"),
        TableColumn::left("周期"),
        TableColumn::right("金额"),
        TableColumn::left("必须"),
    ]);
    for row in fees.rows {
        let required = if row.required { "是" } else { "否" };
        table.push(vec![row.name, row.period, row.amount, required.to_string()]);
    }
    io::print_table(&table);
    io::print_info(format!("首年合计: {}", format_jpy(fees.first_year_total)));
}

fn cmd_fees(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let school = require_school(context, parsed.require(0, "fees <slug>")?)?;
    print_fees(&school);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    if query.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: search <text>".into()));
    }
    let hits = catalog::quick_search(&context.directory, &query);
    if hits.is_empty() {
        io::print_info(format!("No schools match `{}`.", query.trim()));
        return Ok(());
    }
    for hit in hits {
        io::print_info(format!("  {:<32} {}", hit.slug, hit.name_zh));
    }
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    match parsed.positional(0).unwrap_or("show") {
        "add" => {
            let slug = parsed.require(1, "compare add <slug>")?;
            require_school(context, slug)?;
            match context.compare.add(slug) {
                AddOutcome::Added => io::print_success(format!(
                    "Added `{}` ({}/{}).",
                    slug,
                    context.compare.len(),
                    catalog::MAX_COMPARE
                )),
                AddOutcome::AlreadyPresent => {
                    io::print_info(format!("`{}` is already in the list.", slug))
                }
                AddOutcome::Full => io::print_warning(format!(
                    "At most {} schools can be compared; remove one first.",
                    catalog::MAX_COMPARE
                )),
            }
            Ok(())
        }
        "remove" | "rm" => {
            let slug = parsed.require(1, "compare remove <slug>")?;
            if context.compare.remove(slug) {
                io::print_success(format!("Removed `{}`.", slug));
            } else {
                io::print_info(format!("`{}` was not in the list.", slug));
            }
            Ok(())
        }
        "clear" => {
            context.compare.clear();
            io::print_success("Comparison list cleared.");
            Ok(())
        }
        "show" => show_comparison(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown compare action `{}` (use add, remove, clear or show)",
            other
        ))),
    }
}

fn show_comparison(context: &ShellContext) -> CommandResult {
    if context.compare.is_empty() {
        io::print_info("The comparison list is empty.");
        io::print_hint("Use `compare add <slug>` to add schools.");
        return Ok(());
    }
    let schools = catalog::by_slugs(&context.directory, context.compare.slugs());
    let refs: Vec<&School> = schools.iter().collect();
    let comparison = comparison_table(&refs);

    output_section(format!("对比 ({})", context.compare.to_query()));
    let mut columns = vec![TableColumn::left("项目")];
    columns.extend(
        comparison
            .headers
            .iter()
            .map(|header| TableColumn::left(header.clone()).max(24)),
    );
    let mut table = Table::new(columns);
    for row in comparison.rows {
        let label = if row.highlight {
            format!("★ {}", row.label)
        } else {
            row.label
        };
        let mut cells = vec![label];
        cells.extend(row.values);
        table.push(cells);
    }
    io::print_table(&table);
    Ok(())
}
