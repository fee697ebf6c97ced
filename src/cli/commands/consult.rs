use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{Coded, ConsultationForm, ConsultationStatus, NamedEntity};
use crate::services::{ConsultationService, SchoolService};

use super::ParsedArgs;

const CONSULT_USAGE: &str =
    "consult --name N [--email E] [--phone P] [--wechat W] [--school SLUG] [--message M]";
const STATUS_USAGE: &str = "consultation-status <id> <pending|contacted|completed> [notes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("consult", "Submit a consultation request", CONSULT_USAGE, cmd_consult),
        CommandEntry::new(
            "consultations",
            "List consultation requests, newest first",
            "consultations [--status S]",
            cmd_consultations,
        ),
        CommandEntry::new(
            "consultation-status",
            "Update a request's status and notes",
            STATUS_USAGE,
            cmd_consultation_status,
        ),
    ]
}

fn cmd_consult(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["name", "email", "phone", "wechat", "school", "message"])?;
    let school_id = parsed
        .flag("school")
        .map(|slug| SchoolService::id_for_slug(&context.directory, slug))
        .transpose()?;
    let form = ConsultationForm {
        name: parsed.flag("name").unwrap_or_default().to_string(),
        email: parsed.flag("email").map(str::to_string),
        phone: parsed.flag("phone").map(str::to_string),
        wechat_id: parsed.flag("wechat").map(str::to_string),
        school_id,
        message: parsed.flag("message").map(str::to_string),
    };
    let request = ConsultationService::submit(&mut context.directory, form)?;
    context.persist()?;
    io::print_success(format!(
        "Consultation received (ref {}). We will contact {} soon.",
        request.short_id(),
        request.contact_line()
    ));
    Ok(())
}

fn cmd_consultations(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["status"])?;
    let requests = match parsed.flag("status") {
        Some(raw) => {
            let status = ConsultationStatus::parse_code(raw)?;
            ConsultationService::with_status(&context.directory, status)
        }
        None => ConsultationService::list(&context.directory),
    };
    output_section(format!("Consultations ({})", requests.len()));
    if requests.is_empty() {
        io::print_info("No consultation requests.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Ref"),
        TableColumn::left("日期"),
        TableColumn::left("姓名"),
        TableColumn::left("联系方式").max(28),
        TableColumn::left("学校").max(20),
        TableColumn::left("状态"),
        TableColumn::left("备注").max(24),
    ]);
    for request in requests {
        let school = request
            .school_id
            .and_then(|id| context.directory.school(id))
            .map(|school| school.name().to_string())
            .unwrap_or_else(|| "—".to_string());
        table.push(vec![
            request.short_id(),
            request.created_at.format("%Y-%m-%d").to_string(),
            request.name.clone(),
            request.contact_line(),
            school,
            request.status.label().to_string(),
            request.admin_notes.clone().unwrap_or_default(),
        ]);
    }
    io::print_table(&table);
    Ok(())
}

fn cmd_consultation_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let reference = parsed.require(0, STATUS_USAGE)?;
    let status = ConsultationStatus::parse_code(parsed.require(1, STATUS_USAGE)?)?;
    let id = ConsultationService::resolve(&context.directory, reference)?;
    ConsultationService::update_status(&mut context.directory, id, status, parsed.rest(2))?;
    context.persist()?;
    io::print_success(format!("Consultation {} marked {}.", reference, status.label()));
    Ok(())
}
