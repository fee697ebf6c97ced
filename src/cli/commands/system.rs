use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::directory::DIRECTORY_SCHEMA_VERSION;
use crate::domain::Coded;
use crate::storage::StorageBackend;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help)
            .with_aliases(&["?"]),
        CommandEntry::new("config", "Show the active configuration", "config", cmd_config),
        CommandEntry::new("save", "Write the directory to disk", "save", cmd_save),
        CommandEntry::new("backup", "Snapshot the directory", "backup [note]", cmd_backup),
        CommandEntry::new("backups", "List directory snapshots, newest first", "backups", cmd_backups),
        CommandEntry::new("restore", "Restore a directory snapshot", "restore <backup>", cmd_restore),
        CommandEntry::new("export", "Write the directory to a JSON file", "export <path>", cmd_export),
        CommandEntry::new("import", "Replace the directory from a JSON file", "import <path>", cmd_import),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("ryugaku_core {}", meta.version));
    io::print_info(format!("  CLI version  : {}", build_info::CLI_VERSION));
    io::print_info(format!("  Schema ver   : v{}", DIRECTORY_SCHEMA_VERSION));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.command(&name) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_config(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!("  locale            : {}", config.locale));
    io::print_info(format!(
        "  currencies        : {} → {}",
        config.primary_currency, config.secondary_currency
    ));
    io::print_info(format!("  exchange_rate     : {}", config.exchange_rate));
    io::print_info(format!(
        "  default estimate  : {} months, {}, {}",
        config.default_duration_months,
        config.default_housing.label(),
        config.default_lifestyle.label()
    ));
    io::print_info(format!("  page_size         : {}", config.page_size));
    io::print_info(format!("  color             : {}", config.ui_color_enabled));
    io::print_info(format!(
        "  file              : {}",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.persist()?;
    io::print_success(format!(
        "Saved to {}.",
        context.storage.directory_path(&context.directory_name).display()
    ));
    Ok(())
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let name = context
        .storage
        .backup(&context.directory, &context.directory_name, note.as_deref())?;
    io::print_success(format!("Backup written: {}", name));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.storage.list_backups(&context.directory_name)?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }
    for (index, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", index + 1, name));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: restore <backup>".into()))?;
    let backups = context.storage.list_backups(&context.directory_name)?;
    // Accept a 1-based index from `backups` as well as a file name.
    let name = match reference.parse::<usize>() {
        Ok(index) if index >= 1 => backups.get(index - 1).cloned().ok_or_else(|| {
            CommandError::InvalidArguments(format!("no backup number {}", index))
        })?,
        _ => reference.to_string(),
    };
    context.directory = context.storage.restore(&context.directory_name, &name)?;
    context.compare.clear();
    io::print_success(format!("Restored {}.", name));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: export <path>".into()))?;
    context
        .storage
        .save_to_path(&context.directory, Path::new(path))?;
    io::print_success(format!("Exported to {}.", path));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: import <path>".into()))?;
    let directory = context.storage.load_from_path(Path::new(path))?;
    let schools = directory.schools.len();
    context.directory = directory;
    context.compare.clear();
    context.persist()?;
    io::print_success(format!("Imported {} schools from {}.", schools, path));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
