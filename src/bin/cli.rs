use std::io::{self, Write};

use timeline_tool::{Model, Settings, TimelineSession, logging, parse_date, timeline_view};

const DATE_DISPLAY: &str = "%Y-%m-%d";

fn render_model_as_text_table(model: &Model) -> String {
    let col_names = ["program", "id", "name", "date", "color"];
    let mut rows: Vec<[String; 5]> = Vec::new();
    for view in timeline_view(model) {
        let program = view.program;
        for tp in program.time_points() {
            rows.push([
                program.name().to_string(),
                tp.id.clone(),
                tp.name.clone(),
                tp.date.format(DATE_DISPLAY).to_string(),
                view.color.to_string(),
            ]);
        }
        if let Some(conference) = program.conference() {
            let marker = if view.is_last { "*" } else { "" };
            rows.push([
                program.name().to_string(),
                conference.id.clone(),
                format!("{}{marker}", conference.name),
                conference.date.format(DATE_DISPLAY).to_string(),
                view.color.to_string(),
            ]);
        }
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_line = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_line(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_line(&cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  show                                   Show current timeline\n  load <json_path>                       Load a timeline config file\n  restore                                Reload the default config file\n  import <xlsx|csv path>                 Import a DATE/EVENT spreadsheet\n  export [xlsx|csv path]                 Export the timeline as a spreadsheet\n  date <program_id> <time_point_id> <date...>\n                                         Change one time point's date\n  quit|exit                              Exit"
    );
}

fn print_last_error(session: &TimelineSession) {
    if let Some(message) = session.last_error() {
        println!("{message}");
    }
}

fn main() {
    logging::init_tracing("warn");
    let settings = Settings::from_env();
    let mut session = TimelineSession::new(settings.config_path.clone());

    println!("Timeline Tool (CLI) - type 'help' for commands\n");
    if settings.config_path.exists() {
        match session.load_default() {
            Ok(_) => println!(
                "Loaded {} programs from {}.",
                session.model().len(),
                settings.config_path.display()
            ),
            Err(_) => print_last_error(&session),
        }
    }
    println!("{}", render_model_as_text_table(session.model()));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_model_as_text_table(session.model())),
            "load" => match parts.next() {
                Some(path) => match session.load_config_file(path) {
                    Ok(_) => {
                        println!("Loaded {} programs from {}.", session.model().len(), path);
                        println!("{}", render_model_as_text_table(session.model()));
                    }
                    Err(_) => print_last_error(&session),
                },
                None => println!("Usage: load <json_path>"),
            },
            "restore" => match session.load_default() {
                Ok(_) => {
                    println!("Restored initial state.");
                    println!("{}", render_model_as_text_table(session.model()));
                }
                Err(_) => print_last_error(&session),
            },
            "import" => match parts.next() {
                Some(path) => match session.import_spreadsheet_file(path) {
                    Ok(warnings) => {
                        for warning in &warnings {
                            println!("Warning: {}", warning.message);
                        }
                        println!(
                            "Imported {} programs from {}.",
                            session.model().len(),
                            path
                        );
                        println!("{}", render_model_as_text_table(session.model()));
                    }
                    Err(_) => print_last_error(&session),
                },
                None => println!("Usage: import <xlsx|csv path>"),
            },
            "export" => {
                let path = parts
                    .next()
                    .map(Into::into)
                    .unwrap_or_else(|| settings.export_path.clone());
                let rows = session.export_sheet().rows().len();
                match session.export_spreadsheet_file(&path) {
                    Ok(_) => println!("Exported {} rows to {}.", rows, path.display()),
                    Err(_) => print_last_error(&session),
                }
            }
            "date" => {
                let program_id = parts.next();
                let time_point_id = parts.next();
                let date_text = parts.collect::<Vec<_>>().join(" ");
                match (program_id, time_point_id) {
                    (Some(program_id), Some(time_point_id)) if !date_text.is_empty() => {
                        let date = match parse_date(date_text.as_str()) {
                            Ok(d) => d,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        match session.edit_time_point_date(program_id, time_point_id, date) {
                            Ok(_) => {
                                println!("Updated {program_id}/{time_point_id}.");
                                println!("{}", render_model_as_text_table(session.model()));
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: date <program_id> <time_point_id> <date>"),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
