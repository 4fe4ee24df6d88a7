use crate::conflict::find_conflicts;
use crate::error::LoadError;
use crate::grid::GridLayout;
use crate::grid::group::group;
use crate::grid::layout::layout;
use crate::meeting::ScheduleResult;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod color;
mod conflict;
mod error;
mod grid;
mod meeting;
mod render;
mod time;

const PAGER_THRESHOLD: usize = 40;

#[derive(Parser)]
#[command(version, about = "Weekly calendar view for a generated class schedule")]
struct Args {
    /// Path to the schedule JSON returned by the scheduling service
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "COURSEGRID_SCHEDULE",
        default_value = "data/schedule.json"
    )]
    schedule: PathBuf,

    /// Run a single command (e.g. "grid") and exit
    #[arg(short, long, value_name = "CMD")]
    command: Option<String>,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

struct Session {
    schedule: ScheduleResult,
    layout: GridLayout,
}

impl Session {
    fn load(path: &Path) -> Result<Session, LoadError> {
        let schedule = ScheduleResult::load_from_file(path)?;
        let layout = layout(&schedule);
        info!(
            path = %path.display(),
            classes = schedule.classes.len(),
            events = layout.events.len(),
            "loaded schedule"
        );
        Ok(Session { schedule, layout })
    }
}

enum Flow {
    Continue,
    Exit,
}

fn paginate(content: &str) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn show(content: String, interactive: bool) {
    if interactive && content.lines().count() > PAGER_THRESHOLD {
        paginate(&content);
    } else {
        println!("{}", content);
    }
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [filter]     - List classes in a table, optionally: o - online only, p - in-person only");
    println!("  grid            - Show the weekly calendar grid");
    println!("  legend          - Show the color assigned to each section");
    println!("  conflicts       - List meetings that overlap or leave less than 5 minutes between them");
    println!("  load <file>     - Load another schedule JSON file");
    println!("  export <file>   - Write the computed layout as JSON");
    println!("  help / ?        - Show this help menu");
    println!("  exit / quit     - Exit\n");
}

fn run_command(session: &mut Session, line: &str, interactive: bool) -> Flow {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(cmd) = parts.first() else {
        return Flow::Continue;
    };

    match *cmd {
        "ls" => {
            let sub = parts.get(1).copied().unwrap_or("a");
            let table = match sub {
                "o" | "online" => render::online_table(&session.schedule),
                "p" | "physical" => render::physical_table(&session.schedule),
                _ => render::class_table(&session.schedule),
            };
            show(table, interactive);
        }
        "grid" => show(render::weekly_grid(&session.layout), interactive),
        "legend" => show(render::legend(&session.layout, &session.schedule), interactive),
        "conflicts" => {
            let conflicts = find_conflicts(&group(&session.schedule.classes));
            show(render::conflict_table(&conflicts), interactive);
        }
        "load" => match parts.get(1) {
            Some(path) => match Session::load(Path::new(path)) {
                Ok(loaded) => {
                    *session = loaded;
                    println!("Loaded {} classes.", session.schedule.classes.len());
                }
                Err(e) => tracing::error!("{}", e),
            },
            None => println!("Usage: load <file>"),
        },
        "export" => match parts.get(1) {
            Some(path) => match session.layout.save_to_file(Path::new(path)) {
                Ok(()) => println!("Wrote {} events to {}.", session.layout.events.len(), path),
                Err(e) => tracing::error!("{}", e),
            },
            None => println!("Usage: export <file>"),
        },
        "help" | "?" => print_help(),
        "exit" | "quit" => return Flow::Exit,
        other => println!("Unknown command: {}", other),
    }
    Flow::Continue
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coursegrid=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::load(&args.schedule)?;

    if let Some(command) = args.command {
        run_command(&mut session, &command, false);
        return Ok(());
    }

    println!(
        "Loaded {} classes from {}. Type 'help' for commands.",
        session.schedule.classes.len(),
        args.schedule.display()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "grid", "legend", "conflicts", "load", "export", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                if let Flow::Exit = run_command(&mut session, trimmed, true) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
