// tracetty: step-through execution-trace player for the terminal

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tracetty::player::Player;
use tracetty::trace::format::TraceDocument;
use tracetty::trace::sample;
use tracetty::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <trace.json> [--speed <ms>]", program_name);
    eprintln!("       {} --demo [--speed <ms>]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --demo         Play the bundled event-loop teaching trace");
    eprintln!("  --speed <ms>   Delay between automatic steps (default 250)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --demo                  # See the player in action", program_name);
    eprintln!("  {} mytrace.json --speed 100", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("tracetty");

    let mut demo = false;
    let mut speed_ms: Option<u64> = None;
    let mut trace_path: Option<String> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--demo" => demo = true,
            "--speed" => {
                let value = match iter.next() {
                    Some(value) => value,
                    None => {
                        eprintln!("Error: --speed requires a value in milliseconds");
                        print_usage(program_name);
                        std::process::exit(1);
                    }
                };
                match value.parse::<u64>() {
                    Ok(ms) if ms > 0 => speed_ms = Some(ms),
                    _ => {
                        eprintln!("Error: invalid speed '{}': must be a positive integer", value);
                        std::process::exit(1);
                    }
                }
            }
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage(program_name);
                std::process::exit(1);
            }
            other => {
                if trace_path.is_some() {
                    eprintln!("Error: more than one trace file given");
                    print_usage(program_name);
                    std::process::exit(1);
                }
                trace_path = Some(other.to_string());
            }
        }
    }

    // Load the trace
    let (source, snapshots) = if demo {
        let (source, snapshots) = sample::event_loop_demo();
        (Some(source), snapshots)
    } else {
        let path = match trace_path {
            Some(path) => path,
            None => {
                eprintln!("Error: no trace file provided");
                eprintln!();
                print_usage(program_name);
                std::process::exit(1);
            }
        };

        if !Path::new(&path).exists() {
            eprintln!("Error: File '{}' not found", path);
            std::process::exit(1);
        }

        eprintln!("Loading {}...", path);
        let document = match TraceDocument::from_file(Path::new(&path)) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        document.into_parts()
    };

    eprintln!("Loaded trace with {} step(s).", snapshots.len());

    let mut player = match Player::new(snapshots, source) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(ms) = speed_ms {
        player.set_speed(Duration::from_millis(ms));
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(player);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
