use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lab::build_info;
use lab::config::{load_config, LabConfig};
use lab::experiments::ExperimentId;
use lab::session::{clear_session, load_session, save_session, LabSession};
use lab::ui::bench_scene::{BenchAction, BenchScreen};
use lab::ui::experiment_select::ExperimentSelectScreen;
use lab::ui::sign_in::SignInScreen;
use lab::ui::{draw_too_small, is_too_small};
use lab::{logging, LabError};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

enum Screen {
    SignIn,
    Select,
    Bench(Box<BenchScreen>),
}

fn print_help() {
    println!("Lab - Virtual Science Laboratory\n");
    println!("Usage: lab [command]\n");
    println!("Commands:");
    println!("  list       List the experiment catalog");
    println!("  run N      Open experiment number N directly");
    println!("  sign-out   Forget the signed-in student");
    println!("  --debug    Log at debug level (combine with any command)");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
}

fn print_catalog() {
    for experiment in ExperimentId::ALL {
        let bench = if experiment.has_simulation() {
            "bench"
        } else {
            "guide only"
        };
        println!(
            "{:>3}  {:<24} grade {}  {:>2} min  {:<6}  {}",
            experiment.number(),
            experiment.title(),
            experiment.grade(),
            experiment.duration_minutes(),
            experiment.difficulty().name(),
            bench
        );
    }
}

fn main() -> io::Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let debug = args.iter().skip(1).any(|a| a == "--debug");
    args.retain(|a| a != "--debug");

    let (mut config, config_error) = load_config();
    if let Some(e) = &config_error {
        eprintln!("Warning: using default settings: {}", e);
    }
    if debug {
        config = config.with_debug_logging();
    }
    let mut direct: Option<ExperimentId> = None;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "list" => {
                print_catalog();
                return Ok(());
            }
            "sign-out" => {
                clear_session(&config.session_path()?)?;
                println!("Signed out.");
                return Ok(());
            }
            "run" => {
                let requested = args
                    .get(2)
                    .and_then(|n| n.parse::<u32>().ok())
                    .map(|n| ExperimentId::from_number(n).ok_or(LabError::UnknownExperiment(n)));
                match requested {
                    Some(Ok(experiment)) if experiment.has_simulation() => {
                        direct = Some(experiment)
                    }
                    Some(Ok(experiment)) => {
                        eprintln!("{}", LabError::NoSimulation(experiment));
                        std::process::exit(1);
                    }
                    Some(Err(e)) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                    None => {
                        eprintln!("Usage: lab run N   (see 'lab list')");
                        std::process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'lab --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    if let Some(e) = &config_error {
        tracing::warn!(error = %e, "config file ignored, using defaults");
    }

    let session_path = config.session_path()?;
    let session = load_session(&session_path);
    tracing::info!(signed_in = session.is_some(), "lab starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &config, session, direct);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "lab exited with an error");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &LabConfig,
    mut session: Option<LabSession>,
    direct: Option<ExperimentId>,
) -> io::Result<()> {
    let session_path = config.session_path()?;
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut rng = rand::thread_rng();

    let mut sign_in = SignInScreen::new();
    let mut select = ExperimentSelectScreen::new();
    let mut screen = match (direct, &session) {
        (Some(experiment), _) => match BenchScreen::open(experiment, config.show_walkthrough) {
            Ok(bench) => Screen::Bench(Box::new(bench)),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidInput, e)),
        },
        (None, Some(_)) => Screen::Select,
        (None, None) => Screen::SignIn,
    };

    loop {
        if let Screen::Bench(bench) = &mut screen {
            bench.tick(&mut rng);
        }

        terminal.draw(|f| {
            let area = f.size();
            if is_too_small(area) {
                draw_too_small(f, area);
                return;
            }
            match (&screen, &session) {
                (Screen::SignIn, _) | (Screen::Select, None) => sign_in.draw(f, area),
                (Screen::Select, Some(s)) => select.draw(f, area, s),
                (Screen::Bench(bench), _) => bench.draw(f, area),
            }
        })?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        let mut next = None;
        match &mut screen {
            Screen::SignIn => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char(c) => sign_in.handle_char_input(c),
                KeyCode::Backspace => sign_in.handle_backspace(),
                KeyCode::Left => sign_in.grade_down(),
                KeyCode::Right => sign_in.grade_up(),
                KeyCode::Enter => {
                    if let Some(new_session) = sign_in.submit() {
                        if let Err(e) = save_session(&session_path, &new_session) {
                            sign_in.validation_error = Some(format!("Save failed: {}", e));
                        } else {
                            tracing::info!(grade = new_session.grade, "signed in");
                            session = Some(new_session);
                            sign_in = SignInScreen::new();
                            select = ExperimentSelectScreen::new();
                            next = Some(Screen::Select);
                        }
                    }
                }
                _ => {}
            },
            Screen::Select => match session.as_ref() {
                None => next = Some(Screen::SignIn),
                Some(current) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up => select.move_up(),
                    KeyCode::Down => select.move_down(current),
                    KeyCode::Char('s') => {
                        clear_session(&session_path)?;
                        tracing::info!("signed out");
                        session = None;
                        next = Some(Screen::SignIn);
                    }
                    KeyCode::Enter => {
                        if let Some(experiment) = select.selected(current) {
                            match BenchScreen::open(experiment, config.show_walkthrough) {
                                Ok(bench) => next = Some(Screen::Bench(Box::new(bench))),
                                Err(e) => select.notice = Some(e.to_string()),
                            }
                        }
                    }
                    _ => {}
                },
            },
            Screen::Bench(bench) => {
                if bench.handle_key(key.code) == BenchAction::Back {
                    next = Some(if session.is_some() {
                        Screen::Select
                    } else {
                        Screen::SignIn
                    });
                }
            }
        }
        if let Some(screen_next) = next {
            screen = screen_next;
        }
    }
}
