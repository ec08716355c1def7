use crossterm::{
    cursor::{Hide, Show as ShowCursor},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, Write, stdout};
use std::time::{Duration, Instant};

mod canvas;
mod card;
mod gift;
mod show;
mod trail;

use canvas::Canvas;
use card::Card;
use gift::GiftBox;
use show::{Pointer, Show};

const HINT_FG: (u8, u8, u8) = (228, 218, 192);

struct Config {
    seed: u64,
    bg: (u8, u8, u8),
    message: String,
    skip_intro: bool,
}

enum Phase {
    Unwrap(GiftBox),
    Show,
}

fn print_usage() {
    eprintln!("termgift - A fireworks greeting behind a gift-box reveal");
    eprintln!();
    eprintln!("Usage: termgift [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed N           Fix the random seed for a reproducible show");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --message TEXT     Set the card message (default: \"Merry Christmas!\")");
    eprintln!("  --skip-intro       Start the show without the gift box");
    eprintln!();
    eprintln!("Click the box to unwrap it. Once the show is running, hold the");
    eprintln!("mouse button to aim fireworks at the pointer.");
    eprintln!();
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn handle_mouse(mouse: MouseEvent, pointer: &mut Pointer, phase: &mut Phase) {
    // Rows double to pixel coordinates because of half-block rendering.
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Phase::Unwrap(gift) = phase {
                gift.click();
            }
            pointer.held = true;
            pointer.x = mouse.column as f32;
            pointer.y = mouse.row as f32 * 2.0;
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            pointer.x = mouse.column as f32;
            pointer.y = mouse.row as f32 * 2.0;
        }
        MouseEventKind::Up(MouseButton::Left) => {
            pointer.held = false;
        }
        _ => {}
    }
}

fn run(config: Config) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    )?;

    let (mut cols, mut rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2, config.bg);
    let mut show = Show::new(config.seed);
    let mut card = Card::new(cols, &config.message);
    let mut phase = if config.skip_intro {
        Phase::Show
    } else {
        Phase::Unwrap(GiftBox::new())
    };
    let mut pointer = Pointer::default();

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(mouse, &mut pointer, &mut phase),
                Event::Resize(new_cols, new_rows) => {
                    // Rebuild the surface and the show at the new size; an
                    // unwrap in progress keeps its step.
                    cols = new_cols;
                    rows = new_rows;
                    canvas = Canvas::new(cols as usize, rows as usize * 2, config.bg);
                    show = Show::new(config.seed);
                    card = Card::new(cols, &config.message);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            let mut reveal_done = false;
            match &mut phase {
                Phase::Unwrap(gift) => {
                    gift.tick();
                    reveal_done = gift.revealed();
                }
                Phase::Show => show.frame(&mut canvas, pointer),
            }
            if reveal_done {
                canvas.clear();
                phase = Phase::Show;
            }
            accumulator -= FIXED_DT;
        }

        match &phase {
            Phase::Unwrap(gift) => {
                gift.draw(&mut canvas);
                canvas.present(&mut stdout)?;
                if gift.awaiting_click() {
                    let hint = "click the box to unwrap it";
                    let col = cols.saturating_sub(hint.len() as u16) / 2 + 1;
                    canvas.overlay_text(&mut stdout, rows.max(1), col, HINT_FG, config.bg, hint)?;
                }
            }
            Phase::Show => {
                canvas.present(&mut stdout)?;
                card.draw(&canvas, &mut stdout, cols, rows)?;
            }
        }
        stdout.flush()?;
    }

    execute!(stdout, ShowCursor, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut config = Config {
        seed: fastrand::u64(..),
        bg: (0, 0, 0),
        message: String::from("Merry Christmas!"),
        skip_intro: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(seed) => {
                            config.seed = seed;
                            i += 2;
                        }
                        Err(_) => {
                            eprintln!("Invalid seed: {}", args[i + 1]);
                            eprintln!("Expected an unsigned integer");
                            std::process::exit(1);
                        }
                    }
                } else {
                    eprintln!("--seed requires a number");
                    std::process::exit(1);
                }
            }
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_hex_color(&args[i + 1]) {
                        config.bg = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid hex color: {}", args[i + 1]);
                        eprintln!("Expected format: RRGGBB (e.g., 1a1b26)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a hex color value");
                    std::process::exit(1);
                }
            }
            "--message" => {
                if i + 1 < args.len() {
                    config.message = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("--message requires text");
                    std::process::exit(1);
                }
            }
            "--skip-intro" => {
                config.skip_intro = true;
                i += 1;
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    run(config)
}
