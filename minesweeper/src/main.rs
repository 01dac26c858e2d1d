use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{warn, Level as LogLevel};

use minefield::{
    board::{Cell, Count},
    game::{CannotClickReason, ClickOutcome, Game, Level},
};

fn main() -> io::Result<()> {
    let matches = App::new("Minesweeper")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Simple command line minesweeper game.")
        .arg(
            Arg::with_name("level")
                .short("l")
                .long("level")
                .value_name("LEVEL")
                .help("board size preset")
                .takes_value(true)
                .default_value("easy")
                .possible_values(&["tiny", "easy", "medium", "hard", "custom"]),
        )
        .arg(
            Arg::with_name("rows")
                .long("rows")
                .value_name("ROWS")
                .help("number of rows for a custom board")
                .takes_value(true)
                .required_if("level", "custom"),
        )
        .arg(
            Arg::with_name("cols")
                .long("cols")
                .value_name("COLS")
                .help("number of columns for a custom board")
                .takes_value(true)
                .required_if("level", "custom"),
        )
        .arg(
            Arg::with_name("mines")
                .long("mines")
                .value_name("MINES")
                .help("number of mines for a custom board")
                .takes_value(true)
                .required_if("level", "custom"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed for a reproducible board")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("log game events to stderr"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if matches.is_present("verbose") {
            LogLevel::DEBUG
        } else {
            LogLevel::WARN
        })
        .init();

    let level = match choose_level(&matches) {
        Ok(level) => level,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };
    let game = match matches.value_of("seed") {
        Some(seed) => match seed.parse() {
            Ok(seed) => Game::new(level, seed),
            Err(_) => {
                eprintln!("invalid seed: {}, must be a 32-bit integer", seed);
                std::process::exit(2);
            }
        },
        None => Game::with_rng(level, &mut rand::thread_rng()),
    };
    let mut game = match game {
        Ok(game) => game,
        Err(err) => {
            warn!("Could not set up the board: {}", err);
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    play(&mut game, &mut input)?;

    println!();
    show_revealed_board(&game);
    if game.is_solved() {
        println!("All mines cleared. You win!");
    } else if game.is_exploded() {
        println!("Boom! You lose.");
    }
    Ok(())
}

/// Pick the [`Level`] from the command line arguments.
fn choose_level(matches: &ArgMatches) -> Result<Level, String> {
    Ok(match matches.value_of("level").unwrap_or("easy") {
        "tiny" => Level::Tiny,
        "easy" => Level::Easy,
        "medium" => Level::Medium,
        "hard" => Level::Hard,
        "custom" => Level::Custom {
            rows: parse_arg(matches, "rows")?,
            cols: parse_arg(matches, "cols")?,
            mines: parse_arg(matches, "mines")?,
        },
        _ => unreachable!(),
    })
}

fn parse_arg(matches: &ArgMatches, name: &str) -> Result<usize, String> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format!("--{} is required for custom boards", name))?;
    raw.parse()
        .map_err(|_| format!("invalid {}: {}, must be a non-negative number", name, raw))
}

/// Run the command loop until the game ends or the player quits.
fn play(game: &mut Game, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    enum Command {
        Click(usize, usize),
        Flag(usize, usize),
        Unflag(usize, usize),
        Help,
        Quit,
    }
    println!("Open every cell without a mine. Type help or ? for commands.");
    while !game.status().is_over() {
        /// Matcher for commands that take a cell.
        static CELL_CMD: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?P<cmd>click|open|c|o|flag|f|unflag|u)\s+
        (?:(?:at|on)\s+)?
        (?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)$",
            )
            .unwrap()
        });

        println!();
        println!(
            "Mines left: {}    Status: {}",
            game.mine_left(),
            game.status()
        );
        show_board(game.board().iter_rows().map(|row| row.iter().copied()));
        println!();

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => {
                if let Some(captures) = CELL_CMD.captures(other) {
                    let row = match captures.name("row").unwrap().as_str().parse() {
                        Ok(row) => row,
                        Err(_) => {
                            println!("invalid row: {}", captures.name("row").unwrap().as_str());
                            return None;
                        }
                    };
                    let col = match captures.name("col").unwrap().as_str().parse() {
                        Ok(col) => col,
                        Err(_) => {
                            println!("invalid col: {}", captures.name("col").unwrap().as_str());
                            return None;
                        }
                    };
                    Some(match captures.name("cmd").unwrap().as_str() {
                        "click" | "open" | "c" | "o" => Command::Click(row, col),
                        "flag" | "f" => Command::Flag(row, col),
                        _ => Command::Unflag(row, col),
                    })
                } else {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::Click(row, col) => match game.click_at(row, col) {
                ClickOutcome::Revealed(_) | ClickOutcome::Exploded => {}
                ClickOutcome::Rejected(CannotClickReason::OutOfBounds) => {
                    println!(
                        "({}, {}) is off the board, which is {}x{}.",
                        row,
                        col,
                        game.row_count(),
                        game.col_count()
                    );
                }
                ClickOutcome::Rejected(CannotClickReason::Flagged) => {
                    println!("That cell is flagged. Unflag it first.");
                }
                ClickOutcome::Rejected(CannotClickReason::AlreadyVisible) => {
                    println!("That cell is already open.");
                }
                // The loop stops once the game is over.
                ClickOutcome::Rejected(CannotClickReason::GameOver) => unreachable!(),
            },
            Command::Flag(row, col) => {
                if !game.flag_at(row, col) {
                    println!("Can't flag ({}, {}).", row, col);
                }
            }
            Command::Unflag(row, col) => {
                if !game.un_flag_at(row, col) {
                    println!("({}, {}) isn't flagged.", row, col);
                }
            }
            Command::Quit => break,
            Command::Help => {
                println!(
                    "Available Commands:
    click <row>,<col>     open the cell. Aliases: open, c, o.
    flag <row>,<col>      mark the cell as a mine. Alias: f.
    unflag <row>,<col>    remove a flag. Alias: u.
    quit                  give up and show the board."
                );
            }
        }
    }
    Ok(())
}

/// Print out the board with every mine shown.
fn show_revealed_board(game: &Game) {
    enum RevealedCell {
        Hidden(Cell),
        Mine,
        WrongFlag,
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Hidden(cell) => fmt::Display::fmt(cell, f),
                RevealedCell::Mine => f.pad("*"),
                RevealedCell::WrongFlag => f.pad("f"),
            }
        }
    }
    show_board(game.board().iter_rows().map(|row| {
        row.iter().map(|&cell| match cell.count() {
            Count::Mine if !cell.visible() && !cell.is_flagged() => RevealedCell::Mine,
            Count::Adjacent(_) if cell.is_flagged() => RevealedCell::WrongFlag,
            _ => RevealedCell::Hidden(cell),
        })
    }))
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.map(|cell| format!("{:^3}", cell)).collect())
        .collect();
    let cols = rows.first().map_or(0, Vec::len);
    print!("   ");
    for i in 0..cols {
        print!("{:^3}", i);
    }
    println!();
    for (i, row) in rows.iter().enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{}", cell);
        }
        println!();
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
