use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::card::{CopyOutcome, ImagePool};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::clipboard::Osc52Clipboard;
use crate::config::{self, ConfigFile};
use crate::deck::Deck;
use crate::output::{self, terminal, OutputFormat};
use crate::pagination::{Control, DEFAULT_PAGE_SIZE};
use crate::record::CheatRecord;
use crate::runner::{Options, Runner, SheetSource, DEFAULT_SHEET_URL};
use crate::store::CheatStore;

const PROMPT: &str = "cheats> ";

fn print_banner() {
    const BANNER: &str = r#"
        __               __      __          __
  _____/ /_  ___  ____ _/ /_____/ /__  _____/ /__
 / ___/ __ \/ _ \/ __ `/ __/ __  / _ \/ ___/ //_/
/ /__/ / / /  __/ /_/ / /_/ /_/ /  __/ /__/ ,<
\___/_/ /_/\___/\__,_/\__/\__,_/\___/\___/_/|_|
    "#;
    print!("{}", BANNER.bold().cyan());
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn help_text() -> String {
    [
        "  /TEXT or s TEXT   search rewards (s alone clears the search)",
        "  n, next           next page",
        "  p, prev           previous page",
        "  <number>          go to that page",
        "  r <n>, reveal <n> show the code on card <n>",
        "  c <n>, copy <n>   copy the code on card <n>",
        "  h, help           this help",
        "  q, quit           leave",
    ]
    .join("\n")
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Go(Control),
    Reveal(usize),
    Copy(usize),
    Redraw,
    Help,
    Quit,
    Unknown(String),
}

fn parse_slot(rest: &str, line: &str) -> Result<usize, String> {
    rest.trim()
        .parse::<usize>()
        .map_err(|_| format!("expected a card number in '{}'", line.trim()))
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Redraw;
    }
    if let Some(query) = trimmed.strip_prefix('/') {
        return Command::Search(query.to_string());
    }
    if let Ok(page) = trimmed.parse::<usize>() {
        return Command::Go(Control::Page(page));
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    let slot = |make: fn(usize) -> Command| match parse_slot(rest, trimmed) {
        Ok(n) => make(n),
        Err(e) => Command::Unknown(e),
    };
    match head.to_lowercase().as_str() {
        "s" | "search" => Command::Search(rest.to_string()),
        "n" | "next" => Command::Go(Control::Next),
        "p" | "prev" | "previous" => Command::Go(Control::Previous),
        "r" | "reveal" => slot(Command::Reveal),
        "c" | "copy" => slot(Command::Copy),
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(format!("unknown command '{trimmed}', type h for help")),
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    url: String,
    query: String,
    page: usize,
    page_size: usize,
    timeout: usize,
    proxy: Option<String>,
    output: Option<String>,
    output_format: OutputFormat,
    interactive: bool,
    reveal_all: bool,
    no_color: bool,
    verbose: u8,
    images: ImagePool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let url = args
        .url
        .or(cfg.url)
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| DEFAULT_SHEET_URL.to_string());
    let page_size = args.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(0);
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());
    let query = args.query.or(cfg.query).unwrap_or_default();
    let page = args.page.or(cfg.page).unwrap_or(1).max(1);

    let output = args.output.or(cfg.output);
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };
    let interactive = args.interactive || (output.is_none() && cfg.interactive.unwrap_or(false));
    let reveal_all = args.reveal_all || cfg.reveal_all.unwrap_or(false);

    Ok(RunConfig {
        url,
        query,
        page,
        page_size,
        timeout,
        proxy,
        output,
        output_format,
        interactive,
        reveal_all,
        no_color,
        verbose: args.verbose,
        images: ImagePool::new(cfg.images.unwrap_or_default()),
    })
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cheatdeck={default_level}")));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn draw(deck: &mut Deck, ansi: bool) {
    let frame = deck.frame(Instant::now().into_std());
    print!("{}", terminal::render_frame(&frame, ansi));
}

fn prompt() -> Result<(), String> {
    print!("{PROMPT}");
    std::io::stdout()
        .flush()
        .map_err(|e| format!("failed to write to stdout: {e}"))
}

async fn interact(deck: &mut Deck, ansi: bool) -> Result<(), String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clipboard = Osc52Clipboard::stdout();

    println!("{}", "type h for help".dimmed());
    loop {
        prompt()?;
        let next = match deck.next_revert(Instant::now().into_std()) {
            Some(deadline) => tokio::select! {
                line = lines.next_line() => line,
                _ = tokio::time::sleep_until(Instant::from_std(deadline)) => {
                    println!();
                    draw(deck, ansi);
                    continue;
                }
            },
            None => lines.next_line().await,
        };
        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };

        match parse_command(&line) {
            Command::Search(query) => {
                deck.search(&query);
                draw(deck, ansi);
            }
            Command::Go(control) => {
                if deck.go(control) {
                    draw(deck, ansi);
                }
            }
            Command::Reveal(slot) => {
                if deck.reveal(slot) {
                    draw(deck, ansi);
                } else {
                    println!("no card {slot} on this page");
                }
            }
            Command::Copy(slot) => {
                match deck.copy(slot, &mut clipboard, Instant::now().into_std()) {
                    Some(CopyOutcome::Copied) => draw(deck, ansi),
                    Some(CopyOutcome::CodeHidden) => println!("reveal card {slot} first (r {slot})"),
                    Some(CopyOutcome::Failed) => {}
                    None => println!("no card {slot} on this page"),
                }
            }
            Command::Redraw => draw(deck, ansi),
            Command::Help => println!("{}", help_text()),
            Command::Quit => break,
            Command::Unknown(message) => println!("{message}"),
        }
    }
    Ok(())
}

fn write_output(run: &RunConfig, deck: &mut Deck, path: &str) -> Result<(), String> {
    let frame = deck.frame(Instant::now().into_std());
    let records: Vec<&CheatRecord> = deck.store().filtered().collect();
    let bytes = output::render(
        run.output_format,
        &records,
        &frame,
        deck.store().query().raw(),
    );
    std::fs::write(path, bytes).map_err(|e| format!("failed to write output '{path}': {e}"))?;
    info!("wrote {} cards to {path}", records.len());
    format_kv_line("Output", &format!("{} cards -> {path}", records.len()));
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    let ansi = std::io::stdout().is_terminal();
    if run.interactive {
        print_banner();
        format_kv_line("Sheet", &run.url);
        format_kv_line(
            "Cards",
            &format!(
                "page_size={} reveal_all={} timeout={}",
                run.page_size,
                format_bool(run.reveal_all),
                if run.timeout == 0 {
                    "none".to_string()
                } else {
                    format!("{}s", run.timeout)
                }
            ),
        );
        println!();
    }

    let runner = Runner::new(Options {
        source: SheetSource::Url(run.url.clone()),
        page_size: run.page_size,
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let mut deck = Deck::new(CheatStore::new(run.page_size), run.images.clone());

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed_precise}]")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message("Loading cheat codes");
    let loaded = runner.fetch().await;
    pb.finish_and_clear();

    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            deck.fail(&e.to_string());
            draw(&mut deck, false);
            return Err(e.to_string());
        }
    };
    info!(
        "loaded {} cheats ({} bytes) in {}ms",
        loaded.records.len(),
        loaded.bytes,
        loaded.elapsed.as_millis()
    );
    deck.load(loaded.records);

    if !run.query.trim().is_empty() {
        deck.search(&run.query);
    }
    if run.page > 1 {
        let page = deck.go_to_page(run.page);
        if page != run.page {
            warn!("page {} is out of range, showing page {page}", run.page);
        }
    }
    if run.reveal_all {
        deck.reveal_all();
    }

    if let Some(path) = run.output.as_deref() {
        return write_output(&run, &mut deck, path);
    }

    draw(&mut deck, false);
    if run.interactive {
        interact(&mut deck, ansi).await?;
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };
    init_tracing(args.verbose);

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                if let Err(e) = config::ensure_default_config_file(&path) {
                    warn!("{e}");
                }
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    if run.verbose > 1 {
        info!("run config: {run:?}");
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_without_config() {
        let args = CliArgs::parse_from(["cheatdeck"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.url, DEFAULT_SHEET_URL);
        assert_eq!(run.page_size, 10);
        assert_eq!(run.page, 1);
        assert_eq!(run.timeout, 0);
        assert_eq!(run.output_format, OutputFormat::Text);
        assert!(!run.interactive);
        assert_eq!(run.images, ImagePool::default());
    }

    #[test]
    fn cli_overrides_config() {
        let args = CliArgs::parse_from(["cheatdeck", "-s", "5", "-q", "gem", "--no-color"]);
        let cfg = ConfigFile {
            page_size: Some(20),
            query: Some("coin".to_string()),
            url: Some("https://example.com/sheet.csv".to_string()),
            images: Some(vec!["x.png".to_string()]),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.page_size, 5);
        assert_eq!(run.query, "gem");
        assert_eq!(run.url, "https://example.com/sheet.csv");
        assert!(run.no_color);
        assert_eq!(run.images.images(), ["x.png".to_string()]);
    }

    #[test]
    fn color_flag_beats_no_color_config() {
        let args = CliArgs::parse_from(["cheatdeck", "--color"]);
        let cfg = ConfigFile {
            no_color: Some(true),
            ..Default::default()
        };
        assert!(!build_run_config(args, cfg).unwrap().no_color);
    }

    #[test]
    fn output_format_inferred_from_path() {
        let args = CliArgs::parse_from(["cheatdeck", "-o", "cheats.json"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Json);

        let args = CliArgs::parse_from(["cheatdeck", "-o", "cheats.json", "-A", "html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);
    }

    #[test]
    fn config_interactive_is_ignored_when_exporting() {
        let cfg = ConfigFile {
            interactive: Some(true),
            ..Default::default()
        };
        let args = CliArgs::parse_from(["cheatdeck", "-o", "cheats.txt"]);
        assert!(!build_run_config(args, cfg.clone()).unwrap().interactive);
        let args = CliArgs::parse_from(["cheatdeck"]);
        assert!(build_run_config(args, cfg).unwrap().interactive);
    }

    #[test]
    fn bad_config_format_is_rejected() {
        let args = CliArgs::parse_from(["cheatdeck"]);
        let cfg = ConfigFile {
            output_format: Some("pdf".to_string()),
            ..Default::default()
        };
        assert!(build_run_config(args, cfg).is_err());
    }

    #[test]
    fn parses_prompt_commands() {
        assert_eq!(parse_command("/gem"), Command::Search("gem".to_string()));
        assert_eq!(parse_command("s free coins"), Command::Search("free coins".to_string()));
        assert_eq!(parse_command("s"), Command::Search(String::new()));
        assert_eq!(parse_command(" n "), Command::Go(Control::Next));
        assert_eq!(parse_command("Prev"), Command::Go(Control::Previous));
        assert_eq!(parse_command("3"), Command::Go(Control::Page(3)));
        assert_eq!(parse_command("r 2"), Command::Reveal(2));
        assert_eq!(parse_command("copy 10"), Command::Copy(10));
        assert_eq!(parse_command(""), Command::Redraw);
        assert_eq!(parse_command("q"), Command::Quit);
        assert!(matches!(parse_command("r x"), Command::Unknown(_)));
        assert!(matches!(parse_command("dance"), Command::Unknown(_)));
    }

    #[test]
    fn help_lists_page_numbers_not_letters() {
        let help = help_text();
        assert!(help.contains("  <number>          go to that page"));
        assert!(!help.contains("  N "));
        assert_eq!(parse_command("N"), Command::Go(Control::Next));
        assert_eq!(parse_command("12"), Command::Go(Control::Page(12)));
    }
}
