use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cheatdeck",
    version,
    about = "searchable, paginated cheat-code cards from a published spreadsheet",
    long_about = "cheatdeck fetches a published spreadsheet CSV of cheat codes and shows them as cards you can search, page through, reveal and copy.\n\nExamples:\n  cheatdeck\n  cheatdeck -q gem -P 2\n  cheatdeck -I\n  cheatdeck -q coin -o cheats.html\n\nTip: Use --config to keep a different sheet URL and page size."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Published sheet CSV URL."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.cheatdeck/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'q',
        long = "qry",
        visible_alias = "query",
        value_name = "TEXT",
        help_heading = "Cards",
        help = "Only show cards whose reward contains TEXT (case-insensitive)."
    )]
    pub query: Option<String>,

    #[arg(
        short = 'P',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Cards",
        help = "Page to show first (clamped to the last page)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Cards",
        help = "Cards per page (1-100)."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'R',
        long = "ra",
        visible_alias = "reveal-all",
        help_heading = "Cards",
        help = "Show every code without an explicit reveal."
    )]
    pub reveal_all: bool,

    #[arg(
        short = 'I',
        long = "int",
        visible_alias = "interactive",
        help_heading = "Cards",
        help = "Keep a prompt open to search, page, reveal and copy."
    )]
    pub interactive: bool,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (0 waits forever)."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the matching cards to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html)."
    )]
    pub output_format: Option<String>,
}
