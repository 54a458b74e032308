use clap::Parser;
use std::path::PathBuf;

/// Lettered menu commands.
pub mod dispatcher;
/// One handler per menu action.
pub mod handlers;
/// Menu rendering.
pub mod menu;
/// The session state machine.
pub mod session;

/// Builds the color-aware help text at runtime from the message catalogue.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let err = if use_colors { "\x1b[91m" } else { "" }; // Bright Red
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<err>", err)
        .replace("</err>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// ugl: manages GAM environments and runs an interactive session in one of them.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Environment to activate right away (matched by name, ignoring case).
    pub environment: Option<String>,

    /// Config root holding launcher.toml. Defaults to $UGL_ROOT or the platform default.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Registry document to use instead of the configured one.
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Do not write a session transcript.
    #[arg(long)]
    pub no_transcript: bool,
}
