use anyhow::{Context, Result, bail};
use markweave_config::Config;
use markweave_engine::{Options, hast, html, to_hast};
use markweave_syntax::{event::Event, parse};
use std::io::Read;
use std::path::PathBuf;
use std::{env, io};

const USAGE: &str =
    "Usage: markweave [--tree | --mdast | --hast] [--gfm] [--dangerous] [--config PATH] [FILE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Output {
    #[default]
    Html,
    /// The resolved token events.
    Tree,
    Mdast,
    Hast,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    output: Output,
    gfm: bool,
    dangerous: bool,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tree" => parsed.output = Output::Tree,
            "--mdast" => parsed.output = Output::Mdast,
            "--hast" => parsed.output = Output::Hast,
            "--gfm" => parsed.gfm = true,
            "--dangerous" => parsed.dangerous = true,
            "-h" | "--help" => parsed.help = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
            file => {
                if parsed.file.is_some() {
                    bail!("Only one input file can be given\n{USAGE}");
                }
                parsed.file = Some(PathBuf::from(file));
            }
        }
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            Config::load_from_path(&path)?
                .with_context(|| format!("Config file '{}' does not exist", path.display()))?
        }
        None => Config::load()?.unwrap_or_default(),
    };

    config.parse.gfm |= args.gfm;
    config.render.allow_dangerous_html |= args.dangerous;
    Ok(config)
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read standard input")?;
            Ok(input)
        }
    }
}

/// One event per line, indented by nesting depth.
fn format_events(events: &[Event]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;

    for event in events {
        if event.is_exit() {
            depth = depth.saturating_sub(1);
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!(
            "{:?} {:?} {}:{}\n",
            event.kind, event.name, event.point.line, event.point.column
        ));
        if event.is_enter() {
            depth += 1;
        }
    }
    out
}

fn render(input: &str, output: Output, options: &Options) -> Result<String> {
    let rendered = match output {
        Output::Html => {
            let tree = to_hast(input, options)?;
            let mut html = html::to_html(&tree);
            if !html.is_empty() && !html.ends_with('\n') {
                html.push('\n');
            }
            html
        }
        Output::Tree => {
            let (events, _) = parse(input, &options.parse)?;
            format_events(&events)
        }
        Output::Mdast => markweave_engine::to_mdast(input, options)?.debug_tree(),
        Output::Hast => {
            let tree: hast::Node = to_hast(input, options)?;
            tree.debug_tree()
        }
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = load_config(&args)?;
    let options = config
        .to_options()
        .context("Invalid configuration")?;
    log::debug!(
        "Rendering {} as {:?}",
        args.file
            .as_ref()
            .map_or("stdin".to_string(), |path| path.display().to_string()),
        args.output
    );

    let input = read_input(args.file.as_ref())?;
    print!("{}", render(&input, args.output, &options)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Result<Args> {
        parse_args(values.iter().map(|value| value.to_string()))
    }

    #[test]
    fn no_arguments_render_stdin_as_html() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn flags_and_file() {
        let parsed = args(&["--gfm", "--mdast", "--config", "c.toml", "doc.md"]).unwrap();

        assert_eq!(parsed.output, Output::Mdast);
        assert!(parsed.gfm);
        assert!(!parsed.dangerous);
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert_eq!(parsed.file, Some(PathBuf::from("doc.md")));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&["--nope"]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["a.md", "b.md"]).is_err());
    }

    #[test]
    fn html_output_ends_with_a_newline() {
        let rendered = render("*a*", Output::Html, &Options::default()).unwrap();
        assert_eq!(rendered, "<p><em>a</em></p>\n");
        assert_eq!(render("", Output::Html, &Options::default()).unwrap(), "");
    }

    #[test]
    fn tree_output_indents_events() {
        let rendered = render("a", Output::Tree, &Options::default()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("Enter ") && lines[0].ends_with(" 1:1"));
        assert!(lines[1].starts_with("  Enter "));
        let last = lines[lines.len() - 1];
        assert!(last.starts_with("Exit ") && last.ends_with(" 1:2"));
    }

    #[test]
    fn dangerous_flag_overrides_config() {
        let parsed = args(&["--dangerous", "--config", "/nonexistent/markweave.toml"]).unwrap();
        assert!(load_config(&parsed).is_err());

        let mut config = Config::default();
        config.render.allow_dangerous_html |= parsed.dangerous;
        let options = config.to_options().unwrap();
        assert_eq!(render("<b>", Output::Html, &options).unwrap(), "<b>\n");
    }
}
