/// glsketch terminal gallery
///
/// Cycles through the rendering demos in the terminal.
/// Controls:
///   - Space / Enter / Tab / Right: Next demo
///   - Backspace / Left: Previous demo
///   - Q/ESC: Quit
///
/// Usage: glsketch-terminal [--demo <index>] [--spin "<options>"]
use anyhow::{bail, Context};
use glsketch_core::TransformOptions;
use glsketch_terminal::{demos, Gallery, TerminalApp};

const USAGE: &str = "Usage: glsketch-terminal [--demo <index>] [--spin \"<options>\"]

  --demo <index>     start on the given demo (0-based)
  --spin <options>   extra transform applied every frame, e.g. \"ry=0.05 rx=0.01\"
  --help             print this message";

#[derive(Debug, Default, PartialEq)]
struct Args {
    demo: usize,
    spin: TransformOptions,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                let value = args.next().context("--demo needs an index")?;
                parsed.demo = value
                    .parse()
                    .with_context(|| format!("invalid demo index {:?}", value))?;
            }
            "--spin" => {
                let value = args.next().context("--spin needs transform options")?;
                parsed.spin = value
                    .parse()
                    .with_context(|| format!("invalid spin {:?}", value))?;
            }
            "-h" | "--help" => parsed.help = true,
            other => bail!("unexpected argument {:?}\n\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut gallery = Gallery::new(demos::all(1.0)?)?.with_spin(args.spin);
    gallery.select(args.demo)?;
    log::info!("starting on demo {} with spin {}", args.demo, args.spin);

    let mut app = TerminalApp::new(gallery).context("failed to query the terminal size")?;
    app.run().context("terminal session failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse_args(args(&[])).unwrap(), Args::default());
    }

    #[test]
    fn test_demo_and_spin() {
        let parsed = parse_args(args(&["--demo", "3", "--spin", "ry=0.05 sx=2"])).unwrap();
        assert_eq!(parsed.demo, 3);
        assert_eq!(parsed.spin.ry, Some(0.05));
        assert_eq!(parsed.spin.sx, 2.0);
        assert!(!parsed.help);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_args(args(&["--demo"])).is_err());
        assert!(parse_args(args(&["--demo", "two"])).is_err());
        assert!(parse_args(args(&["--spin", "w=1"])).is_err());
        assert!(parse_args(args(&["--fast"])).is_err());
    }

    #[test]
    fn test_help() {
        assert!(parse_args(args(&["--help"])).unwrap().help);
    }
}
