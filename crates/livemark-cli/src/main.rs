use std::{
    io::{self, IsTerminal, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
};
use livemark_config::Config;
use livemark_syntax::{Stream, render, stream::chunks, tokenize};

mod painter;

use painter::Painter;

/// Replay a finished reply the way a streaming client would receive it.
#[derive(Parser, Debug)]
#[command(name = "livemark", version, about)]
struct Args {
    /// Message to replay; read from stdin when omitted
    file: Option<PathBuf>,

    /// Characters per fragment (overrides the config file)
    #[arg(long)]
    chunk_size: Option<NonZeroUsize>,

    /// Config file to use instead of ~/.config/livemark/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the token stream instead of the tree
    #[arg(long, conflicts_with_all = ["outline", "live"])]
    tokens: bool,

    /// Print the container outline instead of rendered text
    #[arg(long, conflicts_with = "live")]
    outline: bool,

    /// Redraw the terminal after every fragment
    #[arg(long)]
    live: bool,

    /// Pause between fragments in live mode
    #[arg(long, default_value_t = 30)]
    delay_ms: u64,

    /// Save the effective settings as the config file and exit
    #[arg(long, conflicts_with_all = ["file", "tokens", "outline", "live"])]
    write_config: bool,
}

/// Config file values with command-line overrides applied.
#[derive(Debug, PartialEq)]
struct Settings {
    chunk_size: usize,
    label_fallback: String,
}

impl Settings {
    fn resolve(args: &Args, config: Config) -> Self {
        Self {
            chunk_size: args
                .chunk_size
                .map_or(config.replay_chunk_size, NonZeroUsize::get),
            label_fallback: config.code_label_fallback,
        }
    }

    fn to_config(&self) -> Config {
        Config {
            replay_chunk_size: self.chunk_size,
            code_label_fallback: self.label_fallback.clone(),
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(config_path) => {
            log::debug!("Config path: {}", config_path.display());
            Config::load_or_default(config_path)?
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?.unwrap_or_default()
        }
    };
    Ok(config)
}

/// Write `settings` to the `--config` path, or the default location.
fn write_config(args: &Args, settings: &Settings) -> Result<PathBuf> {
    let config = settings.to_config();
    match &args.config {
        Some(config_path) => {
            config.save_to_path(config_path)?;
            Ok(config_path.clone())
        }
        None => {
            config.save()?;
            Ok(Config::config_path())
        }
    }
}

/// Logger reading its filter from `env`, at `info` unless the variable says otherwise.
fn log_builder(env: env_logger::Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

fn read_input(args: &Args) -> Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn replay_live(input: &str, settings: &Settings, delay: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    let mut stream = Stream::new();

    execute!(stdout, Hide)?;
    let res = (|| -> Result<()> {
        for fragment in chunks(input, settings.chunk_size) {
            stream.feed(fragment)?;
            Painter::new(&mut stdout, &settings.label_fallback)
                .redraw(stream.tree(), &stream.pending())?;
            thread::sleep(delay);
        }
        stream.finish()?;
        Painter::new(&mut stdout, &settings.label_fallback).redraw(stream.tree(), "")?;
        Ok(())
    })();
    execute!(stdout, Show)?;
    res
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, config);

    if args.write_config {
        let config_path = write_config(&args, &settings)?;
        log::info!("Wrote config to {}", config_path.display());
        return Ok(());
    }

    let input = read_input(&args)?;
    log::debug!(
        "Replaying {} bytes in fragments of {}",
        input.len(),
        settings.chunk_size
    );

    let mut stdout = io::stdout().lock();

    if args.tokens {
        for token in tokenize(&input) {
            writeln!(stdout, "{token:?}")?;
        }
        return Ok(());
    }

    if args.live {
        drop(stdout);
        return replay_live(&input, &settings, Duration::from_millis(args.delay_ms));
    }

    let stream = Stream::replay(&input, settings.chunk_size)?;

    if args.outline {
        write!(stdout, "{}", render::outline(stream.tree()))?;
    } else if stdout.is_terminal() {
        Painter::new(&mut stdout, &settings.label_fallback).draw(stream.tree())?;
        stdout.flush()?;
    } else {
        write!(
            stdout,
            "{}",
            render::plain_text(stream.tree(), &settings.label_fallback)
        )?;
    }

    Ok(())
}

fn main() {
    log_builder(env_logger::Env::default()).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("livemark").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_config_values_are_used_by_default() {
        let args = parse(&[]);
        let config = Config {
            replay_chunk_size: 4,
            code_label_fallback: "Snippet".to_string(),
        };

        assert_eq!(
            Settings::resolve(&args, config),
            Settings {
                chunk_size: 4,
                label_fallback: "Snippet".to_string(),
            }
        );
    }

    #[test]
    fn test_chunk_size_flag_overrides_config() {
        let args = parse(&["--chunk-size", "7"]);
        let settings = Settings::resolve(&args, Config::default());

        assert_eq!(settings.chunk_size, 7);
        assert_eq!(settings.label_fallback, "Code");
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        assert!(Args::try_parse_from(["livemark", "--chunk-size", "0"]).is_err());
    }

    #[test]
    fn test_tokens_conflicts_with_outline() {
        assert!(Args::try_parse_from(["livemark", "--tokens", "--outline"]).is_err());
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("absent.toml");
        let args = parse(&["--config", config_path.to_str().unwrap()]);

        assert_eq!(load_config(&args).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "replay_chunk_size = 0\n").unwrap();
        let args = parse(&["--config", config_path.to_str().unwrap()]);

        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_write_config_saves_effective_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/config.toml");
        let path_arg = config_path.to_str().unwrap();
        let args = parse(&["--config", path_arg, "--chunk-size", "5", "--write-config"]);
        let settings = Settings::resolve(&args, load_config(&args).unwrap());

        assert_eq!(write_config(&args, &settings).unwrap(), config_path);

        let reloaded = load_config(&parse(&["--config", path_arg])).unwrap();
        assert_eq!(reloaded.replay_chunk_size, 5);
        assert_eq!(reloaded.code_label_fallback, "Code");
    }

    #[test]
    fn test_write_config_conflicts_with_replay() {
        assert!(Args::try_parse_from(["livemark", "--write-config", "--live"]).is_err());
        assert!(Args::try_parse_from(["livemark", "--write-config", "reply.md"]).is_err());
    }

    #[test]
    fn test_log_level_defaults_to_info() {
        let env = env_logger::Env::new().filter("LIVEMARK_TEST_LOG_UNSET");
        let logger = log_builder(env).build();

        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_log_level_follows_environment() {
        // SAFETY: the variable name is unique to this test and read only here.
        unsafe { std::env::set_var("LIVEMARK_TEST_LOG_DEBUG", "debug") };
        let env = env_logger::Env::new().filter("LIVEMARK_TEST_LOG_DEBUG");
        let logger = log_builder(env).build();

        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_input_file_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reply.md");
        std::fs::write(&path, "hello `world`\n").unwrap();
        let args = parse(&[path.to_str().unwrap()]);

        assert_eq!(read_input(&args).unwrap(), "hello `world`\n");
    }
}
