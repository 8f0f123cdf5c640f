mod config;
mod logging;
mod session;

use std::env;
use std::path::PathBuf;

use jxe_core::actions::UserAction;
use jxe_core::preferences::Locale;
use jxe_core::preferences::ThemePreference;
use jxe_core::state::StatusLevel;
use jxe_core::state::Tab;
use jxe_core::state::TransformKind;
use jxe_core::toolbar::ToolbarAction;
use jxe_exec::error::TransformError;
use jxe_exec::executor::LocalTransformer;

use crate::config::load_config;
use crate::config::resolve_config_path;
use crate::config::save_config;
use crate::session::Session;
use crate::session::SystemClipboard;

type CliSession = Session<LocalTransformer, SystemClipboard>;

fn main() {
    if let Err(err) = run() {
        tracing::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config_arg, args) = split_config_arg(env::args().skip(1).collect())?;
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("jxe {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config_path = resolve_config_path(config_arg)?;
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            let _ = logging::write_bootstrap_crash_log(&err.to_string());
            return Err(err.into());
        }
    };
    if let Err(err) = logging::init(&config.logging) {
        let _ = logging::write_bootstrap_crash_log(&err.to_string());
        return Err(err.into());
    }

    let mut session = Session::new(&config, LocalTransformer, SystemClipboard);
    let rest: Vec<String> = args.collect();
    match command.as_str() {
        "validate" => run_transform(&mut session, TransformKind::Validate, rest),
        "format" => run_transform(&mut session, TransformKind::Format, rest),
        "compress" => run_transform(&mut session, TransformKind::Compress, rest),
        "toolbar" => {
            if rest.is_empty() {
                return Err("toolbar requires at least one file".into());
            }
            for file in rest {
                session.open_file(&PathBuf::from(file))?;
            }
            print_toolbar(&session)
        }
        "compare-clipboard" => {
            let file = single_file_arg(&command, rest)?;
            session.open_file(&file)?;
            session.compare_clipboard()?;
            print_toolbar(&session)
        }
        "set-locale" => {
            let code = single_value_arg(&command, rest)?;
            let locale = Locale::parse(&code).ok_or_else(|| {
                let known: Vec<&str> = Locale::ALL.iter().map(|locale| locale.code()).collect();
                format!("unknown locale '{code}' (expected one of {})", known.join(", "))
            })?;
            session.dispatch(UserAction::SetLocale(locale))?;
            persist_preferences(&session, config, &config_path)
        }
        "set-theme" => {
            let value = single_value_arg(&command, rest)?;
            let theme = ThemePreference::parse(&value)
                .ok_or_else(|| format!("unknown theme '{value}' (expected system, light or dark)"))?;
            session.dispatch(UserAction::SetThemePreference(theme))?;
            persist_preferences(&session, config, &config_path)
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

fn split_config_arg(
    args: Vec<String>,
) -> Result<(Option<PathBuf>, Vec<String>), Box<dyn std::error::Error>> {
    let mut config = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" {
            let Some(value) = args.get(i + 1) else {
                return Err("--config requires a path".into());
            };
            config = Some(PathBuf::from(value));
            i += 2;
        } else {
            rest.push(args[i].clone());
            i += 1;
        }
    }
    Ok((config, rest))
}

fn single_value_arg(command: &str, args: Vec<String>) -> Result<String, Box<dyn std::error::Error>> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(format!("{command} requires an argument").into()),
        (Some(_), Some(extra)) => Err(format!("unsupported argument: {extra}").into()),
    }
}

fn single_file_arg(command: &str, args: Vec<String>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    single_value_arg(command, args).map(PathBuf::from)
}

fn run_transform(
    session: &mut CliSession,
    kind: TransformKind,
    args: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut write = false;
    let mut file = None;
    for arg in args {
        match arg.as_str() {
            "--write" if kind != TransformKind::Validate => write = true,
            other if other.starts_with("--") => {
                return Err(format!("unsupported argument: {other}").into());
            }
            _ if file.is_some() => return Err(format!("unsupported argument: {arg}").into()),
            _ => file = Some(PathBuf::from(arg)),
        }
    }
    let Some(file) = file else {
        return Err(format!("{} requires a file", kind.label()).into());
    };

    session.open_file(&file)?;
    let lang = session
        .state
        .action_target()
        .map(|tab| tab.lang)
        .ok_or("no editor tab to act on")?;
    if !lang.supports_structured_ops() {
        return Err(TransformError::Unsupported { kind, lang }.to_string().into());
    }

    // Compression works on the output panel, which formatting fills.
    let steps: &[TransformKind] = match kind {
        TransformKind::Compress => &[TransformKind::Format, TransformKind::Compress],
        _ => &[kind],
    };
    for step in steps {
        session.dispatch(UserAction::RunTransform(*step))?;
        let status = &session.state.status;
        if status.level == StatusLevel::Error {
            let position = match (status.line, status.column) {
                (Some(line), Some(column)) => format!(":{line}:{column}"),
                (Some(line), None) => format!(":{line}"),
                _ => String::new(),
            };
            return Err(format!("{}{position}: {}", file.display(), status.message).into());
        }
    }

    if kind == TransformKind::Validate {
        println!("{}", session.state.status.message);
        return Ok(());
    }
    if write {
        session.dispatch(UserAction::OutputToEditor)?;
        let path = session.save_target()?;
        eprintln!("{} ({})", session.state.status.message, path.display());
    } else {
        println!("{}", session.state.output);
    }
    Ok(())
}

fn print_toolbar(session: &CliSession) -> Result<(), Box<dyn std::error::Error>> {
    let state = &session.state;
    let active = state.tab(&state.active_id);
    let disabled = state.toolbar();
    let enabled: Vec<&str> = disabled
        .enabled_actions()
        .into_iter()
        .map(ToolbarAction::label)
        .collect();
    let report = serde_json::json!({
        "active": active.map(Tab::title),
        "kind": active.map(|tab| tab.kind().label()),
        "target": state.action_target().map(|tab| tab.title.as_str()),
        "processing": state.is_processing(),
        "enabled": enabled,
        "disabled": disabled,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn persist_preferences(
    session: &CliSession,
    mut config: jxe_core::config::Config,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(ui) = session.changed_preferences() else {
        return Ok(());
    };
    config.ui = ui.clone();
    save_config(path, &config)?;
    tracing::info!(path = %path.display(), "preferences saved");
    println!(
        "locale: {} | theme: {}",
        session.state.preferences.locale.display_name(),
        session.state.preferences.theme.label()
    );
    Ok(())
}

fn print_help() {
    println!("jxe {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  jxe validate FILE");
    println!("  jxe format FILE [--write]");
    println!("  jxe compress FILE [--write]");
    println!("  jxe toolbar FILE...");
    println!("  jxe compare-clipboard FILE");
    println!("  jxe set-locale en|de|es|pt|fr");
    println!("  jxe set-theme system|light|dark");
    println!("  jxe --help");
    println!("  jxe --version");
    println!("Options:");
    println!("  --config PATH   config file (default ~/.config/jxe/config.toml)");
}
