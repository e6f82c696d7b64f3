use std::io;

use tracing::{debug, warn};

use crate::banner;
use crate::config::{Config, ConfigPaths, CredentialResolver, ENGINE_ENV_VAR};
use crate::engine::{Engine, ProcessEngine, Suggester, Unconfigured};
use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::Theme;
use crate::input::TerminalSource;
use crate::shell::Shell;

/// Resolves configuration once, wires the terminal to the engine and runs
/// the session until the user leaves.
pub fn launch(flags: &Flags) -> Result<(), ShellError> {
    let theme = Theme::detect();
    let quiet = flags.is_set("quiet");
    let mut stdout = io::stdout();

    if !quiet {
        banner::print_banner(&mut stdout)?;
    }

    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;
    let connection = CredentialResolver::new(&paths)
        .resolve(flags.get_value("profile"), flags.get_value("endpoint"))?;
    debug!(?connection, "resolved connection");

    if !quiet {
        banner::print_configuration(&mut stdout, &connection, &theme)?;
    }

    let bridge = config
        .engine
        .as_deref()
        .and_then(|command| ProcessEngine::new(command, connection));

    let (engine, suggester): (Box<dyn Engine>, Box<dyn Suggester>) = match bridge {
        Some(engine) => {
            debug!(program = engine.program(), "using engine bridge");
            (Box::new(engine.clone()), Box::new(engine))
        }
        None => {
            warn!(
                "no execution engine configured; set `engine` in {} or {}",
                paths.rc_path.display(),
                ENGINE_ENV_VAR
            );
            (Box::new(Unconfigured), Box::new(Unconfigured))
        }
    };

    let source = TerminalSource::new(suggester, &config.prompt, theme)?;
    Shell::new(source, engine, stdout, &config.prompt, theme).run()
}
