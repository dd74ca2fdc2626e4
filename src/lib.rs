//! ushell: a small shell language engine with built-in applications.
//!
//! A command line is split into sequences (`;`) and pipes (`|`), each
//! atomic command is tokenized (quoting, back-quote substitution,
//! wildcards, `<`/`>` redirection) and dispatched to an
//! [`Application`](crate::apps::Application) looked up in an
//! [`AppRegistry`](crate::eval::AppRegistry) built from configuration.
//!
//! # Architecture
//!
//! - **[`parse`]**: command-line grammar, atomic tokenizer, wildcard expansion, type definitions.
//! - **[`eval`]**: command tree, execution context, registry, tree-walking evaluator, unsafe decorator.
//! - **[`apps`]**: the application trait and the built-ins (`cd`, `ls`, `grep`, ...).
//! - **[`config`]**: configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: diagnostic log setup and the command history log under `~/.local/share/ushell/`.

/// Application trait and built-in implementations.
pub mod apps;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error type and result alias.
pub mod error;
/// Evaluation engine: command tree, registry, evaluator, context.
pub mod eval;
/// Diagnostic and history logging.
pub mod logging;
/// Shell parsing: grammar, tokenizer, globbing, types.
pub mod parse;

use std::io::Write;

use config::Config;
use error::Result;
use eval::{AppRegistry, Evaluator, ShellContext};

/// A shell session: registry and execution context that persist across
/// evaluated lines.
pub struct Shell {
    registry: AppRegistry,
    context: ShellContext,
    config: Config,
}

impl Shell {
    pub fn new(config: Config, context: ShellContext) -> Self {
        let registry = AppRegistry::from_config(&config);
        Self {
            registry,
            context,
            config,
        }
    }

    /// Evaluate one command line with empty input, writing to `output`.
    ///
    /// The first error aborts the rest of the line; effects already
    /// produced (output written, directory changed) are kept.
    pub fn eval(&mut self, line: &str, output: &mut dyn Write) -> Result<()> {
        let parsed = parse::parse(line)?;
        log::debug!("parse tree: {parsed:?}");
        let tree = eval::build(parsed)?;
        let mut evaluator = Evaluator::new(&self.registry, &mut self.context);
        evaluator.evaluate(&tree, "", output)?;
        output.flush()?;
        Ok(())
    }

    pub fn context(&self) -> &ShellContext {
        &self.context
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access for registering additional applications.
    pub fn registry_mut(&mut self) -> &mut AppRegistry {
        &mut self.registry
    }

    /// Prompt text for the current working directory.
    pub fn prompt(&self) -> String {
        self.config.prompt_for(self.context.current_dir())
    }
}

/// Evaluate a command line with the default configuration, rooted at the
/// process working directory.
///
/// This is the main entry point for tests and simple usage.
/// For the CLI with a user config, build a [`Shell`] directly.
pub fn evaluate(line: &str, output: &mut dyn Write) -> Result<()> {
    let context = ShellContext::from_process()?;
    Shell::new(Config::default_config(), context).eval(line, output)
}
