pub mod context;
pub mod tree;
pub mod unsafe_app;

pub use context::ShellContext;
pub use tree::{CommandNode, build};
pub use unsafe_app::UnsafeApp;

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::apps::{self, Application};
use crate::config::Config;
use crate::error::{Result, ShellError};
use crate::parse::{self, WordExpander};

/// Registry of all applications, keyed by invocation name.
pub struct AppRegistry {
    apps: HashMap<String, Box<dyn Application>>,
    unsafe_prefix: String,
}

impl AppRegistry {
    /// Registry with no applications.
    pub fn empty(unsafe_prefix: &str) -> Self {
        Self {
            apps: HashMap::new(),
            unsafe_prefix: unsafe_prefix.to_string(),
        }
    }

    /// Build the registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::empty(&config.settings.unsafe_prefix);
        for name in &config.apps.enabled {
            match apps::builtin(name) {
                Some(app) => registry.register(name, app),
                None => log::warn!("config enables unknown application {name}"),
            }
        }
        registry
    }

    /// Register (or replace) an application under `name`.
    pub fn register(&mut self, name: &str, app: Box<dyn Application>) {
        self.apps.insert(name.to_string(), app);
    }

    /// Look up an application by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Application> {
        self.apps.get(name).map(|b| b.as_ref())
    }

    /// Look up an application, failing for unknown names.
    pub fn resolve(&self, name: &str) -> Result<&dyn Application> {
        self.get(name)
            .ok_or_else(|| ShellError::UnknownApp(name.to_string()))
    }

    /// Split the unsafe prefix off an invocation name, if present.
    pub fn strip_unsafe<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.unsafe_prefix.is_empty() {
            return None;
        }
        name.strip_prefix(self.unsafe_prefix.as_str())
    }
}

/// Tree-walking executor for [`CommandNode`]s.
///
/// Single-threaded and depth first. Errors propagate to the caller and
/// abort every sibling not yet evaluated.
pub struct Evaluator<'a> {
    registry: &'a AppRegistry,
    context: &'a mut ShellContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a AppRegistry, context: &'a mut ShellContext) -> Self {
        Self { registry, context }
    }

    /// Evaluate `node` with the given input, writing to `output`.
    pub fn evaluate(
        &mut self,
        node: &CommandNode,
        input: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        match node {
            CommandNode::Call(text) => self.call(text, input, output),
            CommandNode::Pipe(left, right) => {
                // Left finishes completely before right starts.
                let mut buffer = Vec::new();
                self.evaluate(left, input, &mut buffer)?;
                let piped = String::from_utf8_lossy(&buffer);
                self.evaluate(right, &piped, output)
            }
            CommandNode::Sequence(left, right) => {
                self.evaluate(left, input, output)?;
                self.evaluate(right, input, output)
            }
        }
    }

    fn call(&mut self, text: &str, input: &str, output: &mut dyn Write) -> Result<()> {
        let invocation = parse::tokenize(text, self)?.into_invocation()?;
        debug!("invocation: {invocation:?}");

        let registry = self.registry;
        let wrapped;
        let app: &dyn Application = match registry.strip_unsafe(&invocation.name) {
            Some(name) => {
                wrapped = UnsafeApp::new(name, registry.get(name));
                &wrapped
            }
            None => registry.resolve(&invocation.name)?,
        };

        let redirected_input;
        let input = match &invocation.input_file {
            Some(name) => {
                redirected_input = read_input(&self.context.resolve(name), name)?;
                redirected_input.as_str()
            }
            None => input,
        };

        match &invocation.output_file {
            Some(name) => {
                let mut file = open_output(&self.context.resolve(name))?;
                app.exec(self.context, &invocation.args, input, &mut file)?;
                file.flush()?;
                Ok(())
            }
            None => app.exec(self.context, &invocation.args, input, output),
        }
    }
}

impl WordExpander for Evaluator<'_> {
    fn current_dir(&self) -> &Path {
        self.context.current_dir()
    }

    fn substitute(&mut self, command: &str) -> Result<String> {
        let node = CommandNode::call(command)?;
        let mut captured = Vec::new();
        self.evaluate(&node, "", &mut captured)?;
        Ok(String::from_utf8_lossy(&captured).into_owned())
    }
}

/// Full contents of an input redirection target.
fn read_input(path: &Path, name: &str) -> Result<String> {
    if path.is_dir() {
        return Err(ShellError::Redirect("input file may not be a directory".into()));
    }
    if !path.exists() {
        return Err(ShellError::Redirect(format!("{name} does not exist")));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Create (or truncate) an output redirection target.
fn open_output(path: &Path) -> Result<File> {
    if path.is_dir() {
        return Err(ShellError::Redirect("output file may not be a directory".into()));
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::testing::sandbox;
    use std::sync::{Arc, Mutex};

    /// Records every invocation it receives.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(Vec<String>, String)>>>,
    }

    impl Application for Recorder {
        fn exec(
            &self,
            _ctx: &mut ShellContext,
            args: &[String],
            input: &str,
            _output: &mut dyn Write,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((args.to_vec(), input.to_string()));
            Ok(())
        }
    }

    struct Failing;

    impl Application for Failing {
        fn exec(
            &self,
            _ctx: &mut ShellContext,
            _args: &[String],
            _input: &str,
            _output: &mut dyn Write,
        ) -> Result<()> {
            Err(ShellError::app("fail", "it broke"))
        }
    }

    fn registry() -> (AppRegistry, Recorder) {
        let mut registry = AppRegistry::from_config(&Config::default_config());
        let recorder = Recorder::default();
        registry.register("record", Box::new(recorder.clone()));
        registry.register("fail", Box::new(Failing));
        (registry, recorder)
    }

    fn eval(registry: &AppRegistry, ctx: &mut ShellContext, line: &str) -> Result<String> {
        let tree = build(parse::parse(line)?)?;
        let mut out = Vec::new();
        Evaluator::new(registry, ctx).evaluate(&tree, "", &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn registry_from_config() {
        let (registry, _) = registry();
        assert!(registry.get("echo").is_some());
        assert!(registry.get("record").is_some());
        assert_eq!(
            registry.resolve("nope").err().unwrap().to_string(),
            "nope: unknown application"
        );
    }

    #[test]
    fn registry_respects_disabled_apps() {
        let mut config = Config::default_config();
        config.apps.enabled.retain(|n| n != "cd");
        let registry = AppRegistry::from_config(&config);
        assert!(registry.get("cd").is_none());
        assert!(registry.get("pwd").is_some());
    }

    #[test]
    fn strip_unsafe_prefix() {
        let (registry, _) = registry();
        assert_eq!(registry.strip_unsafe("_cat"), Some("cat"));
        assert_eq!(registry.strip_unsafe("cat"), None);
        assert_eq!(AppRegistry::empty("").strip_unsafe("_cat"), None);
    }

    #[test]
    fn pipe_equals_left_output_as_right_input() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        let alone = eval(&registry, &mut ctx, "echo a b").unwrap();
        let piped = eval(&registry, &mut ctx, "echo a b | cat").unwrap();
        assert_eq!(piped, alone);
    }

    #[test]
    fn pipe_feeds_input() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        eval(&registry, &mut ctx, "echo x y | record z").unwrap();
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(*calls, vec![(vec!["z".to_string()], "x y\n".to_string())]);
    }

    #[test]
    fn sequence_short_circuits() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        let err = eval(&registry, &mut ctx, "fail; record x").unwrap_err();
        assert_eq!(err.to_string(), "fail: it broke");
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn pipe_left_failure_skips_right() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        assert!(eval(&registry, &mut ctx, "fail | record").is_err());
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unsafe_call_writes_error() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        let out = eval(&registry, &mut ctx, "_fail now; record after").unwrap();
        assert_eq!(out, "fail: it broke\n");
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn unknown_app() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        let err = eval(&registry, &mut ctx, "frobnicate").unwrap_err();
        assert!(matches!(err, ShellError::UnknownApp(ref n) if n == "frobnicate"));
    }

    #[test]
    fn substitution_resolves_args_first() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        eval(&registry, &mut ctx, "record `echo a`").unwrap();
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0].0, vec!["a"]);
    }

    #[test]
    fn substitution_gets_empty_input() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[]);
        let out = eval(&registry, &mut ctx, "echo piped | echo `cat` done").unwrap();
        assert_eq!(out, "done\n");
    }

    #[test]
    fn redirection_count_error_produces_no_output() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[("a", "1"), ("b", "2")]);
        let err = eval(&registry, &mut ctx, "record < a < b").unwrap_err();
        assert_eq!(err.to_string(), "only one input redirection permitted");
        let err = eval(&registry, &mut ctx, "echo hi > x > y").unwrap_err();
        assert_eq!(err.to_string(), "only one output redirection permitted");
        assert!(!ctx.resolve("x").exists());
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn input_redirection_reads_file() {
        let (registry, recorder) = registry();
        let (_dir, mut ctx) = sandbox(&[("in.txt", "content\n")]);
        eval(&registry, &mut ctx, "echo ignored | record < in.txt").unwrap();
        assert_eq!(recorder.calls.lock().unwrap()[0].1, "content\n");
    }

    #[test]
    fn output_redirection_writes_file() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[("out.txt", "old contents that are long\n")]);
        let out = eval(&registry, &mut ctx, "echo new > out.txt").unwrap();
        assert_eq!(out, "");
        assert_eq!(std::fs::read_to_string(ctx.resolve("out.txt")).unwrap(), "new\n");
    }

    #[test]
    fn redirection_errors() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[("sub/x", "")]);
        assert_eq!(
            eval(&registry, &mut ctx, "cat < missing").unwrap_err().to_string(),
            "missing does not exist"
        );
        assert_eq!(
            eval(&registry, &mut ctx, "cat < sub").unwrap_err().to_string(),
            "input file may not be a directory"
        );
        assert_eq!(
            eval(&registry, &mut ctx, "echo x > sub").unwrap_err().to_string(),
            "output file may not be a directory"
        );
    }

    #[test]
    fn cd_affects_later_siblings() {
        let (registry, _) = registry();
        let (_dir, mut ctx) = sandbox(&[("sub/inner.txt", "")]);
        let out = eval(&registry, &mut ctx, "cd sub; ls").unwrap();
        assert_eq!(out, "inner.txt\n");
    }
}
