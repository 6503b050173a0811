use super::bind::{ArgSpec, ArgType, Bindings, CompleterFn};
use super::context::{CommandResult, InvocationContext};
use std::sync::Arc;

/// The handler invoked for a matched, authorized, fully-bound command form.
pub type HandlerFn<S> =
    Arc<dyn Fn(&mut S, &InvocationContext, &Bindings) -> CommandResult + Send + Sync>;

/// A builder for declaring one command form: a command name, a pattern of
/// literals and placeholders, per-placeholder metadata, and the handler.
///
/// The pattern defaults to the bare form (`""`), so
/// `CommandBuilder::new("reload", ..).build()` declares a plain `reload`.
pub struct CommandBuilder<S> {
    command: String,
    description: String,
    pattern: String,
    permission: Option<String>,
    aliases: Vec<String>,
    args: Vec<(String, ArgSpec)>,
    handler: HandlerFn<S>,
}

impl<S> CommandBuilder<S> {
    pub fn new<F>(command: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut S, &InvocationContext, &Bindings) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            command: command.into(),
            description: description.into(),
            pattern: String::new(),
            permission: None,
            aliases: Vec::new(),
            args: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// The pattern text after the command name, e.g. `"add {name} {time}"`.
    pub fn pattern(mut self, text: impl Into<String>) -> Self {
        self.pattern = text.into();
        self
    }

    /// Permission node required to execute this form. Unset means open.
    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permission = Some(node.into());
        self
    }

    /// An alternative name for the whole command.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Declares the destination type of a placeholder. Undeclared
    /// placeholders bind as strings.
    pub fn arg(mut self, name: impl Into<String>, ty: ArgType) -> Self {
        let name = name.into();
        let entry = self.entry(&name);
        entry.ty = ty;
        self
    }

    /// Declares a completion provider for a placeholder.
    pub fn completer<F>(mut self, name: impl Into<String>, completer: F) -> Self
    where
        F: Fn(&InvocationContext, &str) -> Vec<String> + Send + Sync + 'static,
    {
        let name = name.into();
        let entry = self.entry(&name);
        entry.completer = Some(Arc::new(completer) as CompleterFn);
        self
    }

    fn entry(&mut self, name: &str) -> &mut ArgSpec {
        if let Some(index) = self.args.iter().position(|(n, _)| n == name) {
            return &mut self.args[index].1;
        }
        self.args.push((name.to_string(), ArgSpec::default()));
        &mut self.args.last_mut().unwrap().1
    }

    pub fn build(self) -> CommandDecl<S> {
        CommandDecl {
            command: self.command,
            description: self.description,
            pattern: self.pattern,
            permission: self.permission,
            aliases: self.aliases,
            args: self.args,
            handler: self.handler,
        }
    }
}

/// One declared command form, ready for registration. Produced by
/// [`CommandBuilder`]; consumed (compiled and validated) by the registry.
pub struct CommandDecl<S> {
    pub(crate) command: String,
    pub(crate) description: String,
    pub(crate) pattern: String,
    pub(crate) permission: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) args: Vec<(String, ArgSpec)>,
    pub(crate) handler: HandlerFn<S>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_bare_pattern() {
        let decl: CommandDecl<()> =
            CommandBuilder::new("reload", "Reload", |_, _, _| CommandResult::success("ok"))
                .build();
        assert_eq!(decl.command, "reload");
        assert_eq!(decl.pattern, "");
        assert!(decl.permission.is_none());
        assert!(decl.aliases.is_empty());
    }

    #[test]
    fn test_builder_merges_arg_and_completer_for_same_placeholder() {
        let decl: CommandDecl<()> =
            CommandBuilder::new("demo", "Demo", |_, _, _| CommandResult::success("ok"))
                .pattern("{id}")
                .arg("id", ArgType::Str)
                .completer("id", |_, _| vec!["aaa".to_string()])
                .build();
        assert_eq!(decl.args.len(), 1);
        assert!(decl.args[0].1.completer.is_some());
    }
}
