use super::bind::{self, ArgSpec, BindingError, Bindings, CompleterFn};
use super::builder::{CommandDecl, HandlerFn};
use super::context::{CommandResult, InvocationContext, Sender};
use super::pattern::{self, CompileError, CompiledPattern, Segment};
use indexmap::IndexMap;
use thiserror::Error;

/// Name rule applied to commands and aliases before they are admitted to
/// the registry. Exposed so external registration layers can pre-validate.
pub fn is_valid_command_name(name: &str) -> bool {
    pattern::is_valid_name(name)
}

/// How literal segments and command names compare against input tokens.
#[derive(Debug, Clone, Copy)]
pub struct MatchPolicy {
    pub case_insensitive: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

impl MatchPolicy {
    pub fn literal_eq(&self, declared: &str, token: &str) -> bool {
        if self.case_insensitive {
            declared.eq_ignore_ascii_case(token)
        } else {
            declared == token
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),
    #[error("command '{command}': invalid alias '{alias}'")]
    InvalidAlias { command: String, alias: String },
    #[error("command '{command}': name '{name}' already in use by '{taken_by}'")]
    NameTaken {
        command: String,
        name: String,
        taken_by: String,
    },
    #[error("command '{command}': pattern '{pattern}': {source}")]
    Pattern {
        command: String,
        pattern: String,
        #[source]
        source: CompileError,
    },
    #[error("command '{command}': pattern '{pattern}' has no placeholder '{name}'")]
    UnknownArgument {
        command: String,
        pattern: String,
        name: String,
    },
}

/// One registered command form: the compiled pattern plus everything needed
/// to authorize, bind and invoke it. Immutable once registered.
pub struct PatternDecl<S> {
    pattern: CompiledPattern,
    description: String,
    permission: Option<String>,
    args: IndexMap<String, ArgSpec>,
    handler: HandlerFn<S>,
}

impl<S> PatternDecl<S> {
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub(crate) fn completer(&self, name: &str) -> Option<&CompleterFn> {
        self.args.get(name).and_then(|spec| spec.completer.as_ref())
    }

    pub fn authorized(&self, sender: &dyn Sender) -> bool {
        match &self.permission {
            None => true,
            Some(node) => sender.is_administrator() || sender.has_permission(node),
        }
    }

    /// Matching proper checks literals only; a placeholder accepts any
    /// token, and conversion failures surface later at the bind stage.
    fn matches(&self, tokens: &[&str], policy: MatchPolicy) -> bool {
        self.pattern.len() == tokens.len()
            && self
                .pattern
                .segments()
                .iter()
                .zip(tokens)
                .all(|(segment, token)| match segment {
                    Segment::Literal(text) => policy.literal_eq(text, token),
                    Segment::Placeholder(_) => true,
                })
    }

    /// Completion-time acceptance of one already-typed token. Unlike
    /// matching, this dry-runs the declared type of a placeholder, so
    /// suggestions never continue a form the token has already ruled out.
    pub(crate) fn segment_accepts(
        &self,
        index: usize,
        token: &str,
        ctx: &InvocationContext,
        policy: MatchPolicy,
    ) -> bool {
        match &self.pattern.segments()[index] {
            Segment::Literal(text) => policy.literal_eq(text, token),
            Segment::Placeholder(name) => match self.args.get(name) {
                Some(spec) => spec.ty.accepts(ctx, token),
                None => true,
            },
        }
    }

    /// Whether the leading `tokens` are each accepted by the segment at the
    /// same position. Used by completion, where the pattern may be longer.
    pub(crate) fn accepts_prefix(
        &self,
        tokens: &[&str],
        ctx: &InvocationContext,
        policy: MatchPolicy,
    ) -> bool {
        tokens
            .iter()
            .enumerate()
            .all(|(i, token)| self.segment_accepts(i, token, ctx, policy))
    }

    pub fn bind(
        &self,
        tokens: &[&str],
        ctx: &InvocationContext,
    ) -> Result<Bindings, BindingError> {
        bind::bind(self.pattern.segments(), &self.args, tokens, ctx)
    }

    pub fn invoke(
        &self,
        state: &mut S,
        ctx: &InvocationContext,
        bindings: &Bindings,
    ) -> CommandResult {
        (self.handler)(state, ctx, bindings)
    }
}

/// All forms registered under one command name, most specific first.
pub struct CommandEntry<S> {
    name: String,
    aliases: Vec<String>,
    patterns: Vec<PatternDecl<S>>,
}

impl<S> CommandEntry<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn patterns(&self) -> &[PatternDecl<S>] {
        &self.patterns
    }

    /// `name` plus the pattern text, for help output.
    pub fn usage(&self, decl: &PatternDecl<S>) -> String {
        if decl.pattern().is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, decl.pattern().text())
        }
    }

    /// The most specific form whose length and literals match, or `None`.
    /// Patterns are kept sorted by descending specificity with declaration
    /// order as the stable tie-break, so the first acceptor wins.
    pub fn find_match(&self, tokens: &[&str], policy: MatchPolicy) -> Option<&PatternDecl<S>> {
        self.patterns.iter().find(|decl| decl.matches(tokens, policy))
    }
}

/// The pattern index: every registered command, in registration order.
/// Built once at startup; read-only during dispatch.
pub struct CommandRegistry<S> {
    entries: IndexMap<String, CommandEntry<S>>,
}

impl<S> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> CommandRegistry<S> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn register(&mut self, decl: CommandDecl<S>) -> Result<(), RegistrationError> {
        let CommandDecl {
            command,
            description,
            pattern,
            permission,
            aliases,
            args,
            handler,
        } = decl;

        if !is_valid_command_name(&command) {
            return Err(RegistrationError::InvalidCommandName(command));
        }
        if let Some(owner) = self.owner_of(&command) {
            if owner != command {
                return Err(RegistrationError::NameTaken {
                    name: command.clone(),
                    command,
                    taken_by: owner.to_string(),
                });
            }
        }

        let compiled = pattern::compile(&pattern).map_err(|source| RegistrationError::Pattern {
            command: command.clone(),
            pattern: pattern.clone(),
            source,
        })?;

        let mut specs = IndexMap::new();
        for (name, spec) in args {
            if !compiled.placeholder_names().any(|p| p == name) {
                return Err(RegistrationError::UnknownArgument {
                    command,
                    pattern: compiled.text().to_string(),
                    name,
                });
            }
            specs.insert(name, spec);
        }

        for alias in &aliases {
            if !is_valid_command_name(alias) {
                return Err(RegistrationError::InvalidAlias {
                    command,
                    alias: alias.clone(),
                });
            }
            if let Some(owner) = self.owner_of(alias) {
                if owner != command {
                    return Err(RegistrationError::NameTaken {
                        command,
                        name: alias.clone(),
                        taken_by: owner.to_string(),
                    });
                }
            }
        }

        let entry = self
            .entries
            .entry(command.clone())
            .or_insert_with(|| CommandEntry {
                name: command,
                aliases: Vec::new(),
                patterns: Vec::new(),
            });
        for alias in aliases {
            if alias != entry.name && !entry.aliases.contains(&alias) {
                entry.aliases.push(alias);
            }
        }
        entry.patterns.push(PatternDecl {
            pattern: compiled,
            description,
            permission,
            args: specs,
            handler,
        });
        // Stable sort: declaration order survives among equally specific
        // patterns.
        entry
            .patterns
            .sort_by(|a, b| b.pattern.specificity().cmp(&a.pattern.specificity()));
        Ok(())
    }

    /// Looks a command up by primary name or alias under the case policy.
    pub fn resolve(&self, name: &str, policy: MatchPolicy) -> Option<&CommandEntry<S>> {
        if let Some(entry) = self.entries.get(name) {
            return Some(entry);
        }
        self.entries.values().find(|entry| {
            policy.literal_eq(&entry.name, name)
                || entry.aliases.iter().any(|a| policy.literal_eq(a, name))
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry<S>> {
        self.entries.values()
    }

    /// Every primary name and alias, in registration order.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for entry in self.entries.values() {
            names.push(entry.name.as_str());
            names.extend(entry.aliases.iter().map(|a| a.as_str()));
        }
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn owner_of(&self, name: &str) -> Option<&str> {
        self.entries
            .values()
            .find(|entry| entry.name == name || entry.aliases.iter().any(|a| a == name))
            .map(|entry| entry.name.as_str())
    }
}
