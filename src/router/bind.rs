use super::context::InvocationContext;
use super::pattern::Segment;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Converts one token into an [`ArgValue`], or explains why it cannot.
pub type ConvertFn =
    Arc<dyn Fn(&InvocationContext, &str) -> Result<ArgValue, String> + Send + Sync>;

/// Produces candidate completions for one placeholder given the partial
/// token being typed. Must return a finite list; it may be called once per
/// keystroke, so it should be cheap and side-effect free.
pub type CompleterFn = Arc<dyn Fn(&InvocationContext, &str) -> Vec<String> + Send + Sync>;

/// A bound argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(x) => write!(f, "{}", x),
            ArgValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// The destination type declared for a placeholder.
///
/// `accepts` is the dry-run used while matching and completing: it answers
/// "could this token convert?" without producing a value. `convert` is the
/// binding step proper.
#[derive(Clone)]
pub enum ArgType {
    Str,
    Int,
    Float,
    Bool,
    /// One of a fixed set of words, compared case-insensitively; binds the
    /// declared casing.
    Choice(Vec<String>),
    /// A declaration-supplied converter, with a short name for diagnostics.
    Custom { name: String, convert: ConvertFn },
}

impl fmt::Debug for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Str => write!(f, "Str"),
            ArgType::Int => write!(f, "Int"),
            ArgType::Float => write!(f, "Float"),
            ArgType::Bool => write!(f, "Bool"),
            ArgType::Choice(choices) => f.debug_tuple("Choice").field(choices).finish(),
            ArgType::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

impl ArgType {
    pub fn choice<I: IntoIterator<Item = T>, T: Into<String>>(choices: I) -> Self {
        ArgType::Choice(choices.into_iter().map(Into::into).collect())
    }

    pub fn custom<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&InvocationContext, &str) -> Result<ArgValue, String> + Send + Sync + 'static,
    {
        ArgType::Custom {
            name: name.into(),
            convert: Arc::new(convert),
        }
    }

    /// What this type is called in conversion diagnostics.
    pub fn expected(&self) -> String {
        match self {
            ArgType::Str => "a string".to_string(),
            ArgType::Int => "an integer".to_string(),
            ArgType::Float => "a number".to_string(),
            ArgType::Bool => "a boolean".to_string(),
            ArgType::Choice(choices) => format!("one of [{}]", choices.join(", ")),
            ArgType::Custom { name, .. } => name.clone(),
        }
    }

    /// Dry-run check without producing a value.
    pub fn accepts(&self, ctx: &InvocationContext, token: &str) -> bool {
        match self {
            ArgType::Str => true,
            ArgType::Int => token.parse::<i64>().is_ok(),
            ArgType::Float => token.parse::<f64>().is_ok(),
            ArgType::Bool => parse_bool(token).is_some(),
            ArgType::Choice(choices) => {
                choices.iter().any(|c| c.eq_ignore_ascii_case(token))
            }
            ArgType::Custom { convert, .. } => convert(ctx, token).is_ok(),
        }
    }

    pub fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, String> {
        match self {
            ArgType::Str => Ok(ArgValue::Str(token.to_string())),
            ArgType::Int => token
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|_| self.expected()),
            ArgType::Float => token
                .parse::<f64>()
                .map(ArgValue::Float)
                .map_err(|_| self.expected()),
            ArgType::Bool => parse_bool(token)
                .map(ArgValue::Bool)
                .ok_or_else(|| self.expected()),
            ArgType::Choice(choices) => choices
                .iter()
                .find(|c| c.eq_ignore_ascii_case(token))
                .map(|c| ArgValue::Str(c.clone()))
                .ok_or_else(|| self.expected()),
            ArgType::Custom { convert, .. } => convert(ctx, token),
        }
    }
}

// Console convention: accept the spellings people actually type.
fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Declaration metadata for one placeholder: its destination type and an
/// optional completion provider.
#[derive(Clone)]
pub struct ArgSpec {
    pub ty: ArgType,
    pub completer: Option<CompleterFn>,
}

impl Default for ArgSpec {
    fn default() -> Self {
        Self {
            ty: ArgType::Str,
            completer: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("argument '{placeholder}': '{token}' is not {expected}")]
    TypeConversion {
        placeholder: String,
        token: String,
        expected: String,
    },
}

/// Placeholder-name-to-value mapping produced by a successful bind, in
/// pattern order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: IndexMap<String, ArgValue>,
}

impl Bindings {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ArgValue::Float(x)) => Some(*x),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Converts every placeholder token of a matched pattern to its declared
/// type. All-or-nothing: the first failure aborts the bind and the handler
/// is never invoked.
///
/// `tokens` must already be length-matched to `segments`; the matching step
/// guarantees this.
pub fn bind(
    segments: &[Segment],
    args: &IndexMap<String, ArgSpec>,
    tokens: &[&str],
    ctx: &InvocationContext,
) -> Result<Bindings, BindingError> {
    let mut values = IndexMap::new();
    for (segment, token) in segments.iter().zip(tokens) {
        let Segment::Placeholder(name) = segment else {
            continue;
        };
        let spec = args.get(name).cloned().unwrap_or_default();
        match spec.ty.convert(ctx, token) {
            Ok(value) => {
                values.insert(name.clone(), value);
            }
            Err(expected) => {
                return Err(BindingError::TypeConversion {
                    placeholder: name.clone(),
                    token: token.to_string(),
                    expected,
                });
            }
        }
    }
    Ok(Bindings { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::context::test_support::TestSender;
    use crate::router::pattern::compile;

    fn ctx_tokens() -> Vec<&'static str> {
        vec![]
    }

    fn specs(entries: Vec<(&str, ArgType)>) -> IndexMap<String, ArgSpec> {
        entries
            .into_iter()
            .map(|(name, ty)| {
                (
                    name.to_string(),
                    ArgSpec {
                        ty,
                        completer: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_bind_converts_each_placeholder() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        let pattern = compile("add {name} {count} {ratio} {force}").unwrap();
        let args = specs(vec![
            ("name", ArgType::Str),
            ("count", ArgType::Int),
            ("ratio", ArgType::Float),
            ("force", ArgType::Bool),
        ]);

        let bound = bind(
            pattern.segments(),
            &args,
            &["add", "alpha", "3", "0.5", "on"],
            &ctx,
        )
        .unwrap();

        assert_eq!(bound.str("name"), Some("alpha"));
        assert_eq!(bound.int("count"), Some(3));
        assert_eq!(bound.float("ratio"), Some(0.5));
        assert_eq!(bound.bool("force"), Some(true));
        assert_eq!(bound.len(), 4);
    }

    #[test]
    fn test_bind_undeclared_placeholder_defaults_to_str() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        let pattern = compile("{id}").unwrap();

        let bound = bind(pattern.segments(), &IndexMap::new(), &["bbb"], &ctx).unwrap();
        assert_eq!(bound.str("id"), Some("bbb"));
    }

    #[test]
    fn test_bind_failure_reports_placeholder_and_token() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        let pattern = compile("sum {a} {b}").unwrap();
        let args = specs(vec![("a", ArgType::Int), ("b", ArgType::Int)]);

        let err = bind(pattern.segments(), &args, &["sum", "1", "two"], &ctx).unwrap_err();
        assert_eq!(
            err,
            BindingError::TypeConversion {
                placeholder: "b".to_string(),
                token: "two".to_string(),
                expected: "an integer".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "argument 'b': 'two' is not an integer".to_string()
        );
    }

    #[test]
    fn test_bind_choice_is_case_insensitive_and_binds_declared_casing() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        let pattern = compile("{level}").unwrap();
        let args = specs(vec![("level", ArgType::choice(["Low", "High"]))]);

        let bound = bind(pattern.segments(), &args, &["LOW"], &ctx).unwrap();
        assert_eq!(bound.str("level"), Some("Low"));

        let err = bind(pattern.segments(), &args, &["medium"], &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument 'level': 'medium' is not one of [Low, High]".to_string()
        );
    }

    #[test]
    fn test_bind_custom_converter() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        let pattern = compile("{secs}").unwrap();
        let ty = ArgType::custom("a duration in seconds", |_ctx, token| {
            token
                .strip_suffix('s')
                .and_then(|n| n.parse::<i64>().ok())
                .map(ArgValue::Int)
                .ok_or_else(|| "a duration in seconds".to_string())
        });
        let args = specs(vec![("secs", ty)]);

        let bound = bind(pattern.segments(), &args, &["30s"], &ctx).unwrap();
        assert_eq!(bound.int("secs"), Some(30));

        assert!(bind(pattern.segments(), &args, &["30"], &ctx).is_err());
    }

    #[test]
    fn test_accepts_matches_convert() {
        let sender = TestSender::open();
        let tokens = ctx_tokens();
        let ctx = InvocationContext::new(&sender, &tokens);
        for (ty, good, bad) in [
            (ArgType::Int, "42", "x"),
            (ArgType::Float, "4.2", "x"),
            (ArgType::Bool, "off", "2"),
            (ArgType::choice(["aaa", "bbb"]), "BBB", "ccc"),
        ] {
            assert!(ty.accepts(&ctx, good));
            assert!(ty.convert(&ctx, good).is_ok());
            assert!(!ty.accepts(&ctx, bad));
            assert!(ty.convert(&ctx, bad).is_err());
        }
        assert!(ArgType::Str.accepts(&ctx, "anything at all"));
    }
}
