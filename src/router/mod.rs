//! The command routing engine: pattern compilation, matching, argument
//! binding, completion and dispatch. Everything here is pure and reentrant;
//! the registry is frozen after registration and the dispatcher holds no
//! per-invocation state.

pub mod bind;
pub mod builder;
pub mod complete;
pub mod context;
pub mod dispatch;
pub mod pattern;
pub mod registry;

pub use bind::{ArgType, ArgValue, Bindings};
pub use builder::{CommandBuilder, CommandDecl};
pub use context::{CommandResult, InvocationContext, Sender};
pub use dispatch::{DispatchError, Dispatcher};
pub use registry::{is_valid_command_name, CommandRegistry, MatchPolicy, RegistrationError};
