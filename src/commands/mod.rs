mod echo;
mod help;
mod perm;
mod quit;
mod reload;
mod sum;

use crate::router::{CommandRegistry, RegistrationError};
use crate::state::AppState;

/// Registers every built-in command. A declaration that fails to register
/// is reported and skipped; the rest still register.
pub fn register_all_commands(registry: &mut CommandRegistry<AppState>) -> Vec<RegistrationError> {
    let mut errors = Vec::new();
    let declarations = [
        help::create(),
        quit::create(),
        echo::create(),
        sum::create(),
        perm::create(),
        reload::create(),
    ];
    for decl in declarations.into_iter().flatten() {
        if let Err(error) = registry.register(decl) {
            errors.push(error);
        }
    }
    errors
}
