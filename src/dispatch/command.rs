//! Launch command classification.
//!
//! Rows of the decision table are independent; more than one can fire for
//! the same argv.
//!
//! | Condition | Action |
//! |---|---|
//! | always | wait for database |
//! | `argv[0]` in `broker_commands` | wait for broker |
//! | `argv[0] == server` | initialization, production |
//! | `argv[0..3] == [interpreter, management_entry, dev_server]` | initialization, development |

use std::ffi::{OsStr, OsString};

use crate::config::CommandsConfig;
use crate::init::InitMode;

/// What to do before handing off to a given argv.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchPlan {
    pub wait_for_broker: bool,
    /// Initialization runs, in order. Empty for most commands.
    pub init: Vec<InitMode>,
}

/// Classify `argv` against the configured command names.
///
/// `argv[0]` is compared exactly, without basename stripping.
pub fn classify(argv: &[OsString], commands: &CommandsConfig) -> LaunchPlan {
    let mut plan = LaunchPlan::default();

    if commands
        .broker_commands
        .iter()
        .any(|name| arg_is(argv, 0, name))
    {
        plan.wait_for_broker = true;
    }

    if arg_is(argv, 0, &commands.server) {
        plan.init.push(InitMode::Production);
    }

    if arg_is(argv, 0, &commands.interpreter)
        && arg_is(argv, 1, &commands.management_entry)
        && arg_is(argv, 2, &commands.dev_server)
    {
        plan.init.push(InitMode::Development);
    }

    plan
}

fn arg_is(argv: &[OsString], index: usize, expected: &str) -> bool {
    argv.get(index)
        .is_some_and(|arg| arg.as_os_str() == OsStr::new(expected))
}
