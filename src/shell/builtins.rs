//! Builtin commands handled in-process.

use super::{ShellContext, Status};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// Handler signature shared by every builtin.
pub type BuiltinFn = fn(&[String], &mut ShellContext<'_>) -> io::Result<Status>;

/// Name-to-handler table, built once at startup.
#[derive(Clone)]
pub struct Builtins {
    table: BTreeMap<&'static str, BuiltinFn>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

impl Builtins {
    /// The stock builtin set: `cd`, `exit`, `help`.
    pub fn standard() -> Self {
        let mut table: BTreeMap<&'static str, BuiltinFn> = BTreeMap::new();
        table.insert("cd", builtin_cd);
        table.insert("exit", builtin_exit);
        table.insert("help", builtin_help);
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.table.get(name).copied()
    }

    /// Builtin names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

/// Directory `cd` should switch to, with `~` expanded against `HOME`.
///
/// Returns `None` when no argument was given and `HOME` is unset, or when the
/// argument needs `HOME` for expansion and it is unset.
pub fn resolve_cd_target<E>(args: &[String], env_lookup: &E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String> + ?Sized,
{
    let home = || env_lookup("HOME").filter(|home| !home.is_empty());
    match args.get(1).map(String::as_str) {
        None | Some("~") => home().map(PathBuf::from),
        Some(arg) => match arg.strip_prefix("~/") {
            Some(rest) => home().map(|home| PathBuf::from(home).join(rest)),
            None => Some(PathBuf::from(arg)),
        },
    }
}

fn builtin_cd(args: &[String], ctx: &mut ShellContext<'_>) -> io::Result<Status> {
    let Some(target) = resolve_cd_target(args, ctx.env_lookup) else {
        writeln!(ctx.err, "lsh: cd: HOME not set")?;
        return Ok(Status::Continue);
    };
    if let Err(err) = std::env::set_current_dir(&target) {
        writeln!(ctx.err, "lsh: cd: {}: {err}", target.display())?;
    } else {
        tracing::debug!(dir = %target.display(), "changed directory");
    }
    Ok(Status::Continue)
}

fn builtin_exit(_args: &[String], _ctx: &mut ShellContext<'_>) -> io::Result<Status> {
    Ok(Status::Exit)
}

fn builtin_help(_args: &[String], ctx: &mut ShellContext<'_>) -> io::Result<Status> {
    writeln!(ctx.out, "lsh {}", crate::build_info::VERSION)?;
    writeln!(ctx.out, "Type program names and arguments, and hit enter.")?;
    writeln!(ctx.out, "Tab completes commands and paths.")?;
    writeln!(ctx.out, "The following are built in:")?;
    for name in ctx.builtins.names() {
        writeln!(ctx.out, "  {name}")?;
    }
    writeln!(ctx.out, "Use the man command for information on other programs.")?;
    Ok(Status::Continue)
}
