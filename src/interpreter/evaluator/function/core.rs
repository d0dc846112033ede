use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{array, conversion, file, input, numeric, random, string, time},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the run's context, a slice of evaluated argument values
/// and the position of the call. The argument count has already been checked
/// against the builtin's [`Arity`].
pub type BuiltinFn = fn(&mut Context, &[Value], Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with at least `n` arguments.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (the metadata a builtin value points to),
/// - `BUILTIN_TABLE` (static table bound into every run's global scope),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A standard-library function.
        pub struct BuiltinDef {
            /// The global name the builtin is bound to.
            pub name:  &'static str,
            /// The accepted argument counts.
            pub arity: Arity,
            func:      BuiltinFn,
        }
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "int"           => { arity: Arity::Exact(1), func: |_, args, at| conversion::int(args, at) },
    "float"         => { arity: Arity::Exact(1), func: |_, args, at| conversion::float(args, at) },
    "str"           => { arity: Arity::Exact(1), func: |_, args, _| Ok(conversion::str(args)) },
    "bool"          => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Bool(args[0].is_truthy())) },
    "type"          => { arity: Arity::Exact(1), func: |_, args, _| Ok(args[0].type_name().into()) },
    "abs"           => { arity: Arity::Exact(1), func: |_, args, at| numeric::abs(args, at) },
    "round"         => { arity: Arity::OneOf(&[1, 2]), func: |_, args, at| numeric::round(args, at) },
    "floor"         => { arity: Arity::Exact(1), func: |_, args, at| numeric::floor_ceil("floor", args, at) },
    "ceil"          => { arity: Arity::Exact(1), func: |_, args, at| numeric::floor_ceil("ceil", args, at) },
    "sqrt"          => { arity: Arity::Exact(1), func: |_, args, at| numeric::sqrt(args, at) },
    "min"           => { arity: Arity::AtLeast(1), func: |_, args, at| numeric::min_max("min", args, at) },
    "max"           => { arity: Arity::AtLeast(1), func: |_, args, at| numeric::min_max("max", args, at) },
    "log"           => { arity: Arity::OneOf(&[1, 2]), func: |_, args, at| numeric::log(args, at) },
    "log2"          => { arity: Arity::Exact(1), func: |_, args, at| numeric::log2(args, at) },
    "sin"           => { arity: Arity::Exact(1), func: |_, args, at| numeric::sin(args, at) },
    "cos"           => { arity: Arity::Exact(1), func: |_, args, at| numeric::cos(args, at) },
    "tan"           => { arity: Arity::Exact(1), func: |_, args, at| numeric::tan(args, at) },
    "atan"          => { arity: Arity::Exact(1), func: |_, args, at| numeric::atan(args, at) },
    "len"           => { arity: Arity::Exact(1), func: |_, args, at| string::len(args, at) },
    "substr"        => { arity: Arity::Exact(3), func: |_, args, at| string::substr(args, at) },
    "pos"           => { arity: Arity::Exact(2), func: |_, args, at| string::pos(args, at) },
    "upper"         => { arity: Arity::Exact(1), func: |_, args, at| string::map_text(str::to_uppercase, args, at) },
    "lower"         => { arity: Arity::Exact(1), func: |_, args, at| string::map_text(str::to_lowercase, args, at) },
    "trim"          => { arity: Arity::Exact(1), func: |_, args, at| string::map_text(|s| s.trim().to_string(), args, at) },
    "replace"       => { arity: Arity::Exact(3), func: |_, args, at| string::replace(args, at) },
    "str_split"     => { arity: Arity::Exact(2), func: |_, args, at| string::split(args, at) },
    "str_join"      => { arity: Arity::Exact(2), func: |_, args, at| string::join(args, at) },
    "chr"           => { arity: Arity::Exact(1), func: |_, args, at| string::chr(args, at) },
    "ord"           => { arity: Arity::Exact(1), func: |_, args, at| string::ord(args, at) },
    "array_push"    => { arity: Arity::Exact(2), func: |ctx, args, at| {
                             ctx.cycles.track_store(&args[0], &args[1]);
                             array::push(args, at)
                         } },
    "array_insert"  => { arity: Arity::Exact(3), func: |ctx, args, at| {
                             ctx.cycles.track_store(&args[0], &args[2]);
                             array::insert(args, at)
                         } },
    "array_pop"     => { arity: Arity::OneOf(&[1, 2]), func: |_, args, at| array::pop(args, at) },
    "array_remove"  => { arity: Arity::Exact(2), func: |_, args, at| array::remove(args, at) },
    "array_reverse" => { arity: Arity::Exact(1), func: |_, args, at| array::reverse(args, at) },
    "array_sort"    => { arity: Arity::Exact(1), func: |_, args, at| array::sort(args, at) },
    "file"          => { arity: Arity::Exact(2), func: file::open },
    "file_read"     => { arity: Arity::Exact(1), func: file::read },
    "file_readline" => { arity: Arity::Exact(1), func: file::read_line },
    "file_write"    => { arity: Arity::Exact(2), func: file::write },
    "file_close"    => { arity: Arity::Exact(1), func: file::close },
    "rand"          => { arity: Arity::Exact(0), func: |ctx, _, _| Ok(random::rand(ctx)) },
    "randint"       => { arity: Arity::Exact(2), func: random::randint },
    "time"          => { arity: Arity::Exact(0), func: |_, _, _| Ok(time::now()) },
    "ask"           => { arity: Arity::OneOf(&[0, 1]), func: |ctx, args, _| Ok(input::ask(ctx, args)) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Describes the accepted counts for an arity error message.
    fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => arr.iter()
                                   .map(ToString::to_string)
                                   .collect::<Vec<_>>()
                                   .join(" or "),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

impl BuiltinDef {
    /// Runs the builtin after checking the argument count.
    ///
    /// # Errors
    /// `ArityMismatch` if the count is not accepted, before the builtin runs;
    /// otherwise whatever the builtin raises.
    pub(crate) fn call(&self,
                       context: &mut Context,
                       args: &[Value],
                       position: Position)
                       -> EvalResult<Value> {
        if !self.arity.check(args.len()) {
            return Err(RuntimeError::ArityMismatch { name: self.name.to_string(),
                                                     expected: self.arity.describe(),
                                                     found: args.len(),
                                                     position });
        }
        (self.func)(context, args, position)
    }
}

impl std::fmt::Debug for BuiltinDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinDef")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let mut names = BUILTIN_FUNCTIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_FUNCTIONS.len());
    }

    #[test]
    fn arity_accepts_only_listed_counts() {
        assert!(Arity::OneOf(&[1, 2]).check(2));
        assert!(!Arity::OneOf(&[1, 2]).check(3));
        assert!(Arity::AtLeast(1).check(5));
        assert!(!Arity::AtLeast(1).check(0));
        assert_eq!(Arity::OneOf(&[0, 1]).describe(), "0 or 1");
    }
}
